mod dalle;
mod flux;
mod midjourney;
mod parts;

use std::fmt;
use std::str::FromStr;

use fstop_contracts::form::FormState;
use fstop_contracts::models::TargetModel;
use serde::{Deserialize, Serialize};

pub use dalle::DalleTemplate;
pub use flux::FluxTemplate;
pub use midjourney::MidjourneyTemplate;
pub use parts::PromptParts;

/// The four prompts produced by one composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSet {
    pub main: String,
    pub cinematic: String,
    pub gritty: String,
    pub commercial: String,
}

impl OutputSet {
    pub fn get(&self, variant: Variant) -> &str {
        match variant {
            Variant::Main => &self.main,
            Variant::Cinematic => &self.cinematic,
            Variant::Gritty => &self.gritty,
            Variant::Commercial => &self.commercial,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variant, &str)> {
        Variant::ALL
            .iter()
            .map(move |variant| (*variant, self.get(*variant)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Main,
    Cinematic,
    Gritty,
    Commercial,
}

impl Variant {
    pub const ALL: &'static [Variant] = &[
        Variant::Main,
        Variant::Cinematic,
        Variant::Gritty,
        Variant::Commercial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Main => "main",
            Variant::Cinematic => "cinematic",
            Variant::Gritty => "gritty",
            Variant::Commercial => "commercial",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Main => "Master Prompt",
            Variant::Cinematic => "Cinematic",
            Variant::Gritty => "Gritty / Raw",
            Variant::Commercial => "Commercial / Product",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "main" | "master" => Ok(Variant::Main),
            "cinematic" | "cine" => Ok(Variant::Cinematic),
            "gritty" | "grit" | "raw" => Ok(Variant::Gritty),
            "commercial" | "prod" | "product" => Ok(Variant::Commercial),
            other => Err(format!(
                "Unknown variant '{other}'. Expected main, cinematic, gritty or commercial."
            )),
        }
    }
}

/// Phrasing rules for one target model.
pub trait PromptTemplate: Send + Sync {
    fn model(&self) -> TargetModel;

    /// Shared block every variant starts from.
    fn core(&self, parts: &PromptParts<'_>) -> String;

    /// Appends the variant-specific tail to `core`.
    fn finish(&self, core: &str, variant: Variant, parts: &PromptParts<'_>) -> String;

    fn compose(&self, parts: &PromptParts<'_>) -> OutputSet {
        let core = self.core(parts);
        OutputSet {
            main: self.finish(&core, Variant::Main, parts),
            cinematic: self.finish(&core, Variant::Cinematic, parts),
            gritty: self.finish(&core, Variant::Gritty, parts),
            commercial: self.finish(&core, Variant::Commercial, parts),
        }
    }
}

static MIDJOURNEY: MidjourneyTemplate = MidjourneyTemplate;
static FLUX: FluxTemplate = FluxTemplate;
static DALLE: DalleTemplate = DalleTemplate;

pub fn template_for(model: TargetModel) -> &'static dyn PromptTemplate {
    match model {
        TargetModel::Midjourney => &MIDJOURNEY,
        TargetModel::Flux => &FLUX,
        TargetModel::Dalle => &DALLE,
    }
}

/// Builds all four variants for `form` in `model`'s phrasing. Pure.
pub fn compose(form: &FormState, model: TargetModel) -> OutputSet {
    template_for(model).compose(&PromptParts::from_form(form))
}

/// Joins the non-blank sentence groups of the prose templates.
pub(crate) fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use fstop_contracts::catalog::LensCatalog;
    use fstop_contracts::form::{AspectRatio, FormState};
    use fstop_contracts::models::TargetModel;

    use super::{compose, template_for, Variant};

    fn watch_hero() -> FormState {
        let mut form = FormState::default();
        form.set_genre("product", &LensCatalog::default());
        form.product_subgenre = "Watch Hero".to_string();
        form.aperture = "f/11".to_string();
        form.active_ar = AspectRatio::Square;
        form
    }

    fn all_unset() -> FormState {
        let mut form = FormState::default();
        form.scene = "   ".to_string();
        form.camera = "None".to_string();
        form.lens = "None".to_string();
        form.focal = 0;
        form
    }

    #[test]
    fn watch_hero_midjourney_scenario() {
        let outputs = compose(&watch_hero(), TargetModel::Midjourney);
        assert!(outputs.main.contains("Watch Hero"));
        assert!(outputs.main.ends_with("--ar 1:1"));
        let technical = outputs
            .main
            .split(".\n\n")
            .find(|block| block.starts_with("Shot on"))
            .unwrap_or_default();
        assert!(technical.contains("f/11"));
    }

    #[test]
    fn every_model_falls_back_when_unset() {
        let form = all_unset();
        for model in [TargetModel::Midjourney, TargetModel::Flux, TargetModel::Dalle] {
            let outputs = compose(&form, model);
            for (_, prompt) in outputs.iter() {
                assert!(!prompt.trim().is_empty());
                assert!(prompt.contains("professional camera"), "{model}: {prompt}");
                assert!(prompt.contains("suitable lens"), "{model}: {prompt}");
                assert!(prompt.contains("a compelling photography scene"));
                assert!(!prompt.contains("None"), "{model}: {prompt}");
            }
        }
    }

    #[test]
    fn compose_is_deterministic() {
        let mut form = watch_hero();
        form.toggle_lighting_setup("Soft diffused light from a large octabox");
        form.toggle_lighting_setup("Rim light separation");
        for model in [TargetModel::Midjourney, TargetModel::Flux, TargetModel::Dalle] {
            assert_eq!(compose(&form, model), compose(&form, model));
        }
    }

    #[test]
    fn switching_model_leaves_form_untouched() {
        let form = watch_hero();
        let before = form.clone();
        let mj = compose(&form, TargetModel::Midjourney);
        let flux = compose(&form, TargetModel::Flux);
        assert_ne!(mj.main, flux.main);
        assert_eq!(form, before);
    }

    #[test]
    fn aspect_ratio_description_is_total() {
        let cases = [
            (AspectRatio::Wide, "wide cinematic landscape (16:9)"),
            (AspectRatio::Tall, "tall vertical portrait (9:16)"),
            (AspectRatio::Square, "square (1:1)"),
            (AspectRatio::Standard, "standard photographic aspect ratio (4:3)"),
            (AspectRatio::UltraWide, "ultra-wide anamorphic aspect ratio (21:9)"),
            (AspectRatio::Other("3:2".to_string()), "standard aspect ratio"),
        ];
        for (ratio, phrase) in cases {
            let mut form = FormState::default();
            form.active_ar = ratio;
            let flux = compose(&form, TargetModel::Flux);
            assert!(flux.main.ends_with(&format!("Aspect ratio is {phrase}.")));
        }
    }

    #[test]
    fn templates_report_their_model() {
        for model in [TargetModel::Midjourney, TargetModel::Flux, TargetModel::Dalle] {
            assert_eq!(template_for(model).model(), model);
        }
    }

    #[test]
    fn variant_names_parse() {
        assert_eq!("master".parse::<Variant>(), Ok(Variant::Main));
        assert_eq!("PROD".parse::<Variant>(), Ok(Variant::Commercial));
        assert!("poster".parse::<Variant>().is_err());
    }
}
