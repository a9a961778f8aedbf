use fstop_contracts::catalog::is_unset;
use fstop_contracts::form::{parse_datetime, AspectRatio, FormState};

const FALLBACK_SCENE: &str = "a compelling photography scene";
const FALLBACK_CAMERA: &str = "professional camera";
const FALLBACK_LENS: &str = "suitable lens";

/// Building blocks shared by every template, derived once per composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParts<'a> {
    pub scene: &'a str,
    pub location: String,
    pub datetime: String,
    pub genre: &'a str,
    pub camera: &'a str,
    pub lens: &'a str,
    pub focal: String,
    pub technical: String,
    pub mood: String,
    pub setups: String,
    pub lighting: Option<&'a str>,
    pub composition: Option<&'a str>,
    pub vibe: Option<&'a str>,
    pub product_subgenre: Option<&'a str>,
    pub aspect_ratio: &'a AspectRatio,
}

fn selected(value: &str) -> Option<&str> {
    (!is_unset(value)).then_some(value)
}

fn join_selected(values: &[&str]) -> String {
    values
        .iter()
        .copied()
        .filter(|value| !is_unset(value))
        .collect::<Vec<&str>>()
        .join(", ")
}

impl<'a> PromptParts<'a> {
    pub fn from_form(form: &'a FormState) -> Self {
        let scene = match form.scene.trim() {
            "" => FALLBACK_SCENE,
            trimmed => trimmed,
        };
        let location = match form.location.trim() {
            "" => String::new(),
            place => format!(" at {place}"),
        };
        let datetime = parse_datetime(&form.datetime)
            .map(|when| {
                format!(
                    " on {} at {}",
                    when.format("%-m/%-d/%Y"),
                    when.format("%I:%M %p")
                )
            })
            .unwrap_or_default();
        let iso = selected(&form.iso)
            .map(|iso| format!("ISO {iso}"))
            .unwrap_or_default();

        Self {
            scene,
            location,
            datetime,
            genre: form.genre.as_str(),
            camera: selected(&form.camera).unwrap_or(FALLBACK_CAMERA),
            lens: selected(&form.lens).unwrap_or(FALLBACK_LENS),
            focal: if form.focal > 0 {
                format!("{}mm", form.focal)
            } else {
                String::new()
            },
            technical: join_selected(&[&form.aperture, &form.shutter, &iso]),
            mood: join_selected(&[&form.film, &form.wb, &form.grain, &form.lens_char]),
            setups: form
                .active_lighting_setups
                .iter()
                .map(String::as_str)
                .collect::<Vec<&str>>()
                .join(", "),
            lighting: selected(&form.lighting),
            composition: selected(&form.composition),
            vibe: Some(form.vibe.trim()).filter(|vibe| !vibe.is_empty()),
            product_subgenre: if form.genre == "product" {
                selected(&form.product_subgenre)
            } else {
                None
            },
            aspect_ratio: &form.active_ar,
        }
    }

    /// Scene with its location and date suffixes.
    pub fn subject(&self) -> String {
        format!("{}{}{}", self.scene, self.location, self.datetime)
    }

    /// `" at 85mm"` when a focal length is set.
    pub fn at_focal(&self) -> String {
        if self.focal.is_empty() {
            String::new()
        } else {
            format!(" at {}", self.focal)
        }
    }
}

#[cfg(test)]
mod tests {
    use fstop_contracts::form::FormState;

    use super::PromptParts;

    #[test]
    fn unset_form_uses_every_fallback() {
        let mut form = FormState::default();
        form.lens = "None".to_string();
        form.focal = 0;
        let parts = PromptParts::from_form(&form);
        assert_eq!(parts.scene, "a compelling photography scene");
        assert_eq!(parts.camera, "professional camera");
        assert_eq!(parts.lens, "suitable lens");
        assert_eq!(parts.focal, "");
        assert_eq!(parts.technical, "");
        assert_eq!(parts.mood, "");
        assert_eq!(parts.location, "");
        assert_eq!(parts.datetime, "");
        assert!(parts.lighting.is_none());
    }

    #[test]
    fn clauses_skip_unset_members() {
        let mut form = FormState::default();
        form.aperture = "f/2.8".to_string();
        form.iso = "400".to_string();
        form.film = "Kodak Gold 400".to_string();
        form.lens_char = "Swirly Bokeh".to_string();
        let parts = PromptParts::from_form(&form);
        assert_eq!(parts.technical, "f/2.8, ISO 400");
        assert_eq!(parts.mood, "Kodak Gold 400, Swirly Bokeh");
    }

    #[test]
    fn scene_is_trimmed_and_suffixed() {
        let mut form = FormState::default();
        form.scene = "  old harbour  ".to_string();
        form.location = "Lisbon".to_string();
        form.datetime = "2024-05-01T18:30".to_string();
        let parts = PromptParts::from_form(&form);
        assert_eq!(
            parts.subject(),
            "old harbour at Lisbon on 5/1/2024 at 06:30 PM"
        );
    }

    #[test]
    fn unreadable_datetime_is_omitted() {
        let mut form = FormState::default();
        form.datetime = "tomorrow".to_string();
        assert_eq!(PromptParts::from_form(&form).datetime, "");
    }

    #[test]
    fn subgenre_only_applies_to_product() {
        let mut form = FormState::default();
        form.product_subgenre = "Watch Hero".to_string();
        assert!(PromptParts::from_form(&form).product_subgenre.is_none());
        form.genre = "product".to_string();
        assert_eq!(
            PromptParts::from_form(&form).product_subgenre,
            Some("Watch Hero")
        );
    }
}
