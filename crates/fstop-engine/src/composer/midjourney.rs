use fstop_contracts::models::TargetModel;

use super::{PromptParts, PromptTemplate, Variant};

/// Keyword blocks separated by periods, closed by parameter flags.
#[derive(Debug, Default, Clone, Copy)]
pub struct MidjourneyTemplate;

impl PromptTemplate for MidjourneyTemplate {
    fn model(&self) -> TargetModel {
        TargetModel::Midjourney
    }

    fn core(&self, parts: &PromptParts<'_>) -> String {
        let mut blocks = vec![format!("{}, {} photography", parts.subject(), parts.genre)];

        let mut shot = format!("Shot on {}, {} {}", parts.camera, parts.lens, parts.focal)
            .trim_end()
            .to_string();
        if !parts.technical.is_empty() {
            shot.push_str(", ");
            shot.push_str(&parts.technical);
        }
        blocks.push(shot);

        let style = [
            parts.lighting,
            Some(parts.setups.as_str()),
            parts.composition,
            Some(parts.mood.as_str()),
            parts.vibe,
            parts.product_subgenre,
        ]
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
        .collect::<Vec<&str>>();
        if !style.is_empty() {
            blocks.push(style.join(", "));
        }

        blocks.join(".\n\n")
    }

    fn finish(&self, core: &str, variant: Variant, parts: &PromptParts<'_>) -> String {
        let ar = parts.aspect_ratio.as_str();
        match variant {
            Variant::Main | Variant::Cinematic => {
                format!("{core}\n\n--style raw --s 250 --ar {ar}")
            }
            Variant::Gritty => format!("{core}, high contrast, gritty texture\n\n--style raw --ar {ar}"),
            Variant::Commercial => {
                format!("{core}, commercial lighting, hyper-detailed, 8k\n\n --ar {ar}")
            }
        }
    }
}
