use fstop_contracts::models::TargetModel;

use super::{join_paragraphs, PromptParts, PromptTemplate, Variant};

/// Directive instructions addressed to the model.
#[derive(Debug, Default, Clone, Copy)]
pub struct DalleTemplate;

impl DalleTemplate {
    fn look(parts: &PromptParts<'_>) -> String {
        let mut sentences = Vec::new();
        if let Some(lighting) = parts.lighting {
            if parts.setups.is_empty() {
                sentences.push(format!("Set lighting to {lighting}."));
            } else {
                sentences.push(format!(
                    "Set lighting to {lighting} combined with {}.",
                    parts.setups
                ));
            }
        }
        if let Some(composition) = parts.composition {
            sentences.push(format!("Frame the shot using {composition}."));
        }
        if !parts.mood.is_empty() {
            sentences.push(format!(
                "Grade the colors and texture to mimic {}.",
                parts.mood
            ));
        }
        if let Some(vibe) = parts.vibe {
            sentences.push(format!("Capture this specific mood: {vibe}."));
        }
        sentences.join(" ")
    }
}

impl PromptTemplate for DalleTemplate {
    fn model(&self) -> TargetModel {
        TargetModel::Dalle
    }

    fn core(&self, parts: &PromptParts<'_>) -> String {
        let mut physics = format!(
            "Simulate the physics of a {} photo taken with {} using a {} lens{}.",
            parts.genre,
            parts.camera,
            parts.lens,
            parts.at_focal()
        );
        if !parts.technical.is_empty() {
            physics.push_str(&format!(
                " Configure camera settings to: {}.",
                parts.technical
            ));
        }

        join_paragraphs(&[
            format!(
                "Please generate a photorealistic image of: {}.",
                parts.subject()
            ),
            physics,
            Self::look(parts),
            format!(
                "Ensure the image is strictly photorealistic with no text overlays or graphics. \
                 The final output should be a {}.",
                parts.aspect_ratio.description()
            ),
        ])
    }

    fn finish(&self, core: &str, variant: Variant, _parts: &PromptParts<'_>) -> String {
        let tail = match variant {
            Variant::Main => return core.to_string(),
            Variant::Cinematic => "Prioritize a dramatic, cinematic look.",
            Variant::Gritty => "Emphasize raw textures and high contrast.",
            Variant::Commercial => "Ensure perfect, clean commercial lighting.",
        };
        format!("{core}\n\n{tail}")
    }
}

#[cfg(test)]
mod tests {
    use fstop_contracts::form::{AspectRatio, FormState};

    use super::super::{PromptParts, PromptTemplate};
    use super::DalleTemplate;

    #[test]
    fn core_uses_directives() {
        let mut form = FormState::default();
        form.scene = "a lighthouse keeper".to_string();
        form.location = "Cornwall".to_string();
        form.camera = "Canon EOS R5".to_string();
        form.shutter = "1/250s".to_string();
        form.composition = "Rule of Thirds".to_string();
        form.wb = "Daylight (5600K)".to_string();
        form.vibe = "weathered".to_string();
        form.active_ar = AspectRatio::Tall;

        let core = DalleTemplate.core(&PromptParts::from_form(&form));
        assert_eq!(
            core,
            "Please generate a photorealistic image of: a lighthouse keeper at Cornwall.\n\n\
             Simulate the physics of a portrait photo taken with Canon EOS R5 using a 50mm prime lens at 50mm. Configure camera settings to: 1/250s.\n\n\
             Frame the shot using Rule of Thirds. Grade the colors and texture to mimic Daylight (5600K). Capture this specific mood: weathered.\n\n\
             Ensure the image is strictly photorealistic with no text overlays or graphics. The final output should be a tall vertical portrait (9:16)."
        );
    }

    #[test]
    fn subgenre_is_not_phrased() {
        let mut form = FormState::default();
        form.genre = "product".to_string();
        form.product_subgenre = "Watch Hero".to_string();
        let outputs = DalleTemplate.compose(&PromptParts::from_form(&form));
        assert!(!outputs.main.contains("Watch Hero"));
    }

    #[test]
    fn variants_append_instructions() {
        let form = FormState::default();
        let outputs = DalleTemplate.compose(&PromptParts::from_form(&form));
        assert!(outputs
            .cinematic
            .ends_with("\n\nPrioritize a dramatic, cinematic look."));
        assert!(outputs
            .commercial
            .ends_with("\n\nEnsure perfect, clean commercial lighting."));
        assert!(outputs.main.ends_with("(16:9)."));
    }
}
