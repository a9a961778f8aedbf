use fstop_contracts::models::TargetModel;

use super::{join_paragraphs, PromptParts, PromptTemplate, Variant};

/// Descriptive natural-language paragraphs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FluxTemplate;

impl FluxTemplate {
    fn look(parts: &PromptParts<'_>) -> String {
        let mut sentences = Vec::new();
        if let Some(lighting) = parts.lighting {
            if parts.setups.is_empty() {
                sentences.push(format!("The lighting is {lighting}."));
            } else {
                sentences.push(format!("The lighting is {lighting} featuring {}.", parts.setups));
            }
        }
        if let Some(composition) = parts.composition {
            sentences.push(format!("Composition utilizes {composition}."));
        }
        if !parts.mood.is_empty() {
            sentences.push(format!("The image has the look of {}.", parts.mood));
        }
        if let Some(vibe) = parts.vibe {
            sentences.push(format!("Overall vibe: {vibe}."));
        }
        if let Some(subgenre) = parts.product_subgenre {
            sentences.push(format!("Style: {subgenre}."));
        }
        sentences.join(" ")
    }
}

impl PromptTemplate for FluxTemplate {
    fn model(&self) -> TargetModel {
        TargetModel::Flux
    }

    fn core(&self, parts: &PromptParts<'_>) -> String {
        let mut camera = format!(
            "This is a {} photograph shot on a {} with a {} lens{}.",
            parts.genre,
            parts.camera,
            parts.lens,
            parts.at_focal()
        );
        if !parts.technical.is_empty() {
            camera.push_str(&format!(" Camera settings: {}.", parts.technical));
        }

        join_paragraphs(&[
            format!("{}.", parts.subject()),
            camera,
            Self::look(parts),
            format!("Aspect ratio is {}.", parts.aspect_ratio.description()),
        ])
    }

    fn finish(&self, core: &str, variant: Variant, _parts: &PromptParts<'_>) -> String {
        let tail = match variant {
            Variant::Main => return core.to_string(),
            Variant::Cinematic => "The style is cinematic and realistic.",
            Variant::Gritty => "The image has high contrast and gritty texture.",
            Variant::Commercial => "The lighting is clean and commercial with hyper-detail.",
        };
        format!("{core}\n\n{tail}")
    }
}
