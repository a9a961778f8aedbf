use super::registry::{ModelRegistry, ModelSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub model: ModelSpec,
    pub requested: Option<String>,
    pub fallback_reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ModelSelector {
    pub registry: ModelRegistry,
}

impl ModelSelector {
    pub fn new(registry: Option<ModelRegistry>) -> Self {
        Self {
            registry: registry.unwrap_or_default(),
        }
    }

    /// Picks the requested model, falling back to the first registered one
    /// with a reason when the request is missing or unknown.
    pub fn select(&self, requested: Option<&str>) -> Result<ModelSelection, String> {
        let (fallback_reason, requested_text) = match requested
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            Some(requested_value) => {
                if let Some(model) = self.registry.resolve(requested_value) {
                    return Ok(ModelSelection {
                        model: model.clone(),
                        requested: Some(requested_value.to_string()),
                        fallback_reason: None,
                    });
                }
                (
                    Some(format!(
                        "Requested model '{requested_value}' is not a prompt target."
                    )),
                    Some(requested_value.to_string()),
                )
            }
            None => (Some("No model specified; using default.".to_string()), None),
        };

        let Some(model) = self.registry.list().next().cloned() else {
            return Err("No prompt targets are registered.".to_string());
        };
        Ok(ModelSelection {
            model,
            requested: requested_text,
            fallback_reason,
        })
    }
}
