use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Text-to-image systems whose prompt phrasing the composer targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetModel {
    Midjourney,
    Flux,
    Dalle,
}

impl TargetModel {
    pub fn name(self) -> &'static str {
        match self {
            TargetModel::Midjourney => "midjourney",
            TargetModel::Flux => "flux",
            TargetModel::Dalle => "dalle",
        }
    }
}

impl Default for TargetModel {
    fn default() -> Self {
        TargetModel::Midjourney
    }
}

impl fmt::Display for TargetModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetModel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' ', '.'], "").as_str() {
            "midjourney" | "mj" => Ok(TargetModel::Midjourney),
            "flux" => Ok(TargetModel::Flux),
            "dalle" | "dalle3" => Ok(TargetModel::Dalle),
            _ => Err(format!("Unknown model '{}'.", raw.trim())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub name: String,
    pub model: TargetModel,
    pub label: String,
    pub phrasing: String,
    pub aspect_flag: bool,
}

#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: IndexMap<String, ModelSpec>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ModelRegistry {
    pub fn new(models: Option<IndexMap<String, ModelSpec>>) -> Self {
        Self {
            models: models.unwrap_or_else(default_models),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ModelSpec> {
        self.models.get(name)
    }

    pub fn list(&self) -> impl Iterator<Item = &ModelSpec> {
        self.models.values()
    }

    /// Resolves a user-facing name or alias to a registered spec.
    pub fn resolve(&self, raw: &str) -> Option<&ModelSpec> {
        if let Some(spec) = self.get(raw.trim()) {
            return Some(spec);
        }
        let target = raw.parse::<TargetModel>().ok()?;
        self.models.values().find(|spec| spec.model == target)
    }
}

fn default_models() -> IndexMap<String, ModelSpec> {
    let mut map = IndexMap::new();

    let mut insert = |model: TargetModel, label: &str, phrasing: &str, aspect_flag: bool| {
        map.insert(
            model.name().to_string(),
            ModelSpec {
                name: model.name().to_string(),
                model,
                label: label.to_string(),
                phrasing: phrasing.to_string(),
                aspect_flag,
            },
        );
    };

    insert(
        TargetModel::Midjourney,
        "Midjourney",
        "comma-separated keywords with trailing parameter flags",
        true,
    );
    insert(
        TargetModel::Flux,
        "Flux",
        "descriptive natural-language sentences",
        false,
    );
    insert(
        TargetModel::Dalle,
        "DALL-E",
        "directive instructions addressed to the model",
        false,
    );

    map
}
