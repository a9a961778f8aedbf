use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Local, SecondsFormat};
use fstop_contracts::form::FormState;
use fstop_contracts::models::TargetModel;
use serde::Serialize;

use crate::ambiance::Theme;
use crate::composer::OutputSet;

pub const RECIPE_SCHEMA_VERSION: u64 = 1;

/// JSON sidecar written next to every exported card.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeReceipt {
    pub schema_version: u64,
    pub exported_at: String,
    pub model: TargetModel,
    pub form: FormState,
    pub outputs: Option<OutputSet>,
    pub theme: Theme,
    pub artifacts: RecipeArtifacts,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeArtifacts {
    pub image_path: String,
    pub receipt_path: String,
}

pub fn build_recipe_receipt(
    form: &FormState,
    model: TargetModel,
    outputs: Option<&OutputSet>,
    theme: &Theme,
    image_path: &Path,
    receipt_path: &Path,
    at: &DateTime<Local>,
) -> RecipeReceipt {
    RecipeReceipt {
        schema_version: RECIPE_SCHEMA_VERSION,
        exported_at: at.to_rfc3339_opts(SecondsFormat::Millis, false),
        model,
        form: form.clone(),
        outputs: outputs.cloned(),
        theme: theme.clone(),
        artifacts: RecipeArtifacts {
            image_path: image_path.to_string_lossy().to_string(),
            receipt_path: receipt_path.to_string_lossy().to_string(),
        },
    }
}

pub fn write_recipe_receipt(path: &Path, receipt: &RecipeReceipt) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(receipt)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
