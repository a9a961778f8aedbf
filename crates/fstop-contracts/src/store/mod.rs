mod history;
mod kv;

use serde_json::Value;

use crate::presets::Preset;

pub use history::{prompt_diff, HistoryLog, HISTORY_LIMIT};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};

pub const CUSTOM_PRESETS_KEY: &str = "customPresets";
pub const HISTORY_KEY: &str = "promptHistory";

/// Reads the history. A missing or malformed value is an empty history; only
/// an unreadable store is an error.
pub fn load_history(store: &mut dyn KeyValueStore) -> anyhow::Result<HistoryLog> {
    let entries = store
        .get(HISTORY_KEY)?
        .and_then(|value| serde_json::from_value::<Vec<String>>(value).ok())
        .unwrap_or_default();
    Ok(HistoryLog::new(entries))
}

pub fn save_history(store: &mut dyn KeyValueStore, history: &HistoryLog) -> anyhow::Result<()> {
    store.set(HISTORY_KEY, serde_json::to_value(history)?)
}

/// Reads saved presets, skipping entries that do not parse.
pub fn load_custom_presets(store: &mut dyn KeyValueStore) -> anyhow::Result<Vec<Preset>> {
    let Some(Value::Array(items)) = store.get(CUSTOM_PRESETS_KEY)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Preset>(item).ok())
        .collect())
}

pub fn save_custom_presets(store: &mut dyn KeyValueStore, presets: &[Preset]) -> anyhow::Result<()> {
    store.set(CUSTOM_PRESETS_KEY, serde_json::to_value(presets)?)
}
