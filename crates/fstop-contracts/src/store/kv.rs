use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};

/// String-keyed store of JSON values.
pub trait KeyValueStore {
    fn get(&mut self, key: &str) -> anyhow::Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&mut self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One JSON object on disk; each key holds one persisted value.
///
/// Reads always refresh from disk and writes merge only the dirty keys into
/// what is currently on disk, so two sessions sharing the file keep each
/// other's keys.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    payload: Option<Map<String, Value>>,
    dirty_keys: Vec<String>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            payload: None,
            dirty_keys: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        if self.dirty_keys.is_empty() {
            return Ok(());
        }
        let Some(payload) = &self.payload else {
            return Ok(());
        };

        let mut on_disk = read_json_object(&self.path).unwrap_or_default();
        for key in &self.dirty_keys {
            if let Some(value) = payload.get(key) {
                on_disk.insert(key.clone(), value.clone());
            }
        }
        write_json_object(&self.path, &on_disk)?;
        self.payload = Some(on_disk);
        self.dirty_keys.clear();
        Ok(())
    }

    fn refresh(&mut self) -> &mut Map<String, Value> {
        self.payload
            .insert(read_json_object(&self.path).unwrap_or_default())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&mut self, key: &str) -> anyhow::Result<Option<Value>> {
        if self.path.exists() {
            let raw = std::fs::read_to_string(&self.path)
                .with_context(|| format!("failed to read {}", self.path.display()))?;
            if serde_json::from_str::<Value>(&raw).is_err() {
                return Ok(None);
            }
        }
        Ok(self.refresh().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> anyhow::Result<()> {
        let payload = self.refresh();
        if payload.get(key) == Some(&value) {
            return Ok(());
        }
        payload.insert(key.to_string(), value);
        if !self.dirty_keys.iter().any(|dirty| dirty == key) {
            self.dirty_keys.push(key.to_string());
        }
        self.flush()
    }
}

fn read_json_object(path: &Path) -> Option<Map<String, Value>> {
    let raw = std::fs::read_to_string(path).ok()?;
    let parsed: Value = serde_json::from_str(&raw).ok()?;
    parsed.as_object().cloned()
}

fn write_json_object(path: &Path, payload: &Map<String, Value>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(
        path,
        serde_json::to_string_pretty(&Value::Object(payload.clone()))?,
    )
    .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{JsonFileStore, KeyValueStore, MemoryStore};

    #[test]
    fn memory_store_roundtrip() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("promptHistory")?, None);
        store.set("promptHistory", json!(["a"]))?;
        assert_eq!(store.get("promptHistory")?, Some(json!(["a"])));
        Ok(())
    }

    #[test]
    fn file_store_persists_between_instances() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("state.json");
        let mut store = JsonFileStore::new(&path);
        store.set("promptHistory", json!(["first"]))?;

        let mut reloaded = JsonFileStore::new(&path);
        assert_eq!(reloaded.get("promptHistory")?, Some(json!(["first"])));
        Ok(())
    }

    #[test]
    fn file_store_merges_with_concurrent_writer() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("state.json");
        let mut store_a = JsonFileStore::new(&path);
        let mut store_b = JsonFileStore::new(&path);

        store_a.set("promptHistory", json!(["a"]))?;
        store_b.set("customPresets", json!([]))?;
        store_a.set("promptHistory", json!(["b", "a"]))?;

        let mut reloaded = JsonFileStore::new(&path);
        assert_eq!(reloaded.get("promptHistory")?, Some(json!(["b", "a"])));
        assert_eq!(reloaded.get("customPresets")?, Some(json!([])));
        Ok(())
    }

    #[test]
    fn malformed_file_reads_as_absent() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("state.json");
        std::fs::write(&path, "{not json")?;

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("promptHistory")?, None);

        store.set("promptHistory", json!(["fresh"]))?;
        assert_eq!(store.get("promptHistory")?, Some(json!(["fresh"])));
        Ok(())
    }

    #[test]
    fn missing_file_reads_as_absent() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let mut store = JsonFileStore::new(temp.path().join("absent.json"));
        assert_eq!(store.get("customPresets")?, None);
        Ok(())
    }

    #[test]
    fn unwritable_location_surfaces_an_error() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory")?;

        let mut store = JsonFileStore::new(blocker.join("state.json"));
        assert!(store.set("promptHistory", json!([])).is_err());
        Ok(())
    }
}
