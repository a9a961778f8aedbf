use std::path::Path;

use anyhow::Result;
use chrono::Local;
use fstop_contracts::catalog::{lighting_setup, CatalogField, LensCatalog};
use fstop_contracts::events::{EventPayload, EventWriter};
use fstop_contracts::form::{AspectRatio, FormField, FormState, LockField};
use fstop_contracts::models::{ModelSelection, ModelSelector, TargetModel};
use fstop_contracts::presets::{apply_preset, Preset, PresetLibrary};
use fstop_contracts::store::{
    load_custom_presets, load_history, prompt_diff, save_custom_presets, save_history,
    HistoryLog, KeyValueStore, CUSTOM_PRESETS_KEY, HISTORY_KEY,
};
use rand::Rng;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::ambiance::{compute_theme, Theme};
use crate::composer::{compose, OutputSet};
use crate::recipe_card::{export_recipe, RecipeExport};

/// One interactive session: the form being edited, the selected model, the
/// last outputs, and the persisted history and custom presets.
///
/// Storage and the event log are best effort. A failed read or write never
/// reaches the caller; storage misses become `storage_unavailable` events,
/// log misses are counted by the writer, and the in-memory state stays
/// authoritative. Only recipe export can fail.
pub struct Studio {
    form: FormState,
    model: TargetModel,
    outputs: Option<OutputSet>,
    presets: PresetLibrary,
    history: HistoryLog,
    store: Box<dyn KeyValueStore>,
    events: EventWriter,
    lenses: LensCatalog,
    model_selector: ModelSelector,
    last_fallback_reason: Option<String>,
}

impl Studio {
    pub fn open(store: Box<dyn KeyValueStore>, events: EventWriter) -> Self {
        let mut studio = Self {
            form: FormState::default(),
            model: TargetModel::default(),
            outputs: None,
            presets: PresetLibrary::default(),
            history: HistoryLog::default(),
            store,
            events,
            lenses: LensCatalog::default(),
            model_selector: ModelSelector::new(None),
            last_fallback_reason: None,
        };

        match load_history(studio.store.as_mut()) {
            Ok(history) => studio.history = history,
            Err(err) => studio.storage_unavailable("read", HISTORY_KEY, &err),
        }
        match load_custom_presets(studio.store.as_mut()) {
            Ok(custom) => studio.presets.set_custom(custom),
            Err(err) => studio.storage_unavailable("read", CUSTOM_PRESETS_KEY, &err),
        }

        studio.events.record(
            "session_started",
            map_object(json!({
                "model": studio.model.name(),
                "history_entries": studio.history.len(),
                "custom_presets": studio.presets.custom().len(),
            })),
        );
        studio
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn model(&self) -> TargetModel {
        self.model
    }

    pub fn outputs(&self) -> Option<&OutputSet> {
        self.outputs.as_ref()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn presets(&self) -> &PresetLibrary {
        &self.presets
    }

    pub fn lenses(&self) -> &LensCatalog {
        &self.lenses
    }

    pub fn model_selector(&self) -> &ModelSelector {
        &self.model_selector
    }

    pub fn last_fallback_reason(&self) -> Option<&str> {
        self.last_fallback_reason.as_deref()
    }

    pub fn event_writer(&self) -> EventWriter {
        self.events.clone()
    }

    pub fn set_field(&mut self, field: FormField, raw: &str) -> Result<(), String> {
        self.form.update(field, raw, &self.lenses)
    }

    pub fn set_scene(&mut self, scene: &str) {
        self.form.scene = scene.to_string();
    }

    pub fn set_genre(&mut self, raw: &str) -> Result<(), String> {
        self.set_field(FormField::Catalog(CatalogField::Genre), raw)
    }

    pub fn set_lock(&mut self, field: LockField, locked: bool) {
        self.form.set_lock(field, locked);
    }

    pub fn set_aspect_ratio(&mut self, raw: &str) -> Result<(), String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(format!(
                "Aspect ratio required. Options: {}",
                AspectRatio::PRESETS
                    .iter()
                    .map(AspectRatio::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        self.form.active_ar = AspectRatio::from(trimmed.to_string());
        Ok(())
    }

    /// Toggles a setup by catalog label or phrase. An active phrase outside
    /// the catalog (from a preset) can still be switched off.
    pub fn toggle_lighting_setup(&mut self, query: &str) -> Result<bool, String> {
        let wanted = query.trim();
        let phrase = lighting_setup(wanted)
            .map(|setup| setup.phrase.to_string())
            .or_else(|| {
                self.form
                    .active_lighting_setups
                    .iter()
                    .find(|active| active.eq_ignore_ascii_case(wanted))
                    .cloned()
            })
            .ok_or_else(|| format!("Unknown lighting setup '{wanted}'. Try /setups."))?;
        Ok(self.form.toggle_lighting_setup(&phrase))
    }

    /// Switches the phrasing target. The form is never touched.
    pub fn set_model(&mut self, requested: Option<&str>) -> Result<ModelSelection, String> {
        let selection = self.model_selector.select(requested)?;
        self.model = selection.model.model;
        self.last_fallback_reason = selection.fallback_reason.clone();
        Ok(selection)
    }

    pub fn search_presets(&self, term: &str) -> Vec<&Preset> {
        self.presets.search(term)
    }

    /// Applies the preset matching `query` by id or title; `None` when nothing matches.
    pub fn apply_preset(&mut self, query: &str) -> Option<Preset> {
        let preset = self.presets.find(query).cloned()?;
        self.apply(&preset, "apply");
        Some(preset)
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Preset> {
        let preset = self.presets.random(rng).cloned()?;
        self.apply(&preset, "random");
        Some(preset)
    }

    /// Back to manual mode: clears style, vibe and setups, keeps everything else.
    pub fn reset(&mut self) {
        if let Some(manual) = self.presets.manual_mode().cloned() {
            self.apply(&manual, "reset");
        }
    }

    fn apply(&mut self, preset: &Preset, source: &str) {
        self.form = apply_preset(preset, &self.form);
        self.events.record(
            "preset_applied",
            map_object(json!({
                "preset_id": preset.id,
                "title": preset.title,
                "source": source,
            })),
        );
    }

    /// Snapshots the form as a custom preset. A blank name is a silent no-op.
    pub fn save_custom_preset(&mut self, name: &str) -> Option<Preset> {
        let saved = self.presets.save_custom(name, &self.form).cloned()?;
        self.persist_custom_presets();
        self.events.record(
            "preset_saved",
            map_object(json!({
                "preset_id": saved.id,
                "title": saved.title,
            })),
        );
        Some(saved)
    }

    pub fn delete_custom_preset(&mut self, id: &str) -> Option<Preset> {
        let removed = self.presets.delete_custom(id.trim())?;
        self.persist_custom_presets();
        self.events.record(
            "preset_deleted",
            map_object(json!({
                "preset_id": removed.id,
                "title": removed.title,
            })),
        );
        Some(removed)
    }

    /// Composes without touching history.
    pub fn preview(&self) -> OutputSet {
        compose(&self.form, self.model)
    }

    /// Composes the four variants and records the master prompt in history.
    pub fn generate(&mut self) -> &OutputSet {
        let outputs = compose(&self.form, self.model);
        let diff = prompt_diff(self.history.latest(), &outputs.main);
        self.history.record(outputs.main.clone());
        self.persist_history();

        self.events.record(
            "prompt_generated",
            map_object(json!({
                "model": self.model.name(),
                "preset": self.form.photographer_style,
                "sha256": prompt_fingerprint(&outputs.main),
                "chars": outputs.main.chars().count(),
                "history_entries": self.history.len(),
                "diff": diff,
            })),
        );
        self.outputs.insert(outputs)
    }

    pub fn clear_history(&mut self) {
        let cleared = self.history.len();
        self.history.clear();
        self.persist_history();
        self.events
            .record("history_cleared", map_object(json!({ "cleared": cleared })));
    }

    pub fn theme(&self) -> Theme {
        compute_theme(
            &self.form.lighting,
            &self.form.film,
            &self.form.iso,
            &self.form.grain,
        )
    }

    pub fn export_recipe(&self, out_dir: &Path) -> Result<RecipeExport> {
        let export = export_recipe(
            out_dir,
            &self.form,
            self.model,
            self.outputs.as_ref(),
            &self.theme(),
            Local::now(),
        )?;
        self.events.record(
            "recipe_exported",
            map_object(json!({
                "image_path": export.image_path.to_string_lossy(),
                "receipt_path": export.receipt_path.to_string_lossy(),
                "has_prompt": self.outputs.is_some(),
            })),
        );
        Ok(export)
    }

    fn persist_history(&mut self) {
        if let Err(err) = save_history(self.store.as_mut(), &self.history) {
            self.storage_unavailable("write", HISTORY_KEY, &err);
        }
    }

    fn persist_custom_presets(&mut self) {
        if let Err(err) = save_custom_presets(self.store.as_mut(), self.presets.custom()) {
            self.storage_unavailable("write", CUSTOM_PRESETS_KEY, &err);
        }
    }

    fn storage_unavailable(&self, op: &str, key: &str, err: &anyhow::Error) {
        self.events.record(
            "storage_unavailable",
            map_object(json!({
                "op": op,
                "key": key,
                "error": format!("{err:#}"),
            })),
        );
    }
}

pub fn prompt_fingerprint(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    hex::encode(hasher.finalize())
}

fn map_object(value: Value) -> EventPayload {
    value.as_object().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::bail;
    use fstop_contracts::catalog::CatalogField;
    use fstop_contracts::events::EventWriter;
    use fstop_contracts::form::{FormField, LockField};
    use fstop_contracts::models::TargetModel;
    use fstop_contracts::store::{JsonFileStore, KeyValueStore, MemoryStore, HISTORY_LIMIT};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::Value;

    use super::{prompt_fingerprint, Studio};

    struct UnavailableStore;

    impl KeyValueStore for UnavailableStore {
        fn get(&mut self, _key: &str) -> anyhow::Result<Option<Value>> {
            bail!("storage disabled")
        }

        fn set(&mut self, _key: &str, _value: Value) -> anyhow::Result<()> {
            bail!("quota exceeded")
        }
    }

    fn memory_studio() -> Studio {
        Studio::open(Box::new(MemoryStore::new()), EventWriter::disabled("test"))
    }

    fn read_events(path: &std::path::Path) -> anyhow::Result<Vec<Value>> {
        let content = fs::read_to_string(path)?;
        content
            .lines()
            .map(|line| serde_json::from_str(line).map_err(Into::into))
            .collect()
    }

    #[test]
    fn twenty_five_generations_keep_newest_twenty() -> anyhow::Result<()> {
        let mut studio = memory_studio();
        for idx in 0..25 {
            studio.set_scene(&format!("frame {idx}"));
            studio.generate();
        }
        assert_eq!(studio.history().len(), HISTORY_LIMIT);
        assert!(studio
            .history()
            .latest()
            .unwrap_or_default()
            .starts_with("frame 24"));
        assert!(studio
            .history()
            .entries()
            .last()
            .map(|entry| entry.starts_with("frame 5"))
            .unwrap_or(false));
        Ok(())
    }

    #[test]
    fn blank_preset_name_is_ignored() -> anyhow::Result<()> {
        let mut studio = memory_studio();
        assert!(studio.save_custom_preset("   ").is_none());
        assert!(studio.presets().custom().is_empty());
        Ok(())
    }

    #[test]
    fn state_survives_reopening_the_store() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let state_path = temp.path().join("state.json");

        let saved_id = {
            let mut studio = Studio::open(
                Box::new(JsonFileStore::new(&state_path)),
                EventWriter::disabled("first"),
            );
            studio.set_field(FormField::Catalog(CatalogField::Film), "Kodak Portra 400")
                .map_err(anyhow::Error::msg)?;
            studio.generate();
            let saved = studio
                .save_custom_preset("Warm Walk")
                .ok_or_else(|| anyhow::anyhow!("preset not saved"))?;
            saved.id
        };

        let mut reopened = Studio::open(
            Box::new(JsonFileStore::new(&state_path)),
            EventWriter::disabled("second"),
        );
        assert_eq!(reopened.history().len(), 1);
        assert_eq!(reopened.presets().custom().len(), 1);
        let applied = reopened
            .apply_preset(&saved_id)
            .ok_or_else(|| anyhow::anyhow!("saved preset not found"))?;
        assert_eq!(applied.title, "Warm Walk");
        assert_eq!(reopened.form().film, "Kodak Portra 400");
        Ok(())
    }

    #[test]
    fn storage_failures_are_logged_not_raised() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let events_path = temp.path().join("events.jsonl");
        let mut studio = Studio::open(
            Box::new(UnavailableStore),
            EventWriter::new(&events_path, "offline"),
        );

        studio.generate();
        assert!(studio.save_custom_preset("Kept In Memory").is_some());
        assert_eq!(studio.history().len(), 1);
        assert_eq!(studio.presets().custom().len(), 1);

        let events = read_events(&events_path)?;
        let failures = events
            .iter()
            .filter(|event| event["type"] == "storage_unavailable")
            .count();
        assert_eq!(failures, 4);
        assert!(events.iter().any(|event| event["type"] == "prompt_generated"));
        Ok(())
    }

    #[test]
    fn unwritable_event_log_keeps_prompts_and_history() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let events_path = temp.path().join("events.jsonl");
        let mut studio = Studio::open(
            Box::new(MemoryStore::new()),
            EventWriter::new(&events_path, "blocked"),
        );
        fs::remove_file(&events_path)?;
        fs::create_dir(&events_path)?;

        studio.set_scene("harbour");
        assert!(studio.generate().main.contains("harbour"));
        assert!(studio
            .outputs()
            .map(|outputs| outputs.main.contains("harbour"))
            .unwrap_or(false));
        assert_eq!(studio.history().len(), 1);

        assert!(studio.apply_preset("Saul Leiter").is_some());
        assert!(studio.save_custom_preset("Harbour Walk").is_some());
        studio.clear_history();
        assert!(studio.history().is_empty());
        assert!(studio.event_writer().dropped() >= 4);
        Ok(())
    }

    #[test]
    fn generation_event_carries_fingerprint_and_diff() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let events_path = temp.path().join("events.jsonl");
        let mut studio = Studio::open(
            Box::new(MemoryStore::new()),
            EventWriter::new(&events_path, "diffs"),
        );
        let first = studio.generate().main.clone();
        studio.set_field(FormField::Catalog(CatalogField::Camera), "Leica M3")
            .map_err(anyhow::Error::msg)?;
        studio.generate();

        let generated = read_events(&events_path)?
            .into_iter()
            .filter(|event| event["type"] == "prompt_generated")
            .collect::<Vec<_>>();
        assert_eq!(generated.len(), 2);
        assert_eq!(generated[0]["sha256"], prompt_fingerprint(&first).as_str());
        assert!(generated[0]["diff"].is_null());
        let diff_lines = generated[1]["diff"]
            .as_array()
            .map(|lines| lines.len())
            .unwrap_or(0);
        assert!(diff_lines > 0);
        Ok(())
    }

    #[test]
    fn switching_model_only_changes_phrasing() -> anyhow::Result<()> {
        let mut studio = memory_studio();
        studio.set_genre("landscape").map_err(anyhow::Error::msg)?;
        let before = studio.form().clone();
        let midjourney = studio.preview();

        let selection = studio.set_model(Some("flux")).map_err(anyhow::Error::msg)?;
        assert_eq!(selection.model.model, TargetModel::Flux);
        assert_eq!(studio.form(), &before);
        assert_ne!(studio.preview().main, midjourney.main);

        studio.set_model(Some("sdxl")).map_err(anyhow::Error::msg)?;
        assert_eq!(studio.model(), TargetModel::Midjourney);
        assert!(studio.last_fallback_reason().is_some());
        Ok(())
    }

    #[test]
    fn locked_camera_survives_randomize_and_reset() -> anyhow::Result<()> {
        let mut studio = memory_studio();
        studio.set_field(FormField::Catalog(CatalogField::Camera), "Leica M3")
            .map_err(anyhow::Error::msg)?;
        studio.set_lock(LockField::Camera, true);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let applied = studio.randomize(&mut rng);
            assert!(applied.map(|preset| preset.id != "none").unwrap_or(false));
            assert_eq!(studio.form().camera, "Leica M3");
        }

        studio.reset();
        assert_eq!(studio.form().photographer_style, "None");
        assert!(studio.form().vibe.is_empty());
        assert!(studio.form().active_lighting_setups.is_empty());
        assert_eq!(studio.form().camera, "Leica M3");
        Ok(())
    }

    #[test]
    fn setups_toggle_by_label_or_active_phrase() -> anyhow::Result<()> {
        let mut studio = memory_studio();
        studio.apply_preset("Saul Leiter");
        let from_preset = studio
            .form()
            .active_lighting_setups
            .first()
            .cloned()
            .unwrap_or_default();
        assert_eq!(studio.toggle_lighting_setup(&from_preset), Ok(false));
        assert!(studio.form().active_lighting_setups.is_empty());
        assert!(studio.toggle_lighting_setup("not a setup").is_err());
        Ok(())
    }

    #[test]
    fn delete_removes_custom_preset() -> anyhow::Result<()> {
        let mut studio = memory_studio();
        let saved = studio
            .save_custom_preset("Temp")
            .ok_or_else(|| anyhow::anyhow!("preset not saved"))?;
        assert!(studio.delete_custom_preset(&saved.id).is_some());
        assert!(studio.delete_custom_preset(&saved.id).is_none());
        assert!(studio.presets().custom().is_empty());
        Ok(())
    }

    #[test]
    fn export_writes_card_for_current_outputs() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let mut studio = memory_studio();
        studio.generate();
        let export = studio.export_recipe(temp.path())?;
        assert!(export.image_path.exists());
        assert!(export.receipt_path.exists());
        Ok(())
    }
}
