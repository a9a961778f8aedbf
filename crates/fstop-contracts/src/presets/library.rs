use rand::seq::SliceRandom;
use rand::Rng;

use crate::form::FormState;

use super::{builtin_presets, Preset, NONE_PRESET_ID};

/// Built-in presets unioned with the user's saved ones.
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    builtin: Vec<Preset>,
    custom: Vec<Preset>,
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self::new(None, Vec::new())
    }
}

impl PresetLibrary {
    pub fn new(builtin: Option<Vec<Preset>>, custom: Vec<Preset>) -> Self {
        Self {
            builtin: builtin.unwrap_or_else(builtin_presets),
            custom,
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &Preset> {
        self.builtin.iter().chain(self.custom.iter())
    }

    pub fn custom(&self) -> &[Preset] {
        self.custom.as_slice()
    }

    pub fn set_custom(&mut self, custom: Vec<Preset>) {
        self.custom = custom;
    }

    /// Case-insensitive substring match on title or category. The manual-mode
    /// entry is never listed.
    pub fn search(&self, term: &str) -> Vec<&Preset> {
        self.all()
            .filter(|preset| preset.id != NONE_PRESET_ID && preset.matches(term))
            .collect()
    }

    /// Finds a preset by exact id, then by case-insensitive title.
    pub fn find(&self, query: &str) -> Option<&Preset> {
        let wanted = query.trim();
        self.all()
            .find(|preset| preset.id == wanted)
            .or_else(|| {
                self.all()
                    .find(|preset| preset.title.eq_ignore_ascii_case(wanted))
            })
    }

    pub fn manual_mode(&self) -> Option<&Preset> {
        self.all().find(|preset| preset.id == NONE_PRESET_ID)
    }

    /// Uniform pick among every preset except manual mode.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Preset> {
        let candidates = self
            .all()
            .filter(|preset| preset.id != NONE_PRESET_ID)
            .collect::<Vec<&Preset>>();
        candidates.choose(rng).copied()
    }

    /// Appends a preset built from `form`; a blank name is ignored.
    pub fn save_custom(&mut self, name: &str, form: &FormState) -> Option<&Preset> {
        let preset = Preset::custom(name, form)?;
        self.custom.push(preset);
        self.custom.last()
    }

    pub fn delete_custom(&mut self, id: &str) -> Option<Preset> {
        let index = self.custom.iter().position(|preset| preset.id == id)?;
        Some(self.custom.remove(index))
    }
}
