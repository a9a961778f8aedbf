mod builtin;
mod library;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::FormState;

pub use builtin::{builtin_presets, NONE_PRESET_ID};
pub use library::PresetLibrary;

pub const CUSTOM_CATEGORY: &str = "Custom";

/// Sparse parameter set carried by a preset. Absent fields are left alone
/// when the preset is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub film: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens_char: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_subgenre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_setups: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
}

impl PresetData {
    /// Captures the preset-relevant part of a form. Free text other than the
    /// vibe and the lock flags are not part of a preset.
    pub fn snapshot(form: &FormState) -> Self {
        Self {
            genre: Some(form.genre.clone()),
            camera: Some(form.camera.clone()),
            lens: Some(form.lens.clone()),
            focal: Some(form.focal),
            aperture: Some(form.aperture.clone()),
            shutter: Some(form.shutter.clone()),
            iso: Some(form.iso.clone()),
            lighting: Some(form.lighting.clone()),
            composition: Some(form.composition.clone()),
            film: Some(form.film.clone()),
            wb: Some(form.wb.clone()),
            grain: Some(form.grain.clone()),
            lens_char: Some(form.lens_char.clone()),
            product_subgenre: Some(form.product_subgenre.clone()),
            lighting_setups: Some(form.active_lighting_setups.iter().cloned().collect()),
            vibe: Some(form.vibe.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub title: String,
    #[serde(rename = "desc", alias = "description", default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub data: PresetData,
}

impl Preset {
    /// Builds a user preset from the current form. Returns `None` for a blank name.
    pub fn custom(name: &str, form: &FormState) -> Option<Self> {
        let title = name.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            id: format!("custom-{}", Uuid::new_v4()),
            title: title.to_string(),
            description: "User custom preset".to_string(),
            category: CUSTOM_CATEGORY.to_string(),
            data: PresetData::snapshot(form),
        })
    }

    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        self.title.to_lowercase().contains(&term) || self.category.to_lowercase().contains(&term)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

/// Merges `preset` into a copy of `current`.
///
/// The style name and vibe are always replaced, the lighting-setup set is
/// always rebuilt from the preset, locked camera/lens/lighting are kept, and a
/// focal length of zero counts as absent.
pub fn apply_preset(preset: &Preset, current: &FormState) -> FormState {
    let data = &preset.data;
    let mut next = current.clone();

    next.photographer_style = preset.title.clone();
    next.vibe = data.vibe.clone().unwrap_or_default();

    if let Some(genre) = present(&data.genre) {
        next.genre = genre.to_string();
    }
    if !current.lock_camera {
        if let Some(camera) = present(&data.camera) {
            next.camera = camera.to_string();
        }
    }
    if !current.lock_lens {
        if let Some(lens) = present(&data.lens) {
            next.lens = lens.to_string();
        }
    }
    if let Some(focal) = data.focal.filter(|focal| *focal != 0) {
        next.focal = focal;
    }
    if !current.lock_lighting {
        if let Some(lighting) = present(&data.lighting) {
            next.lighting = lighting.to_string();
        }
    }

    let copies: [(&Option<String>, &mut String); 9] = [
        (&data.aperture, &mut next.aperture),
        (&data.shutter, &mut next.shutter),
        (&data.iso, &mut next.iso),
        (&data.composition, &mut next.composition),
        (&data.lens_char, &mut next.lens_char),
        (&data.film, &mut next.film),
        (&data.wb, &mut next.wb),
        (&data.grain, &mut next.grain),
        (&data.product_subgenre, &mut next.product_subgenre),
    ];
    for (source, slot) in copies {
        if let Some(value) = present(source) {
            *slot = value.to_string();
        }
    }

    next.active_lighting_setups = data
        .lighting_setups
        .as_ref()
        .map(|setups| setups.iter().cloned().collect())
        .unwrap_or_else(IndexSet::new);

    next
}
