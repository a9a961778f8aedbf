use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::catalog::{canonical_in, normalize_key, CatalogField, LensCatalog, NONE};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AspectRatio {
    Square,
    Wide,
    Tall,
    Standard,
    UltraWide,
    Other(String),
}

impl AspectRatio {
    pub const PRESETS: &'static [AspectRatio] = &[
        AspectRatio::Square,
        AspectRatio::Wide,
        AspectRatio::Tall,
        AspectRatio::Standard,
        AspectRatio::UltraWide,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
            AspectRatio::Standard => "4:3",
            AspectRatio::UltraWide => "21:9",
            AspectRatio::Other(raw) => raw.as_str(),
        }
    }

    /// Prose used by the sentence-style prompt templates.
    pub fn description(&self) -> &'static str {
        match self {
            AspectRatio::Wide => "wide cinematic landscape (16:9)",
            AspectRatio::Tall => "tall vertical portrait (9:16)",
            AspectRatio::Square => "square (1:1)",
            AspectRatio::Standard => "standard photographic aspect ratio (4:3)",
            AspectRatio::UltraWide => "ultra-wide anamorphic aspect ratio (21:9)",
            AspectRatio::Other(_) => "standard aspect ratio",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Wide
    }
}

impl FromStr for AspectRatio {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let ratio = match raw.trim() {
            "1:1" => AspectRatio::Square,
            "16:9" => AspectRatio::Wide,
            "9:16" => AspectRatio::Tall,
            "4:3" => AspectRatio::Standard,
            "21:9" => AspectRatio::UltraWide,
            other => AspectRatio::Other(other.to_string()),
        };
        Ok(ratio)
    }
}

impl From<String> for AspectRatio {
    fn from(raw: String) -> Self {
        match raw.parse() {
            Ok(ratio) => ratio,
            Err(never) => match never {},
        }
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.as_str().to_string()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockField {
    Camera,
    Lens,
    Lighting,
}

impl LockField {
    pub fn name(self) -> &'static str {
        match self {
            LockField::Camera => "camera",
            LockField::Lens => "lens",
            LockField::Lighting => "lighting",
        }
    }
}

impl FromStr for LockField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_key(raw).as_str() {
            "camera" => Ok(LockField::Camera),
            "lens" => Ok(LockField::Lens),
            "lighting" => Ok(LockField::Lighting),
            _ => Err(format!(
                "Only camera, lens and lighting can be locked (got '{raw}')."
            )),
        }
    }
}

/// Every field a user can edit directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Scene,
    Location,
    Datetime,
    Vibe,
    Lens,
    Focal,
    Catalog(CatalogField),
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let field = match normalize_key(raw).as_str() {
            "scene" => FormField::Scene,
            "location" => FormField::Location,
            "datetime" | "date" | "when" => FormField::Datetime,
            "vibe" => FormField::Vibe,
            "lens" => FormField::Lens,
            "focal" | "focal_length" => FormField::Focal,
            _ => FormField::Catalog(
                raw.parse()
                    .map_err(|_| format!("Unknown field '{}'.", raw.trim()))?,
            ),
        };
        Ok(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub scene: String,
    pub location: String,
    pub datetime: String,
    pub genre: String,
    pub composition: String,
    pub product_subgenre: String,
    pub camera: String,
    pub lens: String,
    pub lock_camera: bool,
    pub lock_lens: bool,
    pub lock_lighting: bool,
    pub focal: u32,
    pub aperture: String,
    pub shutter: String,
    pub iso: String,
    pub film: String,
    pub wb: String,
    pub grain: String,
    pub lens_char: String,
    pub lighting: String,
    pub active_lighting_setups: IndexSet<String>,
    pub active_ar: AspectRatio,
    pub photographer_style: String,
    pub vibe: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            scene: String::new(),
            location: String::new(),
            datetime: String::new(),
            genre: "portrait".to_string(),
            composition: NONE.to_string(),
            product_subgenre: NONE.to_string(),
            camera: NONE.to_string(),
            lens: "50mm prime".to_string(),
            lock_camera: false,
            lock_lens: false,
            lock_lighting: false,
            focal: 50,
            aperture: NONE.to_string(),
            shutter: NONE.to_string(),
            iso: NONE.to_string(),
            film: NONE.to_string(),
            wb: NONE.to_string(),
            grain: NONE.to_string(),
            lens_char: NONE.to_string(),
            lighting: NONE.to_string(),
            active_lighting_setups: IndexSet::new(),
            active_ar: AspectRatio::default(),
            photographer_style: NONE.to_string(),
            vibe: String::new(),
        }
    }
}

impl FormState {
    /// Changes genre and resets the lens to the genre's first option.
    pub fn set_genre(&mut self, genre: &str, lenses: &LensCatalog) {
        self.genre = genre.to_string();
        self.lens = lenses.first_for(genre).to_string();
    }

    pub fn set_lock(&mut self, field: LockField, locked: bool) {
        match field {
            LockField::Camera => self.lock_camera = locked,
            LockField::Lens => self.lock_lens = locked,
            LockField::Lighting => self.lock_lighting = locked,
        }
    }

    pub fn is_locked(&self, field: LockField) -> bool {
        match field {
            LockField::Camera => self.lock_camera,
            LockField::Lens => self.lock_lens,
            LockField::Lighting => self.lock_lighting,
        }
    }

    /// Flips membership of a lighting-setup phrase; returns whether it is now active.
    pub fn toggle_lighting_setup(&mut self, phrase: &str) -> bool {
        if self.active_lighting_setups.shift_remove(phrase) {
            return false;
        }
        self.active_lighting_setups.insert(phrase.to_string());
        true
    }

    pub fn catalog_value(&self, field: CatalogField) -> &str {
        match field {
            CatalogField::Genre => &self.genre,
            CatalogField::Composition => &self.composition,
            CatalogField::Camera => &self.camera,
            CatalogField::Aperture => &self.aperture,
            CatalogField::Shutter => &self.shutter,
            CatalogField::Iso => &self.iso,
            CatalogField::Lighting => &self.lighting,
            CatalogField::LensChar => &self.lens_char,
            CatalogField::Film => &self.film,
            CatalogField::WhiteBalance => &self.wb,
            CatalogField::Grain => &self.grain,
            CatalogField::ProductSubgenre => &self.product_subgenre,
        }
    }

    fn catalog_slot(&mut self, field: CatalogField) -> &mut String {
        match field {
            CatalogField::Genre => &mut self.genre,
            CatalogField::Composition => &mut self.composition,
            CatalogField::Camera => &mut self.camera,
            CatalogField::Aperture => &mut self.aperture,
            CatalogField::Shutter => &mut self.shutter,
            CatalogField::Iso => &mut self.iso,
            CatalogField::Lighting => &mut self.lighting,
            CatalogField::LensChar => &mut self.lens_char,
            CatalogField::Film => &mut self.film,
            CatalogField::WhiteBalance => &mut self.wb,
            CatalogField::Grain => &mut self.grain,
            CatalogField::ProductSubgenre => &mut self.product_subgenre,
        }
    }

    /// Applies one user edit. Enumerated fields only accept catalog values,
    /// matched case-insensitively; the lens must belong to the current genre.
    pub fn update(
        &mut self,
        field: FormField,
        raw: &str,
        lenses: &LensCatalog,
    ) -> Result<(), String> {
        match field {
            FormField::Scene => self.scene = raw.to_string(),
            FormField::Location => self.location = raw.trim().to_string(),
            FormField::Vibe => self.vibe = raw.trim().to_string(),
            FormField::Datetime => {
                let trimmed = raw.trim();
                if !trimmed.is_empty() && parse_datetime(trimmed).is_none() {
                    return Err(format!(
                        "Could not read '{trimmed}' as a date and time (use YYYY-MM-DDTHH:MM)."
                    ));
                }
                self.datetime = trimmed.to_string();
            }
            FormField::Focal => {
                let trimmed = raw.trim().trim_end_matches("mm");
                self.focal = if trimmed.is_empty() {
                    0
                } else {
                    trimmed
                        .parse()
                        .map_err(|_| format!("Focal length must be a whole number of mm, got '{raw}'."))?
                };
            }
            FormField::Lens => {
                let choices = lenses.choices(&self.genre);
                let lens = canonical_in(&choices, raw).ok_or_else(|| {
                    format!(
                        "'{}' is not a {} lens. Options: {}",
                        raw.trim(),
                        self.genre,
                        choices.join(", ")
                    )
                })?;
                self.lens = lens.to_string();
            }
            FormField::Catalog(CatalogField::Genre) => {
                let genre = CatalogField::Genre
                    .canonical(raw)
                    .ok_or_else(|| unknown_option(CatalogField::Genre, raw))?;
                self.set_genre(genre, lenses);
            }
            FormField::Catalog(catalog_field) => {
                let value = catalog_field
                    .canonical(raw)
                    .ok_or_else(|| unknown_option(catalog_field, raw))?;
                *self.catalog_slot(catalog_field) = value.to_string();
            }
        }
        Ok(())
    }
}

fn unknown_option(field: CatalogField, raw: &str) -> String {
    format!(
        "'{}' is not a known {} option. Options: {}",
        raw.trim(),
        field,
        field.options().join(", ")
    )
}

pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}
