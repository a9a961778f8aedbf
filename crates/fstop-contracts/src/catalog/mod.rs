mod lenses;
mod options;

use std::fmt;
use std::str::FromStr;

pub use lenses::LensCatalog;
pub use options::{
    LightingSetup, APERTURES, CAMERAS, COMPOSITIONS, FILMS, GENRES, GRAINS, ISOS,
    LENS_CHARACTERS, LIGHTINGS, LIGHTING_SETUPS, NONE, PRODUCT_SUBGENRES, SHUTTERS,
    WHITE_BALANCES,
};

/// Enumerated form fields whose values come from a fixed option list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogField {
    Genre,
    Composition,
    Camera,
    Aperture,
    Shutter,
    Iso,
    Lighting,
    LensChar,
    Film,
    WhiteBalance,
    Grain,
    ProductSubgenre,
}

impl CatalogField {
    pub const ALL: &'static [CatalogField] = &[
        CatalogField::Genre,
        CatalogField::Composition,
        CatalogField::Camera,
        CatalogField::Aperture,
        CatalogField::Shutter,
        CatalogField::Iso,
        CatalogField::Lighting,
        CatalogField::LensChar,
        CatalogField::Film,
        CatalogField::WhiteBalance,
        CatalogField::Grain,
        CatalogField::ProductSubgenre,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CatalogField::Genre => "genre",
            CatalogField::Composition => "composition",
            CatalogField::Camera => "camera",
            CatalogField::Aperture => "aperture",
            CatalogField::Shutter => "shutter",
            CatalogField::Iso => "iso",
            CatalogField::Lighting => "lighting",
            CatalogField::LensChar => "lens_char",
            CatalogField::Film => "film",
            CatalogField::WhiteBalance => "wb",
            CatalogField::Grain => "grain",
            CatalogField::ProductSubgenre => "product_subgenre",
        }
    }

    pub fn options(self) -> &'static [&'static str] {
        match self {
            CatalogField::Genre => GENRES,
            CatalogField::Composition => COMPOSITIONS,
            CatalogField::Camera => CAMERAS,
            CatalogField::Aperture => APERTURES,
            CatalogField::Shutter => SHUTTERS,
            CatalogField::Iso => ISOS,
            CatalogField::Lighting => LIGHTINGS,
            CatalogField::LensChar => LENS_CHARACTERS,
            CatalogField::Film => FILMS,
            CatalogField::WhiteBalance => WHITE_BALANCES,
            CatalogField::Grain => GRAINS,
            CatalogField::ProductSubgenre => PRODUCT_SUBGENRES,
        }
    }

    /// Resolves user text to the catalog spelling, ignoring case and
    /// surrounding whitespace.
    pub fn canonical(self, raw: &str) -> Option<&'static str> {
        canonical_in(self.options(), raw)
    }
}

impl fmt::Display for CatalogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(raw);
        let field = match key.as_str() {
            "genre" => CatalogField::Genre,
            "composition" => CatalogField::Composition,
            "camera" => CatalogField::Camera,
            "aperture" => CatalogField::Aperture,
            "shutter" => CatalogField::Shutter,
            "iso" => CatalogField::Iso,
            "lighting" => CatalogField::Lighting,
            "lens_char" | "lenschar" | "lens_character" => CatalogField::LensChar,
            "film" => CatalogField::Film,
            "wb" | "white_balance" => CatalogField::WhiteBalance,
            "grain" => CatalogField::Grain,
            "product_subgenre" | "productsubgenre" | "subgenre" => CatalogField::ProductSubgenre,
            _ => return Err(format!("Unknown catalog field '{raw}'.")),
        };
        Ok(field)
    }
}

pub fn canonical_in(options: &[&'static str], raw: &str) -> Option<&'static str> {
    let wanted = raw.trim();
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(wanted))
        .copied()
}

/// Looks a lighting setup up by its label or its phrase.
pub fn lighting_setup(query: &str) -> Option<&'static LightingSetup> {
    let wanted = query.trim();
    LIGHTING_SETUPS.iter().find(|setup| {
        setup.label.eq_ignore_ascii_case(wanted) || setup.phrase.eq_ignore_ascii_case(wanted)
    })
}

pub fn is_unset(value: &str) -> bool {
    value.is_empty() || value == NONE
}

pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

#[cfg(test)]
mod tests {
    use super::{is_unset, lighting_setup, CatalogField, NONE};

    #[test]
    fn every_optional_field_carries_the_sentinel_first() {
        for field in CatalogField::ALL {
            if *field == CatalogField::Genre {
                continue;
            }
            assert_eq!(field.options().first(), Some(&NONE), "{field}");
        }
    }

    #[test]
    fn canonical_matches_case_insensitively() {
        assert_eq!(
            CatalogField::Film.canonical("  kodak portra 400 "),
            Some("Kodak Portra 400")
        );
        assert_eq!(CatalogField::Aperture.canonical("F/11"), Some("f/11"));
        assert_eq!(CatalogField::Camera.canonical("Pinhole Box"), None);
    }

    #[test]
    fn field_names_parse_with_aliases() {
        assert_eq!("white-balance".parse(), Ok(CatalogField::WhiteBalance));
        assert_eq!("Lens Char".parse(), Ok(CatalogField::LensChar));
        assert_eq!("subgenre".parse(), Ok(CatalogField::ProductSubgenre));
        assert!("focal".parse::<CatalogField>().is_err());
        for field in CatalogField::ALL {
            assert_eq!(field.name().parse(), Ok(*field));
        }
    }

    #[test]
    fn lighting_setup_resolves_label_or_phrase() {
        let by_label = lighting_setup("neon spill").map(|setup| setup.phrase);
        assert_eq!(by_label, Some("neon sign spill"));
        let by_phrase = lighting_setup("ring light fill").map(|setup| setup.label);
        assert_eq!(by_phrase, Some("Ring Light"));
        assert!(lighting_setup("moonlight").is_none());
    }

    #[test]
    fn sentinel_and_empty_are_unset() {
        assert!(is_unset("None"));
        assert!(is_unset(""));
        assert!(!is_unset("Golden Hour"));
    }
}
