use indexmap::IndexMap;

use super::options::NONE;

/// Lens options keyed by genre, in display order.
#[derive(Debug, Clone)]
pub struct LensCatalog {
    by_genre: IndexMap<&'static str, Vec<&'static str>>,
}

impl Default for LensCatalog {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LensCatalog {
    pub fn new(by_genre: Option<IndexMap<&'static str, Vec<&'static str>>>) -> Self {
        Self {
            by_genre: by_genre.unwrap_or_else(default_lenses),
        }
    }

    pub fn get(&self, genre: &str) -> Option<&[&'static str]> {
        self.by_genre.get(genre).map(Vec::as_slice)
    }

    /// First lens valid for `genre`, or the sentinel when the genre has none.
    pub fn first_for(&self, genre: &str) -> &'static str {
        self.get(genre)
            .and_then(|lenses| lenses.first().copied())
            .unwrap_or(NONE)
    }

    /// The sentinel followed by the genre's lenses, deduplicated.
    pub fn choices(&self, genre: &str) -> Vec<&'static str> {
        let mut out = vec![NONE];
        for lens in self.get(genre).unwrap_or_default() {
            if !out.contains(lens) {
                out.push(*lens);
            }
        }
        out
    }

    pub fn genres(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_genre.keys().copied()
    }
}

fn default_lenses() -> IndexMap<&'static str, Vec<&'static str>> {
    let mut map = IndexMap::new();

    let mut insert = |genre: &'static str, lenses: &[&'static str]| {
        map.insert(genre, lenses.to_vec());
    };

    insert(
        "portrait",
        &[
            "35mm env",
            "50mm prime",
            "85mm prime",
            "105mm prime",
            "135mm prime",
            "70-200mm zoom",
            "35mm prime",
            "80mm prime",
            "116mm prime",
            "120mm macro",
            "150mm prime",
            "300mm prime",
            "360mm prime",
        ],
    );
    insert(
        "street",
        &[
            "24mm prime",
            "28mm prime",
            "35mm prime",
            "50mm prime",
            "24-70mm zoom",
            "38mm prime",
            "45-85mm zoom",
            "80mm prime",
            "90mm tele",
            "105mm prime",
            "127mm Ektar",
        ],
    );
    insert(
        "landscape",
        &[
            "14-24mm wide",
            "16-35mm wide",
            "24mm prime",
            "24-70mm zoom",
            "70-200mm tele",
            "50mm prime",
            "150mm prime",
            "300mm prime",
            "300mm prime (8x10 eq)",
        ],
    );
    insert(
        "product",
        &[
            "50mm prime",
            "85mm prime",
            "60mm macro",
            "100mm macro",
            "90mm tilt-shift",
            "80mm prime",
            "90mm prime",
            "120mm macro",
            "150mm prime",
            "210mm prime",
        ],
    );
    insert(
        "cinematic",
        &[
            "24mm prime",
            "35mm prime",
            "50mm prime",
            "85mm prime",
            "40mm anamorphic",
            "75mm anamorphic",
            "14mm prime",
            "18mm prime",
            "32mm prime",
            "45mm wide",
            "55mm wide",
            "35mm anamorphic",
            "50mm anamorphic",
            "80mm prime",
            "300mm tele",
        ],
    );
    insert(
        "night",
        &[
            "24mm prime",
            "35mm prime",
            "50mm prime",
            "85mm prime",
            "35mm anamorphic",
            "105mm prime",
            "127mm Ektar",
        ],
    );
    insert(
        "sports",
        &[
            "70-200mm zoom",
            "100-400mm tele",
            "300mm prime",
            "400mm prime",
            "24-70mm zoom",
            "80mm prime",
            "200mm prime",
            "300mm tele",
            "600mm prime",
        ],
    );
    insert(
        "wildlife",
        &[
            "100-400mm tele",
            "200-600mm super-tele",
            "400mm prime",
            "600mm prime",
            "16mm fisheye",
            "16-35mm wide",
            "24-70mm zoom",
            "100mm macro",
            "105mm prime",
            "105mm macro",
        ],
    );
    insert(
        "architecture",
        &[
            "14-24mm wide",
            "16-35mm wide",
            "24mm tilt-shift",
            "17mm tilt-shift",
            "24-70mm zoom",
            "28mm wide",
            "45mm tilt-shift",
            "50mm wide",
            "90mm wide",
            "90mm wide (8x10 eq)",
            "150mm prime",
        ],
    );
    insert(
        "experimental",
        &["8mm fisheye", "50mm prime", "45mm tilt-shift", "None"],
    );

    map
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::LensCatalog;

    #[test]
    fn first_lens_follows_catalog_order() {
        let catalog = LensCatalog::default();
        assert_eq!(catalog.first_for("street"), "24mm prime");
        assert_eq!(catalog.first_for("wildlife"), "100-400mm tele");
    }

    #[test]
    fn unknown_genre_falls_back_to_sentinel() {
        let catalog = LensCatalog::default();
        assert_eq!(catalog.first_for("macro-astro"), "None");
        assert_eq!(catalog.choices("macro-astro"), vec!["None"]);
    }

    #[test]
    fn choices_do_not_repeat_the_sentinel() {
        let catalog = LensCatalog::default();
        let choices = catalog.choices("experimental");
        assert_eq!(
            choices,
            vec!["None", "8mm fisheye", "50mm prime", "45mm tilt-shift"]
        );
    }

    #[test]
    fn empty_genre_entry_yields_sentinel() {
        let mut map = IndexMap::new();
        map.insert("void", Vec::new());
        let catalog = LensCatalog::new(Some(map));
        assert_eq!(catalog.first_for("void"), "None");
        assert_eq!(catalog.genres().collect::<Vec<_>>(), vec!["void"]);
    }
}
