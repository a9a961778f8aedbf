use super::{Preset, PresetData};

pub const NONE_PRESET_ID: &str = "none";

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn setups(phrases: &[&str]) -> Option<Vec<String>> {
    Some(phrases.iter().map(|phrase| (*phrase).to_string()).collect())
}

fn preset(id: &str, title: &str, category: &str, description: &str, data: PresetData) -> Preset {
    Preset {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        data,
    }
}

/// Named styles shipped with the tool. The first entry is the manual-mode
/// sentinel, which is never offered by search or randomize.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        preset(
            NONE_PRESET_ID,
            "None",
            "Core",
            "Manual mode",
            PresetData::default(),
        ),
        preset(
            "leiter-street",
            "Saul Leiter",
            "Street",
            "Reflections, layered color panes.",
            PresetData {
                genre: text("street"),
                camera: text("Leica M3"),
                lens: text("90mm tele"),
                focal: Some(90),
                aperture: text("f/4"),
                shutter: text("1/60s"),
                iso: text("100"),
                lighting: text("Natural Light"),
                composition: text("Candid Snapshot"),
                lighting_setups: setups(&["window side light, soft falloff"]),
                vibe: text(
                    "Saul Leiter style, shooting through windows and rain-specked glass, \
                     stacked reflections, soft focus edges, muted reds and ambers, street scenes \
                     as abstract color blocks with a human silhouette implied.",
                ),
                lens_char: text("Vintage Softness"),
                film: text("Kodachrome 64"),
                wb: text("Daylight Balanced"),
                grain: text("Subtle Grain"),
                product_subgenre: None,
            },
        ),
        preset(
            "maier-doc",
            "Vivian Maier",
            "Street",
            "Observational candid, sharp moments.",
            PresetData {
                genre: text("street"),
                camera: text("Rolleiflex 2.8F"),
                lens: text("80mm prime"),
                focal: Some(80),
                aperture: text("f/8"),
                shutter: text("1/250s"),
                iso: text("100"),
                lighting: text("Soft Overcast"),
                composition: text("Rule of Thirds"),
                vibe: text(
                    "Vivian Maier style, candid pedestrian life, clean geometry, mirror and \
                     shadow play, decisive everyday moments, waist-level perspective.",
                ),
                lens_char: text("Clinical Sharp"),
                film: text("Kodak Tri-X B&W"),
                wb: text("Daylight Balanced"),
                grain: text("Medium Texture"),
                ..PresetData::default()
            },
        ),
        preset(
            "deakins-cine",
            "Roger Deakins",
            "Cinematic",
            "Naturalistic film precision.",
            PresetData {
                genre: text("cinematic"),
                camera: text("Arri Alexa 35"),
                lens: text("32mm prime"),
                focal: Some(32),
                aperture: text("f/2.8"),
                shutter: text("1/48s"),
                iso: text("800"),
                lighting: text("Neon Practical"),
                composition: text("Leading Lines"),
                lighting_setups: setups(&["window side light, soft falloff"]),
                vibe: text(
                    "Roger Deakins style, grounded cinematic realism, subtle contrast, \
                     motivated practical light, careful negative fill, clean compositions, \
                     atmospheric depth without exaggeration.",
                ),
                lens_char: text("Clinical Sharp"),
                film: text("Kodak Vision3 500T"),
                wb: text("Mixed Lighting"),
                grain: text("Subtle Grain"),
                product_subgenre: None,
            },
        ),
        preset(
            "wes-anderson",
            "Wes Anderson",
            "Cinematic",
            "Symmetrical, pastel, flat.",
            PresetData {
                genre: text("cinematic"),
                camera: text("Arricam ST"),
                lens: text("40mm anamorphic"),
                focal: Some(40),
                aperture: text("f/5.6"),
                shutter: text("1/48s"),
                iso: text("200"),
                lighting: text("Soft Overcast"),
                composition: text("Symmetrical Arch"),
                lighting_setups: setups(&["high key white cyc, even wraparound light"]),
                vibe: text(
                    "Wes Anderson style, perfectly symmetrical composition, flat planar \
                     staging, pastel color palette, whimsical attention to detail, soft even \
                     lighting.",
                ),
                lens_char: text("Clinical Sharp"),
                film: text("Kodak Vision3 200T"),
                wb: text("Daylight Balanced"),
                grain: text("Clean/No Grain"),
                product_subgenre: None,
            },
        ),
        preset(
            "cyberpunk-neon",
            "Cyberpunk / Neo-Noir",
            "Genre Cinema",
            "Rain, neon, high tech, low life.",
            PresetData {
                genre: text("night"),
                camera: text("Arri Alexa LF"),
                lens: text("35mm anamorphic"),
                focal: Some(35),
                aperture: text("f/2"),
                shutter: text("1/48s"),
                iso: text("1600"),
                lighting: text("Neon Practical"),
                composition: text("Leading Lines"),
                lighting_setups: setups(&[
                    "neon sign spill",
                    "atmospheric smoke and light shafts",
                ]),
                vibe: text(
                    "Cyberpunk Neo-Noir aesthetic, rain-slicked streets reflecting pink and \
                     blue neon, high contrast, wet texture, steam and smoke, futuristic urban \
                     decay, anamorphic lens flares.",
                ),
                lens_char: text("Clinical Sharp"),
                film: text("Kodak Vision3 500T"),
                wb: text("Mixed Lighting"),
                grain: text("Medium Texture"),
                product_subgenre: None,
            },
        ),
        preset(
            "adams-bw",
            "Ansel Adams",
            "Landscape",
            "Epic B&W mountains.",
            PresetData {
                genre: text("landscape"),
                camera: text("Deardorff 8x10"),
                lens: text("300mm prime (8x10 eq)"),
                focal: Some(300),
                aperture: text("f/64"),
                shutter: text("1s"),
                iso: text("25"),
                lighting: text("Natural Light"),
                composition: text("Leading Lines"),
                vibe: text(
                    "Ansel Adams style, dramatic black and white landscapes, Zone System \
                     tonal separation, crisp detail, large format clarity.",
                ),
                lens_char: text("Clinical Sharp"),
                film: text("Kodak Tri-X B&W"),
                wb: text("Daylight Balanced"),
                grain: text("Clean/No Grain"),
                ..PresetData::default()
            },
        ),
        preset(
            "belanger-minimal",
            "Peter Belanger",
            "Product",
            "Clean Apple-like minimal.",
            PresetData {
                genre: text("product"),
                camera: text("Canon EOS R5 II"),
                lens: text("100mm macro"),
                focal: Some(100),
                aperture: text("f/11"),
                shutter: text("1/160s"),
                iso: text("100"),
                lighting: text("High Key White Cyc"),
                composition: text("Centered"),
                product_subgenre: text("Tech Gadget Hero"),
                lighting_setups: setups(&[
                    "high key white cyc, even wraparound light",
                    "softbox key plus bounce",
                ]),
                vibe: text(
                    "Peter Belanger style, ultra-clean minimal product hero shots, soft \
                     controlled wrap light, seamless backgrounds, Apple advertising aesthetic.",
                ),
                lens_char: text("Clinical Sharp"),
                film: text("Digital"),
                wb: text("Daylight Balanced"),
                grain: text("Clean/No Grain"),
            },
        ),
    ]
}
