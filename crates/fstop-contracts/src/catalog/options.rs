pub const NONE: &str = "None";

pub const GENRES: &[&str] = &[
    "portrait",
    "street",
    "landscape",
    "product",
    "cinematic",
    "night",
    "sports",
    "wildlife",
    "architecture",
    "experimental",
];

pub const COMPOSITIONS: &[&str] = &[
    "None",
    "Rule of Thirds",
    "Centered",
    "Leading Lines",
    "Over-the-shoulder",
    "Wide Establishing",
    "Tight Close-up",
    "Low Angle Hero",
    "Top-down Flat Lay",
    "Candid Snapshot",
    "Asymmetric Framing",
    "Peek-through",
    "Symmetrical Arch",
    "Layered Depth",
];

pub const CAMERAS: &[&str] = &[
    "None",
    // digital bodies
    "Sony Alpha 1",
    "Canon EOS R3",
    "Nikon Z9",
    "Sony A7 IV",
    "Sony A7R V",
    "Canon EOS R5 II",
    "Nikon Z5 II",
    "Fujifilm X-T5",
    "Fujifilm GFX 100S II",
    "Hasselblad X2D 100C",
    "Phase One XF IQ4",
    "Leica SL3",
    "iPhone 16 Pro",
    "Hasselblad H6D",
    "Nikon D850",
    "Canon EOS 5D Mark IV",
    "DJI Mavic 3",
    // cinema
    "Arri Alexa 35",
    "Arri Alexa LF",
    "Red V-Raptor",
    "Arri Alexa 65",
    // 35mm film
    "Leica M3",
    "Leica M6",
    "Nikon F3",
    "Nikon F5",
    "Nikon F6",
    "Canon EOS 1v",
    "Contax T2",
    "Ricoh GR21",
    "Canon Rangefinder",
    // medium format
    "Rolleiflex 2.8F",
    "Hasselblad 500C/M",
    "Pentax 67",
    "Pentax 645",
    "Mamiya RZ67",
    // large format
    "Speed Graphic 4x5",
    "Deardorff 8x10",
    "Large Format 4x5",
    "Large Format 8x10",
    "Voigtländer Bergheil",
    "Graflex Series D",
    // motion picture film
    "Arriflex 35 BL",
    "Arricam ST",
    "Panavision PSR",
    "Mitchell BNC",
    "Technicolor 3-Strip Camera",
    "IMAX 15/65",
    "Polaroid SX-70",
    "Sony VX1000",
    "Contact Print",
];

pub const APERTURES: &[&str] = &[
    "None", "f/0.7", "f/1.2", "f/1.4", "f/1.8", "f/2", "f/2.8", "f/4", "f/4.5", "f/5.6", "f/8",
    "f/11", "f/16", "f/22", "f/32", "f/45", "f/64",
];

pub const SHUTTERS: &[&str] = &[
    "None", "Bulb", "30s", "15s", "8s", "4s", "2s", "1s", "1/2s", "1/4s", "1/8s", "1/15s",
    "1/30s", "1/48s", "1/60s", "1/125s", "1/160s", "1/200s", "1/250s", "1/320s", "1/500s",
    "1/1000s", "1/1250s", "1/2000s", "1/4000s",
];

pub const ISOS: &[&str] = &[
    "None", "1", "3", "5", "10", "25", "50", "64", "100", "200", "400", "500", "800", "1600",
    "3200", "6400",
];

pub const LIGHTINGS: &[&str] = &[
    "None",
    "Natural Light",
    "Soft Overcast",
    "Golden Hour",
    "Studio Softbox",
    "High Key White Cyc",
    "Hard Strobe",
    "Direct Flash",
    "Neon Practical",
    "Candlelight",
    "Stadium Lights",
    "Underwater Ambient",
];

pub const LENS_CHARACTERS: &[&str] = &[
    "None",
    "Clinical Sharp",
    "Vintage Softness",
    "Dreamy Bloom",
    "Gentle Halation",
    "Heavy Vignette",
    "Swirly Bokeh",
    "Petzval Curvature",
];

pub const FILMS: &[&str] = &[
    "None",
    "Kodak Portra 400",
    "Kodak Portra 160",
    "Fuji Pro 400H",
    "Cinestill 800T",
    "Kodak Tri-X B&W",
    "Kodak Gold 400",
    "Kodak Ektachrome",
    "Ilford HP5",
    "Kodak Vision3 500T",
    "Kodak Vision3 250D",
    "Kodak Vision3 200T",
    "Kodachrome 64",
    "Fujichrome Velvia",
    "Wet Plate Collodion",
    "Nitrate Film",
    "B&W Sheet Film",
    "Polaroid 600",
    "Polaroid Type 55",
    "Technicolor Three-Strip",
    "Autochrome Plate",
    "Kodak Aerochrome",
    "Digital Video Tape",
    "B&W Negative",
    "Digital",
];

pub const WHITE_BALANCES: &[&str] = &[
    "None",
    "Daylight Balanced",
    "Warm Tungsten",
    "Cool Shade",
    "Mixed Lighting",
];

pub const GRAINS: &[&str] = &[
    "None",
    "Clean/No Grain",
    "Subtle Grain",
    "Medium Texture",
    "Heavy Grit",
];

pub const PRODUCT_SUBGENRES: &[&str] = &[
    "None",
    "Ecommerce Packshot",
    "Luxury Jewelry Macro",
    "Watch Hero",
    "Cosmetics Splash",
    "Sneaker Floating",
    "Tech Gadget Hero",
    "Beverage Condensation",
    "Food Editorial",
    "Tabletop Styled",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightingSetup {
    pub label: &'static str,
    pub phrase: &'static str,
}

pub const LIGHTING_SETUPS: &[LightingSetup] = &[
    LightingSetup {
        label: "Softbox Key",
        phrase: "45 degree softbox key, white bounce fill",
    },
    LightingSetup {
        label: "Dual Softbox",
        phrase: "dual softbox symmetric lighting",
    },
    LightingSetup {
        label: "Top Scrim",
        phrase: "top down scrim, negative fill",
    },
    LightingSetup {
        label: "Rim Light",
        phrase: "strip rim light, edge definition",
    },
    LightingSetup {
        label: "Clamshell",
        phrase: "clamshell beauty lighting",
    },
    LightingSetup {
        label: "White Cyc",
        phrase: "high key white cyc, even wraparound light",
    },
    LightingSetup {
        label: "Cross Polarized",
        phrase: "cross-polarized lighting to control reflections",
    },
    LightingSetup {
        label: "Gradient Sweep",
        phrase: "gradient sweep background, tabletop product lighting",
    },
    LightingSetup {
        label: "Hard Flash",
        phrase: "hard direct flash, fast falloff shadows",
    },
    LightingSetup {
        label: "Window Side",
        phrase: "window side light, soft falloff",
    },
    LightingSetup {
        label: "Underwater",
        phrase: "underwater strobe fill, particle sparkle",
    },
    LightingSetup {
        label: "Backlit",
        phrase: "backlit translucent diffusion, soft halos",
    },
    LightingSetup {
        label: "Atmospheric",
        phrase: "atmospheric smoke and light shafts",
    },
    LightingSetup {
        label: "Neon Spill",
        phrase: "neon sign spill",
    },
    LightingSetup {
        label: "Stadium",
        phrase: "stadium top light, crisp action freeze",
    },
    LightingSetup {
        label: "Ring Light",
        phrase: "ring light fill",
    },
    LightingSetup {
        label: "Practical",
        phrase: "practical lighting",
    },
    LightingSetup {
        label: "High Contrast",
        phrase: "high contrast rim lighting",
    },
];
