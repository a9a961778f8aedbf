use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

const INDIGO: Rgb = Rgb::new(0x4f, 0x46, 0xe5);
const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
const MAGENTA: Rgb = Rgb::new(0xd9, 0x46, 0xef);
const BLUE: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
const AMBER: Rgb = Rgb::new(0xf5, 0x9e, 0x0b);
const GOLD: Rgb = Rgb::new(0xfb, 0xbf, 0x24);
const RED: Rgb = Rgb::new(0xef, 0x44, 0x44);

/// Cosmetic descriptor derived from the current lighting and stock.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Theme {
    pub glow_color: Rgb,
    pub accent_color: Rgb,
    /// Text color readable on top of `accent_color`.
    pub accent_text: Rgb,
    pub glow_gradient: Option<(Rgb, Rgb)>,
    pub glow_intensity: f32,
    pub grain_opacity: f32,
    pub animated: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            glow_color: INDIGO,
            accent_color: INDIGO,
            accent_text: WHITE,
            glow_gradient: None,
            glow_intensity: 0.25,
            grain_opacity: 0.0,
            animated: false,
        }
    }
}

fn is_monochrome_stock(film: &str) -> bool {
    ["B&W", "Tri-X", "HP5"].iter().any(|mark| film.contains(mark))
}

/// Leading integer of an ISO value; anything else reads as 0.
fn iso_number(iso: &str) -> u32 {
    let digits = iso
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>();
    digits.parse().unwrap_or(0)
}

fn grain_opacity(film: &str, iso: &str, grain: &str) -> f32 {
    let base: f32 = match grain {
        "Heavy Grit" => 0.15,
        "Medium Texture" => 0.08,
        "Subtle Grain" => 0.04,
        _ => 0.0,
    };
    let iso_floor = match iso_number(iso) {
        n if n >= 3200 => 0.12,
        n if n >= 800 => 0.07,
        _ => 0.0,
    };
    let stock_floor = if film.contains("Tri-X") { 0.10 } else { 0.0 };
    base.max(iso_floor).max(stock_floor)
}

fn paint(theme: &mut Theme, glow: Rgb, accent: Rgb, text: Rgb) {
    theme.glow_color = glow;
    theme.accent_color = accent;
    theme.accent_text = text;
}

pub fn compute_theme(lighting: &str, film: &str, iso: &str, grain: &str) -> Theme {
    let mut theme = Theme {
        grain_opacity: grain_opacity(film, iso, grain),
        ..Theme::default()
    };

    if is_monochrome_stock(film) {
        paint(&mut theme, Rgb::new(0xe5, 0xe5, 0xe5), Rgb::new(0xa1, 0xa1, 0xaa), BLACK);
    } else {
        match lighting {
            "Golden Hour" => paint(&mut theme, AMBER, AMBER, BLACK),
            "Neon Practical" => {
                paint(&mut theme, MAGENTA, MAGENTA, WHITE);
                theme.glow_gradient = Some((MAGENTA, BLUE));
            }
            "Underwater Ambient" => paint(
                &mut theme,
                Rgb::new(0x0e, 0xa5, 0xe9),
                Rgb::new(0x06, 0xb6, 0xd4),
                BLACK,
            ),
            "Candlelight" => {
                paint(
                    &mut theme,
                    Rgb::new(0xea, 0x58, 0x0c),
                    Rgb::new(0xf9, 0x73, 0x16),
                    WHITE,
                );
                theme.animated = true;
            }
            "Soft Overcast" => paint(
                &mut theme,
                Rgb::new(0x64, 0x74, 0x8b),
                Rgb::new(0x94, 0xa3, 0xb8),
                WHITE,
            ),
            "High Key White Cyc" => paint(&mut theme, WHITE, Rgb::new(0xcb, 0xd5, 0xe1), BLACK),
            _ if film.contains("Portra") => paint(&mut theme, GOLD, GOLD, BLACK),
            _ if film.contains("Cinestill") => paint(&mut theme, RED, RED, WHITE),
            _ if film.contains("Ektachrome") => paint(&mut theme, BLUE, BLUE, WHITE),
            _ => {}
        }
    }

    theme.glow_intensity = if theme.glow_gradient.is_some() {
        0.15
    } else if lighting == "High Key White Cyc" {
        0.1
    } else {
        0.25
    };
    theme
}

#[cfg(test)]
mod tests {
    use super::{compute_theme, Rgb, Theme};

    #[test]
    fn unset_inputs_give_indigo_default() {
        let theme = compute_theme("None", "None", "None", "None");
        assert_eq!(theme, Theme::default());
        assert_eq!(theme.accent_color.hex(), "#4f46e5");
    }

    #[test]
    fn monochrome_stock_beats_lighting() {
        let theme = compute_theme("Golden Hour", "Kodak Tri-X 400", "400", "None");
        assert_eq!(theme.glow_color, Rgb::new(0xe5, 0xe5, 0xe5));
        assert_eq!(theme.accent_text.hex(), "#000000");
        assert!((theme.grain_opacity - 0.10).abs() < f32::EPSILON);
    }

    #[test]
    fn neon_uses_a_gradient_and_lower_glow() {
        let theme = compute_theme("Neon Practical", "None", "None", "None");
        let (from, to) = theme.glow_gradient.unwrap_or((Rgb::new(0, 0, 0), Rgb::new(0, 0, 0)));
        assert_eq!(from.hex(), "#d946ef");
        assert_eq!(to.hex(), "#3b82f6");
        assert!((theme.glow_intensity - 0.15).abs() < f32::EPSILON);
    }

    #[test]
    fn candlelight_flickers() {
        assert!(compute_theme("Candlelight", "None", "None", "None").animated);
        assert!(!compute_theme("Golden Hour", "None", "None", "None").animated);
    }

    #[test]
    fn white_cyc_dims_the_glow() {
        let theme = compute_theme("High Key White Cyc", "None", "None", "None");
        assert!((theme.glow_intensity - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn film_family_applies_when_lighting_is_unmatched() {
        let portra = compute_theme("Studio Softbox", "Kodak Portra 400", "None", "None");
        assert_eq!(portra.accent_color.hex(), "#fbbf24");
        let cinestill = compute_theme("None", "Cinestill 800T", "None", "None");
        assert_eq!(cinestill.accent_color.hex(), "#ef4444");
    }

    #[test]
    fn grain_takes_the_highest_floor() {
        let subtle_high_iso = compute_theme("None", "None", "3200", "Subtle Grain");
        assert!((subtle_high_iso.grain_opacity - 0.12).abs() < f32::EPSILON);
        let heavy_low_iso = compute_theme("None", "None", "100", "Heavy Grit");
        assert!((heavy_low_iso.grain_opacity - 0.15).abs() < f32::EPSILON);
        let mid_iso = compute_theme("None", "None", "800", "None");
        assert!((mid_iso.grain_opacity - 0.07).abs() < f32::EPSILON);
    }

    #[test]
    fn theme_serializes_colors_as_hex() -> anyhow::Result<()> {
        let value = serde_json::to_value(compute_theme("Golden Hour", "None", "None", "None"))?;
        assert_eq!(value["accent_color"], "#f59e0b");
        Ok(())
    }
}
