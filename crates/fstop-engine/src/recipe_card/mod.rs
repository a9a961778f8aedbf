mod canvas;
mod font;
mod receipt;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use fstop_contracts::catalog::is_unset;
use fstop_contracts::form::FormState;
use fstop_contracts::models::TargetModel;
use image::RgbImage;

use crate::ambiance::{Rgb, Theme};
use crate::composer::OutputSet;

use canvas::{columns, text_height, Canvas};
use font::LINE_HEIGHT;

pub use receipt::{
    build_recipe_receipt, write_recipe_receipt, RecipeArtifacts, RecipeReceipt, RECIPE_SCHEMA_VERSION,
};

/// Device pixels per layout unit.
pub const SCALE: u32 = 2;
pub const CARD_WIDTH: u32 = 600 * SCALE;
pub const CARD_HEIGHT: u32 = 520 * SCALE;

const PROMPT_LINES: usize = 10;
const TITLE_DOT: u32 = 5;
const BODY_DOT: u32 = 2;
const LABEL_DOT: u32 = 2;

const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
const STUDIO_100: Rgb = Rgb::new(0xf4, 0xf4, 0xf5);
const STUDIO_300: Rgb = Rgb::new(0xd4, 0xd4, 0xd8);
const STUDIO_400: Rgb = Rgb::new(0xa1, 0xa1, 0xaa);
const STUDIO_500: Rgb = Rgb::new(0x71, 0x71, 0x7a);
const STUDIO_600: Rgb = Rgb::new(0x52, 0x52, 0x5b);
const STUDIO_700: Rgb = Rgb::new(0x3f, 0x3f, 0x46);
const STUDIO_800: Rgb = Rgb::new(0x27, 0x27, 0x2a);
const STUDIO_900: Rgb = Rgb::new(0x18, 0x18, 0x1b);

const EMPTY_PROMPT: &str = "No prompt generated yet.";

fn px(units: u32) -> u32 {
    units * SCALE
}

/// Paths written by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeExport {
    pub image_path: PathBuf,
    pub receipt_path: PathBuf,
}

pub fn recipe_stem(at: &DateTime<Local>) -> String {
    format!("f-stop-recipe-{}", at.timestamp_millis())
}

/// Cuts `text` to `max` characters, ending in `...` when shortened.
fn fit(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept = text.chars().take(max.saturating_sub(3)).collect::<String>();
    format!("{}...", kept.trim_end())
}

/// Greedy word wrap. Paragraph breaks start a new line; overflow is elided.
fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n').filter(|line| !line.trim().is_empty()) {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            while current.chars().count() > width {
                let head = current.chars().take(width).collect::<String>();
                let tail = current.chars().skip(width).collect::<String>();
                lines.push(head);
                current = tail;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = fit(&format!("{last} ..."), width);
        }
    }
    lines
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

struct Panel {
    label: &'static str,
    value: String,
    detail: String,
}

fn panels(form: &FormState) -> [Panel; 4] {
    let lens = if form.focal > 0 {
        format!("{} ({}mm)", form.lens, form.focal)
    } else {
        form.lens.clone()
    };
    let style = if is_unset(&form.photographer_style) {
        format!("{} {}", form.genre, form.composition)
    } else {
        form.photographer_style.clone()
    };
    let setups = form
        .active_lighting_setups
        .iter()
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(", ");

    [
        Panel {
            label: "Camera & Lens",
            value: form.camera.clone(),
            detail: lens,
        },
        Panel {
            label: "Film Stock",
            value: form.film.clone(),
            detail: format!(
                "ISO {} \u{2022} {} \u{2022} {}",
                form.iso, form.aperture, form.shutter
            ),
        },
        Panel {
            label: "Lighting",
            value: form.lighting.clone(),
            detail: setups,
        },
        Panel {
            label: "Style / Vibe",
            value: style,
            detail: form.vibe.clone(),
        },
    ]
}

/// Rasterizes the summary card for the current form and master prompt.
pub fn render_recipe_card(
    form: &FormState,
    master_prompt: Option<&str>,
    theme: &Theme,
    date_label: &str,
) -> RgbImage {
    let mut canvas = Canvas::new(CARD_WIDTH, CARD_HEIGHT, BLACK);
    let inner_left = px(32);
    let inner_right = CARD_WIDTH - px(32);
    let inner_width = inner_right - inner_left;

    canvas.glow(
        i64::from(px(552)),
        i64::from(px(48)),
        px(128),
        theme.glow_color,
        theme.glow_intensity * 0.8,
    );
    canvas.glow(i64::from(px(48)), i64::from(px(472)), px(128), WHITE, 0.05);
    canvas.stroke_rect(0, 0, CARD_WIDTH, CARD_HEIGHT, px(1) / 2, STUDIO_700);
    match theme.glow_gradient {
        Some((from, to)) => canvas.gradient_rect(0, 0, CARD_WIDTH, px(2), from, to),
        None => canvas.fill_rect(0, 0, CARD_WIDTH, px(2), theme.accent_color, 1.0),
    }

    let title_width = canvas.text(inner_left, px(32), "f-stop", TITLE_DOT, WHITE);
    canvas.text(
        inner_left + title_width,
        px(32),
        ".ai",
        TITLE_DOT,
        theme.accent_color,
    );
    canvas.text(inner_left, px(59), "Visual Recipe Card", LABEL_DOT, STUDIO_500);
    canvas.text_right(inner_right, px(42), "Date", LABEL_DOT, STUDIO_500);
    canvas.text_right(inner_right, px(53), date_label, BODY_DOT, STUDIO_300);
    canvas.fill_rect(inner_left, px(75), inner_width, px(1), STUDIO_800, 1.0);

    canvas.text(inner_left, px(91), "Master Prompt", LABEL_DOT, STUDIO_500);
    let box_top = px(103);
    let box_height = px(159);
    canvas.fill_rect(inner_left, box_top, inner_width, box_height, STUDIO_900, 0.5);
    canvas.stroke_rect(inner_left, box_top, inner_width, box_height, SCALE, STUDIO_800);
    let prompt = master_prompt
        .filter(|prompt| !prompt.trim().is_empty())
        .unwrap_or(EMPTY_PROMPT);
    let text_left = inner_left + px(16);
    let prompt_columns = columns(inner_width - px(32), BODY_DOT);
    for (idx, line) in wrap(prompt, prompt_columns, PROMPT_LINES).iter().enumerate() {
        let y = box_top + px(12) + idx as u32 * LINE_HEIGHT * BODY_DOT;
        canvas.text(text_left, y, line, BODY_DOT, STUDIO_100);
    }

    let gap = px(16);
    let panel_width = (inner_width - gap) / 2;
    let panel_height = px(75);
    let panel_columns = columns(panel_width - px(24), BODY_DOT);
    let detail_columns = columns(panel_width - px(24), LABEL_DOT);
    for (idx, panel) in panels(form).iter().enumerate() {
        let col = idx as u32 % 2;
        let row = idx as u32 / 2;
        let x = inner_left + col * (panel_width + gap);
        let y = px(278) + row * (panel_height + gap);
        canvas.fill_rect(x, y, panel_width, panel_height, STUDIO_900, 1.0);
        canvas.stroke_rect(x, y, panel_width, panel_height, SCALE, STUDIO_800);
        canvas.text(x + px(12), y + px(12), panel.label, LABEL_DOT, STUDIO_500);
        canvas.text(
            x + px(12),
            y + px(26),
            &fit(or_dash(&panel.value), panel_columns),
            BODY_DOT,
            WHITE,
        );
        if !panel.detail.trim().is_empty() {
            canvas.text(
                x + px(12),
                y + px(26) + text_height(BODY_DOT) + px(8),
                &fit(&panel.detail, detail_columns),
                LABEL_DOT,
                STUDIO_400,
            );
        }
    }

    canvas.fill_rect(inner_left, px(460), inner_width, px(1) / 2, STUDIO_800, 1.0);
    canvas.text(inner_left, px(476), "f-stop.ai // pro studio", LABEL_DOT, STUDIO_600);
    canvas.text_right(inner_right, px(476), "Generated with AI", LABEL_DOT, STUDIO_600);

    canvas.into_image()
}

/// Writes `f-stop-recipe-{millis}.png` and its JSON receipt into `out_dir`.
pub fn export_recipe(
    out_dir: &Path,
    form: &FormState,
    model: TargetModel,
    outputs: Option<&OutputSet>,
    theme: &Theme,
    at: DateTime<Local>,
) -> Result<RecipeExport> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let stem = recipe_stem(&at);
    let image_path = out_dir.join(format!("{stem}.png"));
    let receipt_path = out_dir.join(format!("{stem}.json"));

    let master = outputs.map(|set| set.main.as_str());
    let date_label = at.format("%-m/%-d/%Y").to_string();
    let card = render_recipe_card(form, master, theme, &date_label);
    card.save(&image_path)
        .with_context(|| format!("failed to save {}", image_path.display()))?;

    let receipt = build_recipe_receipt(form, model, outputs, theme, &image_path, &receipt_path, &at);
    write_recipe_receipt(&receipt_path, &receipt)?;

    Ok(RecipeExport {
        image_path,
        receipt_path,
    })
}
