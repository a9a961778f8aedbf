use std::io::{self, BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use fstop_contracts::catalog::{CatalogField, LIGHTING_SETUPS};
use fstop_contracts::chat::{parse_intent, Intent, CHAT_HELP_COMMANDS};
use fstop_contracts::form::{FormField, FormState, LockField};
use fstop_contracts::presets::Preset;
use fstop_engine::{OutputSet, Studio, Theme, Variant};
use serde_json::Value;

use crate::clipboard::copy_to_clipboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads commands line by line until EOF or `/quit`.
pub fn run_chat(
    studio: &mut Studio,
    input: &mut impl BufRead,
    out: &mut impl Write,
    export_dir: &Path,
) -> Result<()> {
    writeln!(
        out,
        "f-stop studio ({}). Describe a scene to generate, or type /help.",
        studio.model()
    )?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        let read = match input.read_line(&mut line) {
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        if read == 0 {
            break;
        }

        let intent = parse_intent(line.trim_end_matches(['\n', '\r']));
        if intent.action == "noop" {
            continue;
        }
        match handle_intent(studio, &intent, out, export_dir) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => writeln!(out, "Error: {err:#}")?,
        }
    }
    Ok(())
}

fn value_as_non_empty_string(value: Option<&Value>) -> Option<String> {
    let raw = value
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn arg(intent: &Intent, key: &str) -> Option<String> {
    value_as_non_empty_string(intent.command_args.get(key))
}

pub fn handle_intent(
    studio: &mut Studio,
    intent: &Intent,
    out: &mut impl Write,
    export_dir: &Path,
) -> Result<Flow> {
    match intent.action.as_str() {
        "help" => {
            writeln!(out, "Commands:")?;
            for command in CHAT_HELP_COMMANDS {
                writeln!(out, "  {command}")?;
            }
            writeln!(out, "Any other text sets the scene and generates.")?;
        }
        "quit" => return Ok(Flow::Quit),
        "set_scene" => {
            studio.set_scene(intent.arg_str("scene").unwrap_or_default());
            writeln!(out, "Scene: {}", display_or_empty(&studio.form().scene))?;
        }
        "set_field" => {
            let Some(field_name) = arg(intent, "field") else {
                writeln!(out, "/set requires a field name")?;
                return Ok(Flow::Continue);
            };
            let value = intent.arg_str("value").unwrap_or_default();
            let result = field_name
                .parse::<FormField>()
                .and_then(|field| studio.set_field(field, value));
            match result {
                Ok(()) => writeln!(out, "{field_name} set.")?,
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        "set_genre" => {
            let genre = intent.arg_str("genre").unwrap_or_default();
            match studio.set_genre(genre) {
                Ok(()) => writeln!(
                    out,
                    "Genre: {} (lens reset to {})",
                    studio.form().genre,
                    studio.form().lens
                )?,
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        "lock" | "unlock" => {
            let locked = intent.action == "lock";
            match intent.arg_str("field").unwrap_or_default().parse::<LockField>() {
                Ok(field) => {
                    studio.set_lock(field, locked);
                    let state = if locked { "locked" } else { "unlocked" };
                    writeln!(out, "{} {state}.", field.name())?;
                }
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        "toggle_setup" => {
            let query = intent.arg_str("setup").unwrap_or_default();
            match studio.toggle_lighting_setup(query) {
                Ok(true) => writeln!(out, "Setup on: {}", query.trim())?,
                Ok(false) => writeln!(out, "Setup off: {}", query.trim())?,
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        "list_setups" => {
            for setup in LIGHTING_SETUPS {
                let mark = if studio.form().active_lighting_setups.contains(setup.phrase) {
                    "*"
                } else {
                    " "
                };
                writeln!(out, "{mark} {:<22} {}", setup.label, setup.phrase)?;
            }
        }
        "set_aspect_ratio" => {
            match studio.set_aspect_ratio(intent.arg_str("ratio").unwrap_or_default()) {
                Ok(()) => writeln!(
                    out,
                    "Aspect ratio: {} ({})",
                    studio.form().active_ar,
                    studio.form().active_ar.description()
                )?,
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        "set_model" => {
            let requested = arg(intent, "model");
            match studio.set_model(requested.as_deref()) {
                Ok(selection) => {
                    writeln!(out, "Model: {}", selection.model.label)?;
                    if let Some(reason) = selection.fallback_reason {
                        writeln!(out, "  ({reason})")?;
                    }
                }
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        "list_models" => {
            for spec in studio.model_selector().registry.list() {
                let mark = if spec.model == studio.model() { "*" } else { " " };
                writeln!(out, "{mark} {:<11} {}", spec.name, spec.phrasing)?;
            }
        }
        "apply_preset" => {
            let query = intent.arg_str("query").unwrap_or_default();
            match studio.apply_preset(query) {
                Some(preset) => writeln!(out, "Applied {}: {}", preset.title, preset.description)?,
                None => writeln!(out, "No preset matches '{}'. Try /presets.", query.trim())?,
            }
        }
        "search_presets" => {
            let term = intent.arg_str("term").unwrap_or_default();
            let found = studio.search_presets(term);
            if found.is_empty() {
                writeln!(out, "No presets match '{}'.", term.trim())?;
            }
            for preset in found {
                write_preset_line(out, preset)?;
            }
        }
        "randomize" => match studio.randomize(&mut rand::thread_rng()) {
            Some(preset) => writeln!(out, "Random preset: {}", preset.title)?,
            None => writeln!(out, "No presets to pick from.")?,
        },
        "reset" => {
            studio.reset();
            writeln!(out, "Back to manual mode.")?;
        }
        "save_preset" => {
            let name = intent.arg_str("name").unwrap_or_default();
            if let Some(saved) = studio.save_custom_preset(name) {
                writeln!(out, "Saved {} ({})", saved.title, saved.id)?;
            }
        }
        "delete_preset" => {
            let id = intent.arg_str("id").unwrap_or_default();
            match studio.delete_custom_preset(id) {
                Some(removed) => writeln!(out, "Deleted {}", removed.title)?,
                None => writeln!(out, "No custom preset with id '{}'.", id.trim())?,
            }
        }
        "generate" => {
            if let Some(scene) = intent.scene.as_deref() {
                studio.set_scene(scene);
            }
            let outputs = studio.generate().clone();
            write_outputs(out, &outputs, None)?;
        }
        "show" => {
            write_form(out, studio.form())?;
            writeln!(out, "model: {}", studio.model())?;
        }
        "theme" => write_theme(out, &studio.theme())?,
        "history" => {
            if studio.history().is_empty() {
                writeln!(out, "No history yet.")?;
            }
            for (idx, entry) in studio.history().entries().iter().enumerate() {
                writeln!(out, "[{}] {}", idx + 1, first_line(entry))?;
            }
        }
        "clear_history" => {
            studio.clear_history();
            writeln!(out, "History cleared.")?;
        }
        "copy" => {
            let target = intent.arg_str("target").unwrap_or("main");
            let text = if target == "history" {
                let position = intent
                    .command_args
                    .get("index")
                    .and_then(Value::as_u64)
                    .unwrap_or(1) as usize;
                studio.history().nth(position).map(str::to_string)
            } else {
                match target.parse::<Variant>() {
                    Ok(variant) => studio.outputs().map(|set| set.get(variant).to_string()),
                    Err(message) => {
                        writeln!(out, "{message}")?;
                        return Ok(Flow::Continue);
                    }
                }
            };
            match text {
                Some(text) => {
                    copy_to_clipboard(out, &text)?;
                    writeln!(out, "{text}")?;
                    writeln!(out, "Copied.")?;
                }
                None => writeln!(out, "Nothing to copy yet.")?,
            }
        }
        "export" => {
            let dir = arg(intent, "dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| export_dir.to_path_buf());
            let export = studio.export_recipe(&dir)?;
            writeln!(out, "Recipe card: {}", export.image_path.display())?;
            writeln!(out, "Receipt: {}", export.receipt_path.display())?;
        }
        "unknown" => {
            writeln!(
                out,
                "Unknown command /{}. Type /help.",
                intent.arg_str("command").unwrap_or_default()
            )?;
        }
        other => writeln!(out, "Unhandled action '{other}'.")?,
    }
    Ok(Flow::Continue)
}

fn display_or_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        "(empty)"
    } else {
        value
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

pub fn write_preset_line(out: &mut impl Write, preset: &Preset) -> io::Result<()> {
    writeln!(
        out,
        "{:<16} {:<22} {:<12} {}",
        preset.id, preset.title, preset.category, preset.description
    )
}

pub fn write_outputs(out: &mut impl Write, outputs: &OutputSet, only: Option<Variant>) -> io::Result<()> {
    for (variant, prompt) in outputs.iter() {
        if only.is_some_and(|wanted| wanted != variant) {
            continue;
        }
        if only.is_none() {
            writeln!(out, "== {} ==", variant.label())?;
        }
        writeln!(out, "{prompt}")?;
        if only.is_none() {
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_form(out: &mut impl Write, form: &FormState) -> io::Result<()> {
    let lock = |locked: bool| if locked { " [locked]" } else { "" };
    writeln!(out, "scene: {}", display_or_empty(&form.scene))?;
    writeln!(out, "location: {}", display_or_empty(&form.location))?;
    writeln!(out, "datetime: {}", display_or_empty(&form.datetime))?;
    writeln!(out, "camera: {}{}", form.camera, lock(form.lock_camera))?;
    writeln!(out, "lens: {} ({}mm){}", form.lens, form.focal, lock(form.lock_lens))?;
    writeln!(out, "lighting: {}{}", form.lighting, lock(form.lock_lighting))?;
    for field in CatalogField::ALL {
        if matches!(field, CatalogField::Camera | CatalogField::Lighting) {
            continue;
        }
        writeln!(out, "{}: {}", field.name(), form.catalog_value(*field))?;
    }
    let setups = form
        .active_lighting_setups
        .iter()
        .map(String::as_str)
        .collect::<Vec<&str>>();
    writeln!(
        out,
        "lighting setups: {}",
        if setups.is_empty() {
            "(none)".to_string()
        } else {
            setups.join("; ")
        }
    )?;
    writeln!(out, "aspect ratio: {}", form.active_ar)?;
    writeln!(out, "preset: {}", form.photographer_style)?;
    writeln!(out, "vibe: {}", display_or_empty(&form.vibe))
}

pub fn write_theme(out: &mut impl Write, theme: &Theme) -> io::Result<()> {
    writeln!(out, "glow: {}", theme.glow_color)?;
    writeln!(out, "accent: {} on {}", theme.accent_color, theme.accent_text)?;
    if let Some((from, to)) = theme.glow_gradient {
        writeln!(out, "gradient: {from} -> {to}")?;
    }
    writeln!(out, "glow intensity: {:.2}", theme.glow_intensity)?;
    writeln!(out, "grain opacity: {:.2}", theme.grain_opacity)?;
    writeln!(out, "animated: {}", if theme.animated { "flicker" } else { "no" })
}

/// Drives the loop from stdin and stdout.
pub fn run_chat_stdio(studio: &mut Studio, export_dir: &Path) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_chat(studio, &mut stdin.lock(), &mut stdout.lock(), export_dir)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::Path;

    use fstop_contracts::chat::parse_intent;
    use fstop_contracts::events::EventWriter;
    use fstop_contracts::models::TargetModel;
    use fstop_contracts::store::MemoryStore;
    use fstop_engine::Studio;

    use super::{handle_intent, run_chat, Flow};

    fn studio() -> Studio {
        Studio::open(Box::new(MemoryStore::new()), EventWriter::disabled("chat-test"))
    }

    fn send(studio: &mut Studio, line: &str) -> anyhow::Result<(Flow, String)> {
        let mut out = Vec::new();
        let flow = handle_intent(studio, &parse_intent(line), &mut out, Path::new("."))?;
        Ok((flow, String::from_utf8(out)?))
    }

    #[test]
    fn bare_text_generates_four_variants() -> anyhow::Result<()> {
        let mut studio = studio();
        let (flow, text) = send(&mut studio, "a fisherman at dawn")?;
        assert_eq!(flow, Flow::Continue);
        assert!(text.contains("== Master Prompt =="));
        assert!(text.contains("== Commercial / Product =="));
        assert!(text.contains("a fisherman at dawn"));
        assert_eq!(studio.history().len(), 1);
        Ok(())
    }

    #[test]
    fn set_and_lock_commands_update_the_form() -> anyhow::Result<()> {
        let mut studio = studio();
        send(&mut studio, "/set camera leica m3")?;
        assert_eq!(studio.form().camera, "Leica M3");
        send(&mut studio, "/lock camera")?;
        assert!(studio.form().lock_camera);
        send(&mut studio, "/preset Wes Anderson")?;
        assert_eq!(studio.form().camera, "Leica M3");

        let (_, rejected) = send(&mut studio, "/set aperture f/99")?;
        assert!(rejected.contains("not a known"));
        Ok(())
    }

    #[test]
    fn model_switch_reports_fallback() -> anyhow::Result<()> {
        let mut studio = studio();
        let (_, text) = send(&mut studio, "/model flux")?;
        assert!(text.contains("Model: Flux"));
        assert_eq!(studio.model(), TargetModel::Flux);

        let (_, fallback) = send(&mut studio, "/model sdxl")?;
        assert!(fallback.contains("not a prompt target"));
        Ok(())
    }

    #[test]
    fn copy_emits_osc52_and_history_lookup() -> anyhow::Result<()> {
        let mut studio = studio();
        let (_, nothing) = send(&mut studio, "/copy")?;
        assert!(nothing.contains("Nothing to copy"));

        send(&mut studio, "/generate")?;
        let (_, copied) = send(&mut studio, "/copy gritty")?;
        assert!(copied.starts_with("\x1b]52;c;"));
        assert!(copied.contains("gritty texture"));

        let (_, from_history) = send(&mut studio, "/copy history 1")?;
        assert!(from_history.contains("Copied."));
        Ok(())
    }

    #[test]
    fn blank_save_prints_nothing() -> anyhow::Result<()> {
        let mut studio = studio();
        let (_, text) = send(&mut studio, "/save   ")?;
        assert!(text.is_empty());
        assert!(studio.presets().custom().is_empty());
        Ok(())
    }

    #[test]
    fn loop_stops_on_quit() -> anyhow::Result<()> {
        let mut studio = studio();
        let mut input = Cursor::new("/genre landscape\n/quit\n/generate\n");
        let mut out = Vec::new();
        run_chat(&mut studio, &mut input, &mut out, Path::new("."))?;
        assert_eq!(studio.form().genre, "landscape");
        assert!(studio.history().is_empty());
        Ok(())
    }
}
