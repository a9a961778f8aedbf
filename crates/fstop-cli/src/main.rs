mod chat;
mod clipboard;
mod config;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use fstop_contracts::form::{FormField, LockField};
use fstop_engine::{compute_theme, Studio, Variant};

use crate::chat::{run_chat_stdio, write_outputs, write_preset_line};
use crate::config::{open_events, open_store, parse_dotenv, Overrides, Settings};

#[derive(Debug, Parser)]
#[command(name = "fstop", version, about = "Photography prompt composer")]
struct Cli {
    /// State directory for presets, history and events.
    #[arg(long, global = true)]
    home: Option<PathBuf>,
    /// Prompt target: midjourney, flux or dalle.
    #[arg(long, global = true)]
    model: Option<String>,
    #[arg(long, global = true)]
    events: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive studio session.
    Chat(ChatArgs),
    /// Compose prompts once and print them.
    Compose(ComposeArgs),
    /// List or search presets.
    Presets(PresetsArgs),
    /// Show or clear prompt history.
    History(HistoryArgs),
    /// Generate prompts and write a recipe card.
    Export(ExportArgs),
    /// Print the ambiance for a lighting and film choice.
    Theme(ThemeArgs),
}

#[derive(Debug, Args)]
struct ChatArgs {
    /// Default directory for /export.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Debug, Args, Default)]
struct FormArgs {
    #[arg(long)]
    scene: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    datetime: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    composition: Option<String>,
    #[arg(long)]
    camera: Option<String>,
    #[arg(long)]
    lens: Option<String>,
    #[arg(long)]
    focal: Option<String>,
    #[arg(long)]
    aperture: Option<String>,
    #[arg(long)]
    shutter: Option<String>,
    #[arg(long)]
    iso: Option<String>,
    #[arg(long)]
    film: Option<String>,
    #[arg(long)]
    wb: Option<String>,
    #[arg(long)]
    grain: Option<String>,
    #[arg(long)]
    lens_char: Option<String>,
    #[arg(long)]
    lighting: Option<String>,
    #[arg(long)]
    product_subgenre: Option<String>,
    #[arg(long)]
    vibe: Option<String>,
    /// Lighting setup label or phrase; repeatable.
    #[arg(long = "setup")]
    setups: Vec<String>,
    #[arg(long)]
    ar: Option<String>,
    /// camera, lens or lighting; repeatable.
    #[arg(long = "lock")]
    locks: Vec<String>,
    /// Preset id or title, applied before the field flags.
    #[arg(long)]
    preset: Option<String>,
}

impl FormArgs {
    /// Genre goes first so a `--lens` flag is checked against the new genre.
    fn field_edits(&self) -> Vec<(&'static str, &str)> {
        [
            ("genre", &self.genre),
            ("scene", &self.scene),
            ("location", &self.location),
            ("datetime", &self.datetime),
            ("composition", &self.composition),
            ("camera", &self.camera),
            ("lens", &self.lens),
            ("focal", &self.focal),
            ("aperture", &self.aperture),
            ("shutter", &self.shutter),
            ("iso", &self.iso),
            ("film", &self.film),
            ("wb", &self.wb),
            ("grain", &self.grain),
            ("lens_char", &self.lens_char),
            ("lighting", &self.lighting),
            ("product_subgenre", &self.product_subgenre),
            ("vibe", &self.vibe),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
        .collect()
    }

    fn apply(&self, studio: &mut Studio) -> Result<()> {
        for raw in &self.locks {
            let field = raw.parse::<LockField>().map_err(anyhow::Error::msg)?;
            studio.set_lock(field, true);
        }
        if let Some(query) = self.preset.as_deref() {
            if studio.apply_preset(query).is_none() {
                bail!("no preset matches '{query}'");
            }
        }
        for (name, value) in self.field_edits() {
            let field = name.parse::<FormField>().map_err(anyhow::Error::msg)?;
            studio.set_field(field, value).map_err(anyhow::Error::msg)?;
        }
        for setup in &self.setups {
            if !studio.toggle_lighting_setup(setup).map_err(anyhow::Error::msg)? {
                // Already on from the preset; keep it on.
                studio.toggle_lighting_setup(setup).map_err(anyhow::Error::msg)?;
            }
        }
        if let Some(ratio) = self.ar.as_deref() {
            studio.set_aspect_ratio(ratio).map_err(anyhow::Error::msg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
struct ComposeArgs {
    #[command(flatten)]
    form: FormArgs,
    /// Print one variant: main, cinematic, gritty or commercial.
    #[arg(long)]
    variant: Option<Variant>,
    /// Compose without recording history.
    #[arg(long)]
    no_history: bool,
}

#[derive(Debug, Args)]
struct PresetsArgs {
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct HistoryArgs {
    #[arg(long)]
    clear: bool,
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[arg(long, default_value = ".")]
    out: PathBuf,
    #[command(flatten)]
    form: FormArgs,
}

#[derive(Debug, Args)]
struct ThemeArgs {
    #[arg(long, default_value = "None")]
    lighting: String,
    #[arg(long, default_value = "None")]
    film: String,
    #[arg(long, default_value = "None")]
    iso: String,
    #[arg(long, default_value = "None")]
    grain: String,
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("fstop error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    if let Command::Theme(args) = &cli.command {
        run_theme(args)?;
        return Ok(0);
    }

    let overrides = Overrides {
        home: cli.home.clone(),
        model: cli.model.clone(),
        events: cli.events.clone(),
    };
    let settings = Settings::resolve(
        &overrides,
        |key| std::env::var(key).ok(),
        &parse_dotenv(Path::new(".env")),
    );
    let mut studio = open_studio(&settings)?;

    match cli.command {
        Command::Chat(args) => run_chat_stdio(&mut studio, &args.out)?,
        Command::Compose(args) => run_compose(&mut studio, &args)?,
        Command::Presets(args) => run_presets(&studio, &args)?,
        Command::History(args) => run_history(&mut studio, &args)?,
        Command::Export(args) => run_export(&mut studio, &args)?,
        Command::Theme(_) => {}
    }
    Ok(0)
}

fn open_studio(settings: &Settings) -> Result<Studio> {
    let session_id = format!("fstop-{}", Utc::now().format("%Y%m%dT%H%M%S%.3fZ"));
    let store = open_store(settings);
    let events = open_events(settings, &session_id);
    let mut studio = Studio::open(store, events);
    if let Some(model) = settings.model.as_deref() {
        let selection = studio.set_model(Some(model)).map_err(anyhow::Error::msg)?;
        if let Some(reason) = selection.fallback_reason {
            eprintln!("fstop: {reason} Using {}.", selection.model.label);
        }
    }
    Ok(studio)
}

fn run_compose(studio: &mut Studio, args: &ComposeArgs) -> Result<()> {
    args.form.apply(studio)?;
    let outputs = if args.no_history {
        studio.preview()
    } else {
        studio.generate().clone()
    };
    let stdout = io::stdout();
    write_outputs(&mut stdout.lock(), &outputs, args.variant)?;
    Ok(())
}

fn run_presets(studio: &Studio, args: &PresetsArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let term = args.search.as_deref().unwrap_or_default();
    for preset in studio.search_presets(term) {
        write_preset_line(&mut out, preset)?;
    }
    Ok(())
}

fn run_history(studio: &mut Studio, args: &HistoryArgs) -> Result<()> {
    if args.clear {
        studio.clear_history();
        println!("History cleared.");
        return Ok(());
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (idx, entry) in studio.history().entries().iter().enumerate() {
        writeln!(out, "[{}]\n{entry}\n", idx + 1)?;
    }
    Ok(())
}

fn run_export(studio: &mut Studio, args: &ExportArgs) -> Result<()> {
    args.form.apply(studio)?;
    studio.generate();
    let export = studio.export_recipe(&args.out)?;
    println!("{}", export.image_path.display());
    println!("{}", export.receipt_path.display());
    Ok(())
}

fn run_theme(args: &ThemeArgs) -> Result<()> {
    let theme = compute_theme(&args.lighting, &args.film, &args.iso, &args.grain);
    println!("{}", serde_json::to_string_pretty(&theme)?);
    Ok(())
}
