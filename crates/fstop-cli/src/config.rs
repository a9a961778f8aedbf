use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fstop_contracts::events::EventWriter;
use fstop_contracts::store::{JsonFileStore, KeyValueStore, MemoryStore};

pub const HOME_ENV: &str = "FSTOP_HOME";
pub const MODEL_ENV: &str = "FSTOP_MODEL";
pub const EVENTS_ENV: &str = "FSTOP_EVENTS";

const STATE_FILE: &str = "state.json";
const EVENTS_FILE: &str = "events.jsonl";

/// Values given on the command line; each one wins over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub home: Option<PathBuf>,
    pub model: Option<String>,
    pub events: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub home: PathBuf,
    pub model: Option<String>,
    pub events_path: PathBuf,
}

impl Settings {
    pub fn state_path(&self) -> PathBuf {
        self.home.join(STATE_FILE)
    }

    /// Flags, then process env, then `.env`, then defaults.
    pub fn resolve(
        overrides: &Overrides,
        lookup: impl Fn(&str) -> Option<String>,
        dotenv: &HashMap<String, String>,
    ) -> Self {
        let from_env = |key: &str| {
            lookup(key)
                .or_else(|| dotenv.get(key).cloned())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let home = overrides
            .home
            .clone()
            .or_else(|| from_env(HOME_ENV).map(PathBuf::from))
            .unwrap_or_else(|| default_home(lookup("HOME")));
        let model = overrides
            .model
            .clone()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| from_env(MODEL_ENV));
        let events_path = overrides
            .events
            .clone()
            .or_else(|| from_env(EVENTS_ENV).map(PathBuf::from))
            .unwrap_or_else(|| home.join(EVENTS_FILE));

        Self {
            home,
            model,
            events_path,
        }
    }
}

fn default_home(user_home: Option<String>) -> PathBuf {
    match user_home.filter(|value| !value.trim().is_empty()) {
        Some(home) => PathBuf::from(home).join(".fstop"),
        None => PathBuf::from(".fstop"),
    }
}

pub fn parse_dotenv(path: &Path) -> HashMap<String, String> {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    let mut vars = HashMap::new();
    for raw_line in content.lines() {
        let mut line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("export ") {
            line = stripped.trim();
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let mut value = value.trim();
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        vars.insert(key.to_string(), value.to_string());
    }
    vars
}

/// The JSON state file under `home`, or a session-only store when the
/// directory cannot be created.
pub fn open_store(settings: &Settings) -> Box<dyn KeyValueStore> {
    match std::fs::create_dir_all(&settings.home) {
        Ok(()) => Box::new(JsonFileStore::new(settings.state_path())),
        Err(err) => {
            eprintln!(
                "fstop: {} is not writable ({err}); presets and history will not be saved",
                settings.home.display()
            );
            Box::new(MemoryStore::new())
        }
    }
}

/// The session log at `events_path`, or a disabled writer when the file
/// cannot be opened for append.
pub fn open_events(settings: &Settings, session_id: &str) -> EventWriter {
    match EventWriter::open(&settings.events_path, session_id) {
        Ok(events) => events,
        Err(err) => {
            eprintln!("fstop: {err:#}; event log disabled");
            EventWriter::disabled(session_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::{open_events, parse_dotenv, Overrides, Settings, EVENTS_ENV, HOME_ENV, MODEL_ENV};

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<String, String>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_live_under_user_home() {
        let settings = Settings::resolve(
            &Overrides::default(),
            env_of(&[("HOME", "/home/ada")]),
            &HashMap::new(),
        );
        assert_eq!(settings.home, PathBuf::from("/home/ada/.fstop"));
        assert_eq!(settings.state_path(), PathBuf::from("/home/ada/.fstop/state.json"));
        assert_eq!(settings.events_path, PathBuf::from("/home/ada/.fstop/events.jsonl"));
        assert_eq!(settings.model, None);
    }

    #[test]
    fn flags_beat_env_and_env_beats_dotenv() {
        let mut dotenv = HashMap::new();
        dotenv.insert(MODEL_ENV.to_string(), "dalle".to_string());
        dotenv.insert(HOME_ENV.to_string(), "/from/dotenv".to_string());
        let lookup = env_of(&[(MODEL_ENV, "flux"), (EVENTS_ENV, "/tmp/ev.jsonl")]);

        let from_env = Settings::resolve(&Overrides::default(), &lookup, &dotenv);
        assert_eq!(from_env.model.as_deref(), Some("flux"));
        assert_eq!(from_env.home, PathBuf::from("/from/dotenv"));
        assert_eq!(from_env.events_path, PathBuf::from("/tmp/ev.jsonl"));

        let overrides = Overrides {
            home: Some(PathBuf::from("/flag/home")),
            model: Some("midjourney".to_string()),
            events: None,
        };
        let from_flags = Settings::resolve(&overrides, &lookup, &dotenv);
        assert_eq!(from_flags.model.as_deref(), Some("midjourney"));
        assert_eq!(from_flags.home, PathBuf::from("/flag/home"));
    }

    #[test]
    fn dotenv_handles_quotes_exports_and_comments() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join(".env");
        std::fs::write(
            &path,
            "# comment\nexport FSTOP_MODEL=\"flux\"\nFSTOP_HOME='/data/fstop'\nbroken line\n=novalue\n",
        )?;
        let vars = parse_dotenv(&path);
        assert_eq!(vars.get("FSTOP_MODEL").map(String::as_str), Some("flux"));
        assert_eq!(vars.get("FSTOP_HOME").map(String::as_str), Some("/data/fstop"));
        assert_eq!(vars.len(), 2);
        assert!(parse_dotenv(&temp.path().join("missing.env")).is_empty());
        Ok(())
    }

    #[test]
    fn events_path_that_cannot_be_appended_disables_the_log() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let mut settings = Settings::resolve(
            &Overrides {
                home: Some(temp.path().to_path_buf()),
                ..Overrides::default()
            },
            env_of(&[]),
            &HashMap::new(),
        );
        let events = open_events(&settings, "cli");
        assert_eq!(events.path(), Some(settings.events_path.as_path()));

        settings.events_path = temp.path().join("taken");
        std::fs::create_dir(&settings.events_path)?;
        assert!(open_events(&settings, "cli").path().is_none());
        Ok(())
    }
}
