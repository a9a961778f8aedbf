use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

pub type EventPayload = Map<String, Value>;

/// Studio session log, one JSON object per line.
///
/// Every event starts from `type`, `session_id`, `seq` (counting from 1
/// within the session) and `ts`; payload keys are layered on top. `record`
/// is the call for ambient logging: a failed append is counted in
/// `dropped` and never reaches the caller.
#[derive(Debug, Clone)]
pub struct EventWriter {
    shared: Arc<SessionLog>,
}

#[derive(Debug)]
struct SessionLog {
    sink: Option<PathBuf>,
    session_id: String,
    next_seq: AtomicU64,
    dropped: AtomicU64,
    append: Mutex<()>,
}

impl EventWriter {
    pub fn new(path: impl Into<PathBuf>, session_id: impl Into<String>) -> Self {
        Self::with_sink(Some(path.into()), session_id.into())
    }

    /// Builds events without ever writing them.
    pub fn disabled(session_id: impl Into<String>) -> Self {
        Self::with_sink(None, session_id.into())
    }

    /// Like `new`, but fails up front when `path` cannot be appended to.
    pub fn open(path: impl Into<PathBuf>, session_id: impl Into<String>) -> anyhow::Result<Self> {
        let path = path.into();
        open_for_append(&path)?;
        Ok(Self::new(path, session_id))
    }

    fn with_sink(sink: Option<PathBuf>, session_id: String) -> Self {
        Self {
            shared: Arc::new(SessionLog {
                sink,
                session_id,
                next_seq: AtomicU64::new(1),
                dropped: AtomicU64::new(0),
                append: Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.shared.sink.as_deref()
    }

    pub fn session_id(&self) -> &str {
        &self.shared.session_id
    }

    /// Events that could not be written.
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }

    fn build(&self, event_type: &str, payload: EventPayload) -> Map<String, Value> {
        let seq = self.shared.next_seq.fetch_add(1, Ordering::Relaxed);
        let mut event = Map::new();
        event.insert("type".into(), Value::from(event_type));
        event.insert("session_id".into(), Value::from(self.session_id()));
        event.insert("seq".into(), Value::from(seq));
        event.insert("ts".into(), Value::from(timestamp()));
        event.extend(payload);
        event
    }

    pub fn emit(&self, event_type: &str, payload: EventPayload) -> anyhow::Result<Value> {
        let event = self.build(event_type, payload);
        if let Some(sink) = self.shared.sink.as_deref() {
            let line = serde_json::to_string(&event)?;
            let _held = self
                .shared
                .append
                .lock()
                .map_err(|_| anyhow::anyhow!("session log mutex poisoned"))?;
            let mut file = open_for_append(sink)?;
            writeln!(file, "{line}")
                .with_context(|| format!("failed to append to {}", sink.display()))?;
        }
        Ok(Value::Object(event))
    }

    /// Best-effort `emit`. The first miss in a session is reported on stderr.
    pub fn record(&self, event_type: &str, payload: EventPayload) -> Option<Value> {
        match self.emit(event_type, payload) {
            Ok(event) => Some(event),
            Err(err) => {
                if self.shared.dropped.fetch_add(1, Ordering::Relaxed) == 0 {
                    eprintln!("fstop: event log unavailable ({err:#}); continuing without it");
                }
                None
            }
        }
    }
}

fn open_for_append(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
