use serde::{Deserialize, Serialize};
use similar::TextDiff;

pub const HISTORY_LIMIT: usize = 20;

/// Past master prompts, newest first, capped at [`HISTORY_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<String>,
}

impl HistoryLog {
    pub fn new(entries: Vec<String>) -> Self {
        let mut log = Self { entries };
        log.entries.truncate(HISTORY_LIMIT);
        log
    }

    pub fn record(&mut self, prompt: impl Into<String>) {
        self.entries.insert(0, prompt.into());
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        self.entries.as_slice()
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    /// One-based lookup, matching how the history is listed.
    pub fn nth(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unified line diff between the previous and the new master prompt.
pub fn prompt_diff(prev: Option<&str>, curr: &str) -> Option<Vec<String>> {
    let prev = prev?;
    let diff = TextDiff::from_lines(prev, curr);
    let rendered = diff.unified_diff().header("prev", "curr").to_string();
    let lines = rendered
        .lines()
        .map(str::to_string)
        .collect::<Vec<String>>();
    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::{prompt_diff, HistoryLog, HISTORY_LIMIT};

    #[test]
    fn history_keeps_newest_twenty() {
        let mut log = HistoryLog::default();
        for idx in 0..25 {
            log.record(format!("prompt {idx}"));
        }
        assert_eq!(log.len(), HISTORY_LIMIT);
        assert_eq!(log.latest(), Some("prompt 24"));
        assert_eq!(log.entries().last().map(String::as_str), Some("prompt 5"));
    }

    #[test]
    fn loading_an_oversized_log_truncates() {
        let entries = (0..30).map(|idx| idx.to_string()).collect::<Vec<_>>();
        let log = HistoryLog::new(entries);
        assert_eq!(log.len(), HISTORY_LIMIT);
        assert_eq!(log.latest(), Some("0"));
    }

    #[test]
    fn nth_is_one_based() {
        let mut log = HistoryLog::default();
        log.record("old");
        log.record("new");
        assert_eq!(log.nth(1), Some("new"));
        assert_eq!(log.nth(2), Some("old"));
        assert_eq!(log.nth(0), None);
        assert_eq!(log.nth(3), None);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = HistoryLog::new(vec!["a".to_string()]);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn diff_marks_changed_lines() {
        assert!(prompt_diff(None, "a").is_none());
        let lines = prompt_diff(Some("scene\nShot on Leica M3\n"), "scene\nShot on Nikon F3\n")
            .unwrap_or_default();
        assert!(lines.iter().any(|line| line == "-Shot on Leica M3"));
        assert!(lines.iter().any(|line| line == "+Shot on Nikon F3"));
    }
}
