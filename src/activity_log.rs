//! Bounded, append-only record of human-readable events.

use std::collections::VecDeque;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

/// Maximum number of entries retained; older entries are evicted first.
pub const LOG_CAPACITY: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: OffsetDateTime,
    pub level: Level,
    pub message: String,
}

const CLOCK_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

impl LogEntry {
    /// Wall-clock time of the entry, `HH:MM:SS` (UTC).
    pub fn clock(&self) -> String {
        self.timestamp
            .format(CLOCK_FORMAT)
            .unwrap_or_else(|_| "--:--:--".to_string())
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.clock(), self.message)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    appended: u64,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp and append `message`, evicting from the front past
    /// [`LOG_CAPACITY`].
    pub fn append(&mut self, level: Level, message: impl Into<String>) {
        self.entries.push_back(LogEntry {
            timestamp: OffsetDateTime::now_utc(),
            level,
            message: message.into(),
        });
        self.appended += 1;
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Number of entries ever appended, including evicted ones.
    pub fn appended(&self) -> u64 {
        self.appended
    }

    /// Entries appended after the cursor `seen` (a previous [`Self::appended`]
    /// value). Entries evicted in the meantime are skipped.
    pub fn since(&self, seen: u64) -> impl Iterator<Item = &LogEntry> {
        let fresh = self.appended.saturating_sub(seen).min(self.entries.len() as u64);
        self.entries.iter().skip(self.entries.len() - fresh as usize)
    }

    /// Entries oldest to newest.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }
}

#[cfg(test)]
#[path = "tests/activity_log_tests.rs"]
mod tests;
