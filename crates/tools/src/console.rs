use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const ERROR_PREFIX: &str = "[ERROR] ";
pub const WARNING_PREFIX: &str = "[WARNING] ";
/// Lines kept before the oldest are dropped.
pub const DEFAULT_CAPACITY: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn prefix(self) -> &'static str {
        match self {
            Severity::Info => "",
            Severity::Warning => WARNING_PREFIX,
            Severity::Error => ERROR_PREFIX,
        }
    }
}

/// One console entry. `text` already carries the severity prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug)]
struct Buffer {
    lines: VecDeque<LogLine>,
    capacity: usize,
    dropped: u64,
    /// Bumped on every change so viewers know when to scroll.
    revision: u64,
}

/// Append-only log shown in the overlay.
///
/// Cheap to clone; clones share one buffer, so the tracing layer and the UI
/// can both hold it.
#[derive(Debug, Clone)]
pub struct LogConsole {
    inner: Arc<Mutex<Buffer>>,
}

impl Default for LogConsole {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LogConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(Buffer {
                lines: VecDeque::with_capacity(capacity.min(256)),
                capacity,
                dropped: 0,
                revision: 0,
            })),
        }
    }

    fn buffer(&self) -> MutexGuard<'_, Buffer> {
        // A panic while holding the lock leaves the buffer usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, text: impl AsRef<str>) {
        self.push(Severity::Info, text);
    }

    pub fn add_warning(&self, text: impl AsRef<str>) {
        self.push(Severity::Warning, text);
    }

    pub fn add_error(&self, text: impl AsRef<str>) {
        self.push(Severity::Error, text);
    }

    pub fn push(&self, severity: Severity, text: impl AsRef<str>) {
        let line = LogLine {
            severity,
            text: format!("{}{}", severity.prefix(), text.as_ref()),
        };
        let mut buf = self.buffer();
        if buf.lines.len() == buf.capacity {
            buf.lines.pop_front();
            buf.dropped += 1;
        }
        buf.lines.push_back(line);
        buf.revision += 1;
    }

    pub fn clear(&self) {
        let mut buf = self.buffer();
        buf.lines.clear();
        buf.revision += 1;
    }

    pub fn len(&self) -> usize {
        self.buffer().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buffer().capacity
    }

    /// Lines pushed out by the capacity limit since startup.
    pub fn dropped(&self) -> u64 {
        self.buffer().dropped
    }

    pub fn revision(&self) -> u64 {
        self.buffer().revision
    }

    /// Snapshot of the lines containing `filter` (case-insensitive).
    /// An empty filter matches everything.
    pub fn filtered(&self, filter: &str) -> Vec<LogLine> {
        let needle = filter.to_lowercase();
        self.buffer()
            .lines
            .iter()
            .filter(|l| needle.is_empty() || l.text.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.filtered("")
    }

    /// Matching lines joined by newlines, for the clipboard.
    pub fn text(&self, filter: &str) -> String {
        self.filtered(filter)
            .into_iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_get_prefixes() {
        let console = LogConsole::new();
        console.add("plain");
        console.add_warning("careful");
        console.add_error("broken");
        let texts: Vec<String> = console.lines().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["plain", "[WARNING] careful", "[ERROR] broken"]);
    }

    #[test]
    fn capacity_drops_oldest() {
        let console = LogConsole::with_capacity(3);
        for i in 0..5 {
            console.add(format!("line {i}"));
        }
        assert_eq!(console.len(), 3);
        assert_eq!(console.dropped(), 2);
        assert_eq!(console.lines()[0].text, "line 2");
    }

    #[test]
    fn zero_capacity_still_keeps_latest() {
        let console = LogConsole::with_capacity(0);
        console.add("a");
        console.add("b");
        assert_eq!(console.text(""), "b");
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let console = LogConsole::new();
        console.add("Shader program \"test\" successfully compiled and linked.");
        console.add_error("failed to read shaders/basic.vert.wgsl");
        console.add("window resized");
        assert_eq!(console.filtered("SHADER").len(), 2);
        assert_eq!(console.filtered("error").len(), 1);
        assert_eq!(console.filtered("").len(), 3);
        assert!(console.filtered("nothing here").is_empty());
    }

    #[test]
    fn copy_text_joins_matches() {
        let console = LogConsole::new();
        console.add("one");
        console.add_warning("two");
        assert_eq!(console.text(""), "one\n[WARNING] two");
        assert_eq!(console.text("two"), "[WARNING] two");
    }

    #[test]
    fn clones_share_and_clear_bumps_revision() {
        let console = LogConsole::new();
        let writer = console.clone();
        writer.add("from clone");
        assert_eq!(console.len(), 1);
        let before = console.revision();
        console.clear();
        assert!(writer.is_empty());
        assert!(console.revision() > before);
    }
}
