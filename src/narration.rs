//! Turning engine events into a human-readable activity log.
//!
//! The [`Narrator`] is an [`Observer`] like any other. It keeps a bounded,
//! newest-first [`ActivityLog`] for display plus a transcript of the lines
//! produced since the front end last asked, so a UI can replay each step at
//! its own pace without the engine knowing anything about timing.

use std::collections::VecDeque;
use std::fmt;

use crate::tree::{Event, Observer};

/// How many lines the activity log keeps unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 10;

/// One line of narration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    pub label: &'static str,
    pub description: String,
}

impl LogLine {
    pub fn new(label: &'static str, description: impl Into<String>) -> LogLine {
        return LogLine {
            label,
            description: description.into(),
        };
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.description);
    }
}

/// A bounded log, newest line first. The newest line is the active one.
#[derive(Clone, Debug)]
pub struct ActivityLog {
    lines: VecDeque<LogLine>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        return ActivityLog::new(DEFAULT_CAPACITY);
    }
}

impl ActivityLog {
    pub fn new(capacity: usize) -> ActivityLog {
        return ActivityLog {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        };
    }

    pub fn capacity(&self) -> usize {
        return self.capacity;
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lines.is_empty();
    }

    /// Add a line on top, dropping the oldest beyond capacity.
    pub fn push(&mut self, line: LogLine) {
        if self.capacity == 0 {
            return;
        }
        self.lines.push_front(line);
        self.lines.truncate(self.capacity);
    }

    /// The most recent line.
    pub fn active(&self) -> Option<&LogLine> {
        return self.lines.front();
    }

    /// Lines from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &LogLine> {
        return self.lines.iter();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Observer that narrates tree operations.
#[derive(Clone, Debug)]
pub struct Narrator {
    log: ActivityLog,
    transcript: Vec<LogLine>,
    operation: String,
}

impl Default for Narrator {
    fn default() -> Self {
        return Narrator::new(DEFAULT_CAPACITY);
    }
}

impl Narrator {
    pub fn new(capacity: usize) -> Narrator {
        return Narrator {
            log: ActivityLog::new(capacity),
            transcript: Vec::new(),
            operation: "None".to_string(),
        };
    }

    /// Announce an operation the front end is about to run ("Insert 5").
    /// It becomes the current operation and a log line.
    pub fn announce(&mut self, label: &'static str, description: impl Into<String>) {
        let line = LogLine::new(label, description);
        self.operation = line.description.clone();
        self.record(line);
    }

    /// Forget the log and the current operation, then log the reset itself.
    pub fn reset(&mut self) {
        self.log.clear();
        self.transcript.clear();
        self.operation = "None".to_string();
        self.record(LogLine::new("Reset", "Reset"));
    }

    /// Banner text for the last significant step.
    pub fn operation(&self) -> &str {
        return &self.operation;
    }

    pub fn log(&self) -> &ActivityLog {
        return &self.log;
    }

    /// Lines produced since the last call, oldest first.
    pub fn take_transcript(&mut self) -> Vec<LogLine> {
        return std::mem::take(&mut self.transcript);
    }

    fn record(&mut self, line: LogLine) {
        self.transcript.push(line.clone());
        self.log.push(line);
    }
}

impl<K: fmt::Display> Observer<K> for Narrator {
    fn observe(&mut self, event: Event<&K>) {
        let line = LogLine::new(event.label(), event.to_string());
        // Rotations and search outcomes take over the banner; visits and
        // bookkeeping only go to the log.
        match event {
            Event::Rotation { .. } => self.operation = event.label().to_string(),
            Event::Found { .. } | Event::NotFound { .. } => {
                self.operation = line.description.clone();
            }
            _ => {}
        }
        self.record(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::AvlTree;

    #[test]
    fn log_keeps_newest_lines() {
        let mut log = ActivityLog::new(3);
        for i in 0..5 {
            log.push(LogLine::new("Check", format!("Check {i}")));
        }
        let lines: Vec<String> = log.iter().map(|l| l.to_string()).collect();
        assert_eq!(lines, vec!["Check 4", "Check 3", "Check 2"]);
        assert_eq!(log.active().map(|l| l.description.as_str()), Some("Check 4"));
    }

    #[test]
    fn zero_capacity_log_stays_empty() {
        let mut log = ActivityLog::new(0);
        log.push(LogLine::new("Reset", "Reset"));
        assert!(log.is_empty());
    }

    #[test]
    fn narrates_rotation() {
        let mut tree = AvlTree::new();
        let mut narrator = Narrator::default();
        for key in [10, 20, 30] {
            narrator.announce("Insert", format!("Insert {key}"));
            tree.insert_observed(key, &mut narrator);
        }

        assert_eq!(narrator.operation(), "Left rotation");
        let transcript: Vec<String> = narrator
            .take_transcript()
            .into_iter()
            .map(|l| l.description)
            .collect();
        assert_eq!(
            transcript,
            vec![
                "Insert 10",
                "Inserted 10",
                "Insert 20",
                "Inserted 20",
                "Insert 30",
                "Inserted 30",
                "Right-Right imbalance at 10",
                "Left rotation around 10",
            ]
        );
        assert!(narrator.take_transcript().is_empty());
    }

    #[test]
    fn search_outcome_sets_banner() {
        let tree: AvlTree<i32> = [50, 30, 70].into_iter().collect();
        let mut narrator = Narrator::new(DEFAULT_CAPACITY);
        tree.search_observed(&65, &mut narrator);
        assert_eq!(narrator.operation(), "65 not found");
        assert_eq!(narrator.log().active().map(|l| l.label), Some("Not found"));

        narrator.reset();
        assert_eq!(narrator.operation(), "None");
        assert_eq!(narrator.log().len(), 1);
    }
}
