//! Footer statistics for the active editor.
//!
//! The editor widget reports line counts and selections on every update,
//! including updates that change nothing. [`StatisticsAggregator::observe`]
//! only hands back a snapshot when it differs from the last one, which keeps
//! the widget and the footer from re-rendering each other forever.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionStatistics {
    /// Sum of the lengths of all selected ranges.
    pub selection_length: usize,
}

/// Derived metadata for the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorStatistics {
    /// Content length in characters
    pub length: usize,
    pub line_count: usize,
    pub selection: SelectionStatistics,
}

impl EditorStatistics {
    /// Builds a snapshot from the content and the widget's report.
    pub fn compute(content: &str, line_count: usize, selections: &[usize]) -> Self {
        Self {
            length: content.chars().count(),
            line_count,
            selection: SelectionStatistics {
                selection_length: selections.iter().sum(),
            },
        }
    }
}

impl Default for EditorStatistics {
    fn default() -> Self {
        Self {
            length: 0,
            line_count: 1,
            selection: SelectionStatistics::default(),
        }
    }
}

/// Remembers the last published snapshot and filters out repeats.
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    current: EditorStatistics,
    published: usize,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fresh snapshot.
    ///
    /// Returns `Some` only when the snapshot differs from the previous one.
    pub fn observe(&mut self, next: EditorStatistics) -> Option<EditorStatistics> {
        if next == self.current {
            tracing::trace!(?next, "statistics unchanged");
            return None;
        }
        self.current = next;
        self.published += 1;
        Some(next)
    }

    /// The last published snapshot.
    pub fn current(&self) -> EditorStatistics {
        self.current
    }

    /// Number of snapshots that were not suppressed.
    pub fn published(&self) -> usize {
        self.published
    }

    /// Drops back to the empty-document snapshot.
    pub fn reset(&mut self) -> Option<EditorStatistics> {
        self.observe(EditorStatistics::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute() {
        let stats = EditorStatistics::compute("héllo\nworld", 2, &[3, 4]);
        assert_eq!(stats.length, 11);
        assert_eq!(stats.line_count, 2);
        assert_eq!(stats.selection.selection_length, 7);

        let none = EditorStatistics::compute("", 1, &[]);
        assert_eq!(none, EditorStatistics::default());
    }

    #[test]
    fn test_identical_snapshot_is_suppressed() {
        let mut aggregator = StatisticsAggregator::new();
        let snapshot = EditorStatistics {
            length: 5,
            line_count: 1,
            selection: SelectionStatistics { selection_length: 0 },
        };

        assert_eq!(aggregator.observe(snapshot), Some(snapshot));
        assert_eq!(aggregator.observe(snapshot), None);
        assert_eq!(aggregator.published(), 1);
        assert_eq!(aggregator.current(), snapshot);
    }

    #[test]
    fn test_selection_change_is_published() {
        let mut aggregator = StatisticsAggregator::new();
        aggregator.observe(EditorStatistics::compute("hello", 1, &[]));
        let changed = aggregator.observe(EditorStatistics::compute("hello", 1, &[2]));
        assert_eq!(changed.map(|s| s.selection.selection_length), Some(2));
    }

    #[test]
    fn test_reset() {
        let mut aggregator = StatisticsAggregator::new();
        assert_eq!(aggregator.reset(), None);
        aggregator.observe(EditorStatistics::compute("abc", 1, &[]));
        assert_eq!(aggregator.reset(), Some(EditorStatistics::default()));
    }
}
