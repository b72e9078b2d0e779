//! Tracks which navigation target corresponds to the content currently
//! centered in the chat viewport.
//!
//! Visibility changes arrive in coalesced batches; the tracker keeps an
//! owned record of currently-intersecting candidates in arrival order and
//! reduces it to a single active id. Arrival order is the tie-break
//! authority: the most recently visible candidate that is still visible
//! wins. Consumers are notified on change only.

/// One candidate entering or leaving the visibility band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    pub id: String,
    pub visible: bool,
}

impl VisibilityChange {
    pub fn visible(id: impl Into<String>) -> Self {
        Self { id: id.into(), visible: true }
    }

    pub fn hidden(id: impl Into<String>) -> Self {
        Self { id: id.into(), visible: false }
    }
}

/// Reducer from visibility batches to a single active section id.
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    /// Currently intersecting candidates, oldest arrival first.
    visible: Vec<String>,
    /// Last id handed to the consumer, `None` once reported empty.
    reported: Option<String>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one coalesced batch of visibility changes.
    ///
    /// Returns `Some(active)` when the selected active id differs from the
    /// previously reported one, `None` when nothing changed. An empty
    /// candidate set selects `None` rather than erroring.
    pub fn apply_batch(&mut self, changes: &[VisibilityChange]) -> Option<Option<String>> {
        for change in changes {
            let existing = self.visible.iter().position(|id| id == &change.id);
            match (change.visible, existing) {
                (true, None) => self.visible.push(change.id.clone()),
                (false, Some(index)) => {
                    self.visible.remove(index);
                }
                // Re-reported state is not a new arrival.
                _ => {}
            }
        }

        let active = self.visible.last().cloned();
        if active != self.reported {
            self.reported = active.clone();
            Some(active)
        } else {
            None
        }
    }

    /// Drop state for candidates no longer present.
    ///
    /// Called when the candidate set changes structurally (re-render), the
    /// equivalent of re-subscribing the observer to the current elements.
    pub fn retain_candidates<F>(&mut self, mut exists: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.visible.retain(|id| exists(id));
    }

    /// The currently selected active id, if any.
    pub fn active(&self) -> Option<&str> {
        self.visible.last().map(String::as_str)
    }

    /// Forget everything, e.g. on teardown.
    pub fn clear(&mut self) {
        self.visible.clear();
        self.reported = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_reports_nothing() {
        let mut tracker = SectionTracker::new();
        assert_eq!(tracker.apply_batch(&[]), None);
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn test_single_candidate_reported_once() {
        let mut tracker = SectionTracker::new();

        let report = tracker.apply_batch(&[VisibilityChange::visible("message-0")]);
        assert_eq!(report, Some(Some("message-0".to_string())));

        // Same state again: no change, no report.
        let report = tracker.apply_batch(&[VisibilityChange::visible("message-0")]);
        assert_eq!(report, None);
    }

    #[test]
    fn test_sequential_scroll_fires_per_section() {
        let mut tracker = SectionTracker::new();

        // Three candidates with disjoint, sequential visibility windows.
        let reports = [
            tracker.apply_batch(&[VisibilityChange::visible("a")]),
            tracker.apply_batch(&[VisibilityChange::hidden("a"), VisibilityChange::visible("b")]),
            tracker.apply_batch(&[VisibilityChange::hidden("b"), VisibilityChange::visible("c")]),
        ];

        assert_eq!(
            reports,
            [
                Some(Some("a".to_string())),
                Some(Some("b".to_string())),
                Some(Some("c".to_string())),
            ]
        );

        // Scroll past all candidates.
        let report = tracker.apply_batch(&[VisibilityChange::hidden("c")]);
        assert_eq!(report, Some(None));
    }

    #[test]
    fn test_most_recent_arrival_wins() {
        let mut tracker = SectionTracker::new();

        tracker.apply_batch(&[VisibilityChange::visible("a"), VisibilityChange::visible("b")]);
        assert_eq!(tracker.active(), Some("b"));

        // "a" leaving keeps "b"; "b" leaving falls back to nothing visible.
        let report = tracker.apply_batch(&[VisibilityChange::hidden("a")]);
        assert_eq!(report, None);
        assert_eq!(tracker.active(), Some("b"));
    }

    #[test]
    fn test_fallback_to_earlier_arrival() {
        let mut tracker = SectionTracker::new();

        tracker.apply_batch(&[VisibilityChange::visible("a"), VisibilityChange::visible("b")]);
        let report = tracker.apply_batch(&[VisibilityChange::hidden("b")]);
        assert_eq!(report, Some(Some("a".to_string())));
    }

    #[test]
    fn test_hiding_unknown_candidate_is_noop() {
        let mut tracker = SectionTracker::new();
        assert_eq!(tracker.apply_batch(&[VisibilityChange::hidden("ghost")]), None);
    }

    #[test]
    fn test_retain_candidates_on_structural_change() {
        let mut tracker = SectionTracker::new();
        tracker.apply_batch(&[VisibilityChange::visible("a"), VisibilityChange::visible("b")]);

        // Re-render removed "b" from the candidate set entirely.
        tracker.retain_candidates(|id| id == "a");
        assert_eq!(tracker.active(), Some("a"));

        let report = tracker.apply_batch(&[]);
        assert_eq!(report, Some(Some("a".to_string())));
    }

    #[test]
    fn test_clear() {
        let mut tracker = SectionTracker::new();
        tracker.apply_batch(&[VisibilityChange::visible("a")]);

        tracker.clear();
        assert_eq!(tracker.active(), None);

        // After clear, the first arrival is reported again.
        let report = tracker.apply_batch(&[VisibilityChange::visible("a")]);
        assert_eq!(report, Some(Some("a".to_string())));
    }

    #[test]
    fn test_reports_only_known_candidates() {
        let mut tracker = SectionTracker::new();
        let candidates = ["a", "b", "c"];

        let batches = [
            vec![VisibilityChange::visible("a")],
            vec![VisibilityChange::hidden("a"), VisibilityChange::visible("b")],
            vec![VisibilityChange::visible("c"), VisibilityChange::hidden("b")],
            vec![VisibilityChange::hidden("c")],
        ];

        for batch in &batches {
            if let Some(Some(id)) = tracker.apply_batch(batch) {
                assert!(candidates.contains(&id.as_str()));
            }
        }
        assert_eq!(tracker.active(), None);
    }
}
