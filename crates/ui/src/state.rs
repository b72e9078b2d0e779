//! Application state for the chat-with-navigation TUI.

use sidetrack_core::{
    ChatMessage, MotionConfig, NavHeader, PanelMotion, SectionTracker, generate_headers,
};
use tracing::debug;

use crate::components::NavIndex;
use crate::transcript::TranscriptView;

/// All mutable state the TUI renders from.
///
/// The motion controller exclusively owns the surface offsets; everything
/// here reads them back as derived values. The tracker is the only writer
/// of `active_id` apart from the optimistic update on a nav jump.
pub struct AppState {
    pub messages: Vec<ChatMessage>,
    pub headers: Vec<NavHeader>,
    pub nav: NavIndex,
    pub motion: PanelMotion,
    pub tracker: SectionTracker,
    /// Chat scroll offset in transcript rows.
    pub scroll: usize,
    /// Keyboard cursor within the flattened nav rows.
    pub selected: usize,
    /// Section currently highlighted in the panel.
    pub active_id: Option<String>,
    pub should_exit: bool,
}

impl AppState {
    pub fn new(messages: Vec<ChatMessage>, motion_config: MotionConfig, viewport_width: f64) -> Self {
        let headers = generate_headers(&messages);
        let nav = NavIndex::build(&headers);

        Self {
            messages,
            headers,
            nav,
            motion: PanelMotion::new(motion_config, viewport_width),
            tracker: SectionTracker::new(),
            scroll: 0,
            selected: 0,
            active_id: None,
            should_exit: false,
        }
    }

    pub fn scroll_by(&mut self, delta: isize, view: &TranscriptView, viewport_height: u16) {
        let max = view.max_scroll(viewport_height);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self, view: &TranscriptView, viewport_height: u16) {
        self.scroll = view.max_scroll(viewport_height);
    }

    pub fn select_next(&mut self) {
        if !self.nav.is_empty() {
            self.selected = (self.selected + 1).min(self.nav.len() - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Jump the chat viewport to the selected nav row's anchor.
    ///
    /// The row is marked active immediately rather than waiting for the
    /// tracker to catch up with the new scroll position. A missing anchor
    /// is a no-op.
    pub fn activate_selected(&mut self, view: &TranscriptView) {
        let Some(row) = self.nav.get(self.selected) else {
            return;
        };
        let Some(scroll) = view.scroll_for_anchor(&row.anchor) else {
            debug!(anchor = %row.anchor, "nav anchor not present in transcript");
            return;
        };

        self.scroll = scroll;
        self.active_id = Some(row.id.clone());
    }

    /// Select and activate the nav row at `index`, e.g. from a click.
    pub fn activate_row(&mut self, index: usize, view: &TranscriptView) {
        if index < self.nav.len() {
            self.selected = index;
            self.activate_selected(view);
        }
    }

    /// Feed the current viewport band to the tracker.
    ///
    /// Returns the newly active id when the tracker reports a change; the
    /// caller owns firing the feedback hook. The keyboard cursor follows
    /// the active section so a subsequent next/previous starts from it.
    pub fn sync_active_section(
        &mut self,
        view: &TranscriptView,
        viewport_height: u16,
    ) -> Option<Option<String>> {
        let changes = view.visibility_changes(self.scroll, viewport_height);
        let report = self.tracker.apply_batch(&changes)?;

        self.active_id = report.clone();
        if let Some(id) = &report
            && let Some(index) = self.nav.position(id)
        {
            self.selected = index;
        }
        Some(report)
    }
}

#[cfg(test)]
impl AppState {
    pub fn for_test() -> Self {
        let messages = vec![
            ChatMessage::user("First question"),
            ChatMessage::assistant("First answer"),
            ChatMessage::user("Second question"),
            ChatMessage::assistant("Second answer"),
        ];
        Self::new(messages, MotionConfig::default(), 80.0)
    }

    pub fn for_test_empty() -> Self {
        Self::new(Vec::new(), MotionConfig::default(), 80.0)
    }
}
