//! Wrapped transcript lines plus the anchor map that ties screen rows back
//! to message ids.
//!
//! The view is rebuilt when the message list or the chat column width
//! changes, not per frame. Every message owns a contiguous run of rows; the
//! run doubles as the anchor target for click-to-scroll and as the
//! intersection candidate for active-section tracking.

use ratatui::text::{Line, Span};
use sidetrack_core::{ChatMessage, Role, VisibilityChange};

use crate::theme::Theme;

/// Rows between the viewport top and a jumped-to anchor, so the anchor is
/// not flush against the chrome.
const ANCHOR_TOP_MARGIN: usize = 2;

/// A message's row range within the rendered transcript, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorSpan {
    pub id: String,
    pub start: usize,
    pub end: usize,
}

/// Render-ready transcript for a fixed column width.
#[derive(Debug, Clone)]
pub struct TranscriptView {
    lines: Vec<Line<'static>>,
    anchors: Vec<AnchorSpan>,
    width: u16,
}

impl TranscriptView {
    /// Wrap `messages` to `width` columns.
    pub fn build(messages: &[ChatMessage], width: u16) -> Self {
        let wrap_width = usize::from(width.saturating_sub(2)).max(8);
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut anchors = Vec::new();

        for (index, message) in messages.iter().enumerate() {
            let start = lines.len();
            let (label, label_style) = match message.role {
                Role::User => ("You", Theme::primary()),
                Role::Assistant => ("Assistant", Theme::secondary()),
            };

            lines.push(Line::from(Span::styled(label.to_string(), label_style)));
            for wrapped in textwrap::wrap(&message.content, wrap_width) {
                lines.push(Line::from(Span::styled(format!("  {}", wrapped), Theme::base())));
            }
            lines.push(Line::default());

            anchors.push(AnchorSpan { id: format!("message-{}", index), start, end: lines.len() });
        }

        Self { lines, anchors, width }
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn anchors(&self) -> &[AnchorSpan] {
        &self.anchors
    }

    /// First row of the message with the given anchor id.
    pub fn anchor_line(&self, id: &str) -> Option<usize> {
        self.anchors.iter().find(|a| a.id == id).map(|a| a.start)
    }

    /// Scroll offset that places the anchor a couple of rows below the
    /// viewport top. `None` when the anchor does not exist.
    pub fn scroll_for_anchor(&self, id: &str) -> Option<usize> {
        self.anchor_line(id).map(|line| line.saturating_sub(ANCHOR_TOP_MARGIN))
    }

    /// Visibility of every anchor against the tracking band.
    ///
    /// The band is a horizontal strip centered on the viewport midpoint,
    /// half the viewport tall. With the scroll pinned at either end the
    /// band extends to that edge, otherwise the first and last messages
    /// could never reach it. The full report is handed to the tracker,
    /// which owns change detection.
    pub fn visibility_changes(&self, scroll: usize, viewport_height: u16) -> Vec<VisibilityChange> {
        let height = usize::from(viewport_height);
        let mid = scroll + height / 2;
        let margin = (height / 4).max(1);
        let band_start = if scroll == 0 { 0 } else { mid.saturating_sub(margin) };
        let band_end = if scroll >= self.max_scroll(viewport_height) {
            scroll + height
        } else {
            mid + margin
        };

        self.anchors
            .iter()
            .map(|anchor| VisibilityChange {
                id: anchor.id.clone(),
                visible: anchor.start < band_end && anchor.end > band_start,
            })
            .collect()
    }

    /// Largest useful scroll offset for a viewport of the given height.
    pub fn max_scroll(&self, viewport_height: u16) -> usize {
        self.lines.len().saturating_sub(usize::from(viewport_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::user("How do lifetimes work?"),
            ChatMessage::assistant("Lifetimes tie borrows to scopes. ".repeat(10)),
            ChatMessage::user("What about 'static?"),
        ]
    }

    #[test]
    fn test_every_message_has_an_anchor() {
        let view = TranscriptView::build(&messages(), 80);
        assert_eq!(view.anchors().len(), 3);
        assert_eq!(view.anchors()[0].id, "message-0");
        assert_eq!(view.anchors()[2].id, "message-2");
    }

    #[test]
    fn test_anchor_spans_are_contiguous() {
        let view = TranscriptView::build(&messages(), 80);
        let anchors = view.anchors();

        assert_eq!(anchors[0].start, 0);
        for pair in anchors.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(anchors.last().unwrap().end, view.line_count());
    }

    #[test]
    fn test_narrow_width_wraps_more_lines() {
        let narrow = TranscriptView::build(&messages(), 40);
        let wide = TranscriptView::build(&messages(), 120);
        assert!(narrow.line_count() > wide.line_count());
    }

    #[test]
    fn test_scroll_for_anchor_keeps_margin() {
        let view = TranscriptView::build(&messages(), 80);
        let line = view.anchor_line("message-2").unwrap();

        assert_eq!(view.scroll_for_anchor("message-2"), Some(line - ANCHOR_TOP_MARGIN));
        // Anchors near the top clamp to zero rather than underflowing.
        assert_eq!(view.scroll_for_anchor("message-0"), Some(0));
    }

    #[test]
    fn test_scroll_for_missing_anchor_is_none() {
        let view = TranscriptView::build(&messages(), 80);
        assert_eq!(view.scroll_for_anchor("message-99"), None);
    }

    #[test]
    fn test_visibility_band_tracks_scroll() {
        let view = TranscriptView::build(&messages(), 40);
        let height = 10u16;

        // At the top the band covers the first message.
        let at_top = view.visibility_changes(0, height);
        assert!(at_top.iter().any(|c| c.id == "message-0" && c.visible));

        // Scrolled all the way down, the first is out of band.
        let at_bottom = view.visibility_changes(view.max_scroll(height), height);
        let first = at_bottom.iter().find(|c| c.id == "message-0").unwrap();
        assert!(!first.visible);
        let last = at_bottom.iter().find(|c| c.id == "message-2").unwrap();
        assert!(last.visible);
    }

    #[test]
    fn test_empty_transcript() {
        let view = TranscriptView::build(&[], 80);
        assert_eq!(view.line_count(), 0);
        assert!(view.visibility_changes(0, 24).is_empty());
        assert_eq!(view.max_scroll(24), 0);
    }

    #[test]
    fn test_max_scroll() {
        let view = TranscriptView::build(&messages(), 40);
        let total = view.line_count();
        assert_eq!(view.max_scroll(10), total - 10);
        assert_eq!(view.max_scroll(u16::MAX), 0);
    }
}
