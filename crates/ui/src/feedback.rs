//! Fire-and-forget feedback on active-section changes.
//!
//! The hook runs on every change the tracker reports. It must never block
//! and never fail the state transition that triggered it; implementations
//! swallow their own errors.

use std::io::Write;

pub trait FeedbackHook: Send {
    fn section_changed(&mut self, id: &str);
}

/// Silent default.
pub struct NoopFeedback;

impl FeedbackHook for NoopFeedback {
    fn section_changed(&mut self, _id: &str) {}
}

/// Terminal bell, the closest a terminal gets to a haptic tick. Terminals
/// without a bell ignore the byte, write errors are dropped.
pub struct BellFeedback;

impl FeedbackHook for BellFeedback {
    fn section_changed(&mut self, _id: &str) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

#[cfg(test)]
pub struct RecordingFeedback(pub Vec<String>);

#[cfg(test)]
impl FeedbackHook for RecordingFeedback {
    fn section_changed(&mut self, id: &str) {
        self.0.push(id.to_string());
    }
}
