pub mod app;
pub mod components;
pub mod event_handler;
pub mod feedback;
pub mod layout;
pub mod state;
pub mod theme;
pub mod transcript;

pub use app::App;
pub use event_handler::{EventHandler, KeyAction};
pub use feedback::{BellFeedback, FeedbackHook, NoopFeedback};
pub use state::AppState;
pub use theme::Theme;
pub use transcript::TranscriptView;
