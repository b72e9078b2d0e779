pub mod config;
pub mod error;
pub mod headers;
pub mod logging;
pub mod message;
pub mod motion;
pub mod tracker;

pub use config::{Config, LoggingSettings, MotionConfig};
pub use error::{Error, Result};
pub use headers::{NavHeader, generate_headers};
pub use logging::{LogFormat, init_logging};
pub use message::{ChatMessage, Role, load_transcript};
pub use motion::{DragSurface, PanelMotion, PanelPhase, Spring};
pub use tracker::{SectionTracker, VisibilityChange};
