pub mod chat;
pub mod footer;
pub mod header;
pub mod navigation;

pub use chat::ChatSurface;
pub use footer::Footer;
pub use header::Header;
pub use navigation::{NavIndex, NavRow, NavigationPanel};
