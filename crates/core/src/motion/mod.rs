//! Gesture-driven motion model for the two coupled surfaces.

mod controller;
mod spring;

pub use controller::{DragSurface, PanelMotion, PanelPhase};
pub use spring::Spring;
