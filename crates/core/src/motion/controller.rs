//! Single source of truth for the offsets of the two coupled surfaces.
//!
//! The chat surface slides right as the navigation panel slides in from the
//! left; the two offsets are locked together by an affine relation,
//!
//! ```text
//! panel_offset = 2 * chat_offset - viewport_width
//! ```
//!
//! Only the chat offset is stored. The panel offset is derived on read, so
//! the relation holds on every intermediate update by construction, not only
//! at rest. Chat offset travels `[0, width/2]`, panel offset
//! `[-width, 0]`; deltas past either bound are dropped rather than
//! accumulated, which gives a hard rubber stop without overshoot.
//!
//! A release resolves to one of two phases using position plus velocity: a
//! fast flick past a small fraction of the travel opens the panel even when
//! the static threshold was never reached. The snap animation then drives a
//! spring per surface; the phase transition commits only once both springs
//! have settled. Starting a drag mid-snap freezes the offsets where they are
//! and hands control back to the pointer, with no positional jump.

use std::time::Duration;

use tracing::debug;

use crate::config::MotionConfig;
use crate::motion::Spring;

/// Smoothing factor for the drag velocity estimate. Higher weights the
/// newest sample more.
const VELOCITY_SMOOTHING: f64 = 0.6;

/// Settle tolerances for snap springs, in cells and cells per second.
const SNAP_REST_THRESHOLD: f64 = 0.05;
const SNAP_VELOCITY_THRESHOLD: f64 = 0.5;

/// Discrete rest state of the dual-panel system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    ChatFocused,
    PanelFocused,
}

/// Which surface a pointer drag is manipulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSurface {
    Chat,
    Panel,
}

#[derive(Debug, Clone)]
struct DragState {
    surface: DragSurface,
    /// Smoothed velocity in chat-surface cells per second. Positive opens.
    chat_velocity: f64,
    sampled: bool,
}

#[derive(Debug, Clone)]
struct SnapState {
    target: PanelPhase,
    chat: Spring,
    panel: Spring,
}

/// Owns drag state, offsets, and snap animation for both surfaces.
#[derive(Debug, Clone)]
pub struct PanelMotion {
    config: MotionConfig,
    viewport_width: f64,
    chat_offset: f64,
    phase: PanelPhase,
    drag: Option<DragState>,
    snap: Option<SnapState>,
}

impl PanelMotion {
    /// Controller at rest in `ChatFocused`, panel fully off-screen.
    pub fn new(config: MotionConfig, viewport_width: f64) -> Self {
        Self {
            config,
            viewport_width: viewport_width.max(1.0),
            chat_offset: 0.0,
            phase: PanelPhase::ChatFocused,
            drag: None,
            snap: None,
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn chat_offset(&self) -> f64 {
        self.chat_offset
    }

    /// Derived from the chat offset on every read.
    pub fn panel_offset(&self) -> f64 {
        2.0 * self.chat_offset - self.viewport_width
    }

    /// Chat surface opacity, a pure function of the chat offset: fades
    /// linearly from 1.0 at rest to 0.8 with the panel fully open.
    pub fn chat_opacity(&self) -> f64 {
        1.0 - 0.2 * (self.chat_offset / self.travel())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_snapping(&self) -> bool {
        self.snap.is_some()
    }

    /// Chat offset travel range, half the viewport width.
    fn travel(&self) -> f64 {
        self.viewport_width / 2.0
    }

    /// Geometry can change between gestures. Re-applying the width rescales
    /// the current offset so the phase's visual state is preserved.
    pub fn set_viewport_width(&mut self, width: f64) {
        let width = width.max(1.0);
        if width == self.viewport_width {
            return;
        }

        let progress = self.chat_offset / self.travel();
        self.viewport_width = width;
        self.chat_offset = progress * self.travel();

        // An in-flight snap is retargeted rather than interpolated.
        if let Some(snap) = self.snap.take() {
            self.start_snap(snap.target, 0.0);
        }
    }

    /// Begin a pointer drag. Hard-cancels any in-flight snap: offsets stay
    /// exactly where the animation left them.
    pub fn begin_drag(&mut self, surface: DragSurface) {
        if self.snap.take().is_some() {
            debug!(?surface, chat_offset = self.chat_offset, "drag cancelled snap");
        }
        self.drag = Some(DragState { surface, chat_velocity: 0.0, sampled: false });
    }

    /// Apply one incremental movement of the active drag.
    ///
    /// `delta` is in the dragged surface's own cells; `dt` is the time since
    /// the previous sample and feeds the velocity estimate. Out-of-range
    /// movement clamps.
    pub fn drag_by(&mut self, delta: f64, dt: Duration) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        // Panel cells translate to chat cells at half scale.
        let chat_delta = match drag.surface {
            DragSurface::Chat => delta,
            DragSurface::Panel => delta / 2.0,
        };

        let travel = self.viewport_width / 2.0;
        self.chat_offset = (self.chat_offset + chat_delta).clamp(0.0, travel);

        let secs = dt.as_secs_f64();
        if secs > 0.0 {
            let instantaneous = chat_delta / secs;
            drag.chat_velocity = if drag.sampled {
                VELOCITY_SMOOTHING * instantaneous + (1.0 - VELOCITY_SMOOTHING) * drag.chat_velocity
            } else {
                instantaneous
            };
            drag.sampled = true;
        }
    }

    /// The release decision rule, exposed for direct use.
    ///
    /// `offset` and `velocity` are in the released surface's own
    /// coordinates, velocity positive in the opening direction.
    ///
    /// A chat drag opens the panel when it passed the chat open threshold,
    /// or when it passed the smaller dynamic threshold with a flick faster
    /// than the velocity floor. A panel drag keeps the panel open when it
    /// sits past the panel open threshold and is not being flicked shut.
    pub fn resolve(&self, surface: DragSurface, offset: f64, velocity: f64) -> PanelPhase {
        match surface {
            DragSurface::Chat => {
                let normalized = offset / self.travel();
                let past_static = normalized > self.config.chat_open_threshold;
                let flicked_open = normalized > self.config.dynamic_threshold
                    && velocity > self.config.velocity_floor;

                if past_static || flicked_open {
                    PanelPhase::PanelFocused
                } else {
                    PanelPhase::ChatFocused
                }
            }
            DragSurface::Panel => {
                let normalized = (offset + self.viewport_width) / self.viewport_width;
                let past_static = normalized > self.config.panel_open_threshold;
                let flicked_shut = -velocity >= self.config.velocity_floor;

                if past_static && !flicked_shut {
                    PanelPhase::PanelFocused
                } else {
                    PanelPhase::ChatFocused
                }
            }
        }
    }

    /// End the active drag, resolve a target phase, and start the snap.
    ///
    /// The smoothed drag velocity carries over as the snap's initial
    /// velocity so the animation continues the gesture. Without an active
    /// drag this is a no-op.
    pub fn release(&mut self) -> PanelPhase {
        let Some(drag) = self.drag.take() else {
            return self.phase;
        };

        let (offset, velocity) = match drag.surface {
            DragSurface::Chat => (self.chat_offset, drag.chat_velocity),
            DragSurface::Panel => (self.panel_offset(), drag.chat_velocity * 2.0),
        };
        let target = self.resolve(drag.surface, offset, velocity);
        debug!(surface = ?drag.surface, offset, velocity, ?target, "drag released");

        self.start_snap(target, drag.chat_velocity);
        target
    }

    /// Programmatic open, e.g. bound to a key. No-op when already open or
    /// snapping open.
    pub fn open(&mut self) {
        if self.target_phase() != PanelPhase::PanelFocused {
            self.drag = None;
            self.start_snap(PanelPhase::PanelFocused, 0.0);
        }
    }

    /// Programmatic close.
    pub fn close(&mut self) {
        if self.target_phase() != PanelPhase::ChatFocused {
            self.drag = None;
            self.start_snap(PanelPhase::ChatFocused, 0.0);
        }
    }

    pub fn toggle(&mut self) {
        match self.target_phase() {
            PanelPhase::ChatFocused => self.open(),
            PanelPhase::PanelFocused => self.close(),
        }
    }

    /// The phase the controller is at rest in or currently converging to.
    pub fn target_phase(&self) -> PanelPhase {
        self.snap.as_ref().map_or(self.phase, |s| s.target)
    }

    fn start_snap(&mut self, target: PanelPhase, chat_velocity: f64) {
        let chat_target = match target {
            PanelPhase::ChatFocused => 0.0,
            PanelPhase::PanelFocused => self.travel(),
        };

        let spring = |position: f64, target: f64, velocity: f64| {
            Spring::new(position, target)
                .with_stiffness(self.config.spring_stiffness)
                .with_damping(self.config.spring_damping)
                .with_mass(self.config.spring_mass)
                .with_velocity(velocity)
                .with_rest_threshold(SNAP_REST_THRESHOLD)
                .with_velocity_threshold(SNAP_VELOCITY_THRESHOLD)
        };

        // The panel spring mirrors the chat spring through the affine
        // relation, so both obey the same dynamics and settle together.
        self.snap = Some(SnapState {
            target,
            chat: spring(self.chat_offset, chat_target, chat_velocity),
            panel: spring(
                self.panel_offset(),
                2.0 * chat_target - self.viewport_width,
                chat_velocity * 2.0,
            ),
        });
    }

    /// Advance the snap animation, if any. Returns true while motion is
    /// still in flight.
    ///
    /// The phase transition commits only after both surface springs have
    /// settled.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(snap) = self.snap.as_mut() else {
            return false;
        };

        snap.chat.advance(dt);
        snap.panel.advance(dt);

        let travel = self.viewport_width / 2.0;
        self.chat_offset = snap.chat.position().clamp(0.0, travel);

        if snap.chat.is_at_rest() && snap.panel.is_at_rest() {
            let target = snap.target;
            self.snap = None;
            self.chat_offset = match target {
                PanelPhase::ChatFocused => 0.0,
                PanelPhase::PanelFocused => travel,
            };
            if self.phase != target {
                debug!(?target, "phase transition committed");
                self.phase = target;
            }
            false
        } else {
            true
        }
    }
}
