//! Damped spring used for snap animations.
//!
//! Classical damped oscillator: `F = -k·(x - target) - c·v`, divided by mass.
//! Integrated with semi-implicit Euler; large frame deltas are subdivided so
//! that stiff springs stay numerically stable. A spring is "at rest" when
//! both its displacement and its velocity fall below small thresholds, at
//! which point it pins itself to the target and stops integrating until
//! woken by `set_target` or an impulse.
//!
//! Positions are in whatever unit the caller works in (terminal cells here);
//! velocities are units per second.

use std::time::Duration;

/// Largest dt handed to a single integration step. Anything bigger is
/// subdivided.
const MAX_STEP_SECS: f64 = 0.004;

/// Displacement below which the spring may settle.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Speed below which the spring may settle.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

const MIN_STIFFNESS: f64 = 0.1;
const MIN_MASS: f64 = 0.01;

/// A damped spring converging from its current position toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring starting at `position`, converging toward `target`.
    pub fn new(position: f64, target: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            target,
            stiffness: 400.0,
            damping: 30.0,
            mass: 1.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    pub fn with_mass(mut self, m: f64) -> Self {
        self.mass = m.max(MIN_MASS);
        self
    }

    /// Initial velocity, e.g. carried over from the gesture that released
    /// into this animation.
    pub fn with_velocity(mut self, v: f64) -> Self {
        self.velocity = v;
        self
    }

    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold.abs();
        self
    }

    pub fn with_velocity_threshold(mut self, threshold: f64) -> Self {
        self.velocity_threshold = threshold.abs();
        self
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Retarget the spring, waking it when the new target actually differs.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Add to the current velocity and wake the spring.
    pub fn impulse(&mut self, velocity_delta: f64) {
        self.velocity += velocity_delta;
        self.at_rest = false;
    }

    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler: velocity from current displacement, then
        // position from the new velocity.
        let displacement = self.position - self.target;
        let acceleration = (-self.stiffness * displacement - self.damping * self.velocity) / self.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`. At-rest springs do not move.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let total = dt.as_secs_f64();
        if total <= 0.0 {
            return;
        }

        let mut remaining = total;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}
