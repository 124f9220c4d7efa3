//! AR Pong - a 3D Pong volley played over a tracked marker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, match state)
//! - `driver`: Host-facing loop driver and input queue
//! - `input`: Touch/orientation to field-coordinate adapters
//! - `settings`: Data-driven match tuning
//!
//! Rendering, marker tracking and asset serving live in the host page.

pub mod driver;
pub mod error;
pub mod input;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{Driver, Frame, InputEvent};
pub use error::SimError;
pub use settings::{DifficultyPreset, Settings};

/// Reference tuning values (the defaults for [`Settings`])
pub mod consts {
    /// Playfield extents (X, Y, Z)
    pub const FIELD_WIDTH: f32 = 2.0;
    pub const FIELD_HEIGHT: f32 = 1.2;
    pub const FIELD_DEPTH: f32 = 3.0;

    /// Paddle box (full extents)
    pub const PADDLE_WIDTH: f32 = 0.6;
    pub const PADDLE_HEIGHT: f32 = 0.2;
    pub const PADDLE_DEPTH: f32 = 0.04;
    /// Paddles sit this far inside each end of the field
    pub const PADDLE_INSET: f32 = 0.2;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.06;
    /// Distance travelled per tick at serve
    pub const BALL_BASE_SPEED: f32 = 0.05;
    /// Added to the speed on every player-paddle hit
    pub const BALL_SPEED_INCREMENT: f32 = 0.002;

    /// Serve direction components are scaled by this before renormalizing
    pub const SERVE_BIAS: f32 = 0.7;
    /// Maximum X deflection off a paddle
    pub const DEFLECTION_X: f32 = 0.8;
    /// Y deflection weight off a paddle
    pub const DEFLECTION_Y: f32 = 0.5;

    /// Opponent pursuit rate per tick
    pub const OPPONENT_DIFFICULTY: f32 = 0.03;

    /// First side to this many points wins
    pub const WIN_SCORE: u32 = 5;

    /// Tolerance used for unit-length checks
    pub const UNIT_EPSILON: f32 = 1e-4;
}
