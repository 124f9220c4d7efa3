//! Simulation error types

use thiserror::Error;

use crate::sim::MatchPhase;

/// Errors raised by match setup, lifecycle calls and direction math.
///
/// None of these are fatal: the match can always be restarted afterwards.
#[derive(Error, Debug)]
pub enum SimError {
    /// Zero, negative or non-finite extent or radius
    #[error("invalid geometry: {what} must be positive and finite (got {value})")]
    InvalidGeometry { what: &'static str, value: f32 },

    /// A tunable outside its legal range
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// A direction vector that cannot be renormalized
    #[error("degenerate direction: cannot renormalize a zero-length or non-finite vector")]
    DegenerateDirection,

    /// Lifecycle call not allowed from the current phase
    #[error("cannot {action} a match in phase {phase:?}")]
    InvalidTransition {
        phase: MatchPhase,
        action: &'static str,
    },

    /// Lifecycle call before the match was set up
    #[error("match has not been set up")]
    NotSetUp,

    /// Settings document could not be parsed
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl SimError {
    /// Check that a geometric quantity is usable as a divisor
    pub fn check_positive(what: &'static str, value: f32) -> Result<f32, SimError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(SimError::InvalidGeometry { what, value })
        }
    }
}
