//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step only (speeds are per tick)
//! - Seeded RNG only
//! - No rendering, tracking or platform dependencies

pub mod collision;
pub mod opponent;
pub mod phase;
pub mod state;
pub mod tick;
pub mod volume;

pub use collision::{Axis, CollisionReport, resolve};
pub use phase::{MatchPhase, MatchState, ScoreOutcome};
pub use state::{Ball, Paddle, Playfield, Side};
pub use tick::{GameEvent, MatchContext, TickInput, tick};
pub use volume::{Aabb, Sphere, sphere_box_overlap};
