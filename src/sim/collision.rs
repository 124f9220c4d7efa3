//! Collision detection and response
//!
//! Runs against the post-integration ball position, in a fixed order:
//! side walls, player paddle, opponent paddle, then the scoring lines.
//! Reflections stack within a tick, so a corner hit flips X and Y together.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, Playfield, Side};
use super::volume::sphere_box_overlap;
use crate::error::SimError;
use crate::settings::Settings;

/// Transverse axis of a wall bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// What happened to the ball during one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Walls bounced off, in X-then-Y order
    pub walls: Vec<Axis>,
    /// Paddle that returned the ball, if any
    pub paddle: Option<Side>,
    /// Side awarded a point, if the ball left the field
    pub scorer: Option<Side>,
}

/// Flip the X/Y direction components for walls the ball has reached.
///
/// A component is only flipped while the ball still heads outward, so a ball
/// that penetrated the wall does not jitter. Position is left untouched.
pub fn reflect_off_bounds(ball: &mut Ball, field: &Playfield) -> Vec<Axis> {
    let half = field.half_extents();
    let mut flipped = Vec::new();

    for axis in [Axis::X, Axis::Y] {
        let i = axis.index();
        let p = ball.pos[i];
        let d = ball.direction()[i];
        let past_high = p + ball.radius > half[i] && d > 0.0;
        let past_low = p - ball.radius < -half[i] && d < 0.0;
        if past_high || past_low {
            ball.flip_axis(i);
            flipped.push(axis);
        }
    }

    flipped
}

/// Raw (not yet normalized) direction after a paddle hit.
///
/// X follows the hit offset across the paddle face scaled by the X
/// deflection; Y does the same at half weight; Z reverses.
pub fn paddle_deflection(ball: &Ball, paddle: &Paddle, settings: &Settings) -> Vec3 {
    let offset = ball.pos - paddle.pos;
    Vec3::new(
        offset.x / paddle.half_extents.x * settings.deflection_x,
        offset.y / paddle.half_extents.y * settings.deflection_y,
        -ball.direction().z,
    )
}

/// Reflect the ball off `paddle` if they overlap and the ball is travelling
/// toward it. Only player-paddle hits speed the ball up.
pub fn reflect_off_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    settings: &Settings,
) -> Result<bool, SimError> {
    let approaching = ball.direction().z * paddle.side.z_sign() > 0.0;
    if !approaching || !sphere_box_overlap(&ball.as_sphere(), &paddle.as_aabb()) {
        return Ok(false);
    }

    let deflected = paddle_deflection(ball, paddle, settings);
    ball.set_direction(deflected)?;

    if paddle.side == Side::Player {
        ball.speed += settings.speed_increment;
    }
    Ok(true)
}

/// Side that wins the point if the whole ball has left the field through
/// either end.
///
/// The radius margin means a ball served straight down the field at base
/// speed scores two ticks after its centre reaches the end line (tick 32
/// rather than 30 with the reference tuning).
pub fn scoring_side(ball: &Ball, field: &Playfield) -> Option<Side> {
    let half_depth = field.depth / 2.0;
    if ball.pos.z - ball.radius > half_depth {
        // Past the player's end
        Some(Side::Opponent)
    } else if ball.pos.z + ball.radius < -half_depth {
        Some(Side::Player)
    } else {
        None
    }
}

/// Run one full resolution pass
pub fn resolve(
    ball: &mut Ball,
    player: &Paddle,
    opponent: &Paddle,
    field: &Playfield,
    settings: &Settings,
) -> Result<CollisionReport, SimError> {
    let mut report = CollisionReport {
        walls: reflect_off_bounds(ball, field),
        ..Default::default()
    };

    for paddle in [player, opponent] {
        if reflect_off_paddle(ball, paddle, settings)? {
            report.paddle = Some(paddle.side);
        }
    }

    report.scorer = scoring_side(ball, field);
    Ok(report)
}
