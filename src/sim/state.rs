//! Playfield, paddle and ball types
//!
//! The field is centred on the origin. The player defends the +Z end, the
//! opponent the -Z end. Speeds are in distance per tick: the simulation is
//! fixed-step and never scales by wall-clock time.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::volume::{Aabb, Sphere};
use crate::error::SimError;
use crate::settings::Settings;

/// One of the two ends of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human-controlled paddle at +Z
    Player,
    /// Computer-controlled paddle at -Z
    Opponent,
}

impl Side {
    /// Sign of Z along which this side's end lies
    pub fn z_sign(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

/// The six-sided playing volume (immutable for a match)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32, depth: f32) -> Result<Self, SimError> {
        Ok(Self {
            width: SimError::check_positive("field width", width)?,
            height: SimError::check_positive("field height", height)?,
            depth: SimError::check_positive("field depth", depth)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, SimError> {
        Self::new(
            settings.field_width,
            settings.field_height,
            settings.field_depth,
        )
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) * 0.5
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        Vec3::ZERO
    }
}

/// A paddle: a box sliding in the X/Y plane at a fixed Z
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Centre of the paddle box
    pub pos: Vec3,
    pub half_extents: Vec3,
    /// Largest legal |x| and |y| for the centre
    pub limit: Vec2,
}

impl Paddle {
    /// Create a paddle centred on its defensive line
    pub fn new(side: Side, settings: &Settings) -> Result<Self, SimError> {
        let size = Vec3::new(
            settings.paddle_width,
            settings.paddle_height,
            settings.paddle_depth,
        );
        // Validates the extents
        let aabb = Aabb::from_size(Vec3::ZERO, size)?;
        let z = side.z_sign() * (settings.field_depth / 2.0 - settings.paddle_inset);

        Ok(Self {
            side,
            pos: Vec3::new(0.0, 0.0, z),
            half_extents: aabb.half_extents,
            limit: Vec2::new(settings.paddle_limit_x(), settings.paddle_limit_y()),
        })
    }

    /// The paddle's collision box
    pub fn as_aabb(&self) -> Aabb {
        Aabb {
            center: self.pos,
            half_extents: self.half_extents,
        }
    }

    /// Transverse (X/Y) position
    #[inline]
    pub fn xy(&self) -> Vec2 {
        self.pos.truncate()
    }

    /// Commit a new X/Y position, clamped into the legal range. Z never moves.
    pub fn move_to(&mut self, target: Vec2) {
        let clamped = target.clamp(-self.limit, self.limit);
        self.pos.x = clamped.x;
        self.pos.y = clamped.y;
    }

    /// Check the clamping invariant
    pub fn in_bounds(&self) -> bool {
        self.pos.x.abs() <= self.limit.x && self.pos.y.abs() <= self.limit.y
    }
}

/// The ball
#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub pos: Vec3,
    /// Unit-length travel direction
    direction: Vec3,
    /// Distance per tick
    pub speed: f32,
    pub radius: f32,
    /// Speed restored at every serve
    pub base_speed: f32,
}

impl Ball {
    /// Create a ball at the origin travelling toward the player
    pub fn new(radius: f32, base_speed: f32) -> Result<Self, SimError> {
        Ok(Self {
            pos: Vec3::ZERO,
            direction: Vec3::Z,
            speed: SimError::check_positive("base speed", base_speed)?,
            radius: SimError::check_positive("ball radius", radius)?,
            base_speed,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, SimError> {
        Self::new(settings.ball_radius, settings.base_speed)
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Assign a new direction, renormalized to unit length.
    ///
    /// A zero-length or non-finite vector is rejected and the old direction
    /// is kept, so NaN never reaches the position update.
    pub fn set_direction(&mut self, dir: Vec3) -> Result<(), SimError> {
        self.direction = dir.try_normalize().ok_or(SimError::DegenerateDirection)?;
        Ok(())
    }

    /// Negate one component of the direction (length is preserved)
    pub fn flip_axis(&mut self, axis: usize) {
        self.direction[axis] = -self.direction[axis];
    }

    /// Advance one fixed step: `pos += direction * speed`
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.direction * self.speed;
    }

    /// Place the ball at the field centre with a random serve direction.
    ///
    /// The direction is `(cos θ, sin θ, ±1)` scaled by `bias` and renormalized,
    /// so the serve always carries transverse motion and travels along +Z or
    /// -Z. Returns the side the ball is heading toward.
    pub fn reset_for_serve<R: Rng>(
        &mut self,
        field: &Playfield,
        rng: &mut R,
        bias: f32,
    ) -> Result<Side, SimError> {
        self.pos = field.center();

        let theta: f32 = rng.random_range(0.0..std::f32::consts::TAU);
        let z_sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let raw = Vec3::new(theta.cos(), theta.sin(), z_sign) * bias;
        self.set_direction(raw)?;

        Ok(if z_sign > 0.0 {
            Side::Player
        } else {
            Side::Opponent
        })
    }

    /// Restore the serve speed
    pub fn reset_speed(&mut self) {
        self.speed = self.base_speed;
    }

    pub fn as_sphere(&self) -> Sphere {
        Sphere::new(self.pos, self.radius)
    }

    /// Side the ball is currently travelling toward
    pub fn heading(&self) -> Side {
        if self.direction.z >= 0.0 {
            Side::Player
        } else {
            Side::Opponent
        }
    }
}
