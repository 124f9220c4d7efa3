//! Axis-aligned volumes and overlap tests
//!
//! Everything in the playfield is either an axis-aligned box (paddles, the
//! field itself) or a sphere (the ball).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// An axis-aligned box given by its centre and half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    /// Build a box from full extents, rejecting zero/negative sizes
    pub fn from_size(center: Vec3, size: Vec3) -> Result<Self, SimError> {
        SimError::check_positive("box width", size.x)?;
        SimError::check_positive("box height", size.y)?;
        SimError::check_positive("box depth", size.z)?;
        Ok(Self {
            center,
            half_extents: size * 0.5,
        })
    }
}

/// A sphere given by its centre and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Separating-axis overlap between a sphere and a box
///
/// Overlap iff on every axis `|c_sphere - c_box| < half_extent + radius`.
/// Pure comparison, so zero half-extents are fine.
#[inline]
pub fn sphere_box_overlap(sphere: &Sphere, aabb: &Aabb) -> bool {
    let d = (sphere.center - aabb.center).abs();
    let reach = aabb.half_extents + Vec3::splat(sphere.radius);
    d.x < reach.x && d.y < reach.y && d.z < reach.z
}
