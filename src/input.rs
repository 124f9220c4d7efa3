//! Player input adapters
//!
//! Convert raw touch positions and device tilt into player-paddle targets in
//! field coordinates. Results still go through paddle clamping on commit.

use glam::Vec2;

use crate::settings::Settings;

/// Tilt (degrees) that maps to full paddle travel
const TILT_RANGE: f32 = 45.0;
/// Forward tilt (beta) treated as the neutral holding angle
const NEUTRAL_BETA: f32 = 45.0;

/// Reach of the paddle centre on each axis
fn travel(settings: &Settings) -> Vec2 {
    Vec2::new(
        settings.field_width / 2.0 - settings.paddle_width / 2.0,
        settings.field_height / 2.0 - settings.paddle_height / 2.0,
    )
}

/// Map a touch point in viewport pixels to a paddle target.
///
/// The viewport is normalized to `[-1, 1]` with Y pointing up. Returns
/// `None` for an empty viewport.
pub fn touch_to_target(touch: Vec2, viewport: Vec2, settings: &Settings) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let normalized = Vec2::new(
        touch.x / viewport.x * 2.0 - 1.0,
        -(touch.y / viewport.y) * 2.0 + 1.0,
    );
    Some(normalized * travel(settings))
}

/// Map device orientation (`beta` front/back tilt, `gamma` left/right tilt,
/// both in degrees) to a paddle target.
///
/// Tilting forward past the neutral angle moves the paddle down.
pub fn orientation_to_target(
    beta: Option<f32>,
    gamma: Option<f32>,
    settings: &Settings,
) -> Option<Vec2> {
    let (beta, gamma) = (beta?, gamma?);
    if !beta.is_finite() || !gamma.is_finite() {
        return None;
    }

    let x = (gamma / TILT_RANGE).clamp(-1.0, 1.0);
    let y = ((beta - NEUTRAL_BETA) / TILT_RANGE).clamp(-1.0, 1.0);
    Some(Vec2::new(x, -y) * travel(settings))
}
