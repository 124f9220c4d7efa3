//! Computer-controlled paddle
//!
//! Proportional pursuit: each tick the paddle closes a fixed fraction of the
//! X/Y gap to the ball, so it lags behind fast transverse motion and can be
//! beaten. It only moves while the ball is heading toward it.

use super::state::{Ball, Paddle};

/// Steer the opponent paddle toward the ball. Returns whether it moved.
pub fn steer(paddle: &mut Paddle, ball: &Ball, difficulty: f32) -> bool {
    if ball.heading() != paddle.side {
        return false;
    }

    let current = paddle.xy();
    let target = ball.pos.truncate();
    paddle.move_to(current + (target - current) * difficulty);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::Side;
    use glam::{Vec2, Vec3};

    fn setup() -> (Paddle, Ball) {
        let settings = Settings::default();
        (
            Paddle::new(Side::Opponent, &settings).unwrap(),
            Ball::from_settings(&settings).unwrap(),
        )
    }

    #[test]
    fn test_pursuit_fraction() {
        let (mut paddle, mut ball) = setup();
        ball.pos = Vec3::new(1.0, 0.0, 0.0);
        ball.set_direction(Vec3::new(0.0, 0.0, -1.0)).unwrap();

        assert!(steer(&mut paddle, &ball, 0.03));
        assert!((paddle.pos.x - 0.03).abs() < 1e-6);
        assert_eq!(paddle.pos.y, 0.0);

        // Second step closes 3% of the remaining gap
        steer(&mut paddle, &ball, 0.03);
        assert!((paddle.pos.x - (0.03 + 0.97 * 0.03)).abs() < 1e-6);
    }

    #[test]
    fn test_holds_when_ball_recedes() {
        let (mut paddle, mut ball) = setup();
        ball.pos = Vec3::new(0.5, 0.3, 0.0);
        ball.set_direction(Vec3::new(0.0, 0.0, 1.0)).unwrap();

        assert!(!steer(&mut paddle, &ball, 0.03));
        assert_eq!(paddle.xy(), Vec2::ZERO);
    }

    #[test]
    fn test_pursuit_is_clamped() {
        let (mut paddle, mut ball) = setup();
        ball.pos = Vec3::new(50.0, -50.0, 0.0);
        ball.set_direction(Vec3::new(0.0, 0.0, -1.0)).unwrap();

        steer(&mut paddle, &ball, 1.0);
        assert!(paddle.in_bounds());
        assert!((paddle.pos.x - paddle.limit.x).abs() < 1e-6);
        assert!((paddle.pos.y + paddle.limit.y).abs() < 1e-6);
    }
}
