use ar_pong::consts::UNIT_EPSILON;
use ar_pong::sim::collision::{paddle_deflection, reflect_off_paddle};
use ar_pong::sim::{GameEvent, MatchContext, MatchPhase, Side, TickInput, tick};
use ar_pong::{Driver, InputEvent, Settings};
use glam::{Vec2, Vec3};
use proptest::prelude::*;

fn visible() -> TickInput {
    TickInput {
        world_visible: true,
        ..Default::default()
    }
}

fn running_ctx(settings: Settings) -> MatchContext {
    let mut ctx = MatchContext::new(settings).unwrap();
    ctx.start().unwrap();
    ctx
}

/// Put the ball somewhere specific, overriding the random serve
fn place_ball(ctx: &mut MatchContext, pos: Vec3, dir: Vec3) {
    let ball = ctx.ball.as_mut().unwrap();
    ball.pos = pos;
    ball.set_direction(dir).unwrap();
}

#[test]
fn test_ball_crosses_field_and_scores_for_opponent() {
    let mut ctx = running_ctx(Settings::default());
    // Park the player paddle in a corner, clear of the ball's straight path
    ctx.player.as_mut().unwrap().move_to(Vec2::new(1.0, 1.0));
    place_ball(&mut ctx, Vec3::ZERO, Vec3::Z);

    for _ in 0..30 {
        assert!(tick(&mut ctx, &visible()).unwrap().is_empty());
    }
    let z = ctx.ball.as_ref().unwrap().pos.z;
    assert!((z - 1.5).abs() < 1e-4, "z = {z}");

    // The point lands once the whole ball is past the end line
    let mut scored = None;
    for _ in 0..5 {
        let events = tick(&mut ctx, &visible()).unwrap();
        if let Some(side) = events.iter().find_map(|e| match e {
            GameEvent::Scored { side, .. } => Some(*side),
            _ => None,
        }) {
            scored = Some(side);
            break;
        }
    }
    assert_eq!(scored, Some(Side::Opponent));
    assert_eq!(ctx.state.opponent_score, 1);
    assert_eq!(ctx.state.player_score, 0);
    assert_eq!(ctx.time_ticks, 32);
}

#[test]
fn test_paddle_hit_offset_sets_deflection() {
    let settings = Settings::default();
    let mut ctx = running_ctx(settings.clone());
    place_ball(&mut ctx, Vec3::new(0.15, 0.0, 1.25), Vec3::Z);

    let ball = ctx.ball.as_mut().unwrap();
    let paddle = ctx.player.as_ref().unwrap();
    assert!(paddle.pos.abs_diff_eq(Vec3::new(0.0, 0.0, 1.3), 1e-6));
    assert!((paddle.half_extents.x - 0.3).abs() < 1e-6);

    let raw = paddle_deflection(ball, paddle, &settings);
    assert!((raw.x - 0.4).abs() < 1e-6);

    assert!(reflect_off_paddle(ball, paddle, &settings).unwrap());
    let dir = ball.direction();
    assert!((dir.length() - 1.0).abs() < UNIT_EPSILON);
    assert!((dir.x / -dir.z - 0.4).abs() < 1e-5);
}

#[test]
fn test_five_opponent_points_finish_match() {
    let mut ctx = running_ctx(Settings::default());

    let mut last = 0;
    for point in 1..=5 {
        place_ball(&mut ctx, Vec3::new(0.0, 0.0, 1.55), Vec3::Z);
        let events = tick(&mut ctx, &visible()).unwrap();
        assert!(ctx.state.opponent_score > last);
        last = ctx.state.opponent_score;
        assert_eq!(last, point);

        if point < 5 {
            assert_eq!(ctx.phase(), MatchPhase::Running);
            assert!(matches!(events.last(), Some(GameEvent::Served { .. })));
        } else {
            assert_eq!(
                events.last(),
                Some(&GameEvent::MatchOver {
                    winner: Side::Opponent
                })
            );
        }
    }

    assert_eq!(ctx.phase(), MatchPhase::Finished);
    assert_eq!(ctx.state.winner, Some(Side::Opponent));
}

#[test]
fn test_opponent_pursues_gradually() {
    let mut ctx = running_ctx(Settings::default());
    place_ball(&mut ctx, Vec3::new(1.0, 0.0, 0.0), -Vec3::Z);
    assert_eq!(ctx.opponent.as_ref().unwrap().pos.x, 0.0);

    tick(&mut ctx, &visible()).unwrap();
    let x = ctx.opponent.as_ref().unwrap().pos.x;
    assert!((x - 0.03).abs() < 1e-6, "x = {x}");
}

#[test]
fn test_restart_twice_matches_once() {
    let mut driver = Driver::new();
    driver
        .setup(Settings {
            win_score: 1,
            ..Settings::default()
        })
        .unwrap();
    driver.input_sender().send(InputEvent::Bypass(true)).unwrap();
    driver.start().unwrap();

    // Force a quick finish
    {
        let ctx = driver.context_mut().unwrap();
        place_ball(ctx, Vec3::new(0.0, 0.0, 1.55), Vec3::Z);
    }
    driver.frame().unwrap();
    assert_eq!(driver.snapshot().unwrap().phase, MatchPhase::Finished);
    assert!(!driver.is_scheduled());

    driver.restart().unwrap();
    let once = driver.snapshot().unwrap();
    driver.restart().unwrap();
    let twice = driver.snapshot().unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.phase, MatchPhase::Running);
    assert_eq!(twice.player_score, 0);
    assert_eq!(twice.opponent_score, 0);
    assert_eq!(twice.winner, None);
    assert_eq!(twice.ball, Some(Vec3::ZERO));
    assert!(twice.player.is_some() && twice.opponent.is_some());
    assert_eq!(
        driver.context().unwrap().ball.as_ref().unwrap().speed,
        Settings::default().base_speed
    );
    assert!(driver.is_scheduled());
}

#[test]
fn test_headless_match_reaches_a_winner() {
    let mut driver = Driver::new();
    driver
        .setup(Settings {
            seed: 1234,
            ..Settings::default()
        })
        .unwrap();
    let input = driver.input_sender();
    input.send(InputEvent::MarkerFound).unwrap();
    driver.start().unwrap();

    let mut frames = 0;
    while driver.is_scheduled() && frames < 500_000 {
        driver.frame().unwrap();
        frames += 1;
    }

    let frame = driver.snapshot().unwrap();
    assert_eq!(frame.phase, MatchPhase::Finished);
    assert!(frame.winner.is_some());
    assert_eq!(frame.player_score.max(frame.opponent_score), 5);
}

proptest! {
    /// Direction stays unit length, paddles stay in range and scores only
    /// climb, whatever the player does
    #[test]
    fn prop_tick_invariants(
        seed in any::<u64>(),
        targets in prop::collection::vec((-3.0f32..3.0, -3.0f32..3.0), 1..50),
    ) {
        let settings = Settings { seed, ..Settings::default() };
        let win_score = settings.win_score;
        let mut ctx = running_ctx(settings);
        let (mut player_score, mut opponent_score) = (0, 0);

        for step in 0..600 {
            let (x, y) = targets[step % targets.len()];
            let input = TickInput {
                player_target: Some(Vec2::new(x, y)),
                world_visible: true,
            };
            tick(&mut ctx, &input).unwrap();

            let dir = ctx.ball.as_ref().unwrap().direction();
            prop_assert!((dir.length() - 1.0).abs() < UNIT_EPSILON);
            prop_assert!(ctx.player.as_ref().unwrap().in_bounds());
            prop_assert!(ctx.opponent.as_ref().unwrap().in_bounds());

            prop_assert!(ctx.state.player_score >= player_score);
            prop_assert!(ctx.state.opponent_score >= opponent_score);
            player_score = ctx.state.player_score;
            opponent_score = ctx.state.opponent_score;

            let top = player_score.max(opponent_score);
            prop_assert!(top <= win_score);
            if top == win_score {
                prop_assert_eq!(ctx.phase(), MatchPhase::Finished);
            }
        }
    }

    /// Any hit point on the paddle face yields a unit direction heading back
    #[test]
    fn prop_paddle_reflection_is_unit(
        dx in -0.35f32..0.35,
        dy in -0.15f32..0.15,
        dz in -0.07f32..0.07,
    ) {
        let settings = Settings::default();
        let mut ctx = running_ctx(settings.clone());
        place_ball(&mut ctx, Vec3::new(dx, dy, 1.3 + dz), Vec3::new(0.3, -0.2, 1.0));

        let ball = ctx.ball.as_mut().unwrap();
        let paddle = ctx.player.as_ref().unwrap();
        if reflect_off_paddle(ball, paddle, &settings).unwrap() {
            prop_assert!((ball.direction().length() - 1.0).abs() < UNIT_EPSILON);
            prop_assert!(ball.direction().z < 0.0);
        }
    }
}
