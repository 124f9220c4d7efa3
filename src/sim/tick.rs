//! Fixed-step simulation tick
//!
//! Per tick: commit the player target, integrate the ball, resolve
//! collisions (which may score and serve), then steer the opponent.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{self, Axis};
use super::opponent;
use super::phase::{MatchPhase, MatchState, ScoreOutcome};
use super::state::{Ball, Paddle, Playfield, Side};
use crate::error::SimError;
use crate::settings::Settings;

/// Inputs sampled at a tick boundary
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired player paddle X/Y in field coordinates (clamped on commit)
    pub player_target: Option<Vec2>,
    /// Marker visible, or tracking bypassed
    pub world_visible: bool,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    MatchStarted,
    /// New round: ball back at the centre
    Served { toward: Side },
    WallBounce { axis: Axis },
    PaddleHit { side: Side, speed: f32 },
    Scored { side: Side, player: u32, opponent: u32 },
    MatchOver { winner: Side },
}

/// Everything one match owns
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub settings: Settings,
    pub field: Playfield,
    pub ball: Option<Ball>,
    pub player: Option<Paddle>,
    pub opponent: Option<Paddle>,
    pub state: MatchState,
    /// Ticks simulated since setup
    pub time_ticks: u64,
    rng: Pcg32,
}

impl MatchContext {
    /// Validate settings and build the field, ball and both paddles
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;

        let field = Playfield::from_settings(&settings)?;
        let ball = Ball::from_settings(&settings)?;
        let player = Paddle::new(Side::Player, &settings)?;
        let opponent = Paddle::new(Side::Opponent, &settings)?;

        Ok(Self {
            field,
            ball: Some(ball),
            player: Some(player),
            opponent: Some(opponent),
            state: MatchState::new(settings.win_score),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
        })
    }

    #[inline]
    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    /// Begin the match with a fresh serve
    pub fn start(&mut self) -> Result<Vec<GameEvent>, SimError> {
        self.state.start()?;
        log::info!("Match started (first to {})", self.state.win_score);

        let mut events = vec![GameEvent::MatchStarted];
        events.extend(self.serve()?);
        Ok(events)
    }

    /// Reset scores and serve again
    pub fn restart(&mut self) -> Result<Vec<GameEvent>, SimError> {
        self.state.restart();
        log::info!("Match restarted");

        let mut events = vec![GameEvent::MatchStarted];
        events.extend(self.serve()?);
        Ok(events)
    }

    /// Re-centre the ball at base speed with a random direction
    pub fn serve(&mut self) -> Result<Option<GameEvent>, SimError> {
        let Some(ball) = self.ball.as_mut() else {
            return Ok(None);
        };
        let toward = serve_ball(ball, &self.field, &mut self.rng, &self.settings)?;
        Ok(Some(GameEvent::Served { toward }))
    }
}

fn serve_ball(
    ball: &mut Ball,
    field: &Playfield,
    rng: &mut Pcg32,
    settings: &Settings,
) -> Result<Side, SimError> {
    ball.reset_speed();
    let toward = ball.reset_for_serve(field, rng, settings.serve_bias)?;
    log::debug!("Serve toward {}", toward.as_str());
    Ok(toward)
}

/// Advance the match by one fixed step
///
/// A no-op (no events) unless the match is running, the world is visible
/// and the ball and both paddles exist.
pub fn tick(ctx: &mut MatchContext, input: &TickInput) -> Result<Vec<GameEvent>, SimError> {
    let mut events = Vec::new();

    if !ctx.state.is_running() || !input.world_visible {
        return Ok(events);
    }

    let MatchContext {
        settings,
        field,
        ball,
        player,
        opponent,
        state,
        time_ticks,
        rng,
    } = ctx;

    let (Some(ball), Some(player), Some(opponent)) =
        (ball.as_mut(), player.as_mut(), opponent.as_mut())
    else {
        return Ok(events);
    };

    *time_ticks += 1;

    if let Some(target) = input.player_target {
        player.move_to(target);
    }

    ball.integrate();

    let report = collision::resolve(ball, player, opponent, field, settings)?;
    events.extend(report.walls.iter().map(|&axis| GameEvent::WallBounce { axis }));
    if let Some(side) = report.paddle {
        events.push(GameEvent::PaddleHit {
            side,
            speed: ball.speed,
        });
    }

    if let Some(scorer) = report.scorer {
        let outcome = state.on_score(scorer)?;
        log::debug!(
            "Point to {} ({} - {})",
            scorer.as_str(),
            state.player_score,
            state.opponent_score
        );
        events.push(GameEvent::Scored {
            side: scorer,
            player: state.player_score,
            opponent: state.opponent_score,
        });

        match outcome {
            ScoreOutcome::Serve => {
                let toward = serve_ball(ball, field, rng, settings)?;
                events.push(GameEvent::Served { toward });
            }
            ScoreOutcome::Won(winner) => {
                log::info!("Match over, {} wins", winner.as_str());
                events.push(GameEvent::MatchOver { winner });
                return Ok(events);
            }
        }
    }

    opponent::steer(opponent, ball, settings.difficulty);

    Ok(events)
}
