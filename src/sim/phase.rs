//! Match state machine
//!
//! `NotStarted -> Running -> Finished`, with `restart` returning to
//! `Running`. Scores only ever go up and the win check happens immediately
//! after the increment.

use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::error::SimError;

/// Lifecycle phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Set up, waiting for `start`
    NotStarted,
    /// Ticks advance the simulation
    Running,
    /// A side reached the win score; ticks are ignored until `restart`
    Finished,
}

/// What a point did to the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Play continues with a fresh serve
    Serve,
    /// The scoring side won the match
    Won(Side),
}

/// Scores, phase and winner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub player_score: u32,
    pub opponent_score: u32,
    pub phase: MatchPhase,
    pub winner: Option<Side>,
    pub win_score: u32,
}

impl MatchState {
    pub fn new(win_score: u32) -> Self {
        Self {
            player_score: 0,
            opponent_score: 0,
            phase: MatchPhase::NotStarted,
            winner: None,
            win_score,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    /// Begin the first match. Only valid from `NotStarted`; a finished match
    /// must go through `restart`.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.phase != MatchPhase::NotStarted {
            return Err(SimError::InvalidTransition {
                phase: self.phase,
                action: "start",
            });
        }
        self.reset_scores();
        self.phase = MatchPhase::Running;
        Ok(())
    }

    /// Reset scores and go back to `Running`. Valid from any phase and
    /// idempotent: calling it twice leaves the same state as once.
    pub fn restart(&mut self) {
        self.reset_scores();
        self.phase = MatchPhase::Running;
    }

    /// Award a point to `side`
    pub fn on_score(&mut self, side: Side) -> Result<ScoreOutcome, SimError> {
        if self.phase != MatchPhase::Running {
            return Err(SimError::InvalidTransition {
                phase: self.phase,
                action: "score in",
            });
        }

        let score = match side {
            Side::Player => &mut self.player_score,
            Side::Opponent => &mut self.opponent_score,
        };
        *score += 1;

        if *score >= self.win_score {
            self.phase = MatchPhase::Finished;
            self.winner = Some(side);
            Ok(ScoreOutcome::Won(side))
        } else {
            Ok(ScoreOutcome::Serve)
        }
    }

    fn reset_scores(&mut self) {
        self.player_score = 0;
        self.opponent_score = 0;
        self.winner = None;
    }
}
