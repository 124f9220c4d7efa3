//! Simulation loop driver
//!
//! Owns the match and everything the host writes into it. Input callbacks
//! (touch, tilt, marker found/lost) never touch simulation state directly:
//! they push [`InputEvent`]s into a channel that the driver drains at the
//! start of each frame, so every field has one writer and is only read at a
//! tick boundary.

use std::sync::mpsc::{self, Receiver, Sender};

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::error::SimError;
use crate::settings::Settings;
use crate::sim::{GameEvent, MatchContext, MatchPhase, Side, TickInput, tick};

/// Messages from input collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Player paddle target in field coordinates
    PaddleTarget(Vec2),
    MarkerFound,
    MarkerLost,
    /// Play without a tracked marker
    Bypass(bool),
}

/// Per-frame snapshot for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub ball: Option<Vec3>,
    pub player: Option<Vec3>,
    pub opponent: Option<Vec3>,
    pub player_score: u32,
    pub opponent_score: u32,
    pub phase: MatchPhase,
    pub winner: Option<Side>,
    pub time_ticks: u64,
}

impl Frame {
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Drives a match from an external animation clock
pub struct Driver {
    ctx: Option<MatchContext>,
    input_tx: Sender<InputEvent>,
    input_rx: Receiver<InputEvent>,
    player_target: Option<Vec2>,
    marker_visible: bool,
    bypass: bool,
    /// Whether the host should keep delivering frames
    scheduled: bool,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        let (input_tx, input_rx) = mpsc::channel();
        Self {
            ctx: None,
            input_tx,
            input_rx,
            player_target: None,
            marker_visible: false,
            bypass: false,
            scheduled: false,
        }
    }

    /// Handle for input collaborators; may be cloned and sent to other threads
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.input_tx.clone()
    }

    /// Build the match. Replaces any previous match and stops the loop.
    pub fn setup(&mut self, settings: Settings) -> Result<(), SimError> {
        let ctx = MatchContext::new(settings)?;
        log::info!(
            "Match set up: field {}x{}x{}",
            ctx.field.width,
            ctx.field.height,
            ctx.field.depth
        );
        self.ctx = Some(ctx);
        self.player_target = None;
        self.stop();
        Ok(())
    }

    pub fn context(&self) -> Option<&MatchContext> {
        self.ctx.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut MatchContext> {
        self.ctx.as_mut()
    }

    /// Marker visible, or tracking bypassed
    pub fn world_visible(&self) -> bool {
        self.marker_visible || self.bypass
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Begin the match. Calling it again while running is a no-op; a
    /// finished match needs `restart`.
    pub fn start(&mut self) -> Result<Vec<GameEvent>, SimError> {
        let ctx = self.ctx.as_mut().ok_or(SimError::NotSetUp)?;
        if ctx.phase() == MatchPhase::Running {
            log::debug!("start() ignored: match already running");
            self.schedule();
            return Ok(Vec::new());
        }

        let events = ctx.start().inspect_err(|e| log::warn!("start() rejected: {e}"))?;
        self.schedule();
        Ok(events)
    }

    /// Reset scores and serve. Safe to call repeatedly.
    pub fn restart(&mut self) -> Result<Vec<GameEvent>, SimError> {
        let ctx = self.ctx.as_mut().ok_or(SimError::NotSetUp)?;
        let events = ctx.restart()?;
        self.schedule();
        Ok(events)
    }

    /// Stop accepting ticks (idempotent)
    pub fn stop(&mut self) {
        if self.scheduled {
            log::debug!("Tick source stopped");
        }
        self.scheduled = false;
    }

    /// Returns true only when this call moved the loop from idle to scheduled
    fn schedule(&mut self) -> bool {
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    /// Apply queued input events in arrival order
    fn drain_inputs(&mut self) {
        let running = self
            .ctx
            .as_ref()
            .is_some_and(|ctx| ctx.phase() == MatchPhase::Running);

        while let Ok(event) = self.input_rx.try_recv() {
            match event {
                InputEvent::PaddleTarget(target) => {
                    // Ignored unless the player can see the table
                    if running && self.world_visible() {
                        self.player_target = Some(target);
                    }
                }
                InputEvent::MarkerFound => {
                    log::debug!("Marker found");
                    self.marker_visible = true;
                }
                InputEvent::MarkerLost => {
                    log::debug!("Marker lost");
                    self.marker_visible = false;
                }
                InputEvent::Bypass(enabled) => self.bypass = enabled,
            }
        }
    }

    /// One external tick. Does nothing before setup or while stopped.
    pub fn frame(&mut self) -> Result<Vec<GameEvent>, SimError> {
        self.drain_inputs();

        if !self.scheduled {
            return Ok(Vec::new());
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return Ok(Vec::new());
        };

        let input = TickInput {
            player_target: self.player_target,
            world_visible: self.marker_visible || self.bypass,
        };
        let events = tick(ctx, &input)?;

        if ctx.phase() == MatchPhase::Finished {
            self.stop();
        }
        Ok(events)
    }

    /// Positions and scores after the latest frame
    pub fn snapshot(&self) -> Option<Frame> {
        let ctx = self.ctx.as_ref()?;
        Some(Frame {
            ball: ctx.ball.as_ref().map(|b| b.pos),
            player: ctx.player.as_ref().map(|p| p.pos),
            opponent: ctx.opponent.as_ref().map(|p| p.pos),
            player_score: ctx.state.player_score,
            opponent_score: ctx.state.opponent_score,
            phase: ctx.phase(),
            winner: ctx.state.winner,
            time_ticks: ctx.time_ticks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_driver() -> Driver {
        let mut driver = Driver::new();
        driver.setup(Settings::default()).unwrap();
        driver
    }

    #[test]
    fn test_frame_before_setup_is_noop() {
        let mut driver = Driver::new();
        assert!(driver.frame().unwrap().is_empty());
        assert!(driver.snapshot().is_none());
        assert!(matches!(driver.start(), Err(SimError::NotSetUp)));
        assert!(matches!(driver.restart(), Err(SimError::NotSetUp)));
    }

    #[test]
    fn test_hidden_world_does_not_tick() {
        let mut driver = ready_driver();
        driver.start().unwrap();
        driver.frame().unwrap();
        assert_eq!(driver.snapshot().unwrap().time_ticks, 0);

        driver.input_sender().send(InputEvent::MarkerFound).unwrap();
        driver.frame().unwrap();
        assert_eq!(driver.snapshot().unwrap().time_ticks, 1);

        driver.input_sender().send(InputEvent::MarkerLost).unwrap();
        driver.frame().unwrap();
        assert_eq!(driver.snapshot().unwrap().time_ticks, 1);
    }

    #[test]
    fn test_bypass_counts_as_visible() {
        let mut driver = ready_driver();
        driver.input_sender().send(InputEvent::Bypass(true)).unwrap();
        driver.start().unwrap();
        driver.frame().unwrap();
        assert!(driver.world_visible());
        assert_eq!(driver.snapshot().unwrap().time_ticks, 1);
    }

    #[test]
    fn test_start_twice_does_not_reschedule() {
        let mut driver = ready_driver();
        assert!(!driver.is_scheduled());
        let events = driver.start().unwrap();
        assert_eq!(events[0], GameEvent::MatchStarted);
        assert!(driver.is_scheduled());

        // Second start is a no-op
        assert!(driver.start().unwrap().is_empty());
        assert!(driver.is_scheduled());
        assert!(!driver.schedule());

        driver.stop();
        driver.stop();
        assert!(!driver.is_scheduled());
        assert!(driver.schedule());
    }

    #[test]
    fn test_paddle_target_from_other_thread() {
        let mut driver = ready_driver();
        let tx = driver.input_sender();
        tx.send(InputEvent::Bypass(true)).unwrap();
        driver.start().unwrap();

        std::thread::spawn(move || {
            tx.send(InputEvent::PaddleTarget(Vec2::new(9.0, 0.25))).unwrap();
        })
        .join()
        .unwrap();

        driver.frame().unwrap();
        let player = driver.snapshot().unwrap().player.unwrap();
        assert!((player.x - 0.7).abs() < 1e-6);
        assert!((player.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_target_ignored_while_hidden() {
        let mut driver = ready_driver();
        driver.start().unwrap();
        driver
            .input_sender()
            .send(InputEvent::PaddleTarget(Vec2::new(0.5, 0.0)))
            .unwrap();
        driver.input_sender().send(InputEvent::MarkerFound).unwrap();
        driver.frame().unwrap();

        let player = driver.snapshot().unwrap().player.unwrap();
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn test_snapshot_json() {
        let driver = ready_driver();
        let json = driver.snapshot().unwrap().to_json().unwrap();
        assert!(json.contains("\"phase\":\"NotStarted\""));
        assert!(json.contains("\"player_score\":0"));
    }
}
