//! Match settings and tuning
//!
//! Loaded from JSON by the host page (or defaulted), validated once when a
//! match is set up and never mutated during play.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Opponent difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "medium" | "med" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            _ => None,
        }
    }

    /// Opponent pursuit rate for this preset
    pub fn coefficient(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => OPPONENT_DIFFICULTY * 0.5,
            DifficultyPreset::Normal => OPPONENT_DIFFICULTY,
            DifficultyPreset::Hard => OPPONENT_DIFFICULTY * 2.0,
        }
    }
}

/// Match tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,
    pub field_depth: f32,

    // === Paddles ===
    /// Full paddle extents
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_depth: f32,
    /// Distance from each end of the field to the paddle plane
    pub paddle_inset: f32,
    /// Extra clearance kept between paddle edge and side walls
    pub paddle_margin: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Distance per tick at serve
    pub base_speed: f32,
    /// Speed gained per player-paddle hit
    pub speed_increment: f32,
    pub serve_bias: f32,
    pub deflection_x: f32,
    pub deflection_y: f32,

    // === Match ===
    /// Opponent pursuit rate, in (0, 1]
    pub difficulty: f32,
    pub win_score: u32,
    /// Serve RNG seed
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            field_depth: FIELD_DEPTH,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_depth: PADDLE_DEPTH,
            paddle_inset: PADDLE_INSET,
            paddle_margin: 0.0,

            ball_radius: BALL_RADIUS,
            base_speed: BALL_BASE_SPEED,
            speed_increment: BALL_SPEED_INCREMENT,
            serve_bias: SERVE_BIAS,
            deflection_x: DEFLECTION_X,
            deflection_y: DEFLECTION_Y,

            difficulty: OPPONENT_DIFFICULTY,
            win_score: WIN_SCORE,
            seed: 0,
        }
    }
}

impl Settings {
    /// Apply a difficulty preset
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        self.difficulty = preset.coefficient();
    }

    /// Build settings the way hosts supply them: an optional JSON document,
    /// then an optional preset name that overrides its difficulty
    pub fn load(json: Option<&str>, difficulty: Option<&str>) -> Result<Self, SimError> {
        let mut settings = match json {
            Some(json) => Self::from_json(json)?,
            None => Self::default(),
        };
        if let Some(name) = difficulty {
            let preset = DifficultyPreset::from_str(name)
                .ok_or_else(|| SimError::InvalidSetting(format!("unknown difficulty '{name}'")))?;
            settings.apply_preset(preset);
            log::info!("Difficulty preset: {}", preset.as_str());
        }
        Ok(settings)
    }

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded match settings (difficulty {})", settings.difficulty);
        Ok(settings)
    }

    /// Reject geometry the collision math cannot divide by, and other
    /// out-of-range tunables
    pub fn validate(&self) -> Result<(), SimError> {
        SimError::check_positive("field_width", self.field_width)?;
        SimError::check_positive("field_height", self.field_height)?;
        SimError::check_positive("field_depth", self.field_depth)?;
        SimError::check_positive("paddle_width", self.paddle_width)?;
        SimError::check_positive("paddle_height", self.paddle_height)?;
        SimError::check_positive("paddle_depth", self.paddle_depth)?;
        SimError::check_positive("ball_radius", self.ball_radius)?;
        SimError::check_positive("base_speed", self.base_speed)?;
        SimError::check_positive("serve_bias", self.serve_bias)?;

        if !(self.paddle_margin.is_finite() && self.paddle_margin >= 0.0) {
            return Err(SimError::InvalidSetting(format!(
                "paddle_margin must be non-negative (got {})",
                self.paddle_margin
            )));
        }
        if self.paddle_width + 2.0 * self.paddle_margin > self.field_width
            || self.paddle_height + 2.0 * self.paddle_margin > self.field_height
        {
            return Err(SimError::InvalidSetting(
                "paddle (plus margin) does not fit inside the playfield".into(),
            ));
        }
        if !(self.paddle_inset.is_finite()
            && self.paddle_inset >= 0.0
            && self.paddle_inset < self.field_depth / 2.0)
        {
            return Err(SimError::InvalidSetting(format!(
                "paddle_inset must lie in [0, depth/2) (got {})",
                self.paddle_inset
            )));
        }
        if !(self.speed_increment.is_finite() && self.speed_increment >= 0.0) {
            return Err(SimError::InvalidSetting(format!(
                "speed_increment must be non-negative (got {})",
                self.speed_increment
            )));
        }
        if !(self.difficulty > 0.0 && self.difficulty <= 1.0) {
            return Err(SimError::InvalidSetting(format!(
                "difficulty must lie in (0, 1] (got {})",
                self.difficulty
            )));
        }
        if self.win_score == 0 {
            return Err(SimError::InvalidSetting("win_score must be at least 1".into()));
        }
        Ok(())
    }

    /// Largest |x| a paddle centre may take
    pub fn paddle_limit_x(&self) -> f32 {
        (self.field_width / 2.0 - self.paddle_width / 2.0 - self.paddle_margin).max(0.0)
    }

    /// Largest |y| a paddle centre may take
    pub fn paddle_limit_y(&self) -> f32 {
        (self.field_height / 2.0 - self.paddle_height / 2.0 - self.paddle_margin).max(0.0)
    }
}
