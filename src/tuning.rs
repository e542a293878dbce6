//! Data-driven game balance
//!
//! Loaded from JSON on native builds; every field has a default so partial
//! files are fine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What happens when an enemy touches the player ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContactPolicy {
    /// Contact ends the match on the spot
    #[default]
    InstantLoss,
    /// Contact destroys the enemy and costs one life
    LoseLife,
}

impl ContactPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactPolicy::InstantLoss => "InstantLoss",
            ContactPolicy::LoseLife => "LoseLife",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "instantloss" | "instant" => Some(ContactPolicy::InstantLoss),
            "loselife" | "life" => Some(ContactPolicy::LoseLife),
            _ => None,
        }
    }
}

/// Game balance and layout knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scene ===
    /// Scene width in points
    pub scene_width: f32,
    /// Scene height in points
    pub scene_height: f32,
    /// Widest aspect ratio of the playable column
    pub max_aspect_ratio: f32,

    // === Match ===
    pub starting_lives: u8,
    /// Score values that trigger a level-up (ascending)
    pub level_thresholds: Vec<u64>,
    pub contact_policy: ContactPolicy,
    /// Enemy contacts above this y are ignored (None = scene height)
    pub upper_boundary: Option<f32>,
    pub settle_delay: f32,

    // === Spawning ===
    /// Spawn cadence per level (index 0 = level 1), seconds
    pub spawn_cadence: Vec<f32>,
    /// Enemy transit time per level (index 0 = level 1), seconds
    pub enemy_transit: Vec<f32>,
    /// Cadence for levels missing from the table
    pub default_cadence: f32,
    /// Transit for levels missing from the table
    pub default_transit: f32,
    /// Enemy spawn height as a fraction of scene height
    pub spawn_height: f32,
    /// Enemy exit height as a fraction of scene height
    pub exit_height: f32,

    // === Player ===
    /// Ship y as a fraction of scene height
    pub player_height: f32,
    /// Half the ship's width, for clamping drags
    pub player_half_width: f32,
    pub player_entry_duration: f32,
    pub bullet_flight: f32,
    /// Distance past the top edge a bullet travels before removal
    pub bullet_clearance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,
            max_aspect_ratio: MAX_ASPECT_RATIO,

            starting_lives: STARTING_LIVES,
            level_thresholds: LEVEL_THRESHOLDS.to_vec(),
            contact_policy: ContactPolicy::InstantLoss,
            upper_boundary: None,
            settle_delay: SETTLE_DELAY,

            spawn_cadence: vec![1.0, 0.8, 0.6, 0.5, 0.35],
            // Lags the cadence table by one level
            enemy_transit: vec![1.0, 1.0, 0.8, 0.6, 0.5],
            default_cadence: 0.5,
            default_transit: 0.5,
            spawn_height: 1.2,
            exit_height: -0.2,

            player_height: 0.2,
            player_half_width: 60.0,
            player_entry_duration: PLAYER_ENTRY_DURATION,
            bullet_flight: BULLET_FLIGHT,
            bullet_clearance: 40.0,
        }
    }
}

impl Tuning {
    /// Spawn cadence for a level, falling back to the default for unknown levels
    pub fn cadence_for_level(&self, level: u32) -> f32 {
        match level_index(level).and_then(|i| self.spawn_cadence.get(i)) {
            Some(&cadence) => cadence,
            None => {
                log::warn!(
                    "No spawn cadence for level {}, using default {}s",
                    level,
                    self.default_cadence
                );
                self.default_cadence
            }
        }
    }

    /// Enemy transit duration for a level, falling back to the default
    pub fn transit_for_level(&self, level: u32) -> f32 {
        match level_index(level).and_then(|i| self.enemy_transit.get(i)) {
            Some(&transit) => transit,
            None => {
                log::warn!(
                    "No enemy transit for level {}, using default {}s",
                    level,
                    self.default_transit
                );
                self.default_transit
            }
        }
    }

    /// Whether reaching `score` crosses a level threshold
    pub fn is_threshold(&self, score: u64) -> bool {
        self.level_thresholds.contains(&score)
    }

    /// Contacts with enemies above this y are ignored
    pub fn upper_boundary(&self) -> f32 {
        self.upper_boundary.unwrap_or(self.scene_height)
    }

    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, logging and falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Using default tuning ({})", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), TuningError> {
        if self.scene_width <= 0.0 || self.scene_height <= 0.0 {
            return Err(TuningError::Invalid("scene size must be positive".into()));
        }
        if self.max_aspect_ratio <= 0.0 {
            return Err(TuningError::Invalid("max_aspect_ratio must be positive".into()));
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid("starting_lives must be at least 1".into()));
        }
        let all_positive = self
            .spawn_cadence
            .iter()
            .chain(&self.enemy_transit)
            .chain([&self.default_cadence, &self.default_transit])
            .all(|&d| d > 0.0);
        if !all_positive {
            return Err(TuningError::Invalid("durations must be positive".into()));
        }
        if !self.level_thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(TuningError::Invalid("level_thresholds must ascend".into()));
        }
        Ok(())
    }
}

fn level_index(level: u32) -> Option<usize> {
    (level as usize).checked_sub(1)
}

/// Errors raised while loading tuning
#[derive(Debug)]
pub enum TuningError {
    /// File could not be read
    Io(std::io::Error),
    /// JSON was malformed
    Parse(serde_json::Error),
    /// Values parsed but make no sense
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "I/O error: {e}"),
            TuningError::Parse(e) => write!(f, "Parse error: {e}"),
            TuningError::Invalid(msg) => write!(f, "Invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}
