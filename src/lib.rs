//! Space Battle - A vertical arcade shooter gameplay core
//!
//! Core modules:
//! - `sim`: Deterministic match simulation (state, contacts, scheduling, field geometry)
//! - `scene`: Title / Play / Result controllers and the scene director
//! - `platform`: Host abstraction (bodies, effects, input) plus a headless host
//! - `persistence`: Integer key-value stores for the high score
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use highscores::HighScoreRecord;
pub use scene::{Game, SceneKind};
pub use tuning::{ContactPolicy, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed host frame step used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Default scene size (portrait, 3:4)
    pub const SCENE_WIDTH: f32 = 1536.0;
    pub const SCENE_HEIGHT: f32 = 2048.0;

    /// Widest aspect ratio the playable column supports
    pub const MAX_ASPECT_RATIO: f32 = 16.0 / 9.0;

    /// Lives at the start of every match
    pub const STARTING_LIVES: u8 = 5;

    /// Score values that trigger a level-up
    pub const LEVEL_THRESHOLDS: [u64; 4] = [15, 25, 35, 50];

    /// Pause between match end and the result scene (seconds)
    pub const SETTLE_DELAY: f32 = 1.0;

    /// Bullet travel time from ship to top of the scene (seconds)
    pub const BULLET_FLIGHT: f32 = 1.0;

    /// Time for the ship to fly into play position on start (seconds)
    pub const PLAYER_ENTRY_DURATION: f32 = 0.5;

    /// Persisted key for the high score scalar
    pub const HIGH_SCORE_KEY: &str = "highScoreSaved";
}

/// Heading (radians) of the displacement from `from` to `to`
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
