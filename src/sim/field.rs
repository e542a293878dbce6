//! Playfield geometry
//!
//! The scene is a portrait rectangle with the origin at the bottom-left and
//! y pointing up. Gameplay is confined to a centered column whose width is
//! capped by the widest supported aspect ratio, so wide screens get margins
//! instead of a wider field.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::heading;
use crate::tuning::Tuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive point test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Straight-line path an enemy flies along
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyPath {
    pub start: Vec2,
    pub end: Vec2,
    /// Heading of the displacement (radians)
    pub rotation: f32,
}

/// Scene bounds and the playable column inside them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayField {
    pub size: Vec2,
    pub area: Rect,
    spawn_height: f32,
    exit_height: f32,
    player_height: f32,
    player_half_width: f32,
}

impl PlayField {
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.scene_width, tuning.scene_height);
        let playable_width = (size.y / tuning.max_aspect_ratio).min(size.x);
        let margin = (size.x - playable_width) / 2.0;
        Self {
            size,
            area: Rect::new(Vec2::new(margin, 0.0), Vec2::new(margin + playable_width, size.y)),
            spawn_height: tuning.spawn_height,
            exit_height: tuning.exit_height,
            player_height: tuning.player_height,
            player_half_width: tuning.player_half_width,
        }
    }

    /// Where the ship sits during play
    pub fn player_home(&self) -> Vec2 {
        Vec2::new(self.size.x / 2.0, self.size.y * self.player_height)
    }

    /// Where the ship waits before the match starts (just below the scene)
    pub fn player_staging(&self) -> Vec2 {
        Vec2::new(self.size.x / 2.0, -self.size.y * self.player_height)
    }

    /// Clamp a ship x so its hull stays inside the playable column
    pub fn clamp_player_x(&self, x: f32) -> f32 {
        let lo = self.area.min.x + self.player_half_width;
        let hi = self.area.max.x - self.player_half_width;
        if lo > hi {
            self.area.center().x
        } else {
            x.clamp(lo, hi)
        }
    }

    /// Uniform x within the playable column
    pub fn random_x<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.area.width() <= 0.0 {
            return self.area.min.x;
        }
        rng.random_range(self.area.min.x..self.area.max.x)
    }

    /// Pick a random path from above the scene to below it
    pub fn enemy_path<R: Rng + ?Sized>(&self, rng: &mut R) -> EnemyPath {
        let start = Vec2::new(self.random_x(rng), self.size.y * self.spawn_height);
        let end = Vec2::new(self.random_x(rng), self.size.y * self.exit_height);
        EnemyPath {
            start,
            end,
            rotation: heading(start, end),
        }
    }
}
