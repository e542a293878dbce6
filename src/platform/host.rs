//! Host capabilities consumed by the gameplay core
//!
//! The host owns every visible body, the sound system and the text labels.
//! The core only ever talks to it through these traits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Category, EntityRef};

/// Which scene the host should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKind {
    Title,
    Play,
    Result,
}

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Bullet fired
    Fire,
    /// Something blew up
    Explosion,
}

/// Text labels the core drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Title,
    Prompt,
    Score,
    Lives,
    Level,
    GameOver,
    FinalScore,
    HighScore,
    PlayAgain,
    /// Public health reminder under the restart button
    Reminder,
    /// Second reminder line, pulsing
    ReminderFollowUp,
}

/// Request to create a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub category: Category,
    pub position: Vec2,
    /// Orientation in radians
    pub rotation: f32,
}

impl Spawn {
    pub fn new(category: Category, position: Vec2) -> Self {
        Self {
            category,
            position,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Minimal view of host bodies: where they are, what they are, and removal
pub trait EntityView {
    /// Current position, or `None` if the body is gone
    fn position(&self, entity: EntityRef) -> Option<Vec2>;

    /// Category of a live body
    fn category(&self, entity: EntityRef) -> Option<Category>;

    /// Remove a body; returns false if it was already gone
    fn remove(&mut self, entity: EntityRef) -> bool;
}

/// Everything else the presentation side provides
pub trait Host: EntityView {
    /// Swap to a scene, clearing whatever the previous one showed
    fn present(&mut self, scene: SceneKind);

    /// Create a body
    fn spawn(&mut self, spawn: Spawn) -> EntityRef;

    /// Move a body in a straight line, arriving after `duration` seconds
    fn move_to(&mut self, entity: EntityRef, target: Vec2, duration: f32);

    /// Stop any movement on a body, leaving it where it is
    fn halt(&mut self, entity: EntityRef);

    /// Play an explosion effect
    fn explode(&mut self, at: Vec2);

    /// Play a sound cue
    fn play(&mut self, cue: SoundCue);

    /// Set a label's text; `None` hides it
    fn set_label(&mut self, label: Label, text: Option<String>);
}
