//! Match state and core simulation types
//!
//! Everything a single match mutates lives in `MatchState`; nothing here is
//! global, a new match simply builds a new one.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Opaque handle to a body owned by the host
pub type EntityRef = u32;

/// Collision category of a body
///
/// The discriminants are bit flags; their order is the dispatch order used
/// when normalizing a contact pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Category {
    Player = 0b001,
    Bullet = 0b010,
    Enemy = 0b100,
}

impl Category {
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Categories this one reports contacts against
    pub fn contact_mask(self) -> u32 {
        match self {
            Category::Player => Category::Enemy.bits(),
            Category::Bullet => Category::Enemy.bits(),
            Category::Enemy => Category::Player.bits() | Category::Bullet.bits(),
        }
    }
}

/// One side of a contact notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub category: Category,
    pub entity: EntityRef,
}

impl Participant {
    pub fn new(category: Category, entity: EntityRef) -> Self {
        Self { category, entity }
    }
}

/// Two bodies whose bounds started intersecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: Participant,
    pub b: Participant,
}

impl Contact {
    pub fn new(a: Participant, b: Participant) -> Self {
        Self { a, b }
    }

    /// Order the pair so the lower category comes first
    pub fn normalized(self) -> (Participant, Participant) {
        if self.a.category <= self.b.category {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Waiting for the first input
    Before,
    /// Active gameplay
    During,
    /// Match over, waiting to leave the scene
    After,
}

/// Scalar state of one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    /// Seconds between enemy spawns at the current level
    pub spawn_interval: f32,
    pub status: MatchStatus,
}

impl MatchState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: tuning.starting_lives,
            level: 1,
            spawn_interval: tuning.cadence_for_level(1),
            status: MatchStatus::Before,
        }
    }

    /// Reset counters and enter active play
    pub fn begin(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.lives = tuning.starting_lives;
        self.level = 1;
        self.spawn_interval = tuning.cadence_for_level(1);
        self.status = MatchStatus::During;
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.status == MatchStatus::During
    }

    /// Add one point; returns true when the new score crosses a level threshold
    pub fn award_point(&mut self, tuning: &Tuning) -> bool {
        self.score += 1;
        tuning.is_threshold(self.score)
    }

    /// Advance one level and pick up its cadence
    pub fn level_up(&mut self, tuning: &Tuning) {
        self.level += 1;
        self.spawn_interval = tuning.cadence_for_level(self.level);
    }

    /// Lose one life; returns true when none are left
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Enter the terminal state
    pub fn finish(&mut self) {
        self.status = MatchStatus::After;
    }
}
