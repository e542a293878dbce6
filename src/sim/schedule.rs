//! Deferred callbacks for a match
//!
//! Timers are keyed, optionally repeating, and stamped with the generation
//! that was current when they were registered. Bumping the generation drops
//! every outstanding timer at once, so nothing registered during a match can
//! fire after it ends.
//!
//! The clock only moves when the host calls [`Scheduler::advance`]; due
//! timers are then drained one by one with [`Scheduler::pop_due`] so a
//! handler can cancel timers that would otherwise fire later in the same
//! frame.

use serde::{Deserialize, Serialize};

use super::state::EntityRef;

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKey {
    /// Enemy spawn loop
    Spawn,
    /// Enemy reaches the bottom of the field
    Transit(EntityRef),
    /// Bullet reaches the top of the field
    BulletFlight(EntityRef),
    /// Ship finished flying into play position
    PlayerEntry,
    /// Match over, leave the scene
    Settle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    key: TimerKey,
    due: f64,
    period: Option<f64>,
    generation: u32,
    /// Registration order, breaks ties between equal due times
    seq: u64,
}

/// Deterministic timer queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now: f64,
    generation: u32,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the scheduler was created
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.timers
            .iter()
            .filter(|t| t.generation == self.generation)
            .count()
    }

    pub fn is_scheduled(&self, key: TimerKey) -> bool {
        self.timers
            .iter()
            .any(|t| t.key == key && t.generation == self.generation)
    }

    /// Fire `key` once, `after` seconds from now. Replaces any timer with the same key.
    pub fn schedule_once(&mut self, key: TimerKey, after: f32) {
        self.insert(key, after as f64, None);
    }

    /// Fire `key` every `period` seconds, first fire one period from now.
    /// Replaces any timer with the same key.
    pub fn schedule_repeating(&mut self, key: TimerKey, period: f32) {
        let period = (period as f64).max(f64::EPSILON);
        self.insert(key, period, Some(period));
    }

    /// Cancel the timer with this key; returns whether one was pending
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.key != key);
        self.timers.len() != before
    }

    /// Drop every pending timer and start a new generation
    pub fn invalidate(&mut self) -> u32 {
        let dropped = self.timers.len();
        self.timers.clear();
        self.generation = self.generation.wrapping_add(1);
        log::debug!(
            "Scheduler generation {} ({} timers dropped)",
            self.generation,
            dropped
        );
        self.generation
    }

    /// Move the clock forward
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.now += dt as f64;
        }
    }

    /// Take the earliest timer that is due, rescheduling it if it repeats
    pub fn pop_due(&mut self) -> Option<TimerKey> {
        let generation = self.generation;
        self.timers.retain(|t| t.generation == generation);

        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= self.now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;

        let key = self.timers[idx].key;
        match self.timers[idx].period {
            Some(period) => {
                let seq = self.bump_seq();
                let timer = &mut self.timers[idx];
                timer.due += period;
                timer.seq = seq;
            }
            None => {
                self.timers.swap_remove(idx);
            }
        }
        Some(key)
    }

    fn insert(&mut self, key: TimerKey, after: f64, period: Option<f64>) {
        self.cancel(key);
        let seq = self.bump_seq();
        self.timers.push(Timer {
            key,
            due: self.now + after.max(0.0),
            period,
            generation: self.generation,
            seq,
        });
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
