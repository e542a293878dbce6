//! Deterministic match simulation module
//!
//! All gameplay rules live here. This module must stay pure and deterministic:
//! - Time only moves through `Scheduler::advance`
//! - Seeded RNG only
//! - Stable timer order (due time, then registration order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod schedule;
pub mod state;

pub use collision::{ContactKind, above_boundary, classify};
pub use field::{EnemyPath, PlayField, Rect};
pub use schedule::{Scheduler, TimerKey};
pub use state::{Category, Contact, EntityRef, MatchState, MatchStatus, Participant};
