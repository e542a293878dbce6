//! Platform abstraction layer
//!
//! Handles the boundary to whatever actually draws the game:
//! - Body view and presentation effects (`host`)
//! - A recording host with no rendering (`headless`)

pub mod headless;
pub mod host;

pub use headless::{HeadlessHost, body_radius};
pub use host::{EntityView, Host, Label, SceneKind, SoundCue, Spawn};
