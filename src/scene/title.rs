//! Title scene

use crate::platform::{Host, Label, SceneKind};
use crate::tuning::Tuning;

use super::play::PlayController;

/// Pre-game screen; the first tap starts a match
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleController;

impl TitleController {
    pub fn enter<H: Host + ?Sized>(host: &mut H) -> Self {
        host.present(SceneKind::Title);
        host.set_label(Label::Title, Some("SPACE BATTLE".to_string()));
        host.set_label(Label::Prompt, Some("TAP TO BEGIN".to_string()));
        log::info!("Title scene");
        TitleController
    }

    /// Hand control to a fresh match that starts right away
    pub fn on_tap<H: Host + ?Sized>(
        &self,
        host: &mut H,
        tuning: &Tuning,
        seed: u64,
    ) -> PlayController {
        let mut play = PlayController::new(tuning.clone(), seed);
        play.enter(host);
        play.start(host);
        play
    }
}
