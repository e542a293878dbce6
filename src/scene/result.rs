//! Game over scene
//!
//! Shows the final and best scores. The high score is read and, if beaten,
//! written back as soon as the scene opens.

use glam::Vec2;

use crate::highscores::HighScoreRecord;
use crate::persistence::IntegerStore;
use crate::platform::{Host, Label, SceneKind};
use crate::sim::{PlayField, Rect};
use crate::tuning::Tuning;

use super::play::{MatchResult, PlayController};

/// Result screen for a finished match
#[derive(Debug, Clone)]
pub struct ResultController {
    result: MatchResult,
    high_score: HighScoreRecord,
    is_new_record: bool,
    restart_region: Rect,
}

impl ResultController {
    pub fn enter<H: Host + ?Sized>(
        host: &mut H,
        store: &mut dyn IntegerStore,
        field: &PlayField,
        result: MatchResult,
    ) -> Self {
        host.present(SceneKind::Result);

        let submission = HighScoreRecord::submit(store, result.final_score);

        host.set_label(Label::GameOver, Some("GAME OVER".to_string()));
        host.set_label(
            Label::FinalScore,
            Some(format!("FINAL SCORE: {}", result.final_score)),
        );
        host.set_label(
            Label::HighScore,
            Some(format!("HIGH SCORE: {}", submission.record.value)),
        );
        host.set_label(Label::PlayAgain, Some("PLAY AGAIN".to_string()));
        host.set_label(
            Label::Reminder,
            Some("ARM YOURSELF AGAINST COVID-19.".to_string()),
        );
        host.set_label(
            Label::ReminderFollowUp,
            Some("GET VACCINATED TODAY.".to_string()),
        );

        log::info!(
            "Result scene: score={} level={} best={}{}",
            result.final_score,
            result.level,
            submission.record.value,
            if submission.is_new { " (new)" } else { "" }
        );

        Self {
            result,
            high_score: submission.record,
            is_new_record: submission.is_new,
            restart_region: restart_region(field),
        }
    }

    pub fn final_score(&self) -> u64 {
        self.result.final_score
    }

    pub fn high_score(&self) -> HighScoreRecord {
        self.high_score
    }

    pub fn is_new_record(&self) -> bool {
        self.is_new_record
    }

    pub fn restart_region(&self) -> Rect {
        self.restart_region
    }

    /// A tap on "PLAY AGAIN" builds a brand-new match waiting for its first tap
    pub fn on_tap<H: Host + ?Sized>(
        &self,
        host: &mut H,
        position: Vec2,
        tuning: &Tuning,
        seed: u64,
    ) -> Option<PlayController> {
        if !self.restart_region.contains(position) {
            return None;
        }
        log::info!("Restarting");
        let mut play = PlayController::new(tuning.clone(), seed);
        play.enter(host);
        Some(play)
    }
}

/// Bounds of the "PLAY AGAIN" label
pub fn restart_region(field: &PlayField) -> Rect {
    let center = Vec2::new(field.size.x * 0.5, field.size.y * 0.30);
    Rect::from_center(center, Vec2::new(field.size.x * 0.4, field.size.y * 0.06))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HIGH_SCORE_KEY;
    use crate::persistence::MemoryStore;
    use crate::platform::HeadlessHost;
    use crate::sim::MatchStatus;

    fn finish(score: u64) -> MatchResult {
        MatchResult {
            final_score: score,
            level: 1,
        }
    }

    #[test]
    fn test_new_record_is_persisted_and_shown() {
        let mut host = HeadlessHost::new();
        let mut store = MemoryStore::new();
        store.set_integer(HIGH_SCORE_KEY, 10).unwrap();
        let field = PlayField::new(&Tuning::default());

        let result = ResultController::enter(&mut host, &mut store, &field, finish(22));
        assert!(result.is_new_record());
        assert_eq!(store.get_integer(HIGH_SCORE_KEY).unwrap(), 22);
        assert_eq!(host.label(Label::FinalScore), Some("FINAL SCORE: 22"));
        assert_eq!(host.label(Label::HighScore), Some("HIGH SCORE: 22"));
        assert_eq!(host.label(Label::PlayAgain), Some("PLAY AGAIN"));
        assert_eq!(
            host.label(Label::Reminder),
            Some("ARM YOURSELF AGAINST COVID-19.")
        );
        assert_eq!(
            host.label(Label::ReminderFollowUp),
            Some("GET VACCINATED TODAY.")
        );
        assert_eq!(host.scene, Some(SceneKind::Result));
    }

    #[test]
    fn test_old_record_kept() {
        let mut host = HeadlessHost::new();
        let mut store = MemoryStore::new();
        store.set_integer(HIGH_SCORE_KEY, 40).unwrap();
        let field = PlayField::new(&Tuning::default());

        let result = ResultController::enter(&mut host, &mut store, &field, finish(7));
        assert!(!result.is_new_record());
        assert_eq!(result.high_score().value, 40);
        assert_eq!(store.writes, 1);
        assert_eq!(host.label(Label::HighScore), Some("HIGH SCORE: 40"));
    }

    #[test]
    fn test_restart_only_inside_region() {
        let mut host = HeadlessHost::new();
        let mut store = MemoryStore::new();
        let tuning = Tuning::default();
        let field = PlayField::new(&tuning);
        let result = ResultController::enter(&mut host, &mut store, &field, finish(3));

        let miss = result.on_tap(&mut host, Vec2::new(768.0, 1800.0), &tuning, 9);
        assert!(miss.is_none());
        assert_eq!(host.scene, Some(SceneKind::Result));

        let center = result.restart_region().center();
        assert!((center - Vec2::new(768.0, 614.4)).length() < 0.01);
        let play = result.on_tap(&mut host, center, &tuning, 9).unwrap();
        assert_eq!(play.status(), MatchStatus::Before);
        assert_eq!(play.state().score, 0);
        assert_eq!(host.scene, Some(SceneKind::Play));
    }
}
