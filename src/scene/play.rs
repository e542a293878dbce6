//! Gameplay scene
//!
//! Owns one match: its scalar state, its timers, and the bookkeeping for the
//! bullets and enemies it asked the host to create. Every host callback lands
//! here serially; nothing blocks and nothing runs in the background.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::platform::{Host, Label, SceneKind, SoundCue, Spawn};
use crate::sim::{
    Category, Contact, ContactKind, EntityRef, MatchState, MatchStatus, PlayField, Scheduler,
    TimerKey, above_boundary, classify,
};
use crate::tuning::{ContactPolicy, Tuning};

/// What a finished match hands to the result scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub final_score: u64,
    pub level: u32,
}

/// Controller for a single match
#[derive(Debug)]
pub struct PlayController {
    tuning: Tuning,
    field: PlayField,
    state: MatchState,
    scheduler: Scheduler,
    rng: Pcg32,
    player: Option<EntityRef>,
    /// Live bullets and enemies spawned by this match
    tracked: BTreeMap<EntityRef, Category>,
}

impl PlayController {
    /// Build a match waiting for its first input
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let field = PlayField::new(&tuning);
        let state = MatchState::new(&tuning);
        Self {
            tuning,
            field,
            state,
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            player: None,
            tracked: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn status(&self) -> MatchStatus {
        self.state.status
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    pub fn player(&self) -> Option<EntityRef> {
        self.player
    }

    /// Live bullets and enemies this match is tracking
    pub fn tracked(&self) -> impl Iterator<Item = (EntityRef, Category)> + '_ {
        self.tracked.iter().map(|(&e, &c)| (e, c))
    }

    /// Show the scene: ship waiting below the field, prompt visible
    pub fn enter<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.present(SceneKind::Play);
        let staging = self.field.player_staging();
        self.player = Some(host.spawn(Spawn::new(Category::Player, staging)));
        host.set_label(Label::Prompt, Some("TAP TO BEGIN".to_string()));
    }

    /// Before -> During
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.state.status != MatchStatus::Before {
            return;
        }
        self.state.begin(&self.tuning);

        host.set_label(Label::Title, None);
        host.set_label(Label::Prompt, None);
        self.refresh_score(host);
        self.refresh_lives(host);
        self.refresh_level(host);

        if let Some(player) = self.player {
            let entry = self.tuning.player_entry_duration;
            host.move_to(player, self.field.player_home(), entry);
            self.scheduler.schedule_once(TimerKey::PlayerEntry, entry);
        }

        self.scheduler
            .schedule_repeating(TimerKey::Spawn, self.state.spawn_interval);
        log::info!(
            "Match started: lives={} cadence={}s",
            self.state.lives,
            self.state.spawn_interval
        );
    }

    /// Whether the ship is still flying into play position
    pub fn is_entering(&self) -> bool {
        self.scheduler.is_scheduled(TimerKey::PlayerEntry)
    }

    /// Tap: starts the match, or fires once the ship is in position
    pub fn on_tap<H: Host + ?Sized>(&mut self, host: &mut H, _position: Vec2) {
        match self.state.status {
            MatchStatus::Before => self.start(host),
            MatchStatus::During if !self.is_entering() => self.fire(host),
            MatchStatus::During | MatchStatus::After => {}
        }
    }

    /// Horizontal drag of the ship, ignored until it has flown in
    pub fn on_drag<H: Host + ?Sized>(&mut self, host: &mut H, dx: f32) {
        if !self.state.is_live() || self.is_entering() {
            return;
        }
        let Some(player) = self.player else { return };
        let Some(pos) = host.position(player) else {
            return;
        };
        let x = self.field.clamp_player_x(pos.x + dx);
        host.move_to(player, Vec2::new(x, self.field.player_home().y), 0.0);
    }

    /// Physics contact reported by the host
    pub fn on_contact<H: Host + ?Sized>(&mut self, host: &mut H, contact: Contact) {
        if !self.state.is_live() {
            return;
        }
        match classify(contact) {
            Some(ContactKind::PlayerEnemy { player, enemy }) => {
                self.player_hit(host, player, enemy)
            }
            Some(ContactKind::BulletEnemy { bullet, enemy }) => {
                self.bullet_hit(host, bullet, enemy)
            }
            None => {}
        }
    }

    /// A tracked enemy left the bottom of the field without being shot
    fn on_enemy_escaped<H: Host + ?Sized>(&mut self, host: &mut H, enemy: EntityRef) {
        if self.tracked.get(&enemy) != Some(&Category::Enemy) {
            return;
        }
        self.tracked.remove(&enemy);
        self.scheduler.cancel(TimerKey::Transit(enemy));
        if !host.remove(enemy) || !self.state.is_live() {
            return;
        }
        log::debug!("Enemy {} escaped", enemy);
        self.lose_life(host);
    }

    /// Advance time; returns the result once the match has settled
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H, dt: f32) -> Option<MatchResult> {
        self.scheduler.advance(dt);
        while let Some(key) = self.scheduler.pop_due() {
            match key {
                TimerKey::Spawn => self.spawn_enemy(host),
                TimerKey::Transit(enemy) => self.on_enemy_escaped(host, enemy),
                TimerKey::BulletFlight(bullet) => {
                    self.tracked.remove(&bullet);
                    host.remove(bullet);
                }
                TimerKey::PlayerEntry => log::debug!("Ship in position"),
                TimerKey::Settle => {
                    log::info!("Match settled with score {}", self.state.score);
                    return Some(MatchResult {
                        final_score: self.state.score,
                        level: self.state.level,
                    });
                }
            }
        }
        None
    }

    fn fire<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(origin) = self.player.and_then(|p| host.position(p)) else {
            return;
        };
        let bullet = host.spawn(Spawn::new(Category::Bullet, origin));
        let target = Vec2::new(origin.x, self.field.size.y + self.tuning.bullet_clearance);
        host.move_to(bullet, target, self.tuning.bullet_flight);
        host.play(SoundCue::Fire);
        self.tracked.insert(bullet, Category::Bullet);
        self.scheduler
            .schedule_once(TimerKey::BulletFlight(bullet), self.tuning.bullet_flight);
    }

    fn spawn_enemy<H: Host + ?Sized>(&mut self, host: &mut H) {
        let path = self.field.enemy_path(&mut self.rng);
        let transit = self.tuning.transit_for_level(self.state.level);
        let spawn = Spawn::new(Category::Enemy, path.start).with_rotation(path.rotation);
        let enemy = host.spawn(spawn);
        host.move_to(enemy, path.end, transit);
        self.tracked.insert(enemy, Category::Enemy);
        self.scheduler.schedule_once(TimerKey::Transit(enemy), transit);
        log::debug!(
            "Enemy {} spawned at ({:.0}, {:.0}) -> ({:.0}, {:.0}) over {}s",
            enemy,
            path.start.x,
            path.start.y,
            path.end.x,
            path.end.y,
            transit
        );
    }

    fn player_hit<H: Host + ?Sized>(&mut self, host: &mut H, player: EntityRef, enemy: EntityRef) {
        let Some(enemy_pos) = host.position(enemy) else {
            return;
        };

        self.destroy(host, enemy, enemy_pos);
        match self.tuning.contact_policy {
            ContactPolicy::InstantLoss => {
                if let Some(player_pos) = host.position(player) {
                    host.explode(player_pos);
                    host.remove(player);
                }
                if self.player == Some(player) {
                    self.player = None;
                }
                log::info!("Ship destroyed by enemy {}", enemy);
                self.end_match(host);
            }
            ContactPolicy::LoseLife => {
                log::info!("Ship hit by enemy {}", enemy);
                self.lose_life(host);
            }
        }
    }

    fn bullet_hit<H: Host + ?Sized>(&mut self, host: &mut H, bullet: EntityRef, enemy: EntityRef) {
        // Either side may already be gone if several contacts landed this frame
        let Some(enemy_pos) = host.position(enemy) else {
            return;
        };
        if host.position(bullet).is_none() {
            return;
        }
        if above_boundary(enemy_pos.y, self.tuning.upper_boundary()) {
            log::debug!("Ignoring hit on enemy {} above the field", enemy);
            return;
        }

        let crossed = self.state.award_point(&self.tuning);
        self.destroy(host, enemy, enemy_pos);
        self.scheduler.cancel(TimerKey::BulletFlight(bullet));
        self.tracked.remove(&bullet);
        host.remove(bullet);
        self.refresh_score(host);

        if crossed {
            self.level_up(host);
        }
    }

    /// Blow up an enemy and forget about it
    fn destroy<H: Host + ?Sized>(&mut self, host: &mut H, enemy: EntityRef, at: Vec2) {
        host.explode(at);
        host.play(SoundCue::Explosion);
        host.remove(enemy);
        self.scheduler.cancel(TimerKey::Transit(enemy));
        self.tracked.remove(&enemy);
    }

    fn level_up<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.state.level_up(&self.tuning);
        self.scheduler
            .schedule_repeating(TimerKey::Spawn, self.state.spawn_interval);
        self.refresh_level(host);
        log::info!(
            "Level {} at score {} (cadence {}s)",
            self.state.level,
            self.state.score,
            self.state.spawn_interval
        );
    }

    fn lose_life<H: Host + ?Sized>(&mut self, host: &mut H) {
        let out = self.state.lose_life();
        self.refresh_lives(host);
        if out {
            self.end_match(host);
        }
    }

    /// During -> After: kill every timer, freeze the field, then settle
    fn end_match<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.state.status == MatchStatus::After {
            return;
        }
        self.state.finish();
        self.scheduler.invalidate();
        for &entity in self.tracked.keys() {
            host.halt(entity);
        }
        if let Some(player) = self.player {
            host.halt(player);
        }
        self.scheduler
            .schedule_once(TimerKey::Settle, self.tuning.settle_delay);
        log::info!(
            "Match over: score={} level={} lives={}",
            self.state.score,
            self.state.level,
            self.state.lives
        );
    }

    fn refresh_score<H: Host + ?Sized>(&self, host: &mut H) {
        host.set_label(Label::Score, Some(format!("SCORE: {}", self.state.score)));
    }

    fn refresh_lives<H: Host + ?Sized>(&self, host: &mut H) {
        host.set_label(Label::Lives, Some(format!("LIVES: {}", self.state.lives)));
    }

    fn refresh_level<H: Host + ?Sized>(&self, host: &mut H) {
        host.set_label(Label::Level, Some(format!("LEVEL {}", self.state.level)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::platform::{EntityView, HeadlessHost};
    use crate::sim::Participant;
    use proptest::prelude::*;

    fn started(tuning: Tuning) -> (PlayController, HeadlessHost) {
        let mut host = HeadlessHost::new();
        let mut play = PlayController::new(tuning, 42);
        play.enter(&mut host);
        play.start(&mut host);
        (play, host)
    }

    fn enemy_at(host: &mut HeadlessHost, y: f32) -> EntityRef {
        host.spawn(Spawn::new(Category::Enemy, Vec2::new(700.0, y)))
    }

    fn bullet(host: &mut HeadlessHost) -> EntityRef {
        host.spawn(Spawn::new(Category::Bullet, Vec2::new(700.0, 400.0)))
    }

    fn hit(a: (Category, EntityRef), b: (Category, EntityRef)) -> Contact {
        Contact::new(Participant::new(a.0, a.1), Participant::new(b.0, b.1))
    }

    fn shoot_down(play: &mut PlayController, host: &mut HeadlessHost) {
        let e = enemy_at(host, 1000.0);
        let b = bullet(host);
        play.on_contact(host, hit((Category::Enemy, e), (Category::Bullet, b)));
    }

    /// Tick frame by frame until `done` or the time budget runs out
    fn run_until(
        play: &mut PlayController,
        host: &mut HeadlessHost,
        seconds: f32,
        mut done: impl FnMut(&PlayController, Option<MatchResult>) -> bool,
    ) -> (f32, Option<MatchResult>) {
        let mut elapsed = 0.0;
        while elapsed < seconds {
            host.advance(FRAME_DT);
            let result = play.tick(host, FRAME_DT);
            elapsed += FRAME_DT;
            if done(play, result) {
                return (elapsed, result);
            }
        }
        (elapsed, None)
    }

    #[test]
    fn test_enter_waits_for_tap() {
        let mut host = HeadlessHost::new();
        let mut play = PlayController::new(Tuning::default(), 1);
        play.enter(&mut host);
        assert_eq!(play.status(), MatchStatus::Before);
        assert_eq!(host.label(Label::Prompt), Some("TAP TO BEGIN"));

        // Nothing spawns before the match starts
        host.advance(5.0);
        assert_eq!(play.tick(&mut host, 5.0), None);
        assert_eq!(host.count(Category::Enemy), 0);

        play.on_tap(&mut host, Vec2::ZERO);
        assert_eq!(play.status(), MatchStatus::During);
        assert_eq!(host.label(Label::Prompt), None);
        assert_eq!(host.count(Category::Bullet), 0);
    }

    #[test]
    fn test_start_resets_and_moves_ship() {
        let (play, host) = started(Tuning::default());
        let state = play.state();
        assert_eq!((state.score, state.lives, state.level), (0, 5, 1));
        assert_eq!(state.spawn_interval, 1.0);
        assert_eq!(host.label(Label::Score), Some("SCORE: 0"));
        assert_eq!(host.label(Label::Lives), Some("LIVES: 5"));
        let player = play.player().unwrap();
        assert!(host.is_moving(player));
        assert!(play.is_entering());
        assert!(play.scheduler().is_scheduled(TimerKey::Spawn));
    }

    #[test]
    fn test_spawn_cadence_and_orientation() {
        let (mut play, mut host) = started(Tuning::default());
        run_until(&mut play, &mut host, 0.9, |_, _| false);
        assert_eq!(host.count(Category::Enemy), 0);
        run_until(&mut play, &mut host, 0.15, |_, _| false);
        assert_eq!(host.count(Category::Enemy), 1);

        let spawn = *host.spawned.last().unwrap();
        assert_eq!(spawn.category, Category::Enemy);
        assert!(spawn.position.y > play.field().size.y);
        assert!(spawn.rotation < 0.0);
        assert_eq!(play.tracked().count(), 1);
    }

    #[test]
    fn test_fire_spawns_bullet_and_expires() {
        let (mut play, mut host) = started(Tuning::default());
        run_until(&mut play, &mut host, 0.55, |p, _| !p.is_entering());
        play.on_tap(&mut host, Vec2::ZERO);
        assert_eq!(host.count(Category::Bullet), 1);
        assert_eq!(host.sounds, vec![SoundCue::Fire]);
        assert!(play.scheduler().is_scheduled(TimerKey::BulletFlight(
            host.bodies_of(Category::Bullet)[0]
        )));

        run_until(&mut play, &mut host, 1.05, |_, _| false);
        assert_eq!(host.count(Category::Bullet), 0);
    }

    #[test]
    fn test_drag_clamps_to_column() {
        let (mut play, mut host) = started(Tuning::default());
        let player = play.player().unwrap();
        run_until(&mut play, &mut host, 0.6, |_, _| false);
        play.on_drag(&mut host, -5000.0);
        assert_eq!(host.position(player).unwrap().x, 192.0 + 60.0);
        play.on_drag(&mut host, 100.0);
        let pos = host.position(player).unwrap();
        assert_eq!(pos, Vec2::new(352.0, play.field().player_home().y));
    }

    #[test]
    fn test_input_ignored_while_ship_flies_in() {
        let (mut play, mut host) = started(Tuning::default());
        let player = play.player().unwrap();
        let home = play.field().player_home();

        host.advance(0.1);
        play.tick(&mut host, 0.1);
        play.on_drag(&mut host, 10.0);
        play.on_tap(&mut host, Vec2::ZERO);
        assert!(host.is_moving(player));
        assert_eq!(host.count(Category::Bullet), 0);
        assert!(host.sounds.is_empty());

        // The entry still lands on the home point
        let (elapsed, _) = run_until(&mut play, &mut host, 1.0, |p, _| !p.is_entering());
        assert!(elapsed <= 0.5 + 2.0 * FRAME_DT);
        let landed = host.position(player).unwrap();
        assert!((landed - home).length() < 1e-3);

        play.on_drag(&mut host, 10.0);
        assert_eq!(host.position(player), Some(home + Vec2::new(10.0, 0.0)));
        play.on_tap(&mut host, Vec2::ZERO);
        assert_eq!(host.count(Category::Bullet), 1);
    }

    #[test]
    fn test_escape_notice_for_non_enemy_is_ignored() {
        let (mut play, mut host) = started(Tuning::default());
        run_until(&mut play, &mut host, 0.6, |_, _| false);
        let player = play.player().unwrap();
        play.on_enemy_escaped(&mut host, player);
        assert!(host.position(player).is_some());
        assert_eq!(play.state().lives, 5);

        play.on_tap(&mut host, Vec2::ZERO);
        let b = host.bodies_of(Category::Bullet)[0];
        play.on_enemy_escaped(&mut host, b);
        assert!(host.position(b).is_some());

        // An enemy the match never spawned is not ours to remove
        let stray = enemy_at(&mut host, -300.0);
        play.on_enemy_escaped(&mut host, stray);
        assert!(host.position(stray).is_some());
        assert_eq!(play.state().lives, 5);
    }

    #[test]
    fn test_bullet_hit_scores_and_removes() {
        let (mut play, mut host) = started(Tuning::default());
        let e = enemy_at(&mut host, 1000.0);
        let b = bullet(&mut host);
        play.on_contact(&mut host, hit((Category::Bullet, b), (Category::Enemy, e)));
        assert_eq!(play.state().score, 1);
        assert_eq!(host.position(e), None);
        assert_eq!(host.position(b), None);
        assert_eq!(host.explosions.len(), 1);
        assert_eq!(host.label(Label::Score), Some("SCORE: 1"));
    }

    #[test]
    fn test_hit_above_boundary_ignored() {
        let (mut play, mut host) = started(Tuning::default());
        let e = enemy_at(&mut host, 2200.0);
        let b = bullet(&mut host);
        play.on_contact(&mut host, hit((Category::Enemy, e), (Category::Bullet, b)));
        assert_eq!(play.state().score, 0);
        assert!(host.position(e).is_some());
        assert!(host.position(b).is_some());
        assert!(host.explosions.is_empty());
    }

    #[test]
    fn test_duplicate_contact_is_noop() {
        let (mut play, mut host) = started(Tuning::default());
        let e = enemy_at(&mut host, 1000.0);
        let b1 = bullet(&mut host);
        let b2 = bullet(&mut host);
        let first = hit((Category::Bullet, b1), (Category::Enemy, e));
        play.on_contact(&mut host, first);
        play.on_contact(&mut host, first);
        // Second bullet reaches the same enemy in the same frame
        play.on_contact(&mut host, hit((Category::Bullet, b2), (Category::Enemy, e)));
        assert_eq!(play.state().score, 1);
        assert!(host.position(b2).is_some());
    }

    #[test]
    fn test_fifteen_hits_level_up() {
        let (mut play, mut host) = started(Tuning::default());
        for _ in 0..14 {
            shoot_down(&mut play, &mut host);
        }
        assert_eq!(play.state().level, 1);
        shoot_down(&mut play, &mut host);
        assert_eq!(play.state().score, 15);
        assert_eq!(play.state().level, 2);
        assert_eq!(play.state().spawn_interval, 0.8);
        assert_eq!(host.label(Label::Level), Some("LEVEL 2"));

        // Spawn loop restarted at the new cadence
        run_until(&mut play, &mut host, 0.75, |_, _| false);
        assert_eq!(host.count(Category::Enemy), 0);
        run_until(&mut play, &mut host, 0.1, |_, _| false);
        assert_eq!(host.count(Category::Enemy), 1);
    }

    #[test]
    fn test_each_threshold_levels_once() {
        let (mut play, mut host) = started(Tuning::default());
        let mut levels = Vec::new();
        for _ in 0..60 {
            let before = play.state().level;
            shoot_down(&mut play, &mut host);
            if play.state().level != before {
                levels.push((play.state().score, play.state().level));
            }
        }
        assert_eq!(levels, vec![(15, 2), (25, 3), (35, 4), (50, 5)]);
        assert_eq!(play.state().spawn_interval, 0.35);
    }

    #[test]
    fn test_five_escapes_end_match() {
        let (mut play, mut host) = started(Tuning::default());
        let (_, _) = run_until(&mut play, &mut host, 30.0, |p, _| {
            p.status() == MatchStatus::After
        });
        assert_eq!(play.state().lives, 0);
        assert_eq!(play.status(), MatchStatus::After);
        assert_eq!(host.label(Label::Lives), Some("LIVES: 0"));

        let (elapsed, result) = run_until(&mut play, &mut host, 2.0, |_, r| r.is_some());
        assert_eq!(
            result,
            Some(MatchResult {
                final_score: 0,
                level: 1
            })
        );
        assert!(elapsed <= 1.0 + 2.0 * FRAME_DT);
    }

    #[test]
    fn test_player_contact_instant_loss() {
        let (mut play, mut host) = started(Tuning::default());
        let player = play.player().unwrap();
        let e = enemy_at(&mut host, 400.0);
        play.on_contact(&mut host, hit((Category::Enemy, e), (Category::Player, player)));
        assert_eq!(play.status(), MatchStatus::After);
        assert_eq!(play.state().lives, 5);
        assert_eq!(host.position(player), None);
        assert_eq!(host.explosions.len(), 2);
        assert_eq!(play.player(), None);
    }

    #[test]
    fn test_player_contact_lose_life_policy() {
        let tuning = Tuning {
            contact_policy: ContactPolicy::LoseLife,
            starting_lives: 2,
            ..Default::default()
        };
        let (mut play, mut host) = started(tuning);
        let player = play.player().unwrap();

        let e = enemy_at(&mut host, 400.0);
        play.on_contact(&mut host, hit((Category::Player, player), (Category::Enemy, e)));
        assert_eq!(play.status(), MatchStatus::During);
        assert_eq!(play.state().lives, 1);
        assert!(host.position(player).is_some());

        let e = enemy_at(&mut host, 400.0);
        play.on_contact(&mut host, hit((Category::Player, player), (Category::Enemy, e)));
        assert_eq!(play.status(), MatchStatus::After);
        assert_eq!(play.state().lives, 0);
    }

    #[test]
    fn test_after_cancels_everything() {
        let (mut play, mut host) = started(Tuning::default());
        run_until(&mut play, &mut host, 1.5, |_, _| false);
        play.on_tap(&mut host, Vec2::ZERO);
        let enemies = host.count(Category::Enemy);
        assert!(enemies >= 1);

        let player = play.player().unwrap();
        let e = enemy_at(&mut host, 400.0);
        play.on_contact(&mut host, hit((Category::Player, player), (Category::Enemy, e)));
        assert_eq!(play.status(), MatchStatus::After);
        assert_eq!(play.scheduler().pending(), 1);
        assert!(play.scheduler().is_scheduled(TimerKey::Settle));

        // Frozen field: no spawns, no escapes, no score changes
        let tracked: Vec<EntityRef> = play.tracked().map(|(e, _)| e).collect();
        assert!(tracked.iter().all(|&e| !host.is_moving(e)));
        let (_, result) = run_until(&mut play, &mut host, 5.0, |_, r| r.is_some());
        assert!(result.is_some());
        assert_eq!(host.count(Category::Enemy), enemies);
        assert_eq!(play.state().lives, 5);

        // Late contacts are ignored
        let b = bullet(&mut host);
        let e = enemy_at(&mut host, 1000.0);
        play.on_contact(&mut host, hit((Category::Bullet, b), (Category::Enemy, e)));
        assert_eq!(play.state().score, 0);
        // The halted bullet and the late one; tapping no longer fires
        play.on_tap(&mut host, Vec2::ZERO);
        assert_eq!(host.count(Category::Bullet), 2);
    }

    #[test]
    fn test_shot_enemy_never_escapes() {
        let (mut play, mut host) = started(Tuning::default());
        run_until(&mut play, &mut host, 1.02, |_, _| false);
        let enemy = host.bodies_of(Category::Enemy)[0];
        host.place(enemy, Vec2::new(700.0, 1200.0));
        let b = bullet(&mut host);
        play.on_contact(&mut host, hit((Category::Bullet, b), (Category::Enemy, enemy)));
        assert!(!play.scheduler().is_scheduled(TimerKey::Transit(enemy)));

        // Escape notice for a removed enemy changes nothing
        play.on_enemy_escaped(&mut host, enemy);
        assert_eq!(play.state().lives, 5);
    }

    #[derive(Debug, Clone)]
    enum Event {
        Shoot { y: f32 },
        Escape,
        Ram,
    }

    fn event() -> impl Strategy<Value = Event> {
        prop_oneof![
            4 => (0.0f32..2400.0).prop_map(|y| Event::Shoot { y }),
            2 => Just(Event::Escape),
            1 => Just(Event::Ram),
        ]
    }

    proptest! {
        #[test]
        fn prop_score_and_lives_monotone(
            events in prop::collection::vec(event(), 0..120),
            lose_life in any::<bool>(),
        ) {
            let tuning = Tuning {
                contact_policy: if lose_life {
                    ContactPolicy::LoseLife
                } else {
                    ContactPolicy::InstantLoss
                },
                ..Default::default()
            };
            let boundary = tuning.upper_boundary();
            let (mut play, mut host) = started(tuning);
            let player = play.player().unwrap();

            for ev in events {
                let before = play.state().clone();
                match ev {
                    Event::Shoot { y } => {
                        let e = enemy_at(&mut host, y);
                        let b = bullet(&mut host);
                        let contact = hit((Category::Enemy, e), (Category::Bullet, b));
                        play.on_contact(&mut host, contact);
                        let live = before.status == MatchStatus::During;
                        let expected = if live && y <= boundary { 1 } else { 0 };
                        prop_assert_eq!(play.state().score, before.score + expected);
                    }
                    Event::Escape => {
                        play.spawn_enemy(&mut host);
                        let newest = play
                            .tracked()
                            .filter(|&(_, c)| c == Category::Enemy)
                            .map(|(e, _)| e)
                            .max();
                        if let Some(e) = newest {
                            play.on_enemy_escaped(&mut host, e);
                        }
                    }
                    Event::Ram => {
                        let e = enemy_at(&mut host, 400.0);
                        let contact = hit((Category::Player, player), (Category::Enemy, e));
                        play.on_contact(&mut host, contact);
                    }
                }
                let after = play.state();
                prop_assert!(after.score >= before.score);
                prop_assert!(after.lives <= before.lives);
                prop_assert!(after.level >= before.level);
                if after.lives == 0 {
                    prop_assert_eq!(after.status, MatchStatus::After);
                }
                if after.status == MatchStatus::During {
                    prop_assert!(after.lives > 0);
                }
            }
        }
    }
}
