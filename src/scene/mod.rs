//! Scenes and the director that switches between them
//!
//! Flow: Title -> (tap) -> Play -> (match over) -> Result -> (tap PLAY AGAIN)
//! -> a new Play. Host callbacks go to `Game`, which forwards them to the
//! current scene and applies whatever transition comes back.

pub mod play;
pub mod result;
pub mod title;

pub use crate::platform::SceneKind;
pub use play::{MatchResult, PlayController};
pub use result::{ResultController, restart_region};
pub use title::TitleController;

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::persistence::IntegerStore;
use crate::platform::Host;
use crate::sim::{Contact, PlayField};
use crate::tuning::Tuning;

/// The scene currently in control
#[derive(Debug)]
pub enum Scene {
    Title(TitleController),
    Play(PlayController),
    Result(ResultController),
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Title(_) => SceneKind::Title,
            Scene::Play(_) => SceneKind::Play,
            Scene::Result(_) => SceneKind::Result,
        }
    }
}

/// Scene director
#[derive(Debug)]
pub struct Game<S: IntegerStore> {
    tuning: Tuning,
    field: PlayField,
    store: S,
    /// Source of per-match seeds
    seeds: Pcg32,
    scene: Scene,
}

impl<S: IntegerStore> Game<S> {
    /// Build the director sitting on the title scene
    pub fn new<H: Host + ?Sized>(host: &mut H, tuning: Tuning, store: S, seed: u64) -> Self {
        let field = PlayField::new(&tuning);
        let scene = Scene::Title(TitleController::enter(host));
        Self {
            tuning,
            field,
            store,
            seeds: Pcg32::seed_from_u64(seed),
            scene,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_kind(&self) -> SceneKind {
        self.scene.kind()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The running match, if any
    pub fn play(&self) -> Option<&PlayController> {
        match &self.scene {
            Scene::Play(play) => Some(play),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&ResultController> {
        match &self.scene {
            Scene::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn on_tap<H: Host + ?Sized>(&mut self, host: &mut H, position: Vec2) {
        let next = match &mut self.scene {
            Scene::Title(title) => {
                let seed = self.seeds.next_u64();
                Some(Scene::Play(title.on_tap(host, &self.tuning, seed)))
            }
            Scene::Play(play) => {
                play.on_tap(host, position);
                None
            }
            Scene::Result(result) => {
                let seed = self.seeds.next_u64();
                result
                    .on_tap(host, position, &self.tuning, seed)
                    .map(Scene::Play)
            }
        };
        if let Some(next) = next {
            self.scene = next;
        }
    }

    pub fn on_drag<H: Host + ?Sized>(&mut self, host: &mut H, dx: f32) {
        if let Scene::Play(play) = &mut self.scene {
            play.on_drag(host, dx);
        }
    }

    pub fn on_contact<H: Host + ?Sized>(&mut self, host: &mut H, contact: Contact) {
        if let Scene::Play(play) = &mut self.scene {
            play.on_contact(host, contact);
        }
    }

    /// Per-frame tick from the host
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H, dt: f32) {
        let Scene::Play(play) = &mut self.scene else {
            return;
        };
        if let Some(result) = play.tick(host, dt) {
            let scene = ResultController::enter(host, &mut self.store, &self.field, result);
            self.scene = Scene::Result(scene);
        }
    }
}
