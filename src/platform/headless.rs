//! Headless host
//!
//! Keeps bodies in a map, interpolates their movement against its own clock,
//! and records every effect the core asks for. The demo binary drives a whole
//! match through it, and the tests use it to observe the core.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

use super::host::{EntityView, Host, Label, SceneKind, SoundCue, Spawn};
use crate::sim::{Category, Contact, EntityRef, Participant};

/// Straight-line movement in progress
#[derive(Debug, Clone, Copy)]
struct Motion {
    from: Vec2,
    to: Vec2,
    start: f64,
    duration: f32,
}

/// A body in the headless world
#[derive(Debug, Clone)]
pub struct Body {
    pub category: Category,
    pub rotation: f32,
    origin: Vec2,
    motion: Option<Motion>,
}

impl Body {
    fn position_at(&self, now: f64) -> Vec2 {
        match self.motion {
            Some(m) if m.duration > 0.0 => {
                let t = (((now - m.start) / m.duration as f64) as f32).clamp(0.0, 1.0);
                m.from.lerp(m.to, t)
            }
            Some(m) => m.to,
            None => self.origin,
        }
    }
}

/// Contact radius per category
pub fn body_radius(category: Category) -> f32 {
    match category {
        Category::Player => 60.0,
        Category::Bullet => 15.0,
        Category::Enemy => 70.0,
    }
}

/// Host that renders nothing and remembers everything
#[derive(Debug, Default)]
pub struct HeadlessHost {
    now: f64,
    next_id: EntityRef,
    bodies: BTreeMap<EntityRef, Body>,
    /// Pairs currently overlapping, so contacts are only reported when they begin
    touching: BTreeSet<(EntityRef, EntityRef)>,
    pub scene: Option<SceneKind>,
    pub labels: BTreeMap<Label, String>,
    pub sounds: Vec<SoundCue>,
    pub explosions: Vec<Vec2>,
    pub spawned: Vec<Spawn>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Move the host clock forward
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.now += dt as f64;
        }
    }

    pub fn body(&self, entity: EntityRef) -> Option<&Body> {
        self.bodies.get(&entity)
    }

    /// Live bodies of a category, in id order
    pub fn bodies_of(&self, category: Category) -> Vec<EntityRef> {
        self.bodies
            .iter()
            .filter(|(_, b)| b.category == category)
            .map(|(&id, _)| id)
            .collect()
    }

    pub fn count(&self, category: Category) -> usize {
        self.bodies.values().filter(|b| b.category == category).count()
    }

    /// Teleport a body, dropping its movement
    pub fn place(&mut self, entity: EntityRef, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&entity) {
            body.origin = position;
            body.motion = None;
        }
    }

    pub fn is_moving(&self, entity: EntityRef) -> bool {
        self.bodies
            .get(&entity)
            .and_then(|b| b.motion)
            .is_some_and(|m| self.now < m.start + m.duration as f64)
    }

    pub fn label(&self, label: Label) -> Option<&str> {
        self.labels.get(&label).map(String::as_str)
    }

    /// Report pairs whose bounds started overlapping since the last call
    pub fn detect_contacts(&mut self) -> Vec<Contact> {
        let live: Vec<(EntityRef, Category, Vec2)> = self
            .bodies
            .iter()
            .map(|(&id, b)| (id, b.category, b.position_at(self.now)))
            .collect();

        let mut overlapping = BTreeSet::new();
        let mut began = Vec::new();
        for (i, &(ea, ca, pa)) in live.iter().enumerate() {
            for &(eb, cb, pb) in &live[i + 1..] {
                if ca.contact_mask() & cb.bits() == 0 {
                    continue;
                }
                let reach = body_radius(ca) + body_radius(cb);
                if pa.distance_squared(pb) > reach * reach {
                    continue;
                }
                overlapping.insert((ea, eb));
                if !self.touching.contains(&(ea, eb)) {
                    began.push(Contact::new(Participant::new(ca, ea), Participant::new(cb, eb)));
                }
            }
        }
        self.touching = overlapping;
        began
    }
}

impl EntityView for HeadlessHost {
    fn position(&self, entity: EntityRef) -> Option<Vec2> {
        self.bodies.get(&entity).map(|b| b.position_at(self.now))
    }

    fn category(&self, entity: EntityRef) -> Option<Category> {
        self.bodies.get(&entity).map(|b| b.category)
    }

    fn remove(&mut self, entity: EntityRef) -> bool {
        self.bodies.remove(&entity).is_some()
    }
}

impl Host for HeadlessHost {
    fn present(&mut self, scene: SceneKind) {
        log::debug!("Presenting {:?} scene", scene);
        self.scene = Some(scene);
        self.bodies.clear();
        self.touching.clear();
        self.labels.clear();
    }

    fn spawn(&mut self, spawn: Spawn) -> EntityRef {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.bodies.insert(
            id,
            Body {
                category: spawn.category,
                rotation: spawn.rotation,
                origin: spawn.position,
                motion: None,
            },
        );
        self.spawned.push(spawn);
        id
    }

    fn move_to(&mut self, entity: EntityRef, target: Vec2, duration: f32) {
        let now = self.now;
        if let Some(body) = self.bodies.get_mut(&entity) {
            let from = body.position_at(now);
            body.origin = from;
            body.motion = Some(Motion {
                from,
                to: target,
                start: now,
                duration,
            });
        }
    }

    fn halt(&mut self, entity: EntityRef) {
        let now = self.now;
        if let Some(body) = self.bodies.get_mut(&entity) {
            body.origin = body.position_at(now);
            body.motion = None;
        }
    }

    fn explode(&mut self, at: Vec2) {
        self.explosions.push(at);
    }

    fn play(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    fn set_label(&mut self, label: Label, text: Option<String>) {
        match text {
            Some(text) => {
                self.labels.insert(label, text);
            }
            None => {
                self.labels.remove(&label);
            }
        }
    }
}
