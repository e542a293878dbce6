//! Space Battle entry point
//!
//! There is no renderer here: the binary plays one match against the headless
//! host with a simple autopilot and reports the result. Real front ends embed
//! the library and implement `platform::Host` themselves.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod demo {
    use glam::Vec2;

    use space_battle::consts::FRAME_DT;
    use space_battle::persistence::IntegerStore;
    use space_battle::platform::{EntityView, HeadlessHost, Label};
    use space_battle::sim::Category;
    use space_battle::{Game, SceneKind, Tuning};

    /// Frames between autopilot shots
    const FIRE_EVERY: u32 = 12;
    /// Max autopilot drag per frame
    const MAX_DRAG: f32 = 24.0;
    /// Give up after this many simulated seconds
    const TIME_LIMIT: f32 = 600.0;

    /// Play one match from the title screen to the result screen
    pub fn run<S: IntegerStore>(tuning: Tuning, store: S, seed: u64) {
        let mut host = HeadlessHost::new();
        let mut game = Game::new(&mut host, tuning, store, seed);

        game.on_tap(&mut host, Vec2::ZERO);

        let mut frame: u32 = 0;
        while game.scene_kind() == SceneKind::Play {
            host.advance(FRAME_DT);
            autopilot(&mut game, &mut host, frame);
            for contact in host.detect_contacts() {
                game.on_contact(&mut host, contact);
            }
            game.tick(&mut host, FRAME_DT);

            frame += 1;
            if frame as f32 * FRAME_DT > TIME_LIMIT {
                log::warn!("Time limit reached, stopping demo");
                return;
            }
        }

        for label in [Label::GameOver, Label::FinalScore, Label::HighScore] {
            if let Some(text) = host.label(label) {
                println!("{}", text);
            }
        }
        log::info!("Demo finished after {:.1}s", frame as f32 * FRAME_DT);
    }

    /// Chase the lowest enemy and fire on a fixed rhythm
    fn autopilot<S: IntegerStore>(game: &mut Game<S>, host: &mut HeadlessHost, frame: u32) {
        let Some(play) = game.play() else { return };
        let Some(ship) = play.player().and_then(|p| host.position(p)) else {
            return;
        };
        let boundary = game.tuning().upper_boundary();

        let target = host
            .bodies_of(Category::Enemy)
            .into_iter()
            .filter_map(|e| host.position(e))
            .filter(|p| p.y < boundary && p.y > ship.y)
            .min_by(|a, b| a.y.total_cmp(&b.y));

        if let Some(target) = target {
            let dx = (target.x - ship.x).clamp(-MAX_DRAG, MAX_DRAG);
            game.on_drag(host, dx);
        }
        if frame % FIRE_EVERY == 0 {
            game.on_tap(host, ship);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Space Battle (wasm) starting...");

    let seed = js_sys::Date::now() as u64;
    let store = space_battle::persistence::LocalStorageStore::new("space_battle_");
    demo::run(space_battle::Tuning::default(), store, seed);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use space_battle::persistence::JsonFileStore;
    use space_battle::{ContactPolicy, Tuning};

    env_logger::init();
    log::info!("Space Battle (native) starting...");

    // Optional arguments: tuning JSON path, then a contact policy override
    let mut args = std::env::args().skip(1);
    let mut tuning = match args.next() {
        Some(path) => Tuning::load_or_default(&PathBuf::from(path)),
        None => Tuning::default(),
    };
    if let Some(policy) = args.next() {
        match ContactPolicy::from_str(&policy) {
            Some(policy) => tuning.contact_policy = policy,
            None => log::warn!(
                "Unknown contact policy '{}', keeping {}",
                policy,
                tuning.contact_policy.as_str()
            ),
        }
    }

    let store = JsonFileStore::new(std::env::temp_dir().join("space_battle_scores.json"));
    log::info!("High score file: {}", store.path().display());

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed);

    demo::run(tuning, store, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
