//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `bevy_brawler::game::configure_headless` to install gameplay plugins.
//! - time advances by a fixed amount per update so fixed steps are predictable.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_brawler::plugins::cutscene::{CutscenePlayback, CutsceneFinished};

/// Slightly over one 60 Hz step, so every update runs at least one fixed step.
pub const FRAME: Duration = Duration::from_millis(17);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    bevy_brawler::game::configure_headless(&mut app);
    // `App::run` would do this; tests drive `update()` directly, so finish
    // plugin setup here (avian registers its diagnostics resources in `finish`).
    app.finish();
    app.cleanup();
    app
}

pub fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Finish whatever cutscenes are playing or queued so gameplay steps again.
pub fn finish_cutscene(app: &mut App) {
    for _ in 0..4 {
        if app.world().resource::<CutscenePlayback>().active.is_none() {
            break;
        }
        app.world_mut().write_message(CutsceneFinished);
        app.update();
    }
    assert!(
        app.world().resource::<CutscenePlayback>().active.is_none(),
        "cutscene still playing"
    );
}

/// Boot into `InGame` with the intro dismissed.
pub fn app_in_game() -> App {
    let mut app = app_headless();
    step(&mut app, 2);
    finish_cutscene(&mut app);
    app
}
