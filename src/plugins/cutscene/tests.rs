use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use super::*;
use crate::common::input::ActionBindings;
use crate::common::state::GameState;
use crate::plugins::character::{CharacterDefeated, Role};

fn app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.insert_resource(ActionBindings::default());
    app.add_message::<CharacterDefeated>();
    super::plugin(&mut app);
    app
}

fn requested(app: &mut App) -> Vec<String> {
    app.world_mut()
        .resource_mut::<Messages<CutsceneRequested>>()
        .drain()
        .map(|r| r.timeline)
        .collect()
}

#[test]
fn front_trigger_fires_once_and_pops() {
    let mut script = CutsceneScript::new([
        Trigger::new([GameplayEvent::LevelReady], "intro"),
        Trigger::new([GameplayEvent::EnemySpottedPlayer], "sighting"),
    ]);

    assert_eq!(script.observe(GameplayEvent::LevelReady).as_deref(), Some("intro"));
    assert_eq!(script.len(), 1);
    assert_eq!(script.observe(GameplayEvent::LevelReady), None);
    assert_eq!(script.observe(GameplayEvent::EnemySpottedPlayer).as_deref(), Some("sighting"));
    assert!(script.is_empty());
    assert_eq!(script.observe(GameplayEvent::EnemySpottedPlayer), None);
}

#[test]
fn only_front_trigger_listens() {
    let mut script = CutsceneScript::new([
        Trigger::new([GameplayEvent::EnemyDefeated], "first"),
        Trigger::new([GameplayEvent::EnemySpottedPlayer], "second"),
    ]);

    // Matches the second trigger, which is not at the front.
    assert_eq!(script.observe(GameplayEvent::EnemySpottedPlayer), None);
    assert_eq!(script.len(), 2);

    assert_eq!(script.observe(GameplayEvent::EnemyDefeated).as_deref(), Some("first"));
    // Earlier sighting was not remembered.
    assert_eq!(script.front().map(|t| t.progress()), Some(0));
}

#[test]
fn sequence_matches_in_order_and_skips_unrelated_events() {
    let mut script = CutsceneScript::new([Trigger::new(
        [GameplayEvent::EnemySpottedPlayer, GameplayEvent::EnemyDefeated],
        "payback",
    )]);

    assert_eq!(script.observe(GameplayEvent::EnemyDefeated), None);
    assert_eq!(script.front().map(|t| t.progress()), Some(0));

    assert_eq!(script.observe(GameplayEvent::EnemySpottedPlayer), None);
    assert_eq!(script.observe(GameplayEvent::LevelReady), None);
    assert_eq!(script.front().map(|t| t.progress()), Some(1));

    assert_eq!(script.observe(GameplayEvent::EnemyDefeated).as_deref(), Some("payback"));
}

#[test]
fn entering_game_plays_intro_and_pauses_gameplay() {
    let mut app = app();
    app.update();
    app.update();

    assert_eq!(requested(&mut app), vec!["intro".to_string()]);
    let playback = app.world().resource::<CutscenePlayback>();
    assert_eq!(playback.active.as_deref(), Some("intro"));

    let running = app
        .world_mut()
        .run_system_once(gameplay_running)
        .expect("condition run failed");
    assert!(!running);
}

#[test]
fn finished_message_resumes_gameplay() {
    let mut app = app();
    app.update();
    app.update();

    app.world_mut().write_message(CutsceneFinished);
    app.update();

    assert_eq!(app.world().resource::<CutscenePlayback>().active, None);
}

#[test]
fn skip_action_resumes_gameplay() {
    let mut app = app();
    app.update();
    app.update();

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Escape);
    app.insert_resource(keys);
    app.update();

    assert_eq!(app.world().resource::<CutscenePlayback>().active, None);
}

#[test]
fn three_enemy_defeats_clear_the_arena() {
    let mut app = app();
    app.update();
    app.world_mut().write_message(CutsceneFinished);
    app.update();
    requested(&mut app);

    // Skip the sighting trigger.
    app.world_mut().write_message(GameplayEvent::EnemySpottedPlayer);
    app.update();
    app.world_mut().write_message(CutsceneFinished);
    app.update();
    assert_eq!(requested(&mut app), vec!["first_sighting".to_string()]);

    for _ in 0..3 {
        app.world_mut().write_message(CharacterDefeated {
            entity: Entity::PLACEHOLDER,
            role: Role::Enemy,
        });
        app.update();
    }

    assert_eq!(requested(&mut app), vec!["arena_cleared".to_string()]);
    assert!(app.world().resource::<CutsceneScript>().is_empty());
}

#[test]
fn trigger_during_a_cutscene_waits_its_turn() {
    let mut app = app();
    app.update();
    app.update();
    assert_eq!(requested(&mut app), vec!["intro".to_string()]);

    // Intro still playing.
    app.world_mut().write_message(GameplayEvent::EnemySpottedPlayer);
    app.update();
    assert!(requested(&mut app).is_empty());
    let playback = app.world().resource::<CutscenePlayback>();
    assert_eq!(playback.active.as_deref(), Some("intro"));
    assert_eq!(playback.queued, VecDeque::from(["first_sighting".to_string()]));

    app.world_mut().write_message(CutsceneFinished);
    app.update();
    assert_eq!(requested(&mut app), vec!["first_sighting".to_string()]);
    let playback = app.world().resource::<CutscenePlayback>();
    assert_eq!(playback.active.as_deref(), Some("first_sighting"));
    assert!(playback.queued.is_empty());

    app.world_mut().write_message(CutsceneFinished);
    app.update();
    assert_eq!(app.world().resource::<CutscenePlayback>().active, None);
}

#[test]
fn gameplay_runs_without_playback_resource() {
    let mut world = World::new();
    let running = world
        .run_system_once(gameplay_running)
        .expect("condition run failed");
    assert!(running);
}
