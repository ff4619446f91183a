use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

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
    app.update();
    app
}

fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

fn defeat(app: &mut App, role: Role) {
    app.world_mut().write_message(CharacterDefeated { entity: Entity::PLACEHOLDER, role });
    // One frame to read the message, one for the state transition.
    app.update();
    app.update();
}

#[test]
fn enemy_defeat_keeps_playing() {
    let mut app = app();
    defeat(&mut app, Role::Enemy);
    assert_eq!(state(&app), GameState::InGame);
}

#[test]
fn player_defeat_ends_the_run() {
    let mut app = app();
    defeat(&mut app, Role::Player);
    assert_eq!(state(&app), GameState::GameOver);
}

#[test]
fn restart_returns_to_game() {
    let mut app = app();
    defeat(&mut app, Role::Player);

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyR);
    app.insert_resource(keys);
    app.update();
    app.update();

    assert_eq!(state(&app), GameState::InGame);
}

#[test]
fn restart_ignored_without_keyboard() {
    let mut app = app();
    defeat(&mut app, Role::Player);
    app.update();
    assert_eq!(state(&app), GameState::GameOver);
}
