//! Session flow: the player's defeat ends the run, `Restart` starts a new one.
//!
//! ```text
//! InGame   --CharacterDefeated(Player)--> GameOver
//! GameOver --Restart action-------------> InGame (arena respawned via OnEnter)
//! ```

use bevy::prelude::*;

use crate::common::input::{Action, ActionBindings};
use crate::common::state::GameState;
use crate::plugins::character::{CharacterDefeated, Role};

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        end_run_on_player_defeat.run_if(in_state(GameState::InGame)),
    )
    .add_systems(Update, restart_on_input.run_if(in_state(GameState::GameOver)))
    .add_systems(OnEnter(GameState::GameOver), || info!("game over"));
}

pub(crate) fn end_run_on_player_defeat(
    mut defeated: MessageReader<CharacterDefeated>,
    mut next: ResMut<NextState<GameState>>,
) {
    if defeated.read().any(|d| d.role == Role::Player) {
        next.set(GameState::GameOver);
    }
}

pub(crate) fn restart_on_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<ActionBindings>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(keys) = keys else {
        return;
    };
    if bindings.is_just_pressed(&keys, Action::Restart) {
        info!("restarting");
        next.set(GameState::InGame);
    }
}

#[cfg(test)]
mod tests;
