//! Named input actions and their key bindings.

use bevy::prelude::*;

use super::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Attack,
    Skip,
    Restart,
}

/// Movement actions in intent priority order.
pub const MOVE_ACTIONS: [(Action, Direction); 4] = [
    (Action::MoveUp, Direction::Up),
    (Action::MoveDown, Direction::Down),
    (Action::MoveLeft, Direction::Left),
    (Action::MoveRight, Direction::Right),
];

#[derive(Resource, Debug, Clone)]
pub struct ActionBindings {
    bindings: Vec<(Action, Vec<KeyCode>)>,
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (Action::MoveUp, vec![KeyCode::KeyW, KeyCode::ArrowUp]),
                (Action::MoveDown, vec![KeyCode::KeyS, KeyCode::ArrowDown]),
                (Action::MoveLeft, vec![KeyCode::KeyA, KeyCode::ArrowLeft]),
                (Action::MoveRight, vec![KeyCode::KeyD, KeyCode::ArrowRight]),
                (Action::Attack, vec![KeyCode::Space, KeyCode::KeyJ]),
                (Action::Skip, vec![KeyCode::Enter, KeyCode::Escape]),
                (Action::Restart, vec![KeyCode::KeyR, KeyCode::Enter]),
            ],
        }
    }
}

impl ActionBindings {
    pub fn keys(&self, action: Action) -> &[KeyCode] {
        self.bindings
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, keys)| keys.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the keys bound to `action`.
    pub fn bind(&mut self, action: Action, keys: Vec<KeyCode>) {
        match self.bindings.iter_mut().find(|(a, _)| *a == action) {
            Some((_, bound)) => *bound = keys,
            None => self.bindings.push((action, keys)),
        }
    }

    pub fn is_pressed(&self, input: &ButtonInput<KeyCode>, action: Action) -> bool {
        input.any_pressed(self.keys(action).iter().copied())
    }

    pub fn is_just_pressed(&self, input: &ButtonInput<KeyCode>, action: Action) -> bool {
        input.any_just_pressed(self.keys(action).iter().copied())
    }

    /// First held movement direction, in [`MOVE_ACTIONS`] order.
    pub fn move_intent(&self, input: &ButtonInput<KeyCode>) -> Option<Direction> {
        MOVE_ACTIONS
            .iter()
            .find(|(action, _)| self.is_pressed(input, *action))
            .map(|(_, dir)| *dir)
    }
}
