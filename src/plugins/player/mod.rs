//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input through `ActionBindings`, write the `PlayerInput` resource
//! - FixedUpdate (Act): attack state machine, then movement intent + facing
//! - Update: mirror the attack hitbox onto the swipe sprite
//!
//! Attack presses are latched in `PlayerInput` until the next fixed step
//! consumes them, so a press is not lost when several render frames pass
//! between fixed steps. While a cutscene plays, input is dropped instead.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::direction::Direction;
use crate::common::input::{Action, ActionBindings};
use crate::common::layers::Layer;
use crate::common::space::screen_to_world;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::character::presentation::{Activity, AnimationRequest};
use crate::plugins::character::{Body, Character, CharacterSystems, PendingDespawn, Role};
use crate::plugins::cutscene::gameplay_running;

pub mod attack;

use attack::AttackState;

/// Screen-space spawn point.
pub const SPAWN: Vec2 = Vec2::new(0.0, 48.0);

#[derive(Component, Debug, Clone)]
pub struct Player {
    pub attack: AttackState,
}

/// Sprite showing the active attack hitbox.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttackSwipe;

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub intent: Option<Direction>,
    /// Latched until consumed by the fixed step.
    pub attack_requested: bool,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (
                gather_input.run_if(gameplay_running),
                drop_input.run_if(not(gameplay_running)),
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, player_act.in_set(CharacterSystems::Act))
        .add_systems(
            Update,
            sync_attack_swipe.run_if(in_state(GameState::InGame)),
        );
}

pub fn player_bundle(position: Vec2, tunables: &Tunables) -> impl Bundle + use<> {
    let half = tunables.body_half_extent;
    (
        Name::new("Player"),
        Player { attack: AttackState::new(tunables) },
        Character::new(
            Role::Player,
            position,
            Direction::Down,
            tunables.player_speed,
            tunables.player_health,
            tunables,
        ),
        Body { half_extent: Vec2::splat(half) },
        AnimationRequest::default(),
        Transform::from_translation(screen_to_world(position).extend(1.0)),
    )
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let half = tunables.body_half_extent;
    let layers = CollisionLayers::new(Layer::Player, [Layer::World]);

    commands.spawn((
        player_bundle(SPAWN, &tunables),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(half * 2.0)),
            ..default()
        },
        RigidBody::Kinematic,
        Collider::rectangle(half * 2.0, half * 2.0),
        layers,
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("AttackSwipe"),
        AttackSwipe,
        Sprite {
            color: Color::srgba(1.0, 0.95, 0.7, 0.6),
            custom_size: Some(Vec2::splat(tunables.attack_size)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 2.0),
        Visibility::Hidden,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<ActionBindings>,
    mut input: ResMut<PlayerInput>,
) {
    let Some(keys) = keys else {
        return;
    };

    input.intent = bindings.move_intent(&keys);
    if bindings.is_just_pressed(&keys, Action::Attack) {
        input.attack_requested = true;
    }
}

pub(crate) fn drop_input(mut input: ResMut<PlayerInput>) {
    if input.intent.is_some() || input.attack_requested {
        *input = PlayerInput::default();
    }
}

/// Attack state machine + movement intent for the player.
///
/// Intent is ignored while attacking or hit-stunned. Entering an attack
/// zeroes velocity on the spot.
pub(crate) fn player_act(
    time: Res<Time<Fixed>>,
    mut input: ResMut<PlayerInput>,
    mut q: Query<(&mut Character, &mut Player), Without<PendingDespawn>>,
) {
    let Ok((mut character, mut player)) = q.single_mut() else {
        return;
    };
    let stunned = character.combat.is_hit_stunned();

    player.attack.tick(time.delta_secs());

    let attack_requested = std::mem::take(&mut input.attack_requested);
    if attack_requested && !stunned && player.attack.try_begin(character.facing) {
        debug!("player attacks {:?}", character.facing);
        character.motion.halt();
    }

    if player.attack.is_attacking() {
        character.activity = Activity::Attacking;
    } else if character.activity == Activity::Attacking {
        character.activity = Activity::Idle;
    }

    if stunned || player.attack.is_attacking() {
        character.motion.intent = None;
        return;
    }

    character.motion.intent = input.intent;
    if let Some(dir) = input.intent {
        character.facing = dir;
    }
}

fn sync_attack_swipe(
    q_player: Query<(&Character, &Player)>,
    mut q_swipe: Query<(&mut Transform, &mut Visibility), With<AttackSwipe>>,
) {
    let Ok((mut tf, mut vis)) = q_swipe.single_mut() else {
        return;
    };
    let Ok((character, player)) = q_player.single() else {
        *vis = Visibility::Hidden;
        return;
    };

    let hitbox = player.attack.hitbox();
    if !hitbox.is_active() {
        *vis = Visibility::Hidden;
        return;
    }

    let p = screen_to_world(character.position + hitbox.offset);
    tf.translation.x = p.x;
    tf.translation.y = p.y;
    *vis = Visibility::Visible;
}
