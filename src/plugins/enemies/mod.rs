//! Enemies plugin: wandering melee enemies that chase the player on sight.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! Every enemy is a `Character` (shared motion + combat) plus an `Enemy`
//! holding its `EnemyBrain`. The brain only ever writes intent:
//!
//! 1) THINK (FixedUpdate, before anyone moves):
//!    - sight check against the player -> chase state + chase direction
//!    - direction-change timer -> re-roll facing
//!    - intent = facing, speed = base or chase speed
//!
//! 2) MOVE happens in the character plugin.
//!
//! 3) REACT: a blocked move forces an immediate re-roll instead of waiting
//!    for the timer.
//!
//! Hit-stunned enemies skip thinking entirely; a hit already dropped their
//! chase state and they stay idle until the knockback resolves.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::direction::Direction;
use crate::common::layers::Layer;
use crate::common::rng::GameRng;
use crate::common::space::screen_to_world;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::character::presentation::AnimationRequest;
use crate::plugins::character::{Body, Character, CharacterSystems, PendingDespawn, Role};
use crate::plugins::cutscene::GameplayEvent;
use crate::plugins::player::Player;

pub mod ai;

use ai::EnemyBrain;

/// Screen-space spawn points.
pub const SPAWNS: [Vec2; 3] = [
    Vec2::new(-96.0, -64.0),
    Vec2::new(96.0, -64.0),
    Vec2::new(0.0, -104.0),
];

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub brain: EnemyBrain,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_enemies)
        .add_systems(FixedUpdate, enemy_think.in_set(CharacterSystems::Think))
        .add_systems(
            FixedUpdate,
            reroll_blocked_enemies.in_set(CharacterSystems::React),
        );
}

/// Enemy with a freshly rolled facing and a running direction-change timer.
pub fn enemy_bundle<R: Rng>(
    position: Vec2,
    tunables: &Tunables,
    rng: &mut R,
) -> impl Bundle + use<R> {
    let facing = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
    let mut brain = EnemyBrain::new(tunables, facing);
    brain.schedule_change(rng);

    let mut character = Character::new(
        Role::Enemy,
        position,
        facing,
        tunables.enemy_speed,
        tunables.enemy_health,
        tunables,
    );
    character.motion.intent = Some(facing);

    (
        Enemy { brain },
        character,
        Body { half_extent: Vec2::splat(tunables.body_half_extent) },
        AnimationRequest::default(),
        Transform::from_translation(screen_to_world(position).extend(1.0)),
    )
}

fn spawn_enemies(mut commands: Commands, tunables: Res<Tunables>, mut rng: ResMut<GameRng>) {
    let half = tunables.body_half_extent;
    let layers = CollisionLayers::new(Layer::Enemy, [Layer::World]);

    for (i, pos) in SPAWNS.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Enemy{i}")),
            enemy_bundle(pos, &tunables, &mut rng.rng),
            Sprite {
                color: Color::srgb(0.9, 0.25, 0.25),
                custom_size: Some(Vec2::splat(half * 2.0)),
                ..default()
            },
            RigidBody::Kinematic,
            Collider::rectangle(half * 2.0, half * 2.0),
            layers,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Sight check, chase update, timed re-roll, then walk along facing.
pub(crate) fn enemy_think(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<GameRng>,
    mut events: MessageWriter<GameplayEvent>,
    q_player: Query<&Character, (With<Player>, Without<Enemy>)>,
    mut q: Query<(Entity, &mut Character, &mut Enemy), (Without<Player>, Without<PendingDespawn>)>,
) {
    let dt = time.delta_secs();
    let player = q_player.single().ok().map(|c| c.position);

    for (entity, mut character, mut enemy) in &mut q {
        let character = &mut *character;
        if character.combat.is_hit_stunned() || character.combat.is_defeated() {
            continue;
        }

        let brain = &mut enemy.brain;
        if brain.observe(character.position, character.facing, player) {
            debug!("enemy {entity} spotted player, chasing {:?}", brain.chase_direction);
            events.write(GameplayEvent::EnemySpottedPlayer);
        }
        brain.tick(dt, &mut character.facing, &mut rng.rng);

        character.motion.speed = brain.speed();
        character.motion.intent = Some(character.facing);
    }
}

/// A blocked move re-rolls facing at once and restarts the timer.
pub(crate) fn reroll_blocked_enemies(
    mut rng: ResMut<GameRng>,
    mut q: Query<(Entity, &mut Character, &mut Enemy), Without<PendingDespawn>>,
) {
    for (entity, mut character, mut enemy) in &mut q {
        let character = &mut *character;
        if !character.motion.blocked {
            continue;
        }

        enemy.brain.change_direction(&mut character.facing, &mut rng.rng);
        character.motion.intent = Some(character.facing);
        character.motion.blocked = false;
        debug!("enemy {entity} blocked, now facing {:?}", character.facing);
    }
}
