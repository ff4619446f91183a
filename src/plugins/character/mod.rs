//! Character core shared by the player and enemies.
//!
//! One [`Character`] component owns everything the per-step pipeline mutates:
//! position, facing, activity, motion and combat state. Variant behaviour
//! (player attacks, enemy AI) lives in the `Player` / `Enemy` components and
//! writes *intent* into the character before it moves.
//!
//! ```text
//! FixedUpdate (chained, paused outside InGame or during cutscenes)
//!   Think   enemy AI picks facing / speed / intent
//!   Act     player input -> intent, attack sub-state machine
//!   Move    integrate velocity, attempt move against world geometry
//!   React   enemies re-roll direction when blocked
//!   Resolve knockback tweens, invincibility, defeat
//!   Sync    screen-space position -> Transform
//! FixedPostUpdate
//!   hitbox overlaps -> HitRequest -> Character::hit
//! Update
//!   facing x activity -> AnimationRequest
//! PostUpdate
//!   despawn defeated characters
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::direction::Direction;
use crate::common::space::screen_to_world;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::cutscene::gameplay_running;

pub mod combat;
pub mod motion;
pub mod presentation;
pub mod spatial;

use combat::{CombatState, CombatTiming, Resolution};
use motion::MotionState;
use presentation::{Activity, AnimationRequest, StunPresentation, select_request};
use spatial::{SpatialMotion, world_filter};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSystems {
    Think,
    Act,
    Move,
    React,
    Resolve,
    Sync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Enemy,
}

impl Role {
    fn stun_presentation(self) -> StunPresentation {
        match self {
            Role::Player => StunPresentation::Hold,
            Role::Enemy => StunPresentation::HitClip,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Character {
    pub role: Role,
    /// Screen space.
    pub position: Vec2,
    pub facing: Direction,
    pub activity: Activity,
    pub motion: MotionState,
    pub combat: CombatState,
}

impl Character {
    pub fn new(
        role: Role,
        position: Vec2,
        facing: Direction,
        speed: f32,
        health: u32,
        tunables: &Tunables,
    ) -> Self {
        Self {
            role,
            position,
            facing,
            activity: Activity::Idle,
            motion: MotionState::new(speed, tunables.acceleration_factor),
            combat: CombatState::new(
                health,
                CombatTiming {
                    knockback_duration: tunables.knockback_duration,
                    invincibility: tunables.invincibility,
                },
            ),
        }
    }

    /// Idle/Moving from velocity. Attacking is owned by the attack state machine.
    pub fn refresh_activity(&mut self) {
        if self.activity == Activity::Attacking {
            return;
        }
        self.activity = if self.motion.velocity == Vec2::ZERO {
            Activity::Idle
        } else {
            Activity::Moving
        };
    }
}

/// Axis-aligned hurtbox, centred on the character.
#[derive(Component, Debug, Clone, Copy)]
pub struct Body {
    pub half_extent: Vec2,
}

/// Marker: character was defeated and is removed in PostUpdate.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

#[derive(Message, Debug, Clone, Copy)]
pub struct CharacterDefeated {
    pub entity: Entity,
    pub role: Role,
}

pub fn plugin(app: &mut App) {
    app.add_message::<CharacterDefeated>();

    app.configure_sets(
        FixedUpdate,
        (
            CharacterSystems::Think,
            CharacterSystems::Act,
            CharacterSystems::Move,
            CharacterSystems::React,
            CharacterSystems::Resolve,
            CharacterSystems::Sync,
        )
            .chain()
            .run_if(in_state(GameState::InGame).and(gameplay_running)),
    );

    app.add_systems(FixedUpdate, move_characters.in_set(CharacterSystems::Move))
        .add_systems(FixedUpdate, advance_combat.in_set(CharacterSystems::Resolve))
        .add_systems(FixedUpdate, sync_transforms.in_set(CharacterSystems::Sync))
        .add_systems(
            Update,
            select_animation.run_if(in_state(GameState::InGame)),
        )
        .add_systems(PostUpdate, despawn_defeated);
}

/// Integrate velocity from intent and move through world geometry.
///
/// Hit-stunned characters are driven by their knockback tween only.
pub(crate) fn move_characters(
    time: Res<Time<Fixed>>,
    spatial: SpatialQuery,
    mut q: Query<(&mut Character, &Collider), Without<PendingDespawn>>,
) {
    let dt = time.delta_secs();
    let filter = world_filter();

    for (mut character, collider) in &mut q {
        let character = &mut *character;
        if character.combat.is_hit_stunned() || character.combat.is_defeated() {
            continue;
        }

        let mut world = SpatialMotion::new(&spatial, collider, &filter);
        character.motion.step(&mut character.position, &mut world, dt);
        character.refresh_activity();
    }
}

/// Tick knockback and invincibility; mark characters defeated on resolution.
pub(crate) fn advance_combat(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut defeated: MessageWriter<CharacterDefeated>,
    mut q: Query<(Entity, &mut Character), Without<PendingDespawn>>,
) {
    let dt = time.delta_secs();

    for (entity, mut character) in &mut q {
        let character = &mut *character;
        let Some(resolution) = character.combat.tick(&mut character.position, dt) else {
            continue;
        };

        if resolution == Resolution::Defeated {
            info!("{:?} {entity} defeated", character.role);
            commands.entity(entity).insert(PendingDespawn);
            defeated.write(CharacterDefeated { entity, role: character.role });
        }
    }
}

pub(crate) fn sync_transforms(mut q: Query<(&Character, &mut Transform), Changed<Character>>) {
    for (character, mut tf) in &mut q {
        let p = screen_to_world(character.position);
        tf.translation.x = p.x;
        tf.translation.y = p.y;
    }
}

/// Derive the animation request from facing and activity.
pub(crate) fn select_animation(mut q: Query<(&Character, &mut AnimationRequest)>) {
    for (character, mut request) in &mut q {
        let next = select_request(
            character.facing,
            character.activity,
            character.combat.is_hit_stunned(),
            character.role.stun_presentation(),
        );
        if let Some(next) = next {
            if request.set_if_neq(next) {
                trace!("animation -> {}", request.name);
            }
        }
    }
}

/// Centralized removal, after fixed-step work for the frame is done.
fn despawn_defeated(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
