//! Combat plugin: hitbox overlaps -> hit requests -> `Character::hit`.
//!
//! # Data flow
//! ```text
//! FixedPostUpdate (after the character pipeline has moved everyone)
//!   (A) detect_hitbox_overlaps
//!       - enemy body  ∩ player body        -> HitRequest(player, enemy facing)
//!       - player swing ∩ enemy body        -> HitRequest(enemy, player facing)
//!   (B) apply_hits
//!       - dedupe: at most one hit per target per tick
//!       - probe the knockback against world geometry, then Character::hit
//!       - a landed hit on an enemy drops its chase state
//!       - a hit resolved against a wall may defeat on the spot
//! ```
//!
//! Both stages run in the same tick, so a hit is resolved in the frame its
//! overlap was seen.

use avian2d::prelude::*;
use bevy::math::bounding::{Aabb2d, IntersectsVolume};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::character::combat::HitOutcome;
use crate::plugins::character::spatial::{SpatialMotion, world_filter};
use crate::plugins::character::{Body, Character, CharacterDefeated, PendingDespawn};
use crate::plugins::cutscene::gameplay_running;
use crate::plugins::enemies::Enemy;
use crate::plugins::player::Player;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSystems {
    Detect,
    Apply,
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct HitRequest {
    pub source: Entity,
    pub target: Entity,
    /// Screen-space displacement applied to the target.
    pub knockback: Vec2,
}

pub fn plugin(app: &mut App) {
    app.add_message::<HitRequest>();

    app.configure_sets(
        FixedPostUpdate,
        (CombatSystems::Detect, CombatSystems::Apply)
            .chain()
            .run_if(in_state(GameState::InGame).and(gameplay_running)),
    );

    app.add_systems(
        FixedPostUpdate,
        detect_hitbox_overlaps.in_set(CombatSystems::Detect),
    )
    .add_systems(FixedPostUpdate, apply_hits.in_set(CombatSystems::Apply));
}

#[inline]
fn body_aabb(character: &Character, body: &Body) -> Aabb2d {
    Aabb2d::new(character.position, body.half_extent)
}

pub(crate) fn detect_hitbox_overlaps(
    tunables: Res<Tunables>,
    q_player: Query<(Entity, &Character, &Body, &Player), Without<PendingDespawn>>,
    q_enemies: Query<(Entity, &Character, &Body), (With<Enemy>, Without<PendingDespawn>)>,
    mut writer: MessageWriter<HitRequest>,
) {
    let Ok((player_e, player, player_body, player_state)) = q_player.single() else {
        return;
    };
    let player_box = body_aabb(player, player_body);
    let swing = player_state.attack.hitbox().aabb(player.position);
    let reach = tunables.knockback_distance;

    for (enemy_e, enemy, enemy_body) in &q_enemies {
        let enemy_box = body_aabb(enemy, enemy_body);

        if enemy_box.intersects(&player_box) {
            writer.write(HitRequest {
                source: enemy_e,
                target: player_e,
                knockback: enemy.facing.unit() * reach,
            });
        }

        if swing.is_some_and(|s| s.intersects(&enemy_box)) {
            writer.write(HitRequest {
                source: player_e,
                target: enemy_e,
                knockback: player.facing.unit() * reach,
            });
        }
    }
}

pub(crate) fn apply_hits(
    mut commands: Commands,
    spatial: SpatialQuery,
    mut reader: MessageReader<HitRequest>,
    mut defeated: MessageWriter<CharacterDefeated>,
    mut q: Query<(&mut Character, &Collider, Option<&mut Enemy>), Without<PendingDespawn>>,
    // Per-tick dedupe
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();
    let filter = world_filter();

    for req in reader.read() {
        if !seen.insert(req.target) {
            continue;
        }

        let Ok((mut character, collider, enemy)) = q.get_mut(req.target) else {
            continue;
        };

        let world = SpatialMotion::new(&spatial, collider, &filter);
        let outcome = character.hit(req.knockback, &world);
        if !outcome.landed() {
            continue;
        }

        debug!(
            "{:?} {} hit by {}: {:?}, health {}",
            character.role,
            req.target,
            req.source,
            outcome,
            character.combat.health()
        );

        if let Some(mut enemy) = enemy {
            enemy.brain.lose_track();
        }

        // Wall-side knockback resolves immediately; no tween will report it.
        if outcome == HitOutcome::Defeated {
            info!("{:?} {} defeated", character.role, req.target);
            commands.entity(req.target).insert(PendingDespawn);
            defeated.write(CharacterDefeated { entity: req.target, role: character.role });
        }
    }
}

#[cfg(test)]
mod tests;
