use avian2d::prelude::*;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{HitRequest, apply_hits, detect_hitbox_overlaps};
use crate::common::direction::Direction;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::character::combat::{CombatState, CombatTiming};
use crate::plugins::character::{Character, CharacterDefeated, PendingDespawn};
use crate::plugins::enemies::ai::ChaseState;
use crate::plugins::enemies::{Enemy, enemy_bundle};
use crate::plugins::player::{Player, player_bundle};

fn world_with_player(at: Vec2) -> (World, Entity) {
    let t = Tunables::default();
    let mut world = World::new();
    world.init_resource::<Messages<HitRequest>>();
    let player = world.spawn(player_bundle(at, &t)).id();
    world.insert_resource(t);
    (world, player)
}

fn spawn_enemy(world: &mut World, at: Vec2, facing: Direction) -> Entity {
    let t = Tunables::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let e = world.spawn(enemy_bundle(at, &t, &mut rng)).id();
    if let Some(mut c) = world.get_mut::<Character>(e) {
        c.facing = facing;
    }
    e
}

fn requests(world: &mut World) -> Vec<HitRequest> {
    run_system_once(world, detect_hitbox_overlaps);
    world.resource_mut::<Messages<HitRequest>>().drain().collect()
}

#[test]
fn touching_enemy_hits_player_along_its_facing() {
    let (mut world, player) = world_with_player(Vec2::ZERO);
    let enemy = spawn_enemy(&mut world, Vec2::new(0.0, -10.0), Direction::Down);

    let hits = requests(&mut world);
    assert_eq!(
        hits,
        vec![HitRequest { source: enemy, target: player, knockback: Vec2::new(0.0, 16.0) }]
    );
}

#[test]
fn swing_hits_enemy_in_front_only() {
    let (mut world, player) = world_with_player(Vec2::ZERO);
    let ahead = spawn_enemy(&mut world, Vec2::new(14.0, 0.0), Direction::Up);
    spawn_enemy(&mut world, Vec2::new(-14.0, 0.0), Direction::Up);

    if let Some(mut c) = world.get_mut::<Character>(player) {
        c.facing = Direction::Right;
    }
    if let Some(mut p) = world.get_mut::<Player>(player) {
        assert!(p.attack.try_begin(Direction::Right));
    }

    let hits = requests(&mut world);
    assert_eq!(
        hits,
        vec![HitRequest { source: player, target: ahead, knockback: Vec2::new(16.0, 0.0) }]
    );
}

#[test]
fn nothing_in_reach_means_no_requests() {
    let (mut world, _) = world_with_player(Vec2::ZERO);
    spawn_enemy(&mut world, Vec2::new(40.0, 40.0), Direction::Left);
    assert!(requests(&mut world).is_empty());
}

#[test]
fn defeated_enemies_do_not_hit() {
    let (mut world, _) = world_with_player(Vec2::ZERO);
    let enemy = spawn_enemy(&mut world, Vec2::new(4.0, 0.0), Direction::Left);
    world.entity_mut(enemy).insert(PendingDespawn);
    assert!(requests(&mut world).is_empty());
}

// -----------------------------------------------------------------------------
// apply_hits
// -----------------------------------------------------------------------------

/// No world geometry: every knockback plays as a tween.
fn open_arena() -> World {
    let mut world = World::new();
    world.init_resource::<SpatialQueryPipeline>();
    world.init_resource::<Messages<HitRequest>>();
    world.init_resource::<Messages<CharacterDefeated>>();
    world
}

fn spawn_target(world: &mut World, at: Vec2) -> Entity {
    let e = spawn_enemy(world, at, Direction::Down);
    world.entity_mut(e).insert(Collider::rectangle(12.0, 12.0));
    e
}

fn hit(world: &mut World, source: Entity, target: Entity, knockback: Vec2) {
    world.write_message(HitRequest { source, target, knockback });
}

fn health(world: &World, e: Entity) -> u32 {
    world.get::<Character>(e).map(|c| c.combat.health()).unwrap_or(0)
}

#[test]
fn one_hit_per_target_per_tick() {
    let mut world = open_arena();
    let a = spawn_target(&mut world, Vec2::ZERO);
    let b = spawn_target(&mut world, Vec2::new(60.0, 0.0));

    hit(&mut world, b, a, Vec2::new(16.0, 0.0));
    hit(&mut world, b, a, Vec2::new(0.0, 16.0));
    hit(&mut world, b, a, Vec2::new(-16.0, 0.0));
    hit(&mut world, a, b, Vec2::new(16.0, 0.0));
    run_system_once(&mut world, apply_hits);

    assert_eq!(health(&world, a), 2);
    assert_eq!(health(&world, b), 2);
    // First request wins.
    let c = world.get::<Character>(a).cloned().expect("target");
    assert_eq!(c.facing, Direction::Right);
    assert!(c.combat.is_hit_stunned());
}

#[test]
fn hit_enemy_stops_chasing() {
    let mut world = open_arena();
    let e = spawn_target(&mut world, Vec2::ZERO);
    if let Some(mut enemy) = world.get_mut::<Enemy>(e) {
        enemy.brain.chase = ChaseState::Chasing;
    }

    hit(&mut world, e, e, Vec2::new(0.0, -16.0));
    run_system_once(&mut world, apply_hits);

    let enemy = world.get::<Enemy>(e).cloned().expect("enemy");
    assert_eq!(enemy.brain.chase, ChaseState::Idle);
}

#[test]
fn last_hit_in_the_open_waits_for_the_tween() {
    let mut world = open_arena();
    let e = spawn_target(&mut world, Vec2::ZERO);
    if let Some(mut c) = world.get_mut::<Character>(e) {
        c.combat = CombatState::new(
            1,
            CombatTiming { knockback_duration: 0.1, invincibility: 0.5 },
        );
    }

    hit(&mut world, e, e, Vec2::new(16.0, 0.0));
    run_system_once(&mut world, apply_hits);

    assert_eq!(health(&world, e), 0);
    assert!(world.get::<PendingDespawn>(e).is_none());
    assert!(world.resource::<Messages<CharacterDefeated>>().is_empty());
}

#[test]
fn ignored_hits_leave_chase_state_alone() {
    let mut world = open_arena();
    let e = spawn_target(&mut world, Vec2::ZERO);
    hit(&mut world, e, e, Vec2::new(16.0, 0.0));
    run_system_once(&mut world, apply_hits);

    // Stunned now; a later hit is ignored and must not touch the brain.
    world.resource_mut::<Messages<HitRequest>>().drain().for_each(drop);
    if let Some(mut enemy) = world.get_mut::<Enemy>(e) {
        enemy.brain.chase = ChaseState::Chasing;
    }
    hit(&mut world, e, e, Vec2::new(16.0, 0.0));
    run_system_once(&mut world, apply_hits);

    assert_eq!(health(&world, e), 2);
    let enemy = world.get::<Enemy>(e).cloned().expect("enemy");
    assert_eq!(enemy.brain.chase, ChaseState::Chasing);
}
