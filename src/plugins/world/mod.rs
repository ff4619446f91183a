//! World plugin: the walled arena and its pillars.
//!
//! Layout is authored in screen space and converted on spawn.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::space::screen_to_world;
use crate::common::state::GameState;

const TILE: i32 = 16;
/// Interior half size, in tiles.
const HALF_W_TILES: i32 = 10;
const HALF_H_TILES: i32 = 8;
const WALL_THICKNESS: f32 = 16.0;

/// Screen-space centre and size of each pillar.
pub const PILLARS: [(Vec2, Vec2); 4] = [
    (Vec2::new(-48.0, 0.0), Vec2::splat(16.0)),
    (Vec2::new(48.0, 0.0), Vec2::splat(16.0)),
    (Vec2::new(-112.0, 80.0), Vec2::new(16.0, 32.0)),
    (Vec2::new(112.0, 80.0), Vec2::new(16.0, 32.0)),
];

#[inline]
pub fn half_extent() -> Vec2 {
    Vec2::new((HALF_W_TILES * TILE) as f32, (HALF_H_TILES * TILE) as f32)
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_floor));
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let pillar_color = Color::srgb(0.32, 0.3, 0.28);
    let layers = CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy]);
    let half = half_extent();
    let t = WALL_THICKNESS;

    let mut spawn_block = |name: String, centre: Vec2, size: Vec2, color: Color| {
        commands.spawn((
            Name::new(name),
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(screen_to_world(centre).extend(0.5)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    let horizontal = Vec2::new(half.x * 2.0 + t * 2.0, t);
    let vertical = Vec2::new(t, half.y * 2.0);
    spawn_block("WallTop".into(), Vec2::new(0.0, -half.y - t * 0.5), horizontal, wall_color);
    spawn_block("WallBottom".into(), Vec2::new(0.0, half.y + t * 0.5), horizontal, wall_color);
    spawn_block("WallLeft".into(), Vec2::new(-half.x - t * 0.5, 0.0), vertical, wall_color);
    spawn_block("WallRight".into(), Vec2::new(half.x + t * 0.5, 0.0), vertical, wall_color);

    for (i, (centre, size)) in PILLARS.into_iter().enumerate() {
        spawn_block(format!("Pillar{i}"), centre, size, pillar_color);
    }
}

/// Checkerboard of solid-colour sprites; no assets needed.
fn spawn_floor(mut commands: Commands) {
    (-HALF_H_TILES..HALF_H_TILES)
        .flat_map(|y| (-HALF_W_TILES..HALF_W_TILES).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let centre = Vec2::new((x * TILE) as f32, (y * TILE) as f32) + TILE as f32 * 0.5;
            let color = if (x + y).rem_euclid(2) == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE as f32)),
                Transform::from_translation(screen_to_world(centre).extend(0.0)),
                DespawnOnExit(GameState::InGame),
            ));
        });
}
