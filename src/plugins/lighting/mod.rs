//! Lighting plugin (Firefly) (render-only).
//!
//! Also owns the other purely cosmetic feedback: sprite mirroring from the
//! animation request and the invincibility blink.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::character::Character;
use crate::plugins::character::presentation::AnimationRequest;
use crate::plugins::enemies::Enemy;
use crate::plugins::player::Player;

const LIGHT_COLOR: Color = Color::srgb(1.0, 0.9, 0.75);
const HURT_COLOR: Color = Color::srgb(1.0, 0.35, 0.3);
/// Blinks per second while invincible.
const BLINK_HZ: f32 = 12.0;

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(
            Update,
            (
                follow_player_light,
                add_enemy_occluders,
                mirror_sprites,
                blink_invincible,
            )
                .run_if(in_state(GameState::InGame)),
        );
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: LIGHT_COLOR,
            radius: 160.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Light tracks the player and turns red while the player is invincible.
fn follow_player_light(
    q_player: Query<(&Transform, &Character), (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<(&mut Transform, &mut PointLight2d), (With<PlayerLight>, Without<Player>)>,
) {
    let Ok((tf_player, character)) = q_player.single() else {
        return;
    };
    let Ok((mut tf_light, mut light)) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
    light.color = if character.combat.is_invincible() {
        HURT_COLOR
    } else {
        LIGHT_COLOR
    };
}

fn add_enemy_occluders(mut commands: Commands, q: Query<Entity, Added<Enemy>>) {
    for e in &q {
        commands.entity(e).insert(Occluder2d::circle(5.0));
    }
}

fn mirror_sprites(mut q: Query<(&AnimationRequest, &mut Sprite), Changed<AnimationRequest>>) {
    for (request, mut sprite) in &mut q {
        sprite.flip_x = request.mirrored;
    }
}

fn blink_invincible(time: Res<Time>, mut q: Query<(&Character, &mut Sprite)>) {
    let phase = (time.elapsed_secs() * BLINK_HZ) as u32 % 2 == 0;
    for (character, mut sprite) in &mut q {
        let alpha = if character.combat.is_invincible() && phase { 0.3 } else { 1.0 };
        sprite.color.set_alpha(alpha);
    }
}
