//! Camera plugin (render-only).
//!
//! A system cannot hold `Query<&Transform>` and `Query<&mut Transform>` at
//! once unless Bevy can prove them disjoint (B0001), so the follow system
//! encodes that with `Without<...>` filters.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera, zoomed in on the small arena
//! PostUpdate:      ease towards the player before transform propagation
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::Player;

/// Orthographic scale; the arena is only a few hundred pixels across.
const ZOOM: f32 = 0.35;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Projection::Orthographic(OrthographicProjection {
            scale: ZOOM,
            ..OrthographicProjection::default_2d()
        }),
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, cam)) = q_cam.single_mut() else {
        return;
    };

    let alpha = 1.0 - (-cam.responsiveness * time.delta_secs()).exp();
    let target = tf_player.translation.truncate();
    let current = tf_cam.translation.truncate();
    let next = current.lerp(target, alpha);

    tf_cam.translation.x = next.x;
    tf_cam.translation.y = next.y;
}
