//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub fixed_hz: f64,

    pub player_speed: f32,
    pub enemy_speed: f32,
    pub chase_multiplier: f32,
    /// Acceleration per second, as a multiple of the current speed cap.
    pub acceleration_factor: f32,
    pub body_half_extent: f32,

    pub player_health: u32,
    pub enemy_health: u32,
    pub knockback_distance: f32,
    pub knockback_duration: f32,
    pub invincibility: f32,

    pub attack_duration: f32,
    pub attack_cooldown: f32,
    /// Hitbox centre offset from the player along facing.
    pub attack_reach: f32,
    pub attack_size: f32,

    pub sight_range: f32,
    pub direction_change_min: f32,
    pub direction_change_max: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 16.0,
            fixed_hz: 60.0,
            player_speed: 48.0,
            enemy_speed: 32.0,
            chase_multiplier: 2.0,
            acceleration_factor: 4.0,
            body_half_extent: 6.0,
            player_health: 5,
            enemy_health: 3,
            knockback_distance: 16.0,
            knockback_duration: 0.1,
            invincibility: 0.5,
            attack_duration: 0.25,
            attack_cooldown: 0.1,
            attack_reach: 12.0,
            attack_size: 12.0,
            sight_range: 96.0,
            direction_change_min: 0.5,
            direction_change_max: 2.0,
        }
    }
}
