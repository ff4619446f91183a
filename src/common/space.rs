//! Screen space <-> world space.
//!
//! Gameplay positions are screen space (y down). Bevy transforms and avian
//! colliders are world space (y up).

use bevy::prelude::*;

#[inline]
pub fn screen_to_world(v: Vec2) -> Vec2 {
    Vec2::new(v.x, -v.y)
}
