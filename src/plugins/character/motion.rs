//! Directional motion: intent -> velocity, and the collision seam used to move.
//!
//! Movement is axis-snapped. The intended axis accelerates toward the speed
//! cap; the other axis (or both, with no intent) decays toward zero at the
//! same rate and snaps to exactly zero instead of crossing it.

use bevy::prelude::*;

use crate::common::direction::Direction;

/// Collision service the motion and combat code moves through.
///
/// Positions and displacements are screen space.
pub trait MotionWorld {
    /// Move `position` by `displacement`, stopping at the first blocker.
    /// Returns `true` if something was hit.
    fn attempt_move(&mut self, position: &mut Vec2, displacement: Vec2) -> bool;

    /// Would moving from `position` by `displacement` hit anything? No mutation.
    fn would_collide(&self, position: Vec2, displacement: Vec2) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    pub velocity: Vec2,
    /// Current speed cap (px/s).
    pub speed: f32,
    /// Direction the owner wants to move this step; `None` decelerates.
    pub intent: Option<Direction>,
    /// Last movement attempt was blocked.
    pub blocked: bool,
    acceleration_factor: f32,
}

impl MotionState {
    pub fn new(speed: f32, acceleration_factor: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            speed,
            intent: None,
            blocked: false,
            acceleration_factor,
        }
    }

    /// Integrate `velocity` for one step of `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        self.velocity = integrate_velocity(
            self.velocity,
            self.intent,
            self.speed,
            self.speed * self.acceleration_factor,
            dt,
        );
    }

    /// Integrate, then try to move `position` through `world`.
    ///
    /// Records and returns whether the move was blocked.
    pub fn step(&mut self, position: &mut Vec2, world: &mut impl MotionWorld, dt: f32) -> bool {
        self.integrate(dt);
        self.blocked = if self.velocity == Vec2::ZERO {
            false
        } else {
            world.attempt_move(position, self.velocity * dt)
        };
        self.blocked
    }

    #[inline]
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}

/// Move `v` toward zero by `rate`, never crossing zero.
#[inline]
pub fn approach_zero(v: f32, rate: f32) -> f32 {
    if v > 0.0 {
        (v - rate).max(0.0)
    } else if v < 0.0 {
        (v + rate).min(0.0)
    } else {
        0.0
    }
}

/// One integration step of the directional motion controller.
///
/// `accel` is in px/s². The intended axis accelerates and is clamped to
/// `±speed`; every other axis decays via [`approach_zero`].
pub fn integrate_velocity(
    velocity: Vec2,
    intent: Option<Direction>,
    speed: f32,
    accel: f32,
    dt: f32,
) -> Vec2 {
    let rate = accel * dt;
    let push = intent.map(Direction::unit).unwrap_or(Vec2::ZERO);

    let axis = |v: f32, p: f32| {
        if p != 0.0 {
            (v + p * rate).clamp(-speed, speed)
        } else {
            approach_zero(v, rate)
        }
    };

    Vec2::new(axis(velocity.x, push.x), axis(velocity.y, push.y))
}
