//! Player attack sub-state machine.
//!
//! ```text
//! Ready --attack--> Attacking --duration--> Cooldown --cooldown--> Ready
//! ```
//!
//! The hitbox only has size while `Attacking`.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::common::direction::Direction;
use crate::common::timers;
use crate::common::tunables::Tunables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackPhase {
    #[default]
    Ready,
    Attacking,
    Cooldown,
}

/// Attack hitbox relative to the player centre (screen space).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttackHitbox {
    pub offset: Vec2,
    pub size: Vec2,
}

impl AttackHitbox {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.size != Vec2::ZERO
    }

    /// World-aligned box around `origin`, or `None` while inactive.
    pub fn aabb(&self, origin: Vec2) -> Option<Aabb2d> {
        self.is_active()
            .then(|| Aabb2d::new(origin + self.offset, self.size * 0.5))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackState {
    phase: AttackPhase,
    timer: Timer,
    hitbox: AttackHitbox,
    duration: f32,
    cooldown: f32,
    reach: f32,
    size: f32,
}

impl AttackState {
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            phase: AttackPhase::Ready,
            timer: timers::spent(),
            hitbox: AttackHitbox::default(),
            duration: tunables.attack_duration,
            cooldown: tunables.attack_cooldown,
            reach: tunables.attack_reach,
            size: tunables.attack_size,
        }
    }

    #[inline]
    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    #[inline]
    pub fn hitbox(&self) -> AttackHitbox {
        self.hitbox
    }

    #[inline]
    pub fn is_attacking(&self) -> bool {
        self.phase == AttackPhase::Attacking
    }

    /// Enter `Attacking` if `Ready`. Returns whether the attack started.
    pub fn try_begin(&mut self, facing: Direction) -> bool {
        if self.phase != AttackPhase::Ready {
            return false;
        }
        self.phase = AttackPhase::Attacking;
        self.hitbox = AttackHitbox {
            offset: facing.unit() * self.reach,
            size: Vec2::splat(self.size),
        };
        self.timer = Timer::from_seconds(self.duration, TimerMode::Once);
        true
    }

    /// Attack clip finished: drop the hitbox and start the cooldown.
    pub fn finish(&mut self) {
        if self.phase != AttackPhase::Attacking {
            return;
        }
        self.phase = AttackPhase::Cooldown;
        self.hitbox = AttackHitbox::default();
        self.timer = Timer::from_seconds(self.cooldown, TimerMode::Once);
    }

    pub fn tick(&mut self, dt: f32) {
        if !timers::step(&mut self.timer, dt) {
            return;
        }
        match self.phase {
            AttackPhase::Attacking => self.finish(),
            AttackPhase::Cooldown => self.phase = AttackPhase::Ready,
            AttackPhase::Ready => {}
        }
    }
}
