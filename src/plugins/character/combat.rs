//! Hit resolution shared by players and enemies.
//!
//! A landed hit:
//! - costs exactly one health,
//! - turns the character to face along the knockback,
//! - starts the invincibility window at the moment of impact,
//! - and either plays a knockback tween or, if the knockback would run into
//!   a wall, resolves on the spot.
//!
//! Resolution clears hit-stun. A character at zero health is defeated only on
//! resolution, so a running tween always finishes first.

use bevy::prelude::*;

use crate::common::direction::Direction;
use crate::common::timers;

use super::Character;
use super::motion::MotionWorld;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatTiming {
    pub knockback_duration: f32,
    pub invincibility: f32,
}

/// Linear position tween played while hit-stunned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnockbackTween {
    from: Vec2,
    to: Vec2,
    elapsed: f32,
    duration: f32,
}

impl KnockbackTween {
    pub fn new(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self { from, to, elapsed: 0.0, duration: duration.max(0.0) }
    }

    /// Advance and return `(position, finished)`.
    pub fn advance(&mut self, dt: f32) -> (Vec2, bool) {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            return (self.to, true);
        }
        let t = self.elapsed / self.duration;
        (self.from.lerp(self.to, t), false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Target was stunned, invincible, or already defeated. Nothing changed.
    Ignored,
    /// Hit landed; knockback tween is playing.
    KnockedBack,
    /// Hit landed against a wall and resolved at once.
    Recovered,
    /// Hit landed against a wall and took the last health.
    Defeated,
}

impl HitOutcome {
    #[inline]
    pub fn landed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// End of a hit-stun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Recovered,
    Defeated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombatState {
    health: u32,
    knockback: Option<KnockbackTween>,
    invincibility: Timer,
    defeated: bool,
    timing: CombatTiming,
}

impl CombatState {
    pub fn new(health: u32, timing: CombatTiming) -> Self {
        Self {
            health,
            knockback: None,
            invincibility: timers::spent(),
            defeated: false,
            timing,
        }
    }

    #[inline]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[inline]
    pub fn is_hit_stunned(&self) -> bool {
        self.knockback.is_some()
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        timers::is_running(&self.invincibility)
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Can a hit land right now?
    #[inline]
    pub fn is_vulnerable(&self) -> bool {
        !(self.defeated || self.is_hit_stunned() || self.is_invincible())
    }

    /// Advance knockback and invincibility by `dt`.
    ///
    /// Returns a resolution on the step the knockback tween completes.
    pub fn tick(&mut self, position: &mut Vec2, dt: f32) -> Option<Resolution> {
        if timers::step(&mut self.invincibility, dt) {
            trace!("invincibility ended");
        }

        let tween = self.knockback.as_mut()?;
        let (pos, finished) = tween.advance(dt);
        *position = pos;
        finished.then(|| self.resolve())
    }

    fn resolve(&mut self) -> Resolution {
        self.knockback = None;
        if self.health == 0 && !self.defeated {
            self.defeated = true;
            Resolution::Defeated
        } else {
            Resolution::Recovered
        }
    }
}

impl Character {
    /// Apply a hit with the given screen-space knockback.
    ///
    /// No-op while hit-stunned, invincible, or defeated.
    pub fn hit(&mut self, knockback: Vec2, world: &impl MotionWorld) -> HitOutcome {
        if !self.combat.is_vulnerable() {
            return HitOutcome::Ignored;
        }

        let combat = &mut self.combat;
        combat.health = combat.health.saturating_sub(1);
        combat.invincibility = Timer::from_seconds(combat.timing.invincibility, TimerMode::Once);

        if let Some(facing) = Direction::from_knockback(knockback) {
            self.facing = facing;
        }
        self.motion.halt();
        self.motion.intent = None;

        if world.would_collide(self.position, knockback) {
            return match self.combat.resolve() {
                Resolution::Recovered => HitOutcome::Recovered,
                Resolution::Defeated => HitOutcome::Defeated,
            };
        }

        self.combat.knockback = Some(KnockbackTween::new(
            self.position,
            self.position + knockback,
            self.combat.timing.knockback_duration,
        ));
        HitOutcome::KnockedBack
    }
}
