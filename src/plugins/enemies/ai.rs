//! Enemy decision loop: sight, chase direction, wandering.
//!
//! Sight is a range check plus a half-plane test on the current facing, so an
//! enemy notices anything in front of it within range, however far to the
//! side. Enemies always walk along their facing; the direction-change timer
//! re-rolls that facing, biased toward the chase direction while chasing.

use bevy::prelude::*;
use rand::Rng;

use crate::common::direction::Direction;
use crate::common::timers;
use crate::common::tunables::Tunables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChaseState {
    #[default]
    Idle,
    Chasing,
}

/// Can an enemy at `me` facing `facing` see `target`?
pub fn can_see(me: Vec2, facing: Direction, target: Vec2, sight_range: f32) -> bool {
    if me.distance(target) > sight_range {
        return false;
    }
    match facing {
        Direction::Up => target.y < me.y,
        Direction::Down => target.y > me.y,
        Direction::Left => target.x < me.x,
        Direction::Right => target.x > me.x,
    }
}

/// Axis to chase along, or `None` to keep the previous chase direction.
///
/// Horizontal wins only when the x gap is strictly the smaller one; ties go
/// vertical.
pub fn chase_direction(me: Vec2, target: Vec2) -> Option<Direction> {
    let d = target - me;
    let (x_dist, y_dist) = (d.x.abs(), d.y.abs());

    if d.x < 0.0 && x_dist < y_dist {
        Some(Direction::Left)
    } else if d.x > 0.0 && x_dist < y_dist {
        Some(Direction::Right)
    } else if d.y < 0.0 && y_dist <= x_dist {
        Some(Direction::Up)
    } else if d.y > 0.0 && y_dist <= x_dist {
        Some(Direction::Down)
    } else {
        None
    }
}

/// One draw of the direction die.
///
/// Chasing: 2:1:1 over chase direction and its two perpendiculars, never the
/// opposite. Otherwise uniform over all four.
pub fn draw_direction(rng: &mut impl Rng, chase: ChaseState, chase_dir: Direction) -> Direction {
    match chase {
        ChaseState::Chasing => {
            let [a, b] = chase_dir.perpendiculars();
            match rng.gen_range(0..4) {
                0 | 1 => chase_dir,
                2 => a,
                _ => b,
            }
        }
        ChaseState::Idle => Direction::ALL[rng.gen_range(0..4)],
    }
}

/// Re-roll until the result differs from `current`.
pub fn reroll_direction(
    rng: &mut impl Rng,
    current: Direction,
    chase: ChaseState,
    chase_dir: Direction,
) -> Direction {
    loop {
        let next = draw_direction(rng, chase, chase_dir);
        if next != current {
            return next;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBrain {
    pub chase: ChaseState,
    pub chase_direction: Direction,
    pub sight_range: f32,
    pub base_speed: f32,
    chase_multiplier: f32,
    direction_timer: Timer,
    interval: (f32, f32),
}

impl EnemyBrain {
    pub fn new(tunables: &Tunables, initial: Direction) -> Self {
        Self {
            chase: ChaseState::Idle,
            chase_direction: initial,
            sight_range: tunables.sight_range,
            base_speed: tunables.enemy_speed,
            chase_multiplier: tunables.chase_multiplier,
            direction_timer: timers::spent(),
            interval: (tunables.direction_change_min, tunables.direction_change_max),
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        match self.chase {
            ChaseState::Chasing => self.base_speed * self.chase_multiplier,
            ChaseState::Idle => self.base_speed,
        }
    }

    #[inline]
    pub fn is_chasing(&self) -> bool {
        self.chase == ChaseState::Chasing
    }

    /// Seconds until the next scheduled re-roll.
    #[inline]
    pub fn next_change_in(&self) -> f32 {
        self.direction_timer.remaining_secs()
    }

    /// Arm the direction-change timer with a fresh random interval.
    pub fn schedule_change(&mut self, rng: &mut impl Rng) {
        let (lo, hi) = self.interval;
        let secs = if hi > lo { rng.gen_range(lo..hi) } else { lo };
        self.direction_timer = Timer::from_seconds(secs, TimerMode::Once);
    }

    /// Update chase state from a sight check. Returns `true` when chasing starts.
    pub fn observe(&mut self, me: Vec2, facing: Direction, player: Option<Vec2>) -> bool {
        let was_chasing = self.is_chasing();

        match player.filter(|p| can_see(me, facing, *p, self.sight_range)) {
            Some(p) => {
                self.chase = ChaseState::Chasing;
                if let Some(dir) = chase_direction(me, p) {
                    self.chase_direction = dir;
                }
            }
            None => self.chase = ChaseState::Idle,
        }

        !was_chasing && self.is_chasing()
    }

    /// Stop chasing after taking a hit.
    #[inline]
    pub fn lose_track(&mut self) {
        self.chase = ChaseState::Idle;
    }

    /// Re-roll `facing` now and re-arm the timer.
    pub fn change_direction(&mut self, facing: &mut Direction, rng: &mut impl Rng) {
        *facing = reroll_direction(rng, *facing, self.chase, self.chase_direction);
        self.schedule_change(rng);
    }

    /// Tick the timer; re-roll `facing` when it fires. Returns whether it fired.
    pub fn tick(&mut self, dt: f32, facing: &mut Direction, rng: &mut impl Rng) -> bool {
        if !timers::step(&mut self.direction_timer, dt) {
            return false;
        }
        self.change_direction(facing, rng);
        true
    }
}
