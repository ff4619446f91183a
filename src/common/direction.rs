//! Facing directions and the per-direction presentation table.
//!
//! Directions live in screen space (y grows downward), so `Up` is `(0, -1)`.
//! Everything that used to branch four ways on facing (animation prefix,
//! sprite mirroring, hitbox offset) reads one row of [`FACINGS`] instead.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One row of the direction lookup table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing {
    /// Animation name prefix, e.g. `side` in `side_walk`.
    pub prefix: &'static str,
    /// Sprite is flipped horizontally.
    pub mirrored: bool,
    /// Unit vector in screen space.
    pub unit: Vec2,
}

const FACINGS: [Facing; 4] = [
    Facing { prefix: "back", mirrored: false, unit: Vec2::new(0.0, -1.0) },
    Facing { prefix: "front", mirrored: false, unit: Vec2::new(0.0, 1.0) },
    Facing { prefix: "side", mirrored: true, unit: Vec2::new(-1.0, 0.0) },
    Facing { prefix: "side", mirrored: false, unit: Vec2::new(1.0, 0.0) },
];

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[inline]
    fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    #[inline]
    pub fn facing(self) -> &'static Facing {
        &FACINGS[self.index()]
    }

    #[inline]
    pub fn unit(self) -> Vec2 {
        self.facing().unit
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn perpendiculars(self) -> [Self; 2] {
        match self {
            Self::Up | Self::Down => [Self::Left, Self::Right],
            Self::Left | Self::Right => [Self::Up, Self::Down],
        }
    }

    /// Facing taken by a character pushed by `knockback`.
    ///
    /// x is checked before y; a zero vector has no facing.
    pub fn from_knockback(knockback: Vec2) -> Option<Self> {
        if knockback.x < 0.0 {
            Some(Self::Left)
        } else if knockback.x > 0.0 {
            Some(Self::Right)
        } else if knockback.y < 0.0 {
            Some(Self::Up)
        } else if knockback.y > 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }
}
