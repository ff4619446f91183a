//! Activity state and animation requests.
//!
//! The rendering side only ever sees an [`AnimationRequest`]: a name such as
//! `front_walk` plus a mirror flag, derived from facing × activity.

use bevy::prelude::*;

use crate::common::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Moving,
    Attacking,
}

impl Activity {
    #[inline]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Moving => "walk",
            Self::Attacking => "attack",
        }
    }
}

/// How a character presents while hit-stunned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StunPresentation {
    /// Keep whatever was last requested.
    Hold,
    /// Switch to the `<prefix>_hit` clip.
    HitClip,
}

/// Animation the renderer should play this frame.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct AnimationRequest {
    pub name: String,
    pub mirrored: bool,
}

impl Default for AnimationRequest {
    fn default() -> Self {
        animation_for(Direction::Down, Activity::Idle)
    }
}

pub fn animation_for(facing: Direction, activity: Activity) -> AnimationRequest {
    named(facing, activity.suffix())
}

fn named(facing: Direction, suffix: &str) -> AnimationRequest {
    let row = facing.facing();
    AnimationRequest {
        name: format!("{}_{}", row.prefix, suffix),
        mirrored: row.mirrored,
    }
}

/// Pick the request for this frame, or `None` to keep the current one.
pub fn select_request(
    facing: Direction,
    activity: Activity,
    hit_stunned: bool,
    stun: StunPresentation,
) -> Option<AnimationRequest> {
    match (hit_stunned, stun) {
        (false, _) => Some(animation_for(facing, activity)),
        (true, StunPresentation::Hold) => None,
        (true, StunPresentation::HitClip) => Some(named(facing, "hit")),
    }
}
