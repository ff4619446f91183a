//! Common, shared types.

pub mod direction;
pub mod input;
pub mod layers;
pub mod rng;
pub mod space;
pub mod state;
pub mod timers;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
