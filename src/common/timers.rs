//! Helpers for one-shot [`Timer`]s stepped by a fixed `dt`.
//!
//! A finished one-shot timer is the idle state: it never fires again until
//! it is replaced by a fresh one.

use std::time::Duration;

use bevy::prelude::*;

/// One-shot timer that has already finished.
pub fn spent() -> Timer {
    let mut timer = Timer::new(Duration::ZERO, TimerMode::Once);
    timer.tick(Duration::ZERO);
    timer
}

/// Advance by `dt` seconds. Returns `true` on the step the timer finishes.
#[inline]
pub fn step(timer: &mut Timer, dt: f32) -> bool {
    timer.tick(Duration::from_secs_f32(dt.max(0.0))).just_finished()
}

#[inline]
pub fn is_running(timer: &Timer) -> bool {
    !timer.is_finished()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spent_timer_never_fires() {
        let mut t = spent();
        assert!(!is_running(&t));
        for _ in 0..10 {
            assert!(!step(&mut t, 1.0));
        }
        assert_eq!(t.remaining_secs(), 0.0);
    }

    #[test]
    fn once_fires_exactly_once() {
        let mut t = Timer::from_seconds(0.1, TimerMode::Once);
        let fired: usize = (0..20).map(|_| step(&mut t, 1.0 / 60.0) as usize).sum();
        assert_eq!(fired, 1);
        assert!(!is_running(&t));
    }

    #[test]
    fn zero_length_fires_on_next_step() {
        let mut t = Timer::from_seconds(0.0, TimerMode::Once);
        assert!(is_running(&t));
        assert!(step(&mut t, 0.0));
        assert!(!is_running(&t));
    }
}
