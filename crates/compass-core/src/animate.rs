//! Startup statistic counter animation.

use std::time::Duration;

/// Number of increments used to reach the target.
pub const ANIMATION_STEPS: u32 = 50;

/// Delay between two frames.
pub const ANIMATION_TICK: Duration = Duration::from_millis(30);

/// Frames of a counter climbing from 0 to `target`.
///
/// Each frame adds `target / ANIMATION_STEPS`; frames below the target are
/// floored and the last frame is exactly `target`, after which the iterator
/// is exhausted.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            increment: target as f64 / f64::from(ANIMATION_STEPS),
            current: 0.0,
            finished: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Iterator for CounterAnimation {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.finished = true;
            Some(self.target)
        } else {
            Some(self.current.floor() as u64)
        }
    }
}
