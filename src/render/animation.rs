// src/render/animation.rs
//! Timing contract for the score reveal: counter ticks, then the ring and
//! the bars snap to their final state after fixed delays.

use std::f64::consts::PI;
use std::time::Duration;

pub const COUNTER_TICK: Duration = Duration::from_millis(33);
pub const COUNTER_STEPS: u32 = 50;
pub const RING_DELAY: Duration = Duration::from_millis(100);
pub const BAR_DELAY: Duration = Duration::from_millis(200);
pub const RING_RADIUS: f64 = 90.0;

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Stroke offset for the progress ring; no clamping on the score.
pub fn ring_offset(score: i64) -> f64 {
    let circumference = ring_circumference();
    circumference - (score as f64 / 100.0) * circumference
}

pub fn bar_width_percent(value: i64) -> f64 {
    value as f64 / 5.0 * 100.0
}

/// Counter values shown on successive ticks, counting up from 0 in equal
/// increments and clamped at the target.
#[derive(Debug, Clone)]
pub struct ScoreCounter {
    target: i64,
    step: u32,
    done: bool,
}

impl ScoreCounter {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            step: 0,
            done: false,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }
}

impl Iterator for ScoreCounter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }

        self.step += 1;
        let current = self.target as f64 * self.step as f64 / COUNTER_STEPS as f64;
        if self.target <= 0 || current >= self.target as f64 {
            self.done = true;
            return Some(self.target);
        }

        Some(current.floor() as i64)
    }
}

/// What the reveal looks like `elapsed` after results were painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    pub readout: i64,
    pub ring_applied: bool,
    pub bars_visible: bool,
}

pub fn reveal_frame(target: i64, elapsed: Duration) -> RevealFrame {
    let ticks = (elapsed.as_millis() / COUNTER_TICK.as_millis()) as usize;
    let readout = if ticks == 0 {
        0
    } else {
        ScoreCounter::new(target)
            .take(ticks)
            .last()
            .unwrap_or(target)
    };

    RevealFrame {
        readout,
        ring_applied: elapsed >= RING_DELAY,
        bars_visible: elapsed >= BAR_DELAY,
    }
}

/// Total time until every part of the reveal has settled.
pub fn reveal_duration() -> Duration {
    (COUNTER_TICK * COUNTER_STEPS).max(BAR_DELAY)
}
