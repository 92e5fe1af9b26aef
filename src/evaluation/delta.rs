//! Score adjustments drawn by an evaluation

use rand::Rng;

use crate::records::{MAX_SCORE, MIN_SCORE};

pub const MIN_DELTA: i32 = -5;
pub const MAX_DELTA: i32 = 10;

/// Source of score adjustments
pub trait DeltaSource: Send + Sync + std::fmt::Debug {
    /// A delta in `MIN_DELTA..=MAX_DELTA`
    fn draw(&self) -> i32;
}

/// Uniform draw from `MIN_DELTA..=MAX_DELTA`
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformDelta;

impl DeltaSource for UniformDelta {
    fn draw(&self) -> i32 {
        rand::thread_rng().gen_range(MIN_DELTA..=MAX_DELTA)
    }
}

/// Always the same delta, clamped into range
#[derive(Debug, Clone, Copy)]
pub struct FixedDelta(pub i32);

impl DeltaSource for FixedDelta {
    fn draw(&self) -> i32 {
        self.0.clamp(MIN_DELTA, MAX_DELTA)
    }
}

/// `score + delta`, clamped to the valid score range
pub fn apply_delta(score: u8, delta: i32) -> u8 {
    let next = (i32::from(score) + delta).clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE));
    next as u8
}
