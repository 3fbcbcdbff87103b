//! Engine-independent rules for Catch the Ball.
//!
//! Everything here is plain data and pure functions so it can be unit-tested
//! without spinning up an app or a physics world.

pub mod categories;
pub mod color;
pub mod config;
pub mod progress;
pub mod rating;

/// Number of hand-authored levels.
pub const LEVEL_COUNT: u32 = 15;
