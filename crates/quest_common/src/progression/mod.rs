//! Progression Module
//!
//! Point-based leveling for the heritage quest layer.
//!
//! ## Level System
//!
//! - Levels start at 1 and are bounded by the length of the level table
//! - Thresholds are cumulative and non-uniform (wider bands at higher levels)
//! - A threshold is inclusive: reaching it exactly puts the player AT that level
//! - Past the last threshold the level stays capped and progress reads 100%
//!
//! ## Progress
//!
//! `LevelProgress` is always derived from total points and never stored.

pub mod levels;
pub mod progress;

pub use levels::{LevelTable, DEFAULT_THRESHOLDS};
pub use progress::{compute_progress, LevelProgress};
