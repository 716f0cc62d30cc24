//! Persistence
//!
//! The only thing that survives a reload is the high score.

pub mod high_score;

pub use high_score::{HighScoreRecord, parse_stored};
