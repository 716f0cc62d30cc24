//! Streamy - a falling droplet arcade game
//!
//! Core modules:
//! - `sim`: Simulation (droplet motion, collisions, scoring, game mode)
//! - `renderer`: Frame tessellation and the WebGPU pipeline
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `persistence`: High score record
//! - `tuning`: Data-driven game balance
//! - `app`: Session that ties the above together for the browser glue

pub mod app;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use app::App;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Longest frame delta the simulation will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Maximum number of trail points kept for the ribbon
    pub const TRAIL_CAPACITY: usize = 60;

    /// Gap between the droplet and the side walls (pixels)
    pub const WALL_MARGIN: f32 = 12.0;

    /// Droplet defaults
    pub const DROPLET_RADIUS: f32 = 18.0;
    pub const DROPLET_SPEED: f32 = 320.0;
    pub const DROPLET_FALL_SPEED: f32 = 220.0;

    /// Speed multiplier growth per second of play, and its cap
    pub const SPEED_RAMP: f32 = 0.04;
    pub const MAX_SPEED_MULTIPLIER: f32 = 3.0;

    /// Obstacle density: one shape per this many pixels of viewport width
    pub const PIXELS_PER_SHAPE: f32 = 80.0;
    pub const MIN_SHAPES: usize = 10;
    /// Shapes added every time the droplet wraps back to the top
    pub const SHAPES_PER_WRAP: usize = 4;
    /// Hard ceiling on obstacles alive at once
    pub const MAX_SHAPES: usize = 2000;

    /// Golden circle pickups
    pub const GOLDEN_COUNT: usize = 4;
    pub const GOLDEN_PADDING: f32 = 36.0;
    pub const MAX_GOLDEN_COUNT: usize = 64;

    /// Delay before the game over screen returns to the start screen
    pub const GAME_OVER_RESET_MS: f64 = 4000.0;

    /// LocalStorage keys
    pub const HIGH_SCORE_KEY: &str = "streamyHighScore";
    pub const TUNING_KEY: &str = "streamyTuning";
}

/// Clamp a raw frame delta (seconds) into the range the simulation accepts
#[inline]
pub fn clamp_frame_dt(raw_dt: f32, max_dt: f32) -> f32 {
    if raw_dt.is_nan() {
        return 0.0;
    }
    raw_dt.clamp(0.0, max_dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(0.016, consts::MAX_FRAME_DT), 0.016);
        assert_eq!(clamp_frame_dt(0.05, consts::MAX_FRAME_DT), 0.05);
        assert_eq!(clamp_frame_dt(2.5, consts::MAX_FRAME_DT), 0.05);
        assert_eq!(clamp_frame_dt(-1.0, consts::MAX_FRAME_DT), 0.0);
        assert_eq!(clamp_frame_dt(f32::NAN, consts::MAX_FRAME_DT), 0.0);
    }
}
