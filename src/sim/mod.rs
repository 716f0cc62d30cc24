//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Frame delta clamped before integration
//! - No rendering or platform dependencies

pub mod collision;
pub mod mode;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{circle_square_overlap, circles_overlap, droplet_hits_shape, first_hit};
pub use mode::{GameMode, ModeController};
pub use state::{Droplet, GameEvent, GameState, GoldenCircle, Shape, ShapeKind, Trail};
pub use tick::{TickInput, speed_multiplier, tick};
