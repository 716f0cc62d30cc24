//! Rendering module
//!
//! Frames are tessellated on the CPU (`scene`, `shapes`) and drawn as one
//! triangle list by the WebGPU pipeline. Text goes to the DOM overlay.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Frame, HudText, compose};
pub use vertex::Vertex;
