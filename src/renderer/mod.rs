//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as a flat-colored triangle list in world
//! units; `RenderState` maps it into the canvas and draws it in one pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::{Vertex, colors};
pub use viewport::Viewport;
