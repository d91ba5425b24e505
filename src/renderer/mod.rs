//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU from a `RenderSnapshot` into a single
//! triangle list and drawn with one flat-color pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
