//! WebGPU rendering module
//!
//! Everything is drawn as flat-coloured triangles in stage coordinates;
//! `pipeline` maps them onto the canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
