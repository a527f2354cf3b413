//! WebGPU rendering module
//!
//! `shapes` turns a `GameState` into colored triangles in world coordinates;
//! `pipeline` uploads and draws them. Text lives in the DOM HUD.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::build_frame;
pub use vertex::Vertex;
