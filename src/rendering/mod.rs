//! wgpu render systems for the two demos.

mod bars;
mod cube;
mod gpu;

pub use bars::{bar_vertices, BarRenderSystem, BarVertex, BAR_LINE_WIDTH};
pub use cube::{CubeRenderSystem, CubeUniforms};
pub use gpu::GpuContext;
