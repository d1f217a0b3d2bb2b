//! Spinning cube: per-tick angle update, model/projection matrices and mesh.

mod mesh;
mod transform;

pub use mesh::{cube_vertices, vertex_color, CubeVertex, CUBE_INDICES, CUBE_POSITIONS};
pub use transform::{
    build_model_transform, build_projection, rotation_axis, tick, ANGLE_STEP_DEG, MODEL_OFFSET,
    ROTATION_AXIS,
};
