//! Static unit cube mesh with position-derived vertex colours.

use bytemuck::{Pod, Zeroable};

/// Cube corners, front face (z = +0.5) first, then back face
pub const CUBE_POSITIONS: [[f32; 3]; 8] = [
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
];

/// Two triangles per face: front, right, back, left, top, bottom
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 2, 3, 0, // front
    1, 5, 6, 6, 2, 1, // right
    5, 4, 7, 7, 6, 5, // back
    4, 0, 3, 3, 7, 4, // left
    3, 2, 6, 6, 7, 3, // top
    4, 5, 1, 1, 0, 4, // bottom
];

/// Vertex data for the cube pipeline (position + colour)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// RGB colour of a corner: position shifted from [-0.5, 0.5] into [0, 1]
pub fn vertex_color(position: [f32; 3]) -> [f32; 3] {
    position.map(|c| c + 0.5)
}

/// GPU vertices for the cube, one per corner
pub fn cube_vertices() -> [CubeVertex; 8] {
    CUBE_POSITIONS.map(|position| CubeVertex {
        position,
        color: vertex_color(position),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vertex_color_maps_corners_to_unit_cube() {
        assert_eq!(vertex_color([-0.5, -0.5, -0.5]), [0.0, 0.0, 0.0]);
        assert_eq!(vertex_color([0.5, 0.5, 0.5]), [1.0, 1.0, 1.0]);
        assert_eq!(vertex_color([0.5, -0.5, 0.5]), [1.0, 0.0, 1.0]);

        for vertex in cube_vertices() {
            assert!(vertex.color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_indices_form_twelve_valid_triangles() {
        assert_eq!(CUBE_INDICES.len(), 36);
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_POSITIONS.len()));

        for tri in CUBE_INDICES.chunks(3) {
            let unique: HashSet<u16> = tri.iter().copied().collect();
            assert_eq!(unique.len(), 3, "degenerate triangle {tri:?}");
        }
    }

    #[test]
    fn test_every_face_is_planar() {
        // Each group of 6 indices lies on one axis-aligned face
        for face in CUBE_INDICES.chunks(6) {
            let planar = (0..3).any(|axis| {
                let first = CUBE_POSITIONS[face[0] as usize][axis];
                face.iter()
                    .all(|&i| CUBE_POSITIONS[i as usize][axis] == first)
            });
            assert!(planar, "face {face:?} is not axis aligned");
        }
    }

    #[test]
    fn test_every_corner_is_used() {
        let used: HashSet<u16> = CUBE_INDICES.iter().copied().collect();
        assert_eq!(used.len(), 8);
    }
}
