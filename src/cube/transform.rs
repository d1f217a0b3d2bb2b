//! Rotation state and model/projection matrices for the spinning cube.

use glam::{Mat4, Vec3};

use crate::params::Projection;

/// Degrees added per timer tick
pub const ANGLE_STEP_DEG: f32 = 2.0;

/// Distance the cube is pushed in front of the camera
pub const MODEL_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -5.0);

/// Rotation axis as authored. Not unit length; see [`rotation_axis`].
pub const ROTATION_AXIS: Vec3 = Vec3::new(1.0, 1.0, 0.0);

/// Advance the angle by one step, wrapping into [0, 360)
pub fn tick(angle_deg: f32) -> f32 {
    (angle_deg + ANGLE_STEP_DEG).rem_euclid(360.0)
}

/// Unit-length rotation axis.
///
/// `Mat4::from_axis_angle` expects a normalized axis; feeding it (1,1,0)
/// directly would scale the rotation. The axis is normalized so `angle_deg`
/// is the true rotation about the diagonal.
pub fn rotation_axis() -> Vec3 {
    ROTATION_AXIS.normalize()
}

/// Translate to (0, 0, -5), then rotate `angle_deg` about the (1,1,0) diagonal
pub fn build_model_transform(angle_deg: f32) -> Mat4 {
    Mat4::from_translation(MODEL_OFFSET)
        * Mat4::from_axis_angle(rotation_axis(), angle_deg.to_radians())
}

/// Right-handed perspective projection with wgpu's [0, 1] depth range
pub fn build_projection(aspect_ratio: f32, projection: &Projection) -> Mat4 {
    Mat4::perspective_rh(
        projection.fov_degrees.to_radians(),
        aspect_ratio,
        projection.near,
        projection.far,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_steps_and_wraps() {
        assert_eq!(tick(0.0), 2.0);
        assert_eq!(tick(356.0), 358.0);
        assert_eq!(tick(358.0), 0.0);
        assert_eq!(tick(359.0), 1.0);
    }

    #[test]
    fn test_tick_full_turn_returns_to_start() {
        let mut angle = 0.0;
        for i in 0..180 {
            angle = tick(angle);
            assert!((0.0..360.0).contains(&angle), "tick {i} gave {angle}");
        }
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_model_transform_at_zero_is_pure_translation() {
        let model = build_model_transform(0.0);
        assert!(model.abs_diff_eq(Mat4::from_translation(MODEL_OFFSET), 1e-6));
    }

    #[test]
    fn test_model_transform_keeps_axis_fixed() {
        // Points on the rotation axis only get translated
        let model = build_model_transform(73.0);
        let on_axis = model.transform_point3(ROTATION_AXIS * 0.5);
        assert!(on_axis.abs_diff_eq(ROTATION_AXIS * 0.5 + MODEL_OFFSET, 1e-5));

        // Off-axis points move but keep their distance from the centre
        let corner = Vec3::new(0.5, -0.5, 0.5);
        let moved = model.transform_point3(corner) - MODEL_OFFSET;
        assert!(!moved.abs_diff_eq(corner, 1e-3));
        assert!((moved.length() - corner.length()).abs() < 1e-5);
    }

    #[test]
    fn test_model_transform_half_turn() {
        // 180° about the (1,1,0) diagonal swaps x and y and flips z
        let model = build_model_transform(180.0);
        let p = model.transform_point3(Vec3::new(0.5, -0.5, 0.5)) - MODEL_OFFSET;
        assert!(p.abs_diff_eq(Vec3::new(-0.5, 0.5, -0.5), 1e-5));
    }

    #[test]
    fn test_projection_maps_near_and_far_planes() {
        let params = Projection::default();
        let proj = build_projection(800.0 / 600.0, &params);

        let near = proj.project_point3(Vec3::new(0.0, 0.0, -params.near));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -params.far));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);

        // The cube centre lands in the middle of the screen, inside the frustum
        let centre = proj.project_point3(MODEL_OFFSET);
        assert!(centre.x.abs() < 1e-6 && centre.y.abs() < 1e-6);
        assert!(centre.z > 0.0 && centre.z < 1.0);
    }

    #[test]
    fn test_projection_respects_aspect_ratio() {
        let params = Projection::default();
        let wide = build_projection(2.0, &params);
        let square = build_projection(1.0, &params);

        let point = Vec3::new(1.0, 1.0, -5.0);
        let a = wide.project_point3(point);
        let b = square.project_point3(point);
        assert!((a.x * 2.0 - b.x).abs() < 1e-5);
        assert!((a.y - b.y).abs() < 1e-5);
    }
}
