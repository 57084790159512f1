//! Projection and model-view construction.
//!
//! Matrix math is delegated to `glam`. Matrices are uploaded column-major.

use glam::{Mat4, Vec3};

use super::state::RotationState;

/// Perspective parameters; the aspect ratio comes from the viewport each frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectionParams {
    /// Vertical field of view, in radians.
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
}

impl ProjectionParams {
    /// 45° vertical field of view, near 0.1, far 100.
    pub const DEFAULT: Self = Self {
        fovy: std::f32::consts::FRAC_PI_4,
        near: 0.1,
        far: 100.0,
    };

    /// Right-handed perspective with wgpu's 0..1 clip depth.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy, aspect, self.near, self.far)
    }
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where the quad sits in front of the camera.
pub const DEFAULT_TRANSLATION: Vec3 = Vec3::new(0.0, 0.0, -6.0);

/// identity → translate → rotate about +Z.
pub fn model_view_matrix(translation: Vec3, rotation: RotationState) -> Mat4 {
    Mat4::IDENTITY * Mat4::from_translation(translation) * Mat4::from_rotation_z(rotation.radians)
}

/// Column-major `f32` layout expected by the uniform blocks.
#[inline]
pub fn to_uniform(m: &Mat4) -> [f32; 16] {
    m.to_cols_array()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{Vec4, Vec4Swizzles};

    use super::*;

    #[test]
    fn projection_is_deterministic() {
        let p = ProjectionParams::default();
        let a = to_uniform(&p.matrix(16.0 / 9.0));
        let b = to_uniform(&p.matrix(16.0 / 9.0));
        assert_eq!(a.map(f32::to_bits), b.map(f32::to_bits));
    }

    #[test]
    fn projection_maps_near_and_far_planes_to_clip_depth() {
        let p = ProjectionParams::default();
        let m = p.matrix(1.0);

        let near = m * Vec4::new(0.0, 0.0, -p.near, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -p.far, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn projection_uses_45_degree_fov() {
        let m = ProjectionParams::default().matrix(1.0);
        // y scale of a perspective matrix is 1 / tan(fovy / 2) == 1 / tan(22.5°).
        let expected = 1.0 / (std::f32::consts::FRAC_PI_8).tan();
        assert_relative_eq!(m.y_axis.y, expected, epsilon = 1e-5);
    }

    #[test]
    fn model_view_without_rotation_is_a_translation() {
        let m = model_view_matrix(DEFAULT_TRANSLATION, RotationState::default());
        assert_eq!(m, Mat4::from_translation(Vec3::new(0.0, 0.0, -6.0)));
        let cols = to_uniform(&m);
        // Translation lives in the last column when column-major.
        assert_eq!(&cols[12..16], &[0.0, 0.0, -6.0, 1.0]);
    }

    #[test]
    fn model_view_rotates_about_z_before_translating() {
        let m = model_view_matrix(
            DEFAULT_TRANSLATION,
            RotationState::new(std::f32::consts::FRAC_PI_2),
        );
        let p = m * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.xyz().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.xyz().y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.xyz().z, -6.0, epsilon = 1e-6);
    }
}
