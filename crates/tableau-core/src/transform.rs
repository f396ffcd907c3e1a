//! Model transform composition.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Scale, rotation, and translation of a single scene object.
///
/// [`Transform::matrix`] composes the components in a fixed order: scale
/// first, then the X, Y, and Z axis rotations, then translation. Rotation
/// composition is non-commutative, so callers rely on this exact order to
/// reproduce object orientation; it is a contract, not an implementation
/// detail.
///
/// Rotation angles are in degrees, matching how scenes are authored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: Vec3,
    /// Rotation around the X, Y, and Z axes, in degrees.
    pub rotation_degrees: Vec3,
    pub translation: Vec3,
}

impl Transform {
    /// The identity transform: unit scale, no rotation, no translation.
    pub const IDENTITY: Self = Self {
        scale: Vec3::ONE,
        rotation_degrees: Vec3::ZERO,
        translation: Vec3::ZERO,
    };

    pub fn new(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees,
            translation,
        }
    }

    /// A transform with the given scale and translation and no rotation.
    ///
    /// Most scene objects are axis-aligned; this covers them without noise.
    pub fn scaled_at(scale: Vec3, translation: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees: Vec3::ZERO,
            translation,
        }
    }

    /// Composes the model matrix as `T * Rz * Ry * Rx * S`.
    ///
    /// Applied to a point right-to-left: scale, rotate about X, then Y,
    /// then Z, then translate.
    pub fn matrix(&self) -> Mat4 {
        let scale = Mat4::from_scale(self.scale);
        let rotation_x = Mat4::from_rotation_x(self.rotation_degrees.x.to_radians());
        let rotation_y = Mat4::from_rotation_y(self.rotation_degrees.y.to_radians());
        let rotation_z = Mat4::from_rotation_z(self.rotation_degrees.z.to_radians());
        let translation = Mat4::from_translation(self.translation);

        translation * rotation_z * rotation_y * rotation_x * scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{Vec3, vec3};

    fn assert_mat4_eq(a: Mat4, b: Mat4) {
        for (x, y) in a.to_cols_array().into_iter().zip(b.to_cols_array()) {
            assert_relative_eq!(x, y, epsilon = 1e-5);
        }
    }

    #[test]
    fn identity_components_yield_identity_matrix() {
        assert_mat4_eq(Transform::IDENTITY.matrix(), Mat4::IDENTITY);
        assert_mat4_eq(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn composition_order_is_translate_rz_ry_rx_scale() {
        let transform = Transform::new(
            vec3(2.0, 3.0, 4.0),
            vec3(90.0, 45.0, 30.0),
            vec3(1.0, -2.0, 5.0),
        );

        let expected = Mat4::from_translation(vec3(1.0, -2.0, 5.0))
            * Mat4::from_rotation_z(30.0_f32.to_radians())
            * Mat4::from_rotation_y(45.0_f32.to_radians())
            * Mat4::from_rotation_x(90.0_f32.to_radians())
            * Mat4::from_scale(vec3(2.0, 3.0, 4.0));

        assert_mat4_eq(transform.matrix(), expected);
    }

    #[test]
    fn rotation_applies_before_translation() {
        // A 90 degree X rotation maps +Y to +Z; the translation must be
        // added after the point has been rotated.
        let transform = Transform::new(Vec3::ONE, vec3(90.0, 0.0, 0.0), vec3(10.0, 0.0, 0.0));
        let point = transform.matrix().transform_point3(vec3(0.0, 1.0, 0.0));

        assert_relative_eq!(point.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(point.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn scale_applies_before_rotation() {
        // Scale along Y, then rotate that axis onto Z. If the order were
        // reversed the scaled axis would stay on Y.
        let transform = Transform::new(vec3(1.0, 5.0, 1.0), vec3(90.0, 0.0, 0.0), Vec3::ZERO);
        let point = transform.matrix().transform_point3(vec3(0.0, 1.0, 0.0));

        assert_relative_eq!(point.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(point.z, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn angles_are_degrees() {
        let transform = Transform::new(Vec3::ONE, vec3(0.0, 0.0, 180.0), Vec3::ZERO);
        let point = transform.matrix().transform_point3(vec3(1.0, 0.0, 0.0));

        assert_relative_eq!(point.x, -1.0, epsilon = 1e-5);
    }
}
