//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the rigid `Transform` used for node
//! local and world space.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = nalgebra::Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Unit quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Build a unit quaternion from `(x, y, z, w)` components.
///
/// Sensing sources report orientation in this component order. The input is
/// renormalized so small drift in the reported quaternion never leaks into
/// node rotations.
pub fn quat_from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Quat {
    Quat::new_normalize(Quaternion::new(w, x, y, z))
}

/// Rigid transform: position and rotation, no scale
///
/// Scene nodes store their local transform as one of these; world space is
/// obtained by composing with the parent chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position) * self.rotation.to_homogeneous()
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        Point3::from(self.rotation * point.coords + self.position)
    }

    /// Combine this transform with a child expressed in this transform's space
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * other.position,
            rotation: self.rotation * other.rotation,
        }
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> Transform {
        let inv_rotation = self.rotation.inverse();
        Transform {
            position: inv_rotation * (-self.position),
            rotation: inv_rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_quat_from_xyzw_component_order() {
        let half = std::f32::consts::FRAC_1_SQRT_2;
        // 90 degrees about Y
        let q = quat_from_xyzw(0.0, half, 0.0, half);
        let rotated = q * Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_quat_from_xyzw_renormalizes() {
        let q = quat_from_xyzw(0.0, 0.0, 0.0, 2.0);
        assert_relative_eq!(q, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_combine_then_inverse_is_identity() {
        let parent = Transform::from_position_rotation(
            Vec3::new(2.0, 3.0, 1.0),
            Quat::from_axis_angle(&Vec3::y_axis(), 0.785),
        );
        let identity = parent.combine(&parent.inverse());

        assert_relative_eq!(identity.position, Vec3::zeros(), epsilon = EPSILON);
        let dot = identity.rotation.coords.dot(&Quat::identity().coords);
        assert!(dot.abs() > 0.999, "rotation not identity: dot = {}", dot);
    }

    #[test]
    fn test_matrix_agrees_with_transform_point() {
        let t = Transform::from_position_rotation(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2),
        );
        let p = Point3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(t.to_matrix().transform_point(&p), t.transform_point(p), epsilon = EPSILON);
        assert_relative_eq!(t.transform_point(p), Point3::new(2.0, 0.0, 0.0), epsilon = EPSILON);
    }
}
