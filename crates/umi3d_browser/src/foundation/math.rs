//! Math utilities and types
//!
//! Provides the fundamental math types used by geometry, selection and the
//! wire codec.

pub use nalgebra::{Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Position and orientation of a tracked object (controller, target, camera)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in world space
    pub position: Vec3,

    /// Orientation in world space
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Pose {
    /// Create a pose from position and rotation
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a pose at `position` whose forward axis points along `direction`
    ///
    /// Falls back to the identity rotation when `direction` is degenerate.
    pub fn looking_along(position: Vec3, direction: Vec3) -> Self {
        let rotation = Quat::rotation_between(&Vec3::z(), &direction)
            .unwrap_or_else(|| {
                // Exactly opposite to +Z: half turn around Y
                if direction.z < 0.0 {
                    Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::PI)
                } else {
                    Quat::identity()
                }
            });
        Self { position, rotation }
    }

    /// Forward axis (+Z rotated by the orientation)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    /// Transform a point from this pose's local frame into world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_pose_faces_positive_z() {
        let pose = Pose::default();
        assert_relative_eq!(pose.forward(), Vec3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_looking_along() {
        let pose = Pose::looking_along(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(pose.forward(), Vec3::x(), epsilon = 1e-6);

        let back = Pose::looking_along(Vec3::zeros(), Vec3::new(0.0, 0.0, -2.0));
        assert_relative_eq!(back.forward(), -Vec3::z(), epsilon = 1e-6);
    }
}
