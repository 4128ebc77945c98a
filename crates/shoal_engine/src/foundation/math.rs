//! Math utilities and types
//!
//! Provides the vector and rotation types spawned entities are placed with.

pub use nalgebra::{Quaternion, Unit, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// World placement of an entity: position plus orientation
///
/// Scale is not carried; pooled entities keep the scale their prototype was
/// authored with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
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
    /// Create a pose at the origin with no rotation
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a pose with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a pose with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose facing along the given yaw (degrees around +Y)
    pub fn from_position_yaw(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_euler_angles(0.0, utils::deg_to_rad(yaw_degrees), 0.0),
        }
    }

    /// Distance between the positions of two poses
    pub fn distance_to(&self, other: &Self) -> f32 {
        (self.position - other.position).magnitude()
    }

    /// Apply this pose to a local-space point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        Point3::from(self.rotation * point.coords + self.position)
    }

    /// Move the pose by a world-space offset
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            position: self.position + offset,
            rotation: self.rotation,
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}
