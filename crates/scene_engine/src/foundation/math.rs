//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of matrix constructors the
//! scene engine composes transforms from.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Scale factors, either uniform or per axis
///
/// Deserializes from a bare number (`0.5`) or a vector (`(0.5, 1.0, 0.25)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scale {
    /// Same factor on all three axes
    Uniform(f32),
    /// Independent factor per axis
    PerAxis([f32; 3]),
}

impl Scale {
    /// No scaling
    pub const ONE: Self = Self::Uniform(1.0);

    /// Expand to a per-axis vector
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Self::Uniform(s) => Vec3::new(s, s, s),
            Self::PerAxis([x, y, z]) => Vec3::new(x, y, z),
        }
    }

    /// Scaling matrix for these factors
    pub fn to_matrix(self) -> Mat4 {
        Mat4::scaling_matrix(self.to_vec3())
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<f32> for Scale {
    fn from(s: f32) -> Self {
        Self::Uniform(s)
    }
}

impl From<Vec3> for Scale {
    fn from(v: Vec3) -> Self {
        Self::PerAxis([v.x, v.y, v.z])
    }
}

/// Cartesian axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// Component index into a `Vec3`
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a translation matrix
    fn translation_matrix(offset: Vec3) -> Mat4;

    /// Create a non-uniform scaling matrix
    fn scaling_matrix(factors: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn translation_matrix(offset: Vec3) -> Mat4 {
        Mat4::new_translation(&offset)
    }

    fn scaling_matrix(factors: Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(&factors)
    }
}
