//! Transform composition
//!
//! The operation order is fixed; changing it changes how every pivoted
//! joint in a scene swings.

use crate::foundation::math::{Mat4, Mat4Ext, Scale, Vec3};

/// Pivoted rotation plus translation, without scale
///
/// `T(position + pivot) · Ry · Rx · Rz · T(-pivot)`
pub fn compose(position: Vec3, rotation: Vec3, pivot: Vec3) -> Mat4 {
    Mat4::translation_matrix(position + pivot)
        * Mat4::rotation_y(rotation.y)
        * Mat4::rotation_x(rotation.x)
        * Mat4::rotation_z(rotation.z)
        * Mat4::translation_matrix(-pivot)
}

/// [`compose`] followed by a trailing scale
pub fn compose_scaled(position: Vec3, rotation: Vec3, pivot: Vec3, scale: Scale) -> Mat4 {
    compose(position, rotation, pivot) * scale.to_matrix()
}
