//! Material descriptors carried by scene nodes

use crate::foundation::math::Vec3;

/// Specular lobe parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecularDescriptor {
    /// Highlight colour
    pub color: Vec3,
    /// Highlight strength
    pub intensity: f32,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for SpecularDescriptor {
    fn default() -> Self {
        Self {
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 0.0,
            shininess: 1.0,
        }
    }
}

/// Shading parameters attached to a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDescriptor {
    /// Diffuse colour (albedo)
    pub diffuse: Vec3,
    /// Specular parameters
    pub specular: SpecularDescriptor,
}

impl MaterialDescriptor {
    /// Diffuse-only material
    pub fn diffuse(r: f32, g: f32, b: f32) -> Self {
        Self {
            diffuse: Vec3::new(r, g, b),
            specular: SpecularDescriptor::default(),
        }
    }

    /// Set the specular lobe
    pub fn with_specular(mut self, color: Vec3, intensity: f32, shininess: f32) -> Self {
        self.specular = SpecularDescriptor { color, intensity, shininess };
        self
    }
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self::diffuse(1.0, 1.0, 1.0)
    }
}
