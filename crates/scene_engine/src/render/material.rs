//! Material state and its binding to shader parameters

use crate::core::config::ShaderParamNames;
use crate::foundation::math::Vec3;
use crate::scene::MaterialDescriptor;
use super::{ParamValue, RenderBackend};

/// Currently bound shading parameters
///
/// There is exactly one of these per renderer. Material nodes overwrite it
/// and every later draw reads it, until the next overwrite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialState {
    /// Diffuse colour
    pub albedo: Vec3,
    /// Specular exponent
    pub shininess: f32,
    /// Host-controlled multiplier on the exponent
    pub shininess_gain: f32,
    /// Specular intensity
    pub specular_intensity: f32,
    /// Specular colour
    pub specular_color: Vec3,
}

impl MaterialState {
    /// State produced by binding `material` under the given gain
    pub fn from_descriptor(material: &MaterialDescriptor, shininess_gain: f32) -> Self {
        Self {
            albedo: material.diffuse,
            shininess: material.specular.shininess,
            shininess_gain,
            specular_intensity: material.specular.intensity,
            specular_color: material.specular.color,
        }
    }
}

impl Default for MaterialState {
    fn default() -> Self {
        Self::from_descriptor(&MaterialDescriptor::default(), 0.0)
    }
}

/// Resolved parameter handles for the five material uniforms
///
/// Any of them may be missing from the shader; writes to a missing parameter
/// are skipped.
#[derive(Debug, Clone, Copy)]
pub struct MaterialBinding<P> {
    albedo: Option<P>,
    shininess: Option<P>,
    shininess_gain: Option<P>,
    specular_intensity: Option<P>,
    specular_color: Option<P>,
}

impl<P: Copy> MaterialBinding<P> {
    /// Look up all material parameters on `shader`
    pub fn resolve<B>(backend: &mut B, shader: B::ShaderHandle, names: &ShaderParamNames) -> Self
    where
        B: RenderBackend<ParamHandle = P>,
    {
        let mut lookup = |name: &str| {
            let handle = backend.param_handle(shader, name);
            if handle.is_none() {
                log::warn!("Shader has no parameter '{}', writes to it will be skipped", name);
            }
            handle
        };

        Self {
            albedo: lookup(&names.albedo),
            shininess: lookup(&names.shininess),
            shininess_gain: lookup(&names.shininess_gain),
            specular_intensity: lookup(&names.specular_intensity),
            specular_color: lookup(&names.specular_color),
        }
    }

    /// Write the per-material parameters of `material`
    ///
    /// The gain is not part of a material and is left untouched.
    pub fn apply_material<B>(&self, backend: &mut B, material: &MaterialDescriptor)
    where
        B: RenderBackend<ParamHandle = P>,
    {
        Self::write(backend, self.albedo, material.diffuse.into());
        Self::write(backend, self.shininess, material.specular.shininess.into());
        Self::write(backend, self.specular_intensity, material.specular.intensity.into());
        Self::write(backend, self.specular_color, material.specular.color.into());
    }

    /// Write the shininess gain
    pub fn apply_gain<B>(&self, backend: &mut B, gain: f32)
    where
        B: RenderBackend<ParamHandle = P>,
    {
        Self::write(backend, self.shininess_gain, gain.into());
    }

    /// Write a complete state, gain included
    pub fn apply_state<B>(&self, backend: &mut B, state: &MaterialState)
    where
        B: RenderBackend<ParamHandle = P>,
    {
        Self::write(backend, self.albedo, state.albedo.into());
        Self::write(backend, self.shininess, state.shininess.into());
        Self::write(backend, self.shininess_gain, state.shininess_gain.into());
        Self::write(backend, self.specular_intensity, state.specular_intensity.into());
        Self::write(backend, self.specular_color, state.specular_color.into());
    }

    fn write<B>(backend: &mut B, param: Option<P>, value: ParamValue)
    where
        B: RenderBackend<ParamHandle = P>,
    {
        if let Some(param) = param {
            log::trace!("set_param {:?}", value);
            backend.set_param(param, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingBackend;

    #[test]
    fn test_missing_params_are_skipped() {
        let mut backend = RecordingBackend::new().with_known_params(["albedo"]);
        let shader = backend.compile_shader("v", "f").unwrap();
        let binding = MaterialBinding::resolve(&mut backend, shader, &ShaderParamNames::default());

        let material = MaterialDescriptor::diffuse(0.2, 0.6, 0.3).with_specular(Vec3::new(1.0, 1.0, 1.0), 0.5, 30.0);
        binding.apply_material(&mut backend, &material);
        binding.apply_gain(&mut backend, 2.0);

        assert_eq!(backend.param_value("albedo"), Some(ParamValue::Vec3(Vec3::new(0.2, 0.6, 0.3))));
        assert_eq!(backend.param_value("shininess"), None);
        assert_eq!(backend.param_value("shineGain"), None);
    }

    #[test]
    fn test_apply_material_leaves_gain() {
        let mut backend = RecordingBackend::new();
        let shader = backend.compile_shader("v", "f").unwrap();
        let binding = MaterialBinding::resolve(&mut backend, shader, &ShaderParamNames::default());

        binding.apply_gain(&mut backend, 3.0);
        binding.apply_material(&mut backend, &MaterialDescriptor::diffuse(1.0, 0.0, 0.0));

        assert_eq!(backend.param_value("shineGain"), Some(ParamValue::Float(3.0)));
        assert_eq!(backend.param_value("shininess"), Some(ParamValue::Float(1.0)));
    }

    #[test]
    fn test_state_from_descriptor() {
        let material = MaterialDescriptor::diffuse(0.9, 0.6, 0.5).with_specular(Vec3::new(0.1, 0.2, 0.3), 0.7, 12.0);
        let state = MaterialState::from_descriptor(&material, 1.5);
        assert_eq!(state.albedo, Vec3::new(0.9, 0.6, 0.5));
        assert_eq!(state.shininess, 12.0);
        assert_eq!(state.shininess_gain, 1.5);
        assert_eq!(state.specular_intensity, 0.7);
        assert_eq!(state.specular_color, Vec3::new(0.1, 0.2, 0.3));
    }
}
