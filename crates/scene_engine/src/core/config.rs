//! # Scene Engine Configuration
//!
//! All tunables of the traversal engine in one serializable tree: which shader
//! assets to compile, what the material parameters are called inside that
//! shader, how traversal treats material state, and the default log filter.
//!
//! Every section has working defaults, so a missing file section (or a missing
//! file) yields the behaviour of the built-in renderer.

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// # Shader Configuration
///
/// Names of the shader source assets fetched from the asset store when a
/// renderer is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Asset name of the vertex shader source
    pub vertex_asset: String,
    /// Asset name of the fragment shader source
    pub fragment_asset: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_asset: impl Into<String>, fragment_asset: impl Into<String>) -> Self {
        Self {
            vertex_asset: vertex_asset.into(),
            fragment_asset: fragment_asset.into(),
        }
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::new("VertexShader.vert", "PixelShader.frag")
    }
}

/// Uniform names the material binding looks up in the compiled shader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderParamNames {
    /// Diffuse colour
    pub albedo: String,
    /// Specular exponent
    pub shininess: String,
    /// Global multiplier on the specular exponent
    pub shininess_gain: String,
    /// Specular intensity
    pub specular_intensity: String,
    /// Specular colour
    pub specular_color: String,
}

impl Default for ShaderParamNames {
    fn default() -> Self {
        Self {
            albedo: "albedo".to_string(),
            shininess: "shininess".to_string(),
            shininess_gain: "shineGain".to_string(),
            specular_intensity: "specIntensity".to_string(),
            specular_color: "specColor".to_string(),
        }
    }
}

/// Traversal behaviour switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Restore the parent's material when a subtree is left.
    ///
    /// Off by default: material state is last-writer-wins across the whole
    /// pass, so a material set in one branch stays bound for later siblings.
    pub reset_material_per_subtree: bool,
}

/// # Engine Configuration
///
/// Process-level settings of the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Scene Engine Configuration
///
/// Top-level configuration handed to [`crate::traversal::SceneRenderer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneEngineConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Shader source assets
    pub shader: ShaderConfig,
    /// Material uniform names
    pub params: ShaderParamNames,
    /// Traversal switches
    pub traversal: TraversalConfig,
}

impl SceneEngineConfig {
    /// Enable or disable per-subtree material reset
    pub fn with_material_reset(mut self, enabled: bool) -> Self {
        self.traversal.reset_material_per_subtree = enabled;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shader.vertex_asset.is_empty() || self.shader.fragment_asset.is_empty() {
            return Err(ConfigError::Invalid("shader asset names cannot be empty".to_string()));
        }

        let p = &self.params;
        let names = [&p.albedo, &p.shininess, &p.shininess_gain, &p.specular_intensity, &p.specular_color];
        if names.iter().any(|n| n.is_empty()) {
            return Err(ConfigError::Invalid("shader parameter names cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl Config for SceneEngineConfig {}
