//! Rendering backend abstraction
//!
//! The traversal engine never talks to a graphics API directly. It drives a
//! [`RenderBackend`], a register-style interface mirroring immediate-mode
//! renderers: one bound shader, a set of current parameter values, a current
//! model-view matrix, and synchronous draw calls that read whatever is bound
//! at the moment they are issued. Because those registers are process-wide
//! for the backend, call order is semantically significant.
//!
//! [`headless::RecordingBackend`] implements the trait without a GPU and
//! records every call, which is what tests and the demo app run against.

pub mod headless;
pub mod material;

pub use headless::{DrawCall, RecordingBackend, RenderCommand};
pub use material::{MaterialBinding, MaterialState};

use std::fmt::Debug;

use thiserror::Error;

use crate::foundation::math::{Mat4, Vec3};
use crate::traversal::state_stack::StackUnderflow;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Value written to a shader parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Scalar
    Float(f32),
    /// Three-component vector or colour
    Vec3(Vec3),
    /// 4x4 matrix
    Mat4(Mat4),
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec3> for ParamValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Mat4> for ParamValue {
    fn from(m: Mat4) -> Self {
        Self::Mat4(m)
    }
}

/// Main rendering backend trait
///
/// Handles are backend-defined opaque copies. A backend is used by exactly one
/// traversal loop at a time; nothing here is expected to be thread-safe.
pub trait RenderBackend {
    /// Compiled shader program
    type ShaderHandle: Copy + Eq + Debug;
    /// Shader parameter location
    type ParamHandle: Copy + Eq + Debug;
    /// Uploaded mesh
    type MeshHandle: Copy + Eq + Debug;

    /// Compile a shader program from source
    fn compile_shader(&mut self, vertex_src: &str, fragment_src: &str) -> BackendResult<Self::ShaderHandle>;

    /// Make `shader` the active program
    fn bind_shader(&mut self, shader: Self::ShaderHandle) -> BackendResult<()>;

    /// Look up a parameter by name; `None` if the program has no such parameter
    fn param_handle(&mut self, shader: Self::ShaderHandle, name: &str) -> Option<Self::ParamHandle>;

    /// Write a parameter of the active program
    fn set_param(&mut self, param: Self::ParamHandle, value: ParamValue);

    /// Upload geometry and return a handle owned by the caller
    fn upload_mesh(&mut self, vertices: &[Vec3], normals: &[Vec3], triangles: &[u32]) -> BackendResult<Self::MeshHandle>;

    /// Draw `mesh` with the currently bound state and the given model matrix
    fn draw(&mut self, mesh: Self::MeshHandle, model: &Mat4) -> BackendResult<()>;

    /// Set the current model-view matrix
    fn set_model_view(&mut self, model_view: &Mat4);
}

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Shader program could not be built
    #[error("Shader compilation failed: {0}")]
    ShaderCompilation(String),

    /// Geometry could not be uploaded; treated as fatal
    #[error("Mesh upload failed: {0}")]
    MeshUpload(String),

    /// Draw call was rejected
    #[error("Draw failed: {0}")]
    DrawFailed(String),

    /// Unbalanced push/pop during traversal
    #[error(transparent)]
    StateStackUnderflow(#[from] StackUnderflow),

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),
}
