//! Headless recording backend
//!
//! Implements [`RenderBackend`] on the CPU. Every call is appended to an
//! ordered command log, parameter writes land in a register file that each
//! draw snapshots, and uploads can be capped to simulate GPU memory running
//! out. Used as the renderer of the test suite and of the demo application.

use std::collections::{BTreeMap, HashSet};

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Mat4, Vec3};
use super::{BackendResult, ParamValue, RenderBackend, RenderError};

new_key_type! {
    /// Shader handle of the recording backend
    pub struct ShaderKey;
    /// Parameter handle of the recording backend
    pub struct ParamKey;
    /// Mesh handle of the recording backend
    pub struct MeshKey;
}

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// `compile_shader`
    CompileShader(ShaderKey),
    /// `bind_shader`
    BindShader(ShaderKey),
    /// `set_param`
    SetParam {
        /// Parameter name
        name: String,
        /// Written value
        value: ParamValue,
    },
    /// `upload_mesh`
    UploadMesh {
        /// Handle handed out
        mesh: MeshKey,
        /// Vertex count
        vertices: usize,
        /// Triangle count
        triangles: usize,
    },
    /// `set_model_view`
    SetModelView(Mat4),
    /// `draw`
    Draw(DrawCall),
}

/// A draw together with the register state it observed
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Drawn mesh
    pub mesh: MeshKey,
    /// Model matrix passed with the draw
    pub model: Mat4,
    /// Model-view register at draw time
    pub model_view: Mat4,
    /// Parameter registers at draw time, by name
    pub params: BTreeMap<String, ParamValue>,
}

impl DrawCall {
    /// Value of a parameter at draw time
    pub fn param(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name).copied()
    }
}

#[derive(Debug)]
struct CompiledShader {
    vertex_len: usize,
    fragment_len: usize,
}

#[derive(Debug)]
struct ParamSlot {
    name: String,
    value: Option<ParamValue>,
}

#[derive(Debug)]
struct UploadedMesh {
    vertices: usize,
    triangles: usize,
}

/// CPU-only backend that records what it is asked to do
#[derive(Debug)]
pub struct RecordingBackend {
    shaders: SlotMap<ShaderKey, CompiledShader>,
    params: SlotMap<ParamKey, ParamSlot>,
    meshes: SlotMap<MeshKey, UploadedMesh>,
    known_params: Option<HashSet<String>>,
    upload_limit: Option<usize>,
    bound_shader: Option<ShaderKey>,
    model_view: Mat4,
    commands: Vec<RenderCommand>,
}

impl RecordingBackend {
    /// Backend accepting any parameter name and unlimited uploads
    pub fn new() -> Self {
        Self {
            shaders: SlotMap::with_key(),
            params: SlotMap::with_key(),
            meshes: SlotMap::with_key(),
            known_params: None,
            upload_limit: None,
            bound_shader: None,
            model_view: Mat4::identity(),
            commands: Vec::new(),
        }
    }

    /// Only report the given parameter names as present in shaders
    pub fn with_known_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_params = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Fail every upload after the first `limit`
    pub fn with_upload_limit(mut self, limit: usize) -> Self {
        self.upload_limit = Some(limit);
        self
    }

    /// Full command log in call order
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Recorded draws in call order
    pub fn draws(&self) -> impl Iterator<Item = &DrawCall> {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::Draw(draw) => Some(draw),
            _ => None,
        })
    }

    /// Number of recorded draws
    pub fn draw_count(&self) -> usize {
        self.draws().count()
    }

    /// Number of meshes uploaded so far
    pub fn upload_count(&self) -> usize {
        self.meshes.len()
    }

    /// Current value of a parameter register
    pub fn param_value(&self, name: &str) -> Option<ParamValue> {
        self.params
            .values()
            .find(|slot| slot.name == name)
            .and_then(|slot| slot.value)
    }

    /// Current model-view register
    pub fn model_view(&self) -> &Mat4 {
        &self.model_view
    }

    /// Currently bound shader
    pub fn bound_shader(&self) -> Option<ShaderKey> {
        self.bound_shader
    }

    /// Drop the command log, keeping resources and registers
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    fn snapshot_params(&self) -> BTreeMap<String, ParamValue> {
        self.params
            .values()
            .filter_map(|slot| slot.value.map(|v| (slot.name.clone(), v)))
            .collect()
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for RecordingBackend {
    type ShaderHandle = ShaderKey;
    type ParamHandle = ParamKey;
    type MeshHandle = MeshKey;

    fn compile_shader(&mut self, vertex_src: &str, fragment_src: &str) -> BackendResult<ShaderKey> {
        if vertex_src.trim().is_empty() || fragment_src.trim().is_empty() {
            return Err(RenderError::ShaderCompilation("empty shader source".to_string()));
        }
        let key = self.shaders.insert(CompiledShader {
            vertex_len: vertex_src.len(),
            fragment_len: fragment_src.len(),
        });
        log::debug!(
            "Compiled shader {:?} ({} + {} bytes of source)",
            key,
            self.shaders[key].vertex_len,
            self.shaders[key].fragment_len
        );
        self.commands.push(RenderCommand::CompileShader(key));
        Ok(key)
    }

    fn bind_shader(&mut self, shader: ShaderKey) -> BackendResult<()> {
        if !self.shaders.contains_key(shader) {
            return Err(RenderError::Backend(format!("unknown shader {:?}", shader)));
        }
        self.bound_shader = Some(shader);
        self.commands.push(RenderCommand::BindShader(shader));
        Ok(())
    }

    fn param_handle(&mut self, shader: ShaderKey, name: &str) -> Option<ParamKey> {
        if !self.shaders.contains_key(shader) {
            return None;
        }
        if let Some(known) = &self.known_params {
            if !known.contains(name) {
                return None;
            }
        }
        if let Some((key, _)) = self.params.iter().find(|(_, slot)| slot.name == name) {
            return Some(key);
        }
        Some(self.params.insert(ParamSlot {
            name: name.to_string(),
            value: None,
        }))
    }

    fn set_param(&mut self, param: ParamKey, value: ParamValue) {
        if let Some(slot) = self.params.get_mut(param) {
            slot.value = Some(value);
            self.commands.push(RenderCommand::SetParam {
                name: slot.name.clone(),
                value,
            });
        }
    }

    fn upload_mesh(&mut self, vertices: &[Vec3], normals: &[Vec3], triangles: &[u32]) -> BackendResult<MeshKey> {
        if let Some(limit) = self.upload_limit {
            if self.meshes.len() >= limit {
                return Err(RenderError::MeshUpload(format!(
                    "out of mesh memory after {} uploads",
                    limit
                )));
            }
        }
        if normals.len() != vertices.len() {
            return Err(RenderError::MeshUpload("normal buffer length differs from vertex buffer".to_string()));
        }

        let uploaded = UploadedMesh {
            vertices: vertices.len(),
            triangles: triangles.len() / 3,
        };
        let (v, t) = (uploaded.vertices, uploaded.triangles);
        let key = self.meshes.insert(uploaded);
        self.commands.push(RenderCommand::UploadMesh {
            mesh: key,
            vertices: v,
            triangles: t,
        });
        Ok(key)
    }

    fn draw(&mut self, mesh: MeshKey, model: &Mat4) -> BackendResult<()> {
        let Some(uploaded) = self.meshes.get(mesh) else {
            return Err(RenderError::DrawFailed(format!("unknown mesh {:?}", mesh)));
        };
        if self.bound_shader.is_none() {
            return Err(RenderError::DrawFailed("no shader bound".to_string()));
        }
        log::trace!("draw {:?} ({} triangles)", mesh, uploaded.triangles);

        let draw = DrawCall {
            mesh,
            model: *model,
            model_view: self.model_view,
            params: self.snapshot_params(),
        };
        self.commands.push(RenderCommand::Draw(draw));
        Ok(())
    }

    fn set_model_view(&mut self, model_view: &Mat4) {
        self.model_view = *model_view;
        self.commands.push(RenderCommand::SetModelView(*model_view));
    }
}
