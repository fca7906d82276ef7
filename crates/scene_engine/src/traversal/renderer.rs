//! Scene renderer
//!
//! [`SceneRenderer`] is the [`SceneVisitor`] that turns a walk into backend
//! calls. It owns everything one render loop needs: the bound shader, the
//! resolved material parameters, the model stack, and the mesh cache. Run one
//! renderer per render context; nothing here is shared.
//!
//! Material state is last-writer-wins for the whole pass and carries over to
//! the next pass. A mesh draws with whatever material was bound most recently
//! in traversal order, including one bound by an earlier sibling's subtree.
//! [`TraversalConfig::reset_material_per_subtree`] switches to scoped
//! materials instead: leaving a subtree rebinds the material that was active
//! when it was entered.

use thiserror::Error;

use crate::assets::{AssetError, AssetStore};
use crate::config::ConfigError;
use crate::core::config::{SceneEngineConfig, ShaderParamNames, TraversalConfig};
use crate::foundation::math::{Mat4, Scale};
use crate::render::{BackendResult, MaterialBinding, MaterialState, RenderBackend, RenderError};
use crate::scene::{MaterialDescriptor, MeshRef, SceneContainer, SceneNode, TransformData};

use super::mesh_cache::MeshCache;
use super::state_stack::CollapsingStateStack;
use super::visitor::{traverse, SceneVisitor};

/// Counters for one [`SceneRenderer::render`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Nodes entered
    pub nodes_visited: usize,
    /// Draw calls issued
    pub draw_calls: usize,
    /// Material nodes bound
    pub material_binds: usize,
    /// Meshes uploaded during this pass
    pub meshes_uploaded: usize,
}

/// Failure while building a renderer from configuration and assets
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration rejected
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Shader source could not be loaded
    #[error("Failed to load shader source: {0}")]
    Asset(#[from] AssetError),

    /// Backend refused the shader
    #[error("Renderer setup failed: {0}")]
    Render(#[from] RenderError),
}

/// Draws scene trees through a [`RenderBackend`]
pub struct SceneRenderer<B: RenderBackend> {
    backend: B,
    shader: B::ShaderHandle,
    binding: MaterialBinding<B::ParamHandle>,
    model: CollapsingStateStack<Mat4>,
    /// Scoped material levels, only maintained with per-subtree reset
    materials: CollapsingStateStack<Option<MaterialState>>,
    material: Option<MaterialState>,
    shininess_gain: f32,
    meshes: MeshCache<B::MeshHandle>,
    view: Mat4,
    config: TraversalConfig,
    stats: FrameStats,
}

impl<B: RenderBackend> SceneRenderer<B> {
    /// Compile and bind the shader, then resolve the material parameters
    ///
    /// # Errors
    /// Shader compilation or binding failures from the backend.
    pub fn new(
        mut backend: B,
        vertex_src: &str,
        fragment_src: &str,
        names: &ShaderParamNames,
        config: TraversalConfig,
    ) -> BackendResult<Self> {
        let shader = backend.compile_shader(vertex_src, fragment_src)?;
        backend.bind_shader(shader)?;
        let binding = MaterialBinding::resolve(&mut backend, shader, names);

        log::info!(
            "Scene renderer ready (material reset per subtree: {})",
            config.reset_material_per_subtree
        );

        Ok(Self {
            backend,
            shader,
            binding,
            model: CollapsingStateStack::new(Mat4::identity()),
            materials: CollapsingStateStack::new(None),
            material: None,
            shininess_gain: 0.0,
            meshes: MeshCache::new(),
            view: Mat4::identity(),
            config,
            stats: FrameStats::default(),
        })
    }

    /// Build a renderer from a validated configuration, loading shader
    /// sources from `store`
    ///
    /// # Errors
    /// Invalid configuration, missing shader assets, or backend failures.
    pub fn from_assets<S>(backend: B, store: &mut S, config: &SceneEngineConfig) -> Result<Self, SetupError>
    where
        S: AssetStore + ?Sized,
    {
        config.validate()?;
        let vertex = store.load_text(&config.shader.vertex_asset)?;
        let fragment = store.load_text(&config.shader.fragment_asset)?;
        Ok(Self::new(backend, &vertex, &fragment, &config.params, config.traversal.clone())?)
    }

    /// Draw `roots` depth-first
    ///
    /// # Errors
    /// The first upload or draw failure. The pass stops there; draws already
    /// issued stay issued.
    pub fn render(&mut self, roots: &[SceneNode]) -> BackendResult<FrameStats> {
        let uploads_before = self.meshes.upload_count();
        traverse(self, roots)?;
        self.stats.meshes_uploaded = self.meshes.upload_count() - uploads_before;

        log::debug!(
            "Rendered {} nodes, {} draws, {} material binds, {} uploads",
            self.stats.nodes_visited,
            self.stats.draw_calls,
            self.stats.material_binds,
            self.stats.meshes_uploaded
        );
        Ok(self.stats)
    }

    /// Draw every root of `scene`
    ///
    /// # Errors
    /// See [`SceneRenderer::render`].
    pub fn render_container(&mut self, scene: &SceneContainer) -> BackendResult<FrameStats> {
        self.render(scene.roots())
    }

    /// Set the shininess gain for subsequent draws
    pub fn set_shininess_gain(&mut self, gain: f32) {
        self.shininess_gain = gain;
        self.binding.apply_gain(&mut self.backend, gain);
        if let Some(material) = &mut self.material {
            material.shininess_gain = gain;
        }
    }

    /// Current shininess gain
    pub fn shininess_gain(&self) -> f32 {
        self.shininess_gain
    }

    /// Set the view matrix premultiplied into every model-view
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
    }

    /// Current view matrix
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Last bound material, `None` before the first material node
    pub fn material_state(&self) -> Option<&MaterialState> {
        self.material.as_ref()
    }

    /// Meshes uploaded so far
    pub fn mesh_cache(&self) -> &MeshCache<B::MeshHandle> {
        &self.meshes
    }

    /// Logical depth of the model stack; 1 between passes
    pub fn stack_depth(&self) -> usize {
        self.model.depth()
    }

    /// Shader bound at construction
    pub fn shader(&self) -> B::ShaderHandle {
        self.shader
    }

    /// Backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consume the renderer, returning the backend
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn update_model_view(&mut self) {
        let model_view = self.view * self.model.top();
        self.backend.set_model_view(&model_view);
    }

    fn rebind(&mut self, state: Option<MaterialState>) {
        let mut bound = state.unwrap_or_default();
        bound.shininess_gain = self.shininess_gain;
        log::trace!("Restoring material {:?}", bound.albedo);
        self.binding.apply_state(&mut self.backend, &bound);
        self.material = state.map(|_| bound);
    }
}

impl<B: RenderBackend> SceneVisitor for SceneRenderer<B> {
    type Error = RenderError;

    fn init_state(&mut self) {
        self.stats = FrameStats::default();
        self.model.clear();
        if self.config.reset_material_per_subtree {
            self.materials.reset(self.material);
        }
    }

    fn push_state(&mut self) {
        self.model.push();
        if self.config.reset_material_per_subtree {
            self.materials.push();
        }
    }

    fn pop_state(&mut self) -> BackendResult<()> {
        self.model.pop()?;
        self.update_model_view();

        if self.config.reset_material_per_subtree {
            let leaving = *self.materials.top();
            self.materials.pop()?;
            let restored = *self.materials.top();
            if leaving != restored {
                self.rebind(restored);
            }
        }
        Ok(())
    }

    fn enter_node(&mut self, _node: &SceneNode) {
        self.stats.nodes_visited += 1;
    }

    fn visit_transform(&mut self, transform: &TransformData) -> BackendResult<()> {
        let accumulated = self.model.top() * transform.local_matrix();
        self.model.set_top(accumulated);
        self.update_model_view();
        Ok(())
    }

    fn visit_material(&mut self, material: &MaterialDescriptor) -> BackendResult<()> {
        self.binding.apply_material(&mut self.backend, material);
        let state = MaterialState::from_descriptor(material, self.shininess_gain);
        self.material = Some(state);
        if self.config.reset_material_per_subtree {
            self.materials.set_top(Some(state));
        }
        self.stats.material_binds += 1;
        Ok(())
    }

    fn visit_mesh(&mut self, mesh: &MeshRef, model_scale: Scale) -> BackendResult<()> {
        let handle = self.meshes.resolve(mesh, &mut self.backend)?;
        let model = self.model.top() * model_scale.to_matrix();
        self.backend.set_model_view(&(self.view * model));
        self.backend.draw(handle, &model)?;
        self.stats.draw_calls += 1;
        Ok(())
    }
}
