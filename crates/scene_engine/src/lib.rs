//! # Scene Engine
//!
//! Hierarchical scene traversal for immediate-mode renderers.
//!
//! ## Features
//!
//! - **Scene graph**: owned node trees with transforms, materials and shared meshes
//! - **Collapsing state stack**: subtree-scoped transform accumulation
//! - **Mesh cache**: one backend upload per mesh descriptor
//! - **Type-directed traversal**: a depth-first walk dispatching on node components
//! - **Headless backend**: records every backend call, for tests and tools
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cube = MeshDescriptor::new(
//!         vec![Vec3::zeros(), Vec3::x(), Vec3::y()],
//!         vec![Vec3::z(); 3],
//!         vec![0, 1, 2],
//!     )?;
//!     let scene = SceneContainer::from_root(
//!         SceneNode::new()
//!             .named("Body")
//!             .with_transform(TransformData::from_translation(Vec3::new(0.0, 2.0, 0.0)))
//!             .with_material(MaterialDescriptor::diffuse(0.2, 0.6, 0.3))
//!             .with_mesh(cube),
//!     );
//!
//!     let mut renderer = SceneRenderer::new(
//!         RecordingBackend::new(),
//!         "vertex source",
//!         "fragment source",
//!         &ShaderParamNames::default(),
//!         TraversalConfig::default(),
//!     )?;
//!     let stats = renderer.render_container(&scene)?;
//!     assert_eq!(stats.draw_calls, 1);
//!     Ok(())
//! }
//! ```

#![allow(clippy::cast_precision_loss, clippy::must_use_candidate)]

// Foundation
pub mod foundation;
pub mod config;
pub mod core;

// Scene data and its sources
pub mod scene;
pub mod assets;

// Rendering and traversal
pub mod render;
pub mod traversal;
pub mod control;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetStore, DirectoryAssetStore, MemoryAssetStore},
        config::Config,
        control::{AxisController, AxisRule, ControlAxes, ControlStep, RuleMode, RuleTarget},
        core::config::{EngineConfig, SceneEngineConfig, ShaderConfig, ShaderParamNames, TraversalConfig},
        foundation::math::{Axis, Mat4, Mat4Ext, Scale, Vec3},
        render::{BackendResult, MaterialState, RecordingBackend, RenderBackend, RenderError},
        scene::{
            MaterialDescriptor, MeshDescriptor, MeshRef, NodeIndex, SceneContainer, SceneError, SceneNode,
            TransformData,
        },
        traversal::{FrameStats, SceneRenderer, SceneVisitor},
    };
}
