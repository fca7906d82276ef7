//! Scene data model
//!
//! A scene is a forest of [`SceneNode`]s. Each node may carry a local
//! transform, a material and a reference to shared immutable geometry, plus
//! an ordered list of children it exclusively owns.
//!
//! ## Lifecycle
//!
//! ```text
//! literal nodes / SceneDocument (RON)
//!      ↓  construction (validated, fatal on malformed meshes)
//! SceneContainer
//!      ↓  NodeIndex::build (once)
//! control phase: transform setters only
//!      ↓
//! traversal pass (read-only)
//! ```
//!
//! Node structure is fixed after construction: the public API hands out
//! mutable access to transforms but never to child lists, so a [`NodeIndex`]
//! built once stays valid for the lifetime of the container.

mod container;
mod document;
mod index;
mod material;
mod mesh;
mod node;

pub use container::{Component, SceneContainer};
pub use document::{MaterialDocument, MeshDocument, NodeDocument, SceneDocument, TransformDocument};
pub use index::{NodeIndex, NodePath};
pub use material::{MaterialDescriptor, SpecularDescriptor};
pub use mesh::{MeshDescriptor, MeshRef};
pub use node::{NodeComponent, SceneNode, TransformData};

use thiserror::Error;

/// Result type for scene construction
pub type SceneResult<T> = Result<T, SceneError>;

/// Scene construction errors
///
/// All of these are fatal: a scene that failed to build cannot be traversed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Normals are not index-aligned with positions
    #[error("Invalid mesh '{mesh}': {normals} normals for {vertices} vertices")]
    NormalCountMismatch {
        /// Mesh name, or `<unnamed>`
        mesh: String,
        /// Number of vertex positions
        vertices: usize,
        /// Number of vertex normals
        normals: usize,
    },

    /// Triangle index list does not describe whole triangles
    #[error("Invalid mesh '{mesh}': {count} triangle indices is not a multiple of 3")]
    IncompleteTriangle {
        /// Mesh name, or `<unnamed>`
        mesh: String,
        /// Number of indices supplied
        count: usize,
    },

    /// A triangle references a vertex that does not exist
    #[error("Invalid mesh '{mesh}': index {index} at position {position} exceeds {vertices} vertices")]
    IndexOutOfRange {
        /// Mesh name, or `<unnamed>`
        mesh: String,
        /// Offending index value
        index: u32,
        /// Position of the index in the triangle list
        position: usize,
        /// Number of vertex positions
        vertices: usize,
    },

    /// Named node lookup failed
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// A scene document references a mesh it does not declare
    #[error("Unknown mesh reference: {0}")]
    UnknownMesh(String),
}
