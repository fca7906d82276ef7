//! Scene traversal engine
//!
//! Building blocks, leaves first:
//!
//! - [`transform`]: composes a node's local matrix in a fixed order
//! - [`state_stack`]: the collapsing stack that scopes accumulated state to
//!   a subtree
//! - [`mesh_cache`]: one backend upload per mesh descriptor
//! - [`visitor`]: the depth-first walk and per-component dispatch
//! - [`renderer`]: the visitor that issues draws

pub mod mesh_cache;
pub mod renderer;
pub mod state_stack;
pub mod transform;
pub mod visitor;

pub use mesh_cache::MeshCache;
pub use renderer::{FrameStats, SceneRenderer, SetupError};
pub use state_stack::{CollapsingStateStack, StackUnderflow};
pub use transform::{compose, compose_scaled};
pub use visitor::{traverse, SceneVisitor};
