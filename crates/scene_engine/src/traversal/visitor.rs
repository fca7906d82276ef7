//! Depth-first scene walk with per-component dispatch
//!
//! [`traverse`] owns the walk order; a [`SceneVisitor`] owns the state. For
//! every node, in pre-order with children in sequence:
//!
//! 1. [`SceneVisitor::push_state`]
//! 2. [`SceneVisitor::enter_node`]
//! 3. one `visit_*` call per component the node carries, in the order
//!    transform, material, mesh
//! 4. the children, recursively
//! 5. [`SceneVisitor::pop_state`]
//!
//! Nodes without a given component skip its hook. The first error aborts the
//! pass and is returned as is.

use crate::foundation::math::Scale;
use crate::scene::{MaterialDescriptor, MeshRef, NodeComponent, SceneNode, TransformData};

/// Handlers invoked by [`traverse`]
///
/// Every hook has a no-op default so visitors only implement what they use.
pub trait SceneVisitor {
    /// Error that aborts a pass
    type Error;

    /// Called once before the first root
    fn init_state(&mut self) {}

    /// Called on entering a node, before any of its components
    fn push_state(&mut self) {}

    /// Called after a node's last child
    fn pop_state(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after [`SceneVisitor::push_state`] with the node itself
    fn enter_node(&mut self, _node: &SceneNode) {}

    /// Node carries a local transform
    fn visit_transform(&mut self, _transform: &TransformData) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Node carries a material
    fn visit_material(&mut self, _material: &MaterialDescriptor) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Node carries a mesh; `model_scale` applies to this draw only
    fn visit_mesh(&mut self, _mesh: &MeshRef, _model_scale: Scale) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk `roots` depth-first, dispatching each node's components to `visitor`
///
/// # Errors
/// The first error returned by a hook. Hooks for later nodes are not called.
pub fn traverse<V>(visitor: &mut V, roots: &[SceneNode]) -> Result<(), V::Error>
where
    V: SceneVisitor + ?Sized,
{
    visitor.init_state();
    roots.iter().try_for_each(|node| visit_node(visitor, node))
}

fn visit_node<V>(visitor: &mut V, node: &SceneNode) -> Result<(), V::Error>
where
    V: SceneVisitor + ?Sized,
{
    visitor.push_state();
    visitor.enter_node(node);

    for component in node.components() {
        match component {
            NodeComponent::Transform(transform) => visitor.visit_transform(transform)?,
            NodeComponent::Material(material) => visitor.visit_material(material)?,
            NodeComponent::Mesh { mesh, model_scale } => visitor.visit_mesh(mesh, model_scale)?,
        }
    }

    for child in node.children() {
        visit_node(visitor, child)?;
    }

    visitor.pop_state()
}
