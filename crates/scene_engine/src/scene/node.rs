//! Scene nodes and their per-node payload

use crate::foundation::math::{Axis, Mat4, Scale, Vec3};
use crate::traversal::transform::compose_scaled;
use super::{MaterialDescriptor, MeshRef};

/// Local transform of a node
///
/// Rotation is Euler angles in radians, applied Y, then X, then Z around
/// `pivot`. `scale` is inherited by children; see [`SceneNode::model_scale`]
/// for a scale that only affects the node's own mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformData {
    /// Translation relative to the parent
    pub translation: Vec3,
    /// Euler rotation in radians per axis
    pub rotation: Vec3,
    /// Rotation pivot in local coordinates
    pub pivot: Vec3,
    /// Scale applied after the pivoted rotation
    pub scale: Scale,
}

impl Default for TransformData {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Vec3::zeros(),
            pivot: Vec3::zeros(),
            scale: Scale::ONE,
        }
    }
}

impl TransformData {
    /// Identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from translation only
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation (radians)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set pivot
    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pivot = pivot;
        self
    }

    /// Builder pattern: Set scale
    pub fn with_scale(mut self, scale: impl Into<Scale>) -> Self {
        self.scale = scale.into();
        self
    }

    /// Replace the translation
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    /// Replace the rotation
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// Replace a single rotation angle
    pub fn set_rotation_axis(&mut self, axis: Axis, angle: f32) {
        self.rotation[axis.index()] = angle;
    }

    /// Replace a single translation component
    pub fn set_translation_axis(&mut self, axis: Axis, value: f32) {
        self.translation[axis.index()] = value;
    }

    /// Add to the rotation
    pub fn rotate_by(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// Add to the translation
    pub fn translate_by(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Keep one translation component within `[min, max]`
    pub fn clamp_translation_axis(&mut self, axis: Axis, min: f32, max: f32) {
        let v = &mut self.translation[axis.index()];
        *v = v.clamp(min, max);
    }

    /// Local matrix including the inherited scale
    pub fn local_matrix(&self) -> Mat4 {
        compose_scaled(self.translation, self.rotation, self.pivot, self.scale)
    }
}

/// One piece of node payload, in dispatch order
///
/// [`SceneNode::components`] always yields transform, then material, then
/// mesh, so a node's own material is bound before its own mesh is drawn.
#[derive(Debug, Clone, Copy)]
pub enum NodeComponent<'a> {
    /// Local transform
    Transform(&'a TransformData),
    /// Material to bind
    Material(&'a MaterialDescriptor),
    /// Mesh to draw, with the draw-only scale
    Mesh {
        /// Shared geometry
        mesh: &'a MeshRef,
        /// Scale applied to this draw only
        model_scale: Scale,
    },
}

/// A node of the scene tree
///
/// Parents own their children exclusively; there are no back references.
/// After construction only the transform may change.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    name: Option<String>,
    transform: Option<TransformData>,
    mesh: Option<MeshRef>,
    model_scale: Scale,
    material: Option<MaterialDescriptor>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Empty node with no payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder pattern: Set transform
    pub fn with_transform(mut self, transform: TransformData) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Builder pattern: Set mesh
    pub fn with_mesh(mut self, mesh: MeshRef) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Builder pattern: Set the draw-only mesh scale
    pub fn with_model_scale(mut self, scale: impl Into<Scale>) -> Self {
        self.model_scale = scale.into();
        self
    }

    /// Builder pattern: Set material
    pub fn with_material(mut self, material: MaterialDescriptor) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder pattern: Append a child
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder pattern: Append children in order
    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Node name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Local transform
    pub fn transform(&self) -> Option<&TransformData> {
        self.transform.as_ref()
    }

    /// Mutable transform, inserting an identity transform if the node has none
    pub fn transform_mut(&mut self) -> &mut TransformData {
        self.transform.get_or_insert_with(TransformData::identity)
    }

    /// Mesh reference
    pub fn mesh(&self) -> Option<&MeshRef> {
        self.mesh.as_ref()
    }

    /// Draw-only mesh scale
    pub fn model_scale(&self) -> Scale {
        self.model_scale
    }

    /// Material
    pub fn material(&self) -> Option<&MaterialDescriptor> {
        self.material.as_ref()
    }

    /// Children in order
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut SceneNode> {
        self.children.get_mut(index)
    }

    /// Payload present on this node, in dispatch order
    pub fn components(&self) -> impl Iterator<Item = NodeComponent<'_>> {
        let transform = self.transform.as_ref().map(NodeComponent::Transform);
        let material = self.material.as_ref().map(NodeComponent::Material);
        let mesh = self.mesh.as_ref().map(|mesh| NodeComponent::Mesh {
            mesh,
            model_scale: self.model_scale,
        });
        transform.into_iter().chain(material).chain(mesh)
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SceneNode::subtree_len).sum::<usize>()
    }
}
