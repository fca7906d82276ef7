//! Serialized scene documents
//!
//! The on-disk form of a scene. Meshes are declared once in a name-keyed
//! table and referenced by name from nodes, so importing a document yields a
//! single shared [`MeshRef`] per declared mesh regardless of how many nodes
//! use it.
//!
//! ```ron
//! (
//!     meshes: {
//!         "Cube": (vertices: [(-1.0, -1.0, -1.0), ...], normals: [...], triangles: [0, 1, 2, ...]),
//!     },
//!     roots: [
//!         (
//!             name: Some("Body"),
//!             transform: Some((translation: (0.0, 2.75, 0.0))),
//!             mesh: Some("Cube"),
//!             model_scale: (0.5, 1.0, 0.25),
//!             children: [],
//!         ),
//!     ],
//! )
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Scale, Vec3};
use super::{
    MaterialDescriptor, MeshDescriptor, MeshRef, SceneContainer, SceneError, SceneNode, SceneResult,
    SpecularDescriptor, TransformData,
};

fn vec3([x, y, z]: [f32; 3]) -> Vec3 {
    Vec3::new(x, y, z)
}

fn white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn one() -> f32 {
    1.0
}

/// Serialized geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshDocument {
    /// Vertex positions
    pub vertices: Vec<[f32; 3]>,
    /// Vertex normals
    pub normals: Vec<[f32; 3]>,
    /// Triangle list
    pub triangles: Vec<u32>,
}

/// Serialized local transform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformDocument {
    /// Translation
    pub translation: [f32; 3],
    /// Euler rotation in radians
    pub rotation: [f32; 3],
    /// Rotation pivot
    pub pivot: [f32; 3],
    /// Inherited scale
    pub scale: Scale,
}

/// Serialized material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDocument {
    /// Diffuse colour
    #[serde(default = "white")]
    pub diffuse: [f32; 3],
    /// Specular colour
    #[serde(default = "white")]
    pub specular_color: [f32; 3],
    /// Specular intensity
    #[serde(default)]
    pub specular_intensity: f32,
    /// Specular exponent
    #[serde(default = "one")]
    pub shininess: f32,
}

/// Serialized node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDocument {
    /// Optional node name
    pub name: Option<String>,
    /// Optional local transform
    pub transform: Option<TransformDocument>,
    /// Name of a mesh declared in [`SceneDocument::meshes`]
    pub mesh: Option<String>,
    /// Draw-only mesh scale
    pub model_scale: Scale,
    /// Optional material
    pub material: Option<MaterialDocument>,
    /// Children in order
    pub children: Vec<NodeDocument>,
}

/// Serialized scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Mesh table keyed by name
    #[serde(default)]
    pub meshes: BTreeMap<String, MeshDocument>,
    /// Root nodes
    #[serde(default)]
    pub roots: Vec<NodeDocument>,
}

impl SceneDocument {
    /// Validate every mesh and build the runtime scene
    ///
    /// # Errors
    /// Any malformed mesh, or a node naming a mesh the table does not declare.
    pub fn into_container(self) -> SceneResult<SceneContainer> {
        let mut meshes = HashMap::with_capacity(self.meshes.len());
        for (name, doc) in self.meshes {
            let mesh = MeshDescriptor::named(
                name.clone(),
                doc.vertices.into_iter().map(vec3).collect(),
                doc.normals.into_iter().map(vec3).collect(),
                doc.triangles,
            )?;
            meshes.insert(name, mesh);
        }

        let roots = self
            .roots
            .into_iter()
            .map(|node| build_node(node, &meshes))
            .collect::<SceneResult<Vec<_>>>()?;

        Ok(SceneContainer::new(roots))
    }
}

fn build_node(doc: NodeDocument, meshes: &HashMap<String, MeshRef>) -> SceneResult<SceneNode> {
    let mut node = SceneNode::new().with_model_scale(doc.model_scale);

    if let Some(name) = doc.name {
        node = node.named(name);
    }
    if let Some(t) = doc.transform {
        node = node.with_transform(TransformData {
            translation: vec3(t.translation),
            rotation: vec3(t.rotation),
            pivot: vec3(t.pivot),
            scale: t.scale,
        });
    }
    if let Some(mesh_name) = doc.mesh {
        let mesh = meshes
            .get(&mesh_name)
            .ok_or(SceneError::UnknownMesh(mesh_name))?;
        node = node.with_mesh(Arc::clone(mesh));
    }
    if let Some(m) = doc.material {
        node = node.with_material(MaterialDescriptor {
            diffuse: vec3(m.diffuse),
            specular: SpecularDescriptor {
                color: vec3(m.specular_color),
                intensity: m.specular_intensity,
                shininess: m.shininess,
            },
        });
    }

    let children = doc
        .children
        .into_iter()
        .map(|child| build_node(child, meshes))
        .collect::<SceneResult<Vec<_>>>()?;

    Ok(node.with_children(children))
}
