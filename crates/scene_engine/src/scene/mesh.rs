//! Immutable mesh geometry shared between scene nodes

use std::sync::Arc;

use crate::foundation::math::Vec3;
use super::{SceneError, SceneResult};

/// Shared reference to a mesh descriptor
///
/// Identity matters: two nodes holding clones of the same `MeshRef` share one
/// GPU upload, while two structurally equal descriptors built separately do not.
pub type MeshRef = Arc<MeshDescriptor>;

/// Validated, immutable triangle geometry
///
/// Not `Clone`: a copy would be a second identity.
#[derive(Debug, PartialEq)]
pub struct MeshDescriptor {
    name: Option<String>,
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<u32>,
}

impl MeshDescriptor {
    /// Build an unnamed mesh
    ///
    /// # Errors
    /// Fails if `normals` and `vertices` differ in length, if the index count
    /// is not a multiple of three, or if any index is out of range.
    pub fn new(vertices: Vec<Vec3>, normals: Vec<Vec3>, triangles: Vec<u32>) -> SceneResult<MeshRef> {
        Self::build(None, vertices, normals, triangles)
    }

    /// Build a named mesh; the name only shows up in logs and errors
    ///
    /// # Errors
    /// Same as [`MeshDescriptor::new`].
    pub fn named(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        triangles: Vec<u32>,
    ) -> SceneResult<MeshRef> {
        Self::build(Some(name.into()), vertices, normals, triangles)
    }

    fn build(
        name: Option<String>,
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        triangles: Vec<u32>,
    ) -> SceneResult<MeshRef> {
        let label = || name.clone().unwrap_or_else(|| "<unnamed>".to_string());

        if normals.len() != vertices.len() {
            return Err(SceneError::NormalCountMismatch {
                mesh: label(),
                vertices: vertices.len(),
                normals: normals.len(),
            });
        }

        if triangles.len() % 3 != 0 {
            return Err(SceneError::IncompleteTriangle {
                mesh: label(),
                count: triangles.len(),
            });
        }

        if let Some((position, &index)) = triangles
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertices.len())
        {
            return Err(SceneError::IndexOutOfRange {
                mesh: label(),
                index,
                position,
                vertices: vertices.len(),
            });
        }

        Ok(Arc::new(Self {
            name,
            vertices,
            normals,
            triangles,
        }))
    }

    /// Optional name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Vertex positions
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Vertex normals, index-aligned with [`Self::vertices`]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle list, three indices per triangle
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec<Vec3>, Vec<Vec3>) {
        let vertices = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        let normals = vec![Vec3::z(); 3];
        (vertices, normals)
    }

    #[test]
    fn test_valid_mesh() {
        let (v, n) = triangle();
        let mesh = MeshDescriptor::named("tri", v, n, vec![0, 1, 2]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.name(), Some("tri"));
    }

    #[test]
    fn test_normal_count_mismatch() {
        let (v, mut n) = triangle();
        n.pop();
        let err = MeshDescriptor::new(v, n, vec![0, 1, 2]).unwrap_err();
        assert!(matches!(err, SceneError::NormalCountMismatch { vertices: 3, normals: 2, .. }));
    }

    #[test]
    fn test_incomplete_triangle() {
        let (v, n) = triangle();
        let err = MeshDescriptor::new(v, n, vec![0, 1]).unwrap_err();
        assert!(matches!(err, SceneError::IncompleteTriangle { count: 2, .. }));
    }

    #[test]
    fn test_index_out_of_range_reports_position() {
        let (v, n) = triangle();
        let err = MeshDescriptor::named("bad", v, n, vec![0, 1, 2, 2, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            SceneError::IndexOutOfRange { mesh: "bad".to_string(), index: 3, position: 5, vertices: 3 }
        );
    }

    #[test]
    fn test_empty_mesh_is_valid() {
        let mesh = MeshDescriptor::new(Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert_eq!(mesh.triangle_count(), 0);
    }
}
