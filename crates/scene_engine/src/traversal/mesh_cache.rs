//! Mesh cache for uploading each mesh descriptor to the backend once
//!
//! Entries are keyed by descriptor identity, not contents: two structurally
//! equal meshes built separately get two uploads. Each entry holds a clone of
//! the [`MeshRef`] so the descriptor cannot be freed (and its address reused)
//! while the cache remembers it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::render::{BackendResult, RenderBackend};
use crate::scene::{MeshDescriptor, MeshRef};

/// Cache entry with the uploaded handle
#[derive(Debug)]
struct CacheEntry<H> {
    /// Keeps the keyed address alive
    _descriptor: MeshRef,
    /// Backend handle
    handle: H,
}

/// Descriptor-to-handle cache owned by a renderer
#[derive(Debug)]
pub struct MeshCache<H> {
    entries: HashMap<*const MeshDescriptor, CacheEntry<H>>,
    uploads: usize,
}

impl<H: Copy> MeshCache<H> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            uploads: 0,
        }
    }

    /// Handle for `mesh`, uploading it on first sight
    ///
    /// # Errors
    /// Upload failures are returned unchanged and nothing is cached, so a later
    /// call retries the upload.
    pub fn resolve<B>(&mut self, mesh: &MeshRef, backend: &mut B) -> BackendResult<H>
    where
        B: RenderBackend<MeshHandle = H>,
    {
        let key = Arc::as_ptr(mesh);
        if let Some(entry) = self.entries.get(&key) {
            return Ok(entry.handle);
        }

        let handle = backend.upload_mesh(mesh.vertices(), mesh.normals(), mesh.triangles())?;
        self.uploads += 1;
        log::debug!(
            "Uploaded mesh {} ({} vertices, {} triangles)",
            mesh.name().unwrap_or("<unnamed>"),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        self.entries.insert(
            key,
            CacheEntry {
                _descriptor: Arc::clone(mesh),
                handle,
            },
        );
        Ok(handle)
    }

    /// Cached handle, if `mesh` was uploaded before
    pub fn get(&self, mesh: &MeshRef) -> Option<H> {
        self.entries.get(&Arc::as_ptr(mesh)).map(|e| e.handle)
    }

    /// Whether `mesh` has a cached handle
    pub fn contains(&self, mesh: &MeshRef) -> bool {
        self.entries.contains_key(&Arc::as_ptr(mesh))
    }

    /// Forget `mesh`, returning its handle so the caller can release it
    pub fn invalidate(&mut self, mesh: &MeshRef) -> Option<H> {
        self.entries.remove(&Arc::as_ptr(mesh)).map(|e| e.handle)
    }

    /// Number of cached meshes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total successful uploads over the cache's lifetime
    pub fn upload_count(&self) -> usize {
        self.uploads
    }
}

impl<H: Copy> Default for MeshCache<H> {
    fn default() -> Self {
        Self::new()
    }
}
