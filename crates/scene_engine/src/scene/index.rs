//! One-time name index over a scene tree

use std::collections::HashMap;

use super::SceneNode;

/// Child-index path from the root list down to a node
pub type NodePath = Vec<usize>;

/// Name → path lookup built once after construction
///
/// Names are not required to be unique. The first node in depth-first
/// document order wins, which is what a "find first by name" query returns.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    paths: HashMap<String, NodePath>,
}

impl NodeIndex {
    /// Index every named node under `roots`
    pub fn build(roots: &[SceneNode]) -> Self {
        let mut index = Self::default();
        let mut path = Vec::new();
        for (i, root) in roots.iter().enumerate() {
            path.push(i);
            index.insert_subtree(root, &mut path);
            path.pop();
        }
        log::debug!("Indexed {} named scene nodes", index.paths.len());
        index
    }

    fn insert_subtree(&mut self, node: &SceneNode, path: &mut NodePath) {
        if let Some(name) = node.name() {
            if self.paths.contains_key(name) {
                log::warn!("Duplicate node name '{}' at {:?}, keeping first occurrence", name, path);
            } else {
                self.paths.insert(name.to_string(), path.clone());
            }
        }
        for (i, child) in node.children().iter().enumerate() {
            path.push(i);
            self.insert_subtree(child, path);
            path.pop();
        }
    }

    /// Path of the first node named `name`
    pub fn path(&self, name: &str) -> Option<&[usize]> {
        self.paths.get(name).map(Vec::as_slice)
    }

    /// Whether `name` is indexed
    pub fn contains(&self, name: &str) -> bool {
        self.paths.contains_key(name)
    }

    /// Number of indexed names
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
