//! Scene container: the ordered root nodes of one scene

use super::{MaterialDescriptor, MeshRef, NodeIndex, SceneError, SceneNode, SceneResult, TransformData};

/// Payload types that can be looked up on a node by type
pub trait Component {
    /// Borrow this component from `node`, if present
    fn of(node: &SceneNode) -> Option<&Self>;
}

impl Component for TransformData {
    fn of(node: &SceneNode) -> Option<&Self> {
        node.transform()
    }
}

impl Component for MaterialDescriptor {
    fn of(node: &SceneNode) -> Option<&Self> {
        node.material()
    }
}

impl Component for MeshRef {
    fn of(node: &SceneNode) -> Option<&Self> {
        node.mesh()
    }
}

/// A loaded or hand-built scene
#[derive(Debug, Clone, Default)]
pub struct SceneContainer {
    roots: Vec<SceneNode>,
}

impl SceneContainer {
    /// Wrap root nodes
    pub fn new(roots: Vec<SceneNode>) -> Self {
        Self { roots }
    }

    /// Wrap a single root node
    pub fn from_root(root: SceneNode) -> Self {
        Self { roots: vec![root] }
    }

    /// Root nodes in document order
    pub fn roots(&self) -> &[SceneNode] {
        &self.roots
    }

    /// Total node count
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(SceneNode::subtree_len).sum()
    }

    /// Visit every node depth-first, pre-order
    pub fn walk<'a>(&'a self, mut f: impl FnMut(&'a SceneNode)) {
        fn go<'a>(node: &'a SceneNode, f: &mut impl FnMut(&'a SceneNode)) {
            f(node);
            for child in node.children() {
                go(child, f);
            }
        }
        for root in &self.roots {
            go(root, &mut f);
        }
    }

    /// All nodes matching `predicate`, depth-first, pre-order
    pub fn find_nodes(&self, mut predicate: impl FnMut(&SceneNode) -> bool) -> Vec<&SceneNode> {
        let mut found = Vec::new();
        self.walk(|node| {
            if predicate(node) {
                found.push(node);
            }
        });
        found
    }

    /// First node with the given name
    pub fn find_node(&self, name: &str) -> Option<&SceneNode> {
        self.find_nodes(|n| n.name() == Some(name)).into_iter().next()
    }

    /// First component of type `T` in depth-first order
    pub fn find_first_component<T: Component>(&self) -> Option<&T> {
        let mut result = None;
        self.walk(|node| {
            if result.is_none() {
                result = T::of(node);
            }
        });
        result
    }

    /// Build the name index for this container
    pub fn build_index(&self) -> NodeIndex {
        NodeIndex::build(&self.roots)
    }

    /// Mutable access to a named node through a prebuilt index
    ///
    /// # Errors
    /// [`SceneError::NodeNotFound`] if the name is not indexed.
    pub fn node_mut(&mut self, index: &NodeIndex, name: &str) -> SceneResult<&mut SceneNode> {
        let path = index
            .path(name)
            .ok_or_else(|| SceneError::NodeNotFound(name.to_string()))?;
        self.node_at_path_mut(path)
            .ok_or_else(|| SceneError::NodeNotFound(name.to_string()))
    }

    /// Mutable access by child-index path
    pub fn node_at_path_mut(&mut self, path: &[usize]) -> Option<&mut SceneNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get_mut(*first)?;
        for &i in rest {
            node = node.child_mut(i)?;
        }
        Some(node)
    }
}
