//! Asset store
//!
//! Scenes and shader sources are fetched by name. The traversal core only
//! sees the resulting [`SceneContainer`] and source strings; where they come
//! from is up to the store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scene::{MeshRef, SceneContainer, SceneDocument, SceneError};

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Asset exists but could not be parsed
    #[error("Failed to parse asset '{name}': {message}")]
    Parse {
        /// Asset name
        name: String,
        /// Parser message
        message: String,
    },

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Scene lacks a required component
    #[error("Asset '{asset}' has no {component}")]
    MissingComponent {
        /// Asset name
        asset: String,
        /// Component looked for
        component: &'static str,
    },

    /// Scene content is malformed
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of named scenes and text assets
pub trait AssetStore {
    /// Load and validate a scene
    fn load_scene(&mut self, name: &str) -> Result<SceneContainer, AssetError>;

    /// Load a text asset such as a shader source
    fn load_text(&mut self, name: &str) -> Result<String, AssetError>;
}

/// First mesh of the named scene, in document order
///
/// # Errors
/// Load failures, or [`AssetError::MissingComponent`] if no node has a mesh.
pub fn load_mesh<S: AssetStore + ?Sized>(store: &mut S, name: &str) -> Result<MeshRef, AssetError> {
    let scene = store.load_scene(name)?;
    scene
        .find_first_component::<MeshRef>()
        .cloned()
        .ok_or_else(|| AssetError::MissingComponent {
            asset: name.to_string(),
            component: "mesh",
        })
}

fn parse_scene(name: &str, text: &str) -> Result<SceneContainer, AssetError> {
    let document: SceneDocument = ron::from_str(text).map_err(|e| AssetError::Parse {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    let container = document.into_container()?;
    log::debug!("Parsed scene '{}' ({} nodes)", name, container.node_count());
    Ok(container)
}

/// In-memory store, for embedded assets and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    scenes: HashMap<String, SceneContainer>,
    texts: HashMap<String, String>,
}

impl MemoryAssetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ready-built scene
    pub fn with_scene(mut self, name: impl Into<String>, scene: SceneContainer) -> Self {
        self.scenes.insert(name.into(), scene);
        self
    }

    /// Register a text asset
    ///
    /// Text registered under a `.ron` name can also be loaded as a scene.
    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(name.into(), text.into());
        self
    }
}

impl AssetStore for MemoryAssetStore {
    fn load_scene(&mut self, name: &str) -> Result<SceneContainer, AssetError> {
        if let Some(scene) = self.scenes.get(name) {
            return Ok(scene.clone());
        }
        let text = self
            .texts
            .get(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        let scene = parse_scene(name, text)?;
        self.scenes.insert(name.to_string(), scene.clone());
        Ok(scene)
    }

    fn load_text(&mut self, name: &str) -> Result<String, AssetError> {
        self.texts
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

/// Store reading `<root>/<name>` from disk
///
/// Scenes must be `.ron` documents. A scene is parsed once; later loads of the
/// same name return a copy of the cached container, sharing its meshes.
#[derive(Debug)]
pub struct DirectoryAssetStore {
    root: PathBuf,
    scenes: HashMap<String, SceneContainer>,
}

impl DirectoryAssetStore {
    /// Store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scenes: HashMap::new(),
        }
    }

    /// Directory assets are read from
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> Result<String, AssetError> {
        let path = self.root.join(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AssetError::NotFound(name.to_string())),
            Err(e) => Err(AssetError::Io(e)),
        }
    }
}

impl AssetStore for DirectoryAssetStore {
    fn load_scene(&mut self, name: &str) -> Result<SceneContainer, AssetError> {
        if let Some(scene) = self.scenes.get(name) {
            return Ok(scene.clone());
        }
        let is_ron = Path::new(name).extension().and_then(|e| e.to_str()) == Some("ron");
        if !is_ron {
            return Err(AssetError::UnsupportedFormat(name.to_string()));
        }

        let text = self.read(name)?;
        let scene = parse_scene(name, &text)?;
        log::info!("Loaded scene {}", self.root.join(name).display());
        self.scenes.insert(name.to_string(), scene.clone());
        Ok(scene)
    }

    fn load_text(&mut self, name: &str) -> Result<String, AssetError> {
        self.read(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const CUBE: &str = r#"(
        meshes: {
            "Tri": (
                vertices: [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)],
                normals: [(0.0, 0.0, 1.0), (0.0, 0.0, 1.0), (0.0, 0.0, 1.0)],
                triangles: [0, 1, 2],
            ),
        },
        roots: [
            (name: Some("Empty")),
            (name: Some("Holder"), mesh: Some("Tri")),
        ],
    )"#;

    #[test]
    fn test_memory_store_parses_ron_text() {
        let mut store = MemoryAssetStore::new().with_text("tri.ron", CUBE);
        let scene = store.load_scene("tri.ron").unwrap();
        assert_eq!(scene.node_count(), 2);

        let mesh = load_mesh(&mut store, "tri.ron").unwrap();
        assert_eq!(mesh.name(), Some("Tri"));
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_memory_store_reuses_parsed_scene() {
        let mut store = MemoryAssetStore::new().with_text("tri.ron", CUBE);
        let a = load_mesh(&mut store, "tri.ron").unwrap();
        let b = load_mesh(&mut store, "tri.ron").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_missing_asset() {
        let mut store = MemoryAssetStore::new();
        assert!(matches!(store.load_text("nope"), Err(AssetError::NotFound(_))));
        assert!(matches!(store.load_scene("nope.ron"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_parse_error_names_asset() {
        let mut store = MemoryAssetStore::new().with_text("bad.ron", "(meshes: {");
        match store.load_scene("bad.ron") {
            Err(AssetError::Parse { name, .. }) => assert_eq!(name, "bad.ron"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_scene_without_mesh() {
        let scene = SceneContainer::from_root(crate::scene::SceneNode::new().named("lonely"));
        let mut store = MemoryAssetStore::new().with_scene("lonely", scene);
        assert!(matches!(
            load_mesh(&mut store, "lonely"),
            Err(AssetError::MissingComponent { component: "mesh", .. })
        ));
    }

    #[test]
    fn test_malformed_mesh_is_scene_error() {
        let text = r#"(
            meshes: { "Broken": (vertices: [(0.0, 0.0, 0.0)], normals: [], triangles: []) },
            roots: [],
        )"#;
        let mut store = MemoryAssetStore::new().with_text("broken.ron", text);
        assert!(matches!(store.load_scene("broken.ron"), Err(AssetError::Scene(_))));
    }

    #[test]
    fn test_directory_store_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tri.ron"), CUBE).unwrap();
        fs::write(dir.path().join("shader.vert"), "void main() {}").unwrap();

        let mut store = DirectoryAssetStore::new(dir.path());
        assert_eq!(store.load_text("shader.vert").unwrap(), "void main() {}");
        assert_eq!(store.load_scene("tri.ron").unwrap().node_count(), 2);

        // Served from cache after the file is gone
        fs::remove_file(dir.path().join("tri.ron")).unwrap();
        assert!(store.load_scene("tri.ron").is_ok());

        assert!(matches!(store.load_text("missing.frag"), Err(AssetError::NotFound(_))));
        assert!(matches!(
            store.load_scene("shader.vert"),
            Err(AssetError::UnsupportedFormat(_))
        ));
    }
}
