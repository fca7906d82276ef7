//! Assets bundled into the binary

use scene_engine::assets::MemoryAssetStore;
use scene_engine::scene::{MeshRef, SceneContainer, SceneNode, SceneResult};

use crate::primitives;
use crate::robot::{CUBE, CYLINDER, PYRAMID, SPHERE};
use crate::wuggy;

const VERTEX_SHADER: &str = include_str!("../assets/VertexShader.vert");
const PIXEL_SHADER: &str = include_str!("../assets/PixelShader.frag");

fn mesh_scene(mesh: MeshRef) -> SceneContainer {
    SceneContainer::from_root(SceneNode::new().with_mesh(mesh))
}

/// Store holding shaders, primitive meshes and the wuggy scene document
pub fn embedded_store() -> SceneResult<MemoryAssetStore> {
    Ok(MemoryAssetStore::new()
        .with_text("VertexShader.vert", VERTEX_SHADER)
        .with_text("PixelShader.frag", PIXEL_SHADER)
        .with_text(wuggy::ASSET, wuggy::DOCUMENT)
        .with_scene(CUBE, mesh_scene(primitives::cube()?))
        .with_scene(CYLINDER, mesh_scene(primitives::cylinder(24)?))
        .with_scene(PYRAMID, mesh_scene(primitives::pyramid()?))
        .with_scene(SPHERE, mesh_scene(primitives::sphere(12, 18)?)))
}
