//! Integration tests for material binding order: last-writer-wins by default,
//! subtree-scoped with per-subtree reset

use crate::core::config::{ShaderParamNames, TraversalConfig};
use crate::foundation::math::Vec3;
use crate::render::{ParamValue, RecordingBackend};
use crate::scene::{MaterialDescriptor, MeshDescriptor, MeshRef, SceneContainer, SceneNode};
use crate::traversal::SceneRenderer;

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshRef {
        MeshDescriptor::new(vec![Vec3::zeros(), Vec3::x(), Vec3::y()], vec![Vec3::z(); 3], vec![0, 1, 2]).unwrap()
    }

    fn renderer(reset_material_per_subtree: bool) -> SceneRenderer<RecordingBackend> {
        SceneRenderer::new(
            RecordingBackend::new(),
            "vertex",
            "fragment",
            &ShaderParamNames::default(),
            TraversalConfig {
                reset_material_per_subtree,
            },
        )
        .unwrap()
    }

    fn red() -> MaterialDescriptor {
        MaterialDescriptor::diffuse(1.0, 0.0, 0.0).with_specular(Vec3::new(1.0, 1.0, 1.0), 0.8, 40.0)
    }

    fn blue() -> MaterialDescriptor {
        MaterialDescriptor::diffuse(0.0, 0.0, 1.0)
    }

    fn albedos(renderer: &SceneRenderer<RecordingBackend>) -> Vec<Option<ParamValue>> {
        renderer.backend().draws().map(|d| d.param("albedo")).collect()
    }

    fn albedo(r: f32, g: f32, b: f32) -> Option<ParamValue> {
        Some(ParamValue::Vec3(Vec3::new(r, g, b)))
    }

    #[test]
    fn test_siblings_draw_with_their_own_material() {
        let mesh = triangle();
        let scene = SceneContainer::from_root(SceneNode::new().with_children([
            SceneNode::new().named("A").with_material(red()).with_child(SceneNode::new().with_mesh(mesh.clone())),
            SceneNode::new().named("B").with_material(blue()).with_child(SceneNode::new().with_mesh(mesh)),
        ]));

        for reset in [false, true] {
            let mut renderer = renderer(reset);
            renderer.render_container(&scene).unwrap();
            assert_eq!(albedos(&renderer), [albedo(1.0, 0.0, 0.0), albedo(0.0, 0.0, 1.0)]);
        }
    }

    #[test]
    fn test_material_params_written_on_bind() {
        let scene = SceneContainer::from_root(SceneNode::new().with_material(red()).with_mesh(triangle()));
        let mut renderer = renderer(false);
        let stats = renderer.render_container(&scene).unwrap();
        assert_eq!(stats.material_binds, 1);

        let draw = renderer.backend().draws().next().unwrap();
        assert_eq!(draw.param("shininess"), Some(ParamValue::Float(40.0)));
        assert_eq!(draw.param("specIntensity"), Some(ParamValue::Float(0.8)));
        assert_eq!(draw.param("specColor"), albedo(1.0, 1.0, 1.0));
        // Gain belongs to the host, not to the material
        assert_eq!(draw.param("shineGain"), None);
    }

    #[test]
    fn test_material_leaks_into_later_sibling() {
        // B has no material node on its path, so it draws with A's
        let scene = SceneContainer::from_root(SceneNode::new().with_children([
            SceneNode::new().named("A").with_material(red()).with_mesh(triangle()),
            SceneNode::new().named("B").with_mesh(triangle()),
        ]));
        let mut renderer = renderer(false);
        renderer.render_container(&scene).unwrap();

        assert_eq!(albedos(&renderer), [albedo(1.0, 0.0, 0.0), albedo(1.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_material_leaks_into_next_pass() {
        let scene = SceneContainer::new(vec![
            SceneNode::new().named("first").with_mesh(triangle()),
            SceneNode::new().named("painter").with_material(blue()),
        ]);
        let mut renderer = renderer(false);

        renderer.render_container(&scene).unwrap();
        assert_eq!(albedos(&renderer), [None]);

        renderer.backend_mut().clear_commands();
        renderer.render_container(&scene).unwrap();
        assert_eq!(albedos(&renderer), [albedo(0.0, 0.0, 1.0)]);
        assert_eq!(renderer.material_state().unwrap().albedo, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_reset_restores_default_after_subtree() {
        let scene = SceneContainer::from_root(SceneNode::new().with_children([
            SceneNode::new().named("A").with_material(red()).with_mesh(triangle()),
            SceneNode::new().named("B").with_mesh(triangle()),
        ]));
        let mut renderer = renderer(true);
        renderer.render_container(&scene).unwrap();

        assert_eq!(albedos(&renderer), [albedo(1.0, 0.0, 0.0), albedo(1.0, 1.0, 1.0)]);
        assert!(renderer.material_state().is_none());
    }

    #[test]
    fn test_reset_restores_parent_material() {
        let scene = SceneContainer::from_root(
            SceneNode::new()
                .with_material(MaterialDescriptor::diffuse(0.0, 1.0, 0.0))
                .with_children([
                    SceneNode::new().with_material(red()).with_mesh(triangle()),
                    SceneNode::new().with_mesh(triangle()),
                ]),
        );
        let mut renderer = renderer(true);
        renderer.set_shininess_gain(3.0);
        renderer.render_container(&scene).unwrap();

        let draws: Vec<_> = renderer.backend().draws().collect();
        assert_eq!(draws[1].param("albedo"), albedo(0.0, 1.0, 0.0));
        assert_eq!(draws[1].param("shininess"), Some(ParamValue::Float(1.0)));
        assert_eq!(draws[1].param("shineGain"), Some(ParamValue::Float(3.0)));
    }

    #[test]
    fn test_shininess_gain_survives_material_binds() {
        let scene = SceneContainer::new(vec![
            SceneNode::new().with_material(red()).with_mesh(triangle()),
            SceneNode::new().with_material(blue()).with_mesh(triangle()),
        ]);
        let mut renderer = renderer(false);
        renderer.set_shininess_gain(2.0);
        renderer.render_container(&scene).unwrap();

        for draw in renderer.backend().draws() {
            assert_eq!(draw.param("shineGain"), Some(ParamValue::Float(2.0)));
        }
        assert_eq!(renderer.material_state().unwrap().shininess_gain, 2.0);
    }

    #[test]
    fn test_shader_without_material_params_still_draws() {
        let backend = RecordingBackend::new().with_known_params(["albedo"]);
        let mut renderer = SceneRenderer::new(
            backend,
            "vertex",
            "fragment",
            &ShaderParamNames::default(),
            TraversalConfig::default(),
        )
        .unwrap();
        let scene = SceneContainer::from_root(SceneNode::new().with_material(red()).with_mesh(triangle()));
        renderer.set_shininess_gain(1.5);
        renderer.render_container(&scene).unwrap();

        let draw = renderer.backend().draws().next().unwrap();
        assert_eq!(draw.params.len(), 1);
        assert_eq!(draw.param("albedo"), albedo(1.0, 0.0, 0.0));
    }
}
