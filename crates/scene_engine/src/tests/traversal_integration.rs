//! Integration tests for transform accumulation, draw issue and mesh upload
//! through a full render pass

use crate::core::config::{ShaderParamNames, TraversalConfig};
use crate::foundation::math::{constants::HALF_PI, Mat4, Mat4Ext, Vec3};
use crate::render::{RecordingBackend, RenderCommand, RenderError};
use crate::scene::{MeshDescriptor, MeshRef, SceneContainer, SceneNode, TransformData};
use crate::traversal::SceneRenderer;
use approx::assert_relative_eq;

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(name: &str) -> MeshRef {
        MeshDescriptor::named(
            name,
            vec![Vec3::zeros(), Vec3::x(), Vec3::y()],
            vec![Vec3::z(); 3],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    fn renderer(backend: RecordingBackend) -> SceneRenderer<RecordingBackend> {
        SceneRenderer::new(
            backend,
            "vertex",
            "fragment",
            &ShaderParamNames::default(),
            TraversalConfig::default(),
        )
        .unwrap()
    }

    /// root -> [A -> [A1], B], meshes on A, A1 and B; A and B share geometry
    fn scene() -> SceneContainer {
        let shared = triangle("Shared");
        SceneContainer::from_root(
            SceneNode::new()
                .named("root")
                .with_transform(TransformData::from_translation(Vec3::new(0.0, 1.0, 0.0)))
                .with_children([
                    SceneNode::new()
                        .named("A")
                        .with_transform(TransformData::from_translation(Vec3::new(1.0, 0.0, 0.0)))
                        .with_mesh(shared.clone())
                        .with_child(
                            SceneNode::new()
                                .named("A1")
                                .with_transform(
                                    TransformData::from_translation(Vec3::new(0.0, 0.0, 1.0))
                                        .with_rotation(Vec3::new(0.0, HALF_PI, 0.0)),
                                )
                                .with_mesh(triangle("Own"))
                                .with_model_scale(2.0),
                        ),
                    SceneNode::new()
                        .named("B")
                        .with_transform(TransformData::from_translation(Vec3::new(-1.0, 0.0, 0.0)))
                        .with_mesh(shared),
                ]),
        )
    }

    #[test]
    fn test_three_meshes_three_draws_with_accumulated_models() {
        let scene = scene();
        let mut renderer = renderer(RecordingBackend::new());

        let stats = renderer.render_container(&scene).unwrap();
        assert_eq!(stats.nodes_visited, 4);
        assert_eq!(stats.draw_calls, 3);

        let models: Vec<Mat4> = renderer.backend().draws().map(|d| d.model).collect();
        assert_eq!(models.len(), 3);

        // Pre-order: A, A1, B
        let a = Mat4::translation_matrix(Vec3::new(1.0, 1.0, 0.0));
        let a1 = a
            * Mat4::translation_matrix(Vec3::new(0.0, 0.0, 1.0))
            * Mat4::rotation_y(HALF_PI)
            * Mat4::scaling_matrix(Vec3::new(2.0, 2.0, 2.0));
        let b = Mat4::translation_matrix(Vec3::new(-1.0, 1.0, 0.0));

        assert_relative_eq!(models[0], a, epsilon = 1e-6);
        assert_relative_eq!(models[1], a1, epsilon = 1e-6);
        assert_relative_eq!(models[2], b, epsilon = 1e-6);
    }

    #[test]
    fn test_model_scale_is_not_inherited() {
        let scene = SceneContainer::from_root(
            SceneNode::new()
                .with_mesh(triangle("Parent"))
                .with_model_scale(10.0)
                .with_child(SceneNode::new().with_mesh(triangle("Child"))),
        );
        let mut renderer = renderer(RecordingBackend::new());
        renderer.render_container(&scene).unwrap();

        let models: Vec<Mat4> = renderer.backend().draws().map(|d| d.model).collect();
        assert_relative_eq!(models[0], Mat4::scaling_matrix(Vec3::new(10.0, 10.0, 10.0)));
        assert_relative_eq!(models[1], Mat4::identity());
    }

    #[test]
    fn test_transform_scale_is_inherited() {
        let scene = SceneContainer::from_root(
            SceneNode::new()
                .with_transform(TransformData::identity().with_scale(0.5))
                .with_child(
                    SceneNode::new()
                        .with_transform(TransformData::from_translation(Vec3::new(2.0, 0.0, 0.0)))
                        .with_mesh(triangle("Child")),
                ),
        );
        let mut renderer = renderer(RecordingBackend::new());
        renderer.render_container(&scene).unwrap();

        let draw = renderer.backend().draws().next().unwrap();
        let origin = draw.model.transform_point(&crate::foundation::math::Point3::origin());
        assert_relative_eq!(origin.coords, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_shared_mesh_uploaded_once_across_passes() {
        let scene = scene();
        let mut renderer = renderer(RecordingBackend::new());

        let first = renderer.render_container(&scene).unwrap();
        let second = renderer.render_container(&scene).unwrap();

        assert_eq!(first.meshes_uploaded, 2);
        assert_eq!(second.meshes_uploaded, 0);
        assert_eq!(second.draw_calls, 3);
        assert_eq!(renderer.backend().upload_count(), 2);
        assert_eq!(renderer.mesh_cache().len(), 2);

        let draws: Vec<_> = renderer.backend().draws().collect();
        assert_eq!(draws[0].mesh, draws[2].mesh);
        assert_ne!(draws[0].mesh, draws[1].mesh);
    }

    #[test]
    fn test_stack_back_at_base_after_pass() {
        let scene = scene();
        let mut renderer = renderer(RecordingBackend::new());
        renderer.render_container(&scene).unwrap();
        assert_eq!(renderer.stack_depth(), 1);
        assert_relative_eq!(*renderer.backend().model_view(), Mat4::identity());
    }

    #[test]
    fn test_model_view_includes_view() {
        let scene = scene();
        let view = Mat4::translation_matrix(Vec3::new(0.0, 0.0, -10.0)) * Mat4::rotation_x(0.3);
        let mut renderer = renderer(RecordingBackend::new());
        renderer.set_view(view);
        renderer.render_container(&scene).unwrap();

        for draw in renderer.backend().draws() {
            assert_relative_eq!(draw.model_view, view * draw.model, epsilon = 1e-6);
        }
        // Last pop restores the base level
        assert_relative_eq!(*renderer.backend().model_view(), view, epsilon = 1e-6);
    }

    #[test]
    fn test_model_view_updated_after_each_transform_and_pop() {
        let scene = SceneContainer::from_root(
            SceneNode::new()
                .with_transform(TransformData::from_translation(Vec3::new(0.0, 3.0, 0.0)))
                .with_child(SceneNode::new()),
        );
        let mut renderer = renderer(RecordingBackend::new());
        renderer.backend_mut().clear_commands();
        renderer.render_container(&scene).unwrap();

        let model_views: Vec<Mat4> = renderer
            .backend()
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::SetModelView(m) => Some(*m),
                _ => None,
            })
            .collect();

        let lifted = Mat4::translation_matrix(Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(model_views.len(), 3);
        assert_relative_eq!(model_views[0], lifted);
        // Child pop exposes the parent's accumulated level
        assert_relative_eq!(model_views[1], lifted);
        assert_relative_eq!(model_views[2], Mat4::identity());
    }

    #[test]
    fn test_upload_failure_aborts_pass() {
        let scene = scene();
        let mut renderer = renderer(RecordingBackend::new().with_upload_limit(1));

        let err = renderer.render_container(&scene).unwrap_err();
        assert!(matches!(err, RenderError::MeshUpload(_)));
        // A was drawn before A1's upload failed; B was never reached
        assert_eq!(renderer.backend().draw_count(), 1);
    }

    #[test]
    fn test_renderer_recovers_on_next_pass() {
        let scene = scene();
        let mut renderer = renderer(RecordingBackend::new().with_upload_limit(1));
        assert!(renderer.render_container(&scene).is_err());

        let ok_scene = SceneContainer::from_root(
            SceneNode::new()
                .with_transform(TransformData::from_translation(Vec3::new(5.0, 0.0, 0.0)))
                .with_mesh(scene.find_node("A").unwrap().mesh().unwrap().clone()),
        );
        renderer.backend_mut().clear_commands();
        let stats = renderer.render_container(&ok_scene).unwrap();

        assert_eq!(stats.draw_calls, 1);
        assert_eq!(renderer.stack_depth(), 1);
        let draw = renderer.backend().draws().next().unwrap();
        assert_relative_eq!(draw.model, Mat4::translation_matrix(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_nodes_without_payload_are_skipped() {
        let scene = SceneContainer::new(vec![
            SceneNode::new(),
            SceneNode::new().with_child(SceneNode::new().with_mesh(triangle("Deep"))),
        ]);
        let mut renderer = renderer(RecordingBackend::new());
        let stats = renderer.render_container(&scene).unwrap();
        assert_eq!(stats.nodes_visited, 3);
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.material_binds, 0);
    }
}
