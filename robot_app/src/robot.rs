//! The articulated robot, built from literal nodes
//!
//! Arms hang from the shoulders with their pivot at the top end, so rotating
//! an arm swings it around the shoulder joint and carries elbow and hand with it.

use scene_engine::assets::{load_mesh, AssetError, AssetStore};
use scene_engine::control::{AxisController, AxisRule, RuleTarget};
use scene_engine::foundation::math::{Axis, Vec3};
use scene_engine::scene::{MaterialDescriptor, MeshRef, SceneContainer, SceneNode, TransformData};

use crate::script::{AXIS_AD, AXIS_LEFT_RIGHT};

/// Mesh asset names registered by the host
pub const CUBE: &str = "Cube.ron";
pub const CYLINDER: &str = "Cylinder.ron";
pub const PYRAMID: &str = "Pyramid.ron";
pub const SPHERE: &str = "Sphere.ron";

struct Parts {
    cube: MeshRef,
    cylinder: MeshRef,
    pyramid: MeshRef,
    sphere: MeshRef,
}

fn part(mesh: &MeshRef, translation: Vec3, model_scale: Vec3) -> SceneNode {
    SceneNode::new()
        .with_transform(TransformData::from_translation(translation))
        .with_mesh(mesh.clone())
        .with_model_scale(model_scale)
}

fn leg(parts: &Parts, side: &str, x: f32) -> SceneNode {
    part(&parts.cylinder, Vec3::new(x, 1.0, 0.0), Vec3::new(0.15, 1.0, 0.15))
        .named(format!("{side}LegMesh"))
        .with_material(MaterialDescriptor::diffuse(0.6, 0.6, 0.6))
        .with_child(
            part(&parts.pyramid, Vec3::new(0.0, -1.0, -0.1), Vec3::new(0.25, 0.1, 0.6))
                .named(format!("{side}FootMesh"))
                .with_material(MaterialDescriptor::diffuse(0.2, 0.2, 0.2)),
        )
}

fn arm(parts: &Parts, side: &str, x: f32) -> SceneNode {
    let hand = part(&parts.sphere, Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.25, 0.5, 0.25))
        .named(format!("{side}HandMesh"))
        .with_material(MaterialDescriptor::diffuse(0.8, 0.7, 0.5));

    let elbow = part(&parts.sphere, Vec3::zeros(), Vec3::new(0.25, 0.25, 0.25))
        .named(format!("{side}ElbowMesh"))
        .with_material(MaterialDescriptor::diffuse(0.2, 0.5, 0.2))
        .with_child(hand);

    let arm = SceneNode::new()
        .named(format!("{side}ArmMesh"))
        .with_transform(TransformData::from_translation(Vec3::new(0.0, -1.0, 0.0)).with_pivot(Vec3::new(0.0, 1.0, 0.0)))
        .with_mesh(parts.cylinder.clone())
        .with_model_scale(Vec3::new(0.15, 1.0, 0.15))
        .with_material(MaterialDescriptor::diffuse(0.6, 0.6, 0.6))
        .with_child(elbow);

    part(&parts.sphere, Vec3::new(x, 3.5, 0.0), Vec3::new(0.25, 0.25, 0.25))
        .named(format!("{side}ShoulderMesh"))
        .with_child(arm)
}

/// Build the robot from the primitive meshes in `store`
pub fn build<S: AssetStore + ?Sized>(store: &mut S) -> Result<SceneContainer, AssetError> {
    let parts = Parts {
        cube: load_mesh(store, CUBE)?,
        cylinder: load_mesh(store, CYLINDER)?,
        pyramid: load_mesh(store, PYRAMID)?,
        sphere: load_mesh(store, SPHERE)?,
    };

    let body = part(&parts.cube, Vec3::new(0.0, 2.75, 0.0), Vec3::new(0.5, 1.0, 0.25))
        .named("bodyMesh")
        .with_material(
            MaterialDescriptor::diffuse(0.3, 0.4, 0.8).with_specular(Vec3::new(1.0, 1.0, 1.0), 0.5, 16.0),
        );
    let head = part(&parts.sphere, Vec3::new(0.0, 4.2, 0.0), Vec3::new(0.35, 0.5, 0.35))
        .named("headMesh")
        .with_material(MaterialDescriptor::diffuse(0.8, 0.7, 0.5));

    let root = SceneNode::new().named("robot").with_children([
        body,
        leg(&parts, "right", -0.25),
        leg(&parts, "left", 0.25),
        arm(&parts, "right", -0.75),
        arm(&parts, "left", 0.75),
        head,
    ]);

    Ok(SceneContainer::from_root(root))
}

/// Arm pitch from the AD and left/right axes
pub fn controller() -> AxisController {
    AxisController::default()
        .with_rule(AxisRule::new("rightArmMesh", AXIS_AD, RuleTarget::Rotation, Axis::X, 0.1))
        .with_rule(AxisRule::new("leftArmMesh", AXIS_LEFT_RIGHT, RuleTarget::Rotation, Axis::X, 0.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::embedded_store;
    use scene_engine::control::{ControlAxes, ControlStep};

    #[test]
    fn test_robot_shape() {
        let mut store = embedded_store().unwrap();
        let robot = build(&mut store).unwrap();
        // root, body, 2 x (leg, foot), 2 x (shoulder, arm, elbow, hand), head
        assert_eq!(robot.node_count(), 15);

        let meshes = robot.find_nodes(|n| n.mesh().is_some());
        assert_eq!(meshes.len(), 14);
    }

    #[test]
    fn test_arm_swings_around_shoulder() {
        let mut store = embedded_store().unwrap();
        let mut robot = build(&mut store).unwrap();
        let index = robot.build_index();
        let mut controls = controller();

        let axes = ControlAxes::new().with(AXIS_AD, 5.0);
        controls.apply(&mut robot, &index, &axes).unwrap();

        let arm = robot.find_node("rightArmMesh").unwrap().transform().unwrap();
        assert!((arm.rotation.x - 0.5).abs() < 1e-6);
        let left = robot.find_node("leftArmMesh").unwrap().transform().unwrap();
        assert_eq!(left.rotation.x, 0.0);
    }
}
