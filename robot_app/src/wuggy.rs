//! The wuggy rover, imported from a scene document
//!
//! Wheels spin with the forward axis, the small front wheels steer, and the
//! neck telescopes within fixed bounds. Driving moves the whole rover along
//! its current heading.

use scene_engine::control::{AxisController, AxisRule, ControlAxes, ControlStep, RuleTarget};
use scene_engine::foundation::math::{Axis, Vec3};
use scene_engine::scene::{NodeIndex, SceneContainer, SceneResult};

use crate::script::{AXIS_AD, AXIS_LEFT_RIGHT, AXIS_UP_DOWN, AXIS_WS};

/// Asset name of the scene document
pub const ASSET: &str = "wuggy.ron";
/// Scene document text
pub const DOCUMENT: &str = include_str!("../assets/wuggy.ron");

const WHEELS: [&str; 4] = ["WheelBigL", "WheelBigR", "WheelSmallL", "WheelSmallR"];
const NECK: &str = "NeckHi";
const NECK_TRAVEL: (f32, f32) = (-30.0, 25.0);

/// Wheel spin, steering and neck rules
pub fn controller() -> AxisController {
    let mut controller = AxisController::default();
    for wheel in WHEELS {
        controller = controller.with_rule(AxisRule::new(wheel, AXIS_WS, RuleTarget::Rotation, Axis::X, -0.05));
    }
    for wheel in ["WheelSmallL", "WheelSmallR"] {
        controller = controller.with_rule(AxisRule::new(wheel, AXIS_AD, RuleTarget::Rotation, Axis::Y, -0.3).set_mode());
    }
    controller
        .with_rule(AxisRule::new(NECK, AXIS_LEFT_RIGHT, RuleTarget::Rotation, Axis::Y, 0.05))
        .with_rule(
            AxisRule::new(NECK, AXIS_UP_DOWN, RuleTarget::Translation, Axis::Y, 0.5).clamped(NECK_TRAVEL.0, NECK_TRAVEL.1),
        )
}

/// Moves the rover body along its heading and turns it
#[derive(Debug, Clone)]
pub struct Drive {
    body: String,
    speed: f32,
    turn_rate: f32,
}

impl Drive {
    /// Drive the node called `body`
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            speed: 0.05,
            turn_rate: 0.05,
        }
    }
}

impl ControlStep for Drive {
    fn apply(&mut self, scene: &mut SceneContainer, index: &NodeIndex, axes: &ControlAxes) -> SceneResult<()> {
        let transform = scene.node_mut(index, &self.body)?.transform_mut();
        let heading = transform.rotation.y;
        let forward = axes.get(AXIS_WS) * self.speed;

        transform.translate_by(Vec3::new(-heading.sin() * forward, 0.0, -heading.cos() * forward));
        transform.rotate_by(Vec3::new(0.0, self.turn_rate * axes.get(AXIS_AD), 0.0));
        Ok(())
    }
}
