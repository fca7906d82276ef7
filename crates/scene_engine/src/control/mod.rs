//! Control-update phase
//!
//! Between traversal passes the host feeds continuous input axes into node
//! transforms. This is an explicit step over `&mut SceneContainer`: nodes are
//! resolved by name through a [`NodeIndex`] and changed only through
//! [`TransformData`](crate::scene::TransformData) setters. Traversal itself
//! never mutates the scene.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::Axis;
use crate::scene::{NodeIndex, SceneContainer, SceneResult};

/// Named continuous input axes for one frame
///
/// Axes that were never set read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlAxes {
    values: HashMap<String, f32>,
}

impl ControlAxes {
    /// No axes set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set an axis
    pub fn with(mut self, name: impl Into<String>, value: f32) -> Self {
        self.set(name, value);
        self
    }

    /// Set an axis value
    pub fn set(&mut self, name: impl Into<String>, value: f32) {
        self.values.insert(name.into(), value);
    }

    /// Axis value, `0.0` when unset
    pub fn get(&self, name: &str) -> f32 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    /// Reset every axis to `0.0`
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// One control-update step, run before a traversal pass
pub trait ControlStep {
    /// Apply this frame's input to the scene
    ///
    /// # Errors
    /// [`SceneError::NodeNotFound`](crate::scene::SceneError::NodeNotFound)
    /// when a controlled node is missing from `index`.
    fn apply(&mut self, scene: &mut SceneContainer, index: &NodeIndex, axes: &ControlAxes) -> SceneResult<()>;
}

/// Transform channel driven by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleTarget {
    /// Euler angle in radians
    Rotation,
    /// Translation component
    Translation,
}

/// How the scaled axis value combines with the current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleMode {
    /// Add to the current value every frame
    #[default]
    Accumulate,
    /// Replace the current value
    Set,
}

/// Maps one input axis onto one transform component of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisRule {
    /// Node name, resolved through the index
    pub node: String,
    /// Input axis name
    pub input: String,
    /// Transform channel
    pub target: RuleTarget,
    /// Component of the channel
    pub component: Axis,
    /// Multiplier on the input value
    #[serde(default = "unit_gain")]
    pub gain: f32,
    /// Combination mode
    #[serde(default)]
    pub mode: RuleMode,
    /// Optional `(min, max)` bounds on the result
    #[serde(default)]
    pub clamp: Option<(f32, f32)>,
}

fn unit_gain() -> f32 {
    1.0
}

impl AxisRule {
    /// Accumulating rule without bounds
    pub fn new(node: impl Into<String>, input: impl Into<String>, target: RuleTarget, component: Axis, gain: f32) -> Self {
        Self {
            node: node.into(),
            input: input.into(),
            target,
            component,
            gain,
            mode: RuleMode::Accumulate,
            clamp: None,
        }
    }

    /// Builder pattern: replace instead of accumulate
    pub fn set_mode(mut self) -> Self {
        self.mode = RuleMode::Set;
        self
    }

    /// Builder pattern: bound the result
    pub fn clamped(mut self, min: f32, max: f32) -> Self {
        self.clamp = Some((min, max));
        self
    }
}

/// Declarative controller: a list of [`AxisRule`]s applied in order
///
/// Serializable, so mappings can live in a config file:
///
/// ```ron
/// (rules: [
///     (node: "NeckHi", input: "up_down", target: Translation, component: Y, gain: 0.5, clamp: Some((-30.0, 25.0))),
/// ])
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisController {
    /// Rules in application order
    pub rules: Vec<AxisRule>,
}

impl AxisController {
    /// Controller with the given rules
    pub fn new(rules: Vec<AxisRule>) -> Self {
        Self { rules }
    }

    /// Builder pattern: append a rule
    pub fn with_rule(mut self, rule: AxisRule) -> Self {
        self.rules.push(rule);
        self
    }
}

impl Config for AxisController {}

impl ControlStep for AxisController {
    fn apply(&mut self, scene: &mut SceneContainer, index: &NodeIndex, axes: &ControlAxes) -> SceneResult<()> {
        for rule in &self.rules {
            let input = axes.get(&rule.input) * rule.gain;
            let transform = scene.node_mut(index, &rule.node)?.transform_mut();
            let i = rule.component.index();

            let current = match rule.target {
                RuleTarget::Rotation => transform.rotation[i],
                RuleTarget::Translation => transform.translation[i],
            };
            let mut value = match rule.mode {
                RuleMode::Accumulate => current + input,
                RuleMode::Set => input,
            };
            if let Some((min, max)) = rule.clamp {
                value = value.clamp(min, max);
            }

            match rule.target {
                RuleTarget::Rotation => transform.set_rotation_axis(rule.component, value),
                RuleTarget::Translation => transform.set_translation_axis(rule.component, value),
            }
        }
        Ok(())
    }
}
