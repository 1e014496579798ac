//! Workcell description: arm geometry, sequencer tuning and object layout.
//!
//! Everything has a default matching the showcase scene, so a RON file only
//! needs the fields it wants to change.

use crate::error::ConfigError;
use crate::ik::{AngleLimits, KinematicChain, RevoluteJoint};
use crate::math::Transform;
use crate::scene::Scene;
use crate::sequencer::SequencerConfig;
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointConfig {
    pub name: String,
    pub axis: Vec3,
    pub origin: Vec3,
    /// `(min, max)` in degrees; absent means unlimited.
    #[serde(default)]
    pub limits_degrees: Option<(f32, f32)>,
}

impl JointConfig {
    fn new(name: &str, axis: Vec3, origin: Vec3, limits_degrees: Option<(f32, f32)>) -> Self {
        Self {
            name: name.to_string(),
            axis,
            origin,
            limits_degrees,
        }
    }

    fn to_joint(&self) -> RevoluteJoint {
        let joint = RevoluteJoint::new(self.name.clone(), self.axis, self.origin);
        match self.limits_degrees {
            Some((min, max)) => joint.with_constraint(AngleLimits::new(min, max)),
            None => joint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    pub base: Transform,
    pub joints: Vec<JointConfig>,
    /// End-effector point in the last link frame.
    pub effector_offset: Vec3,
    pub tolerance: f32,
    pub max_iterations: u32,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            base: Transform::IDENTITY,
            joints: vec![
                JointConfig::new("joint1", Vec3::Y, Vec3::ZERO, None),
                JointConfig::new("joint2", Vec3::X, Vec3::new(0.0, 0.5, 0.0), Some((-115.0, 115.0))),
                JointConfig::new("joint3", Vec3::X, Vec3::new(0.0, 0.55, 0.0), Some((-150.0, 150.0))),
                JointConfig::new("joint4", Vec3::X, Vec3::new(0.0, 0.5, 0.0), Some((-115.0, 115.0))),
            ],
            effector_offset: Vec3::new(0.0, 0.12, 0.0),
            tolerance: 0.001,
            max_iterations: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub label: String,
    pub position: Vec3,
    /// Edge length of the cube.
    #[serde(default = "ObjectConfig::default_size")]
    pub size: f32,
}

impl ObjectConfig {
    fn default_size() -> f32 {
        0.25
    }

    fn new(label: &str, position: Vec3) -> Self {
        Self {
            label: label.to_string(),
            position,
            size: Self::default_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkcellConfig {
    pub arm: ArmConfig,
    pub sequencer: SequencerConfig,
    pub objects: Vec<ObjectConfig>,
}

impl Default for WorkcellConfig {
    fn default() -> Self {
        let y = 0.7;
        Self {
            arm: ArmConfig::default(),
            sequencer: SequencerConfig::default(),
            objects: vec![
                ObjectConfig::new("box1", Vec3::new(-0.7, y, -0.6)),
                ObjectConfig::new("box2", Vec3::new(-0.25, y, -0.85)),
                ObjectConfig::new("box3", Vec3::new(0.25, y, -0.85)),
                ObjectConfig::new("box4", Vec3::new(0.7, y, -0.6)),
            ],
        }
    }
}

impl WorkcellConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;

        let config = Self::from_ron_str(&content).map_err(|e| match e {
            ConfigError::Parse { details, .. } => ConfigError::Parse {
                path: path_str.clone(),
                details,
            },
            other => other,
        })?;

        debug!(
            "loaded workcell '{}': {} joints, {} objects",
            path_str,
            config.arm.joints.len(),
            config.objects.len()
        );
        Ok(config)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::invalid("workcell", e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sequencer.validate()?;

        if self.arm.joints.is_empty() {
            return Err(ConfigError::invalid("arm.joints", "at least one joint is required"));
        }
        for joint in &self.arm.joints {
            if joint.axis.length_squared() < 1e-6 {
                return Err(ConfigError::invalid(
                    "arm.joints.axis",
                    format!("joint '{}' has a zero axis", joint.name),
                ));
            }
        }
        for (i, joint) in self.arm.joints.iter().enumerate() {
            if self.arm.joints[..i].iter().any(|j| j.name == joint.name) {
                return Err(ConfigError::invalid(
                    "arm.joints.name",
                    format!("duplicate joint name '{}'", joint.name),
                ));
            }
        }
        if !(self.arm.base.scale.min_element() > 0.0) {
            return Err(ConfigError::invalid("arm.base.scale", "must be positive"));
        }
        Ok(())
    }

    pub fn build_chain(&self) -> KinematicChain {
        self.arm
            .joints
            .iter()
            .fold(KinematicChain::builder().base(self.arm.base), |builder, joint| {
                builder.push_joint(joint.to_joint())
            })
            .effector_offset(self.arm.effector_offset)
            .tolerance(self.arm.tolerance)
            .max_iterations(self.arm.max_iterations)
            .build()
    }

    pub fn build_scene(&self) -> Scene {
        let mut scene = Scene::new(self.build_chain());
        for object in &self.objects {
            scene.spawn(
                object.label.clone(),
                Transform::from_position(object.position),
                Vec3::splat(object.size * 0.5),
            );
        }
        scene
    }
}
