use crate::error::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Distances, offsets and rates that drive the pick-and-place sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Effector-to-object distance that counts as touching during `tap`.
    pub reach_distance: f32,
    /// Grasp-point-to-waypoint distance that advances a carry step.
    pub carry_tolerance: f32,
    /// Fraction of the remaining angle gap closed each tick.
    pub smoothing: f32,
    /// Height of the hover waypoint above the drop point.
    pub hover_height: f32,
    /// Where a carried object's centre is put down.
    pub drop_point: Vec3,
    /// Where the effector rests between sequences.
    pub wait_position: Vec3,
    /// Object centre relative to the effector while carried (effector-local).
    pub grasp_offset: Vec3,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            reach_distance: 0.04,
            carry_tolerance: 0.025,
            smoothing: 0.2,
            hover_height: 0.12,
            drop_point: Vec3::new(0.0, 0.305, 0.9),
            wait_position: Vec3::new(0.0, 1.0, 0.0),
            grasp_offset: Vec3::new(0.0, 0.08, 0.0),
        }
    }
}

impl SequencerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.reach_distance > 0.0) {
            return Err(ConfigError::invalid(
                "reach_distance",
                format!("must be positive, got {}", self.reach_distance),
            ));
        }
        if !(self.carry_tolerance > 0.0) {
            return Err(ConfigError::invalid(
                "carry_tolerance",
                format!("must be positive, got {}", self.carry_tolerance),
            ));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::invalid(
                "smoothing",
                format!("must be in (0, 1], got {}", self.smoothing),
            ));
        }
        if !self.hover_height.is_finite() {
            return Err(ConfigError::invalid("hover_height", "must be finite"));
        }
        Ok(())
    }
}
