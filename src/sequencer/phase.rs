use crate::math::Transform;
use crate::scene::ObjectId;
use glam::Vec3;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Tap,
    Carry,
    Return,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Tap => "tap",
            Phase::Carry => "carry",
            Phase::Return => "return",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-state of `carry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarryStep {
    /// Heading for the hover waypoint with the object attached.
    Above,
    /// Lowering onto the drop point.
    Down,
    /// Object released; retreating to the hover waypoint.
    Up,
}

impl CarryStep {
    pub fn as_str(self) -> &'static str {
        match self {
            CarryStep::Above => "above",
            CarryStep::Down => "down",
            CarryStep::Up => "up",
        }
    }
}

impl fmt::Display for CarryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// World-space waypoints for the carried object's centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPlan {
    pub hover_center: Vec3,
    pub down_center: Vec3,
}

impl PlacementPlan {
    pub fn new(drop_point: Vec3, hover_height: f32) -> Self {
        Self {
            hover_center: drop_point + Vec3::Y * hover_height,
            down_center: drop_point,
        }
    }

    pub fn waypoint(&self, step: CarryStep) -> Vec3 {
        match step {
            CarryStep::Above | CarryStep::Up => self.hover_center,
            CarryStep::Down => self.down_center,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarriedObject {
    pub id: ObjectId,
    /// World transform the object had just before it was grasped.
    pub original: Transform,
    /// Object centre relative to the effector (effector-local).
    pub grasp_offset: Vec3,
    pub plan: PlacementPlan,
    pub step: CarryStep,
}

impl CarriedObject {
    pub fn active_waypoint(&self) -> Vec3 {
        self.plan.waypoint(self.step)
    }
}

/// Phase together with the data only that phase may hold.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum PhaseState {
    #[default]
    Idle,
    Tap {
        object: ObjectId,
        target: Vec3,
    },
    Carry(CarriedObject),
    Return,
}

impl PhaseState {
    pub(crate) fn phase(&self) -> Phase {
        match self {
            PhaseState::Idle => Phase::Idle,
            PhaseState::Tap { .. } => Phase::Tap,
            PhaseState::Carry(_) => Phase::Carry,
            PhaseState::Return => Phase::Return,
        }
    }
}

/// Effector position that puts the grasp point at `center`, given the
/// effector's current orientation and scale.
pub fn effector_target_for_center(effector: &Transform, center: Vec3, grasp_offset: Vec3) -> Vec3 {
    center - effector.transform_vector(grasp_offset)
}

/// Where a carried object's centre sits for the given effector frame.
pub fn grasp_point(effector: &Transform, grasp_offset: Vec3) -> Vec3 {
    effector.transform_point(grasp_offset)
}
