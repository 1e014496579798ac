use super::constraint::Constraint;
use super::joint::RevoluteJoint;
use super::pose::JointPose;
use crate::math::Transform;
use glam::Vec3;

/// World-space frames of a chain evaluated at some set of angles.
#[derive(Debug, Clone)]
pub struct ChainFrames {
    /// Pivot of each joint.
    pub pivots: Vec<Vec3>,
    /// Rotation axis of each joint, unit length.
    pub axes: Vec<Vec3>,
    pub effector: Transform,
}

impl ChainFrames {
    pub fn effector_position(&self) -> Vec3 {
        self.effector.position
    }
}

/// Ordered revolute joints rooted at a fixed base, ending in an end effector.
#[derive(Debug, Clone)]
pub struct KinematicChain {
    pub(crate) joints: Vec<RevoluteJoint>,
    pub(crate) base: Transform,
    pub(crate) effector_offset: Vec3,
    pub(crate) tolerance: f32,
    pub(crate) max_iterations: u32,
}

impl KinematicChain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    pub fn joints(&self) -> &[RevoluteJoint] {
        &self.joints
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn names(&self) -> Vec<String> {
        self.joints.iter().map(|j| j.name.clone()).collect()
    }

    pub fn angles(&self) -> Vec<f32> {
        self.joints.iter().map(|j| j.angle).collect()
    }

    pub fn pose(&self) -> JointPose {
        JointPose::new(self.names(), self.angles())
    }

    /// Sets one joint's angle through its clipping policy.
    pub fn set_angle(&mut self, name: &str, angle: f32) -> bool {
        match self.joints.iter_mut().find(|j| j.name == name) {
            Some(joint) => {
                joint.angle = joint.apply_constraint(angle);
                true
            }
            None => false,
        }
    }

    /// Writes every angle the pose names; joints it does not name keep theirs.
    pub fn apply_pose(&mut self, pose: &JointPose) {
        for joint in &mut self.joints {
            if let Some(angle) = pose.get(&joint.name) {
                joint.angle = joint.apply_constraint(angle);
            }
        }
    }

    pub fn base(&self) -> Transform {
        self.base
    }

    pub fn effector_offset(&self) -> Vec3 {
        self.effector_offset
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Upper bound on base-pivot → effector distance, in world units.
    pub fn total_reach(&self) -> f32 {
        let links: f32 = self.joints.iter().skip(1).map(|j| j.origin.length()).sum();
        (links + self.effector_offset.length()) * self.base.scale.max_element()
    }

    /// Forward kinematics at the given angles (one per joint, chain order).
    pub fn frames_at(&self, angles: &[f32]) -> ChainFrames {
        debug_assert_eq!(angles.len(), self.joints.len());

        let n = self.joints.len();
        let mut pivots = Vec::with_capacity(n);
        let mut axes = Vec::with_capacity(n);

        let mut frame = self.base;
        for (joint, &angle) in self.joints.iter().zip(angles) {
            pivots.push(frame.transform_point(joint.origin));
            axes.push(frame.transform_direction(joint.axis).normalize_or_zero());

            let local = Transform::from_position_rotation(joint.origin, joint.rotation_at(angle));
            frame = frame.mul_transform(&local);
        }

        let effector = frame.mul_transform(&Transform::from_position(self.effector_offset));

        ChainFrames {
            pivots,
            axes,
            effector,
        }
    }

    pub fn frames(&self) -> ChainFrames {
        self.frames_at(&self.angles())
    }

    pub fn effector_transform(&self) -> Transform {
        self.frames().effector
    }

    pub fn effector_position(&self) -> Vec3 {
        self.effector_transform().position
    }
}

pub struct ChainBuilder {
    joints: Vec<RevoluteJoint>,
    base: Transform,
    effector_offset: Vec3,
    tolerance: f32,
    max_iterations: u32,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self {
            joints: Vec::new(),
            base: Transform::IDENTITY,
            effector_offset: Vec3::ZERO,
            tolerance: 0.001,
            max_iterations: 16,
        }
    }

    pub fn base(mut self, base: Transform) -> Self {
        self.base = base;
        self
    }

    pub fn add_joint(mut self, name: impl Into<String>, axis: Vec3, origin: Vec3) -> Self {
        self.joints.push(RevoluteJoint::new(name, axis, origin));
        self
    }

    pub fn add_joint_with_constraint<C: Constraint + 'static>(
        mut self,
        name: impl Into<String>,
        axis: Vec3,
        origin: Vec3,
        constraint: C,
    ) -> Self {
        self.joints
            .push(RevoluteJoint::new(name, axis, origin).with_constraint(constraint));
        self
    }

    pub fn push_joint(mut self, joint: RevoluteJoint) -> Self {
        self.joints.push(joint);
        self
    }

    pub fn effector_offset(mut self, offset: Vec3) -> Self {
        self.effector_offset = offset;
        self
    }

    pub fn tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn build(self) -> KinematicChain {
        KinematicChain {
            joints: self.joints,
            base: self.base,
            effector_offset: self.effector_offset,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
