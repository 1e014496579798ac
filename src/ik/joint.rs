use super::constraint::Constraint;
use glam::{Quat, Vec3};

/// A named revolute joint.
///
/// `origin` is the pivot's offset from the previous link frame and `axis` is
/// the rotation axis expressed in that same frame.
#[derive(Debug, Clone)]
pub struct RevoluteJoint {
    pub name: String,
    pub axis: Vec3,
    pub origin: Vec3,
    pub angle: f32,
    pub constraint: Option<Box<dyn Constraint>>,
}

impl RevoluteJoint {
    pub fn new(name: impl Into<String>, axis: Vec3, origin: Vec3) -> Self {
        Self {
            name: name.into(),
            axis: axis.normalize_or_zero(),
            origin,
            angle: 0.0,
            constraint: None,
        }
    }

    pub fn with_constraint<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.constraint = Some(Box::new(constraint));
        self
    }

    pub fn apply_constraint(&self, angle: f32) -> f32 {
        match &self.constraint {
            Some(c) => c.apply(angle),
            None => angle,
        }
    }

    /// Local rotation contributed by this joint at `angle`.
    pub fn rotation_at(&self, angle: f32) -> Quat {
        if self.axis.length_squared() < 0.0001 {
            return Quat::IDENTITY;
        }
        Quat::from_axis_angle(self.axis, angle)
    }
}
