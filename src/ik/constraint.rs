use std::fmt::Debug;

/// Clipping policy applied to a candidate joint angle.
pub trait Constraint: Send + Sync + Debug {
    fn apply(&self, angle: f32) -> f32;
    fn clone_box(&self) -> Box<dyn Constraint>;
}

impl Clone for Box<dyn Constraint> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleLimits {
    pub min: f32,
    pub max: f32,
}

impl AngleLimits {
    pub fn new(min_degrees: f32, max_degrees: f32) -> Self {
        Self::from_radians(min_degrees.to_radians(), max_degrees.to_radians())
    }

    pub fn from_radians(min: f32, max: f32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn symmetric(max_degrees: f32) -> Self {
        Self::new(-max_degrees, max_degrees)
    }
}

impl Constraint for AngleLimits {
    fn apply(&self, angle: f32) -> f32 {
        angle.clamp(self.min, self.max)
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }
}
