//! Math utilities module
//!
//! Provides convenient re-exports from glam and additional transform utilities.

mod transform;

pub use transform::Transform;

// Re-export commonly used glam types
pub use glam::{Quat, Vec3};

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
