use super::chain::KinematicChain;
use super::pose::JointPose;
use glam::Vec3;

#[derive(Debug, Clone)]
pub struct SolveResult {
    pub pose: JointPose,
    pub converged: bool,
    pub iterations: u32,
    pub final_distance: f32,
}

/// Cyclic coordinate descent over revolute joints.
///
/// Each sweep walks from the last joint to the first and turns every joint
/// about its world axis so the effector swings toward the target. The
/// chain passed in is only read; the returned pose starts from its current
/// angles.
pub struct CcdSolver;

impl CcdSolver {
    /// Returns `None` only for a chain without joints. An unreachable target
    /// still yields the closest pose the sweeps found.
    pub fn solve(chain: &KinematicChain, target: Vec3) -> Option<SolveResult> {
        if chain.joints.is_empty() {
            return None;
        }

        let mut angles = chain.angles();
        let tolerance = chain.tolerance;
        let max_iterations = chain.max_iterations;

        let mut distance = Self::distance_to(chain, &angles, target);
        if distance <= tolerance {
            return Some(Self::result(chain, angles, true, 0, distance));
        }

        for iteration in 0..max_iterations {
            Self::sweep(chain, &mut angles, target);

            distance = Self::distance_to(chain, &angles, target);
            if distance <= tolerance {
                return Some(Self::result(chain, angles, true, iteration + 1, distance));
            }
        }

        Some(Self::result(chain, angles, false, max_iterations, distance))
    }

    fn sweep(chain: &KinematicChain, angles: &mut [f32], target: Vec3) {
        for i in (0..chain.joints.len()).rev() {
            let frames = chain.frames_at(angles);
            let axis = frames.axes[i];
            if axis.length_squared() < 0.0001 {
                continue;
            }

            let pivot = frames.pivots[i];
            let to_effector = Self::project_onto_plane(frames.effector_position() - pivot, axis);
            let to_target = Self::project_onto_plane(target - pivot, axis);

            if to_effector.length_squared() < 1e-8 || to_target.length_squared() < 1e-8 {
                continue;
            }

            let delta = axis
                .dot(to_effector.cross(to_target))
                .atan2(to_effector.dot(to_target));

            let joint = &chain.joints[i];
            angles[i] = joint.apply_constraint(angles[i] + delta);
        }
    }

    fn project_onto_plane(v: Vec3, normal: Vec3) -> Vec3 {
        v - normal * v.dot(normal)
    }

    fn distance_to(chain: &KinematicChain, angles: &[f32], target: Vec3) -> f32 {
        (chain.frames_at(angles).effector_position() - target).length()
    }

    fn result(
        chain: &KinematicChain,
        angles: Vec<f32>,
        converged: bool,
        iterations: u32,
        final_distance: f32,
    ) -> SolveResult {
        SolveResult {
            pose: JointPose::new(chain.names(), angles),
            converged,
            iterations,
            final_distance,
        }
    }
}
