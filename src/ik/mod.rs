//! Inverse Kinematics module
//!
//! Revolute-joint chains, forward kinematics and the CCD solver.

pub mod chain;
pub mod constraint;
pub mod joint;
pub mod pose;
pub mod solver;

pub use chain::{ChainBuilder, ChainFrames, KinematicChain};
pub use constraint::{AngleLimits, Constraint};
pub use joint::RevoluteJoint;
pub use pose::JointPose;
pub use solver::{CcdSolver, SolveResult};
