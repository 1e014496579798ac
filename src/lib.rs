//! # arm-pickplace
//!
//! Inverse kinematics and per-frame phase sequencing for a robot arm that
//! picks a box off a plinth and sets it down on a pedestal.
//!
//! ## Features
//! - Revolute-joint chains with optional angle limits
//! - Cyclic coordinate descent (CCD) solver
//! - Scene graph with explicit attach/detach of carried objects
//! - `idle → tap → carry → return` sequencer with collaborator events
//! - RON workcell configuration
//!
//! ## Example
//! ```rust,ignore
//! use arm_pickplace::{PhaseSequencer, WorkcellConfig};
//!
//! let config = WorkcellConfig::default();
//! let mut scene = config.build_scene();
//! let mut sequencer = PhaseSequencer::new(config.sequencer, &scene);
//!
//! let id = scene.object_by_label("box1").unwrap().id;
//! sequencer.select(&scene, id);
//!
//! // once per frame
//! let phase = sequencer.tick(&mut scene);
//! for event in sequencer.drain_events() {
//!     println!("{phase}: {event:?}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod ik;
pub mod math;
pub mod scene;
pub mod sequencer;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ArmConfig, JointConfig, ObjectConfig, WorkcellConfig};
pub use error::ConfigError;
pub use ik::{AngleLimits, CcdSolver, Constraint, JointPose, KinematicChain, RevoluteJoint, SolveResult};
pub use math::Transform;
pub use scene::{ObjectId, Parent, Ray, RayHit, Scene, SceneObject};
pub use sequencer::{
    CarriedObject, CarryStep, Phase, PhaseSequencer, PlacementPlan, SequencerConfig,
    SequencerEvent, SequencerFlags,
};
