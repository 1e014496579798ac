//! Pick-and-place phase sequencing.

mod config;
mod events;
mod phase;
#[allow(clippy::module_inception)]
mod sequencer;

pub use config::SequencerConfig;
pub use events::{SequencerEvent, SequencerFlags};
pub use phase::{
    effector_target_for_center, grasp_point, CarriedObject, CarryStep, Phase, PlacementPlan,
};
pub use sequencer::PhaseSequencer;
