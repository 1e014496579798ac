//! Signals the sequencer raises for the presentation layer.
//!
//! Collaborators drain these after each tick and react however they like
//! (camera moves, panel toggles). The sequencer never waits on them.

use crate::scene::ObjectId;
use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEvent {
    /// A selection was accepted; the arm starts reaching for the object.
    Selected {
        object: ObjectId,
        /// Content key of the object, e.g. `box1`.
        label: String,
        target: Vec3,
    },
    /// The arm touched the object and now holds it (`tap → carry`).
    GraspStarted { object: ObjectId },
    /// The object was released on the drop point (`down → up`).
    ObjectPlaced { object: ObjectId, position: Vec3 },
    /// The arm left the drop point and is heading home (`carry → return`).
    SequenceComplete { object: ObjectId },
    /// Back in `idle`; `input_restored` is set when a pending input lock
    /// was lifted on this transition.
    IdleResumed { input_restored: bool },
}

/// Observable switches for the surrounding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerFlags {
    /// Whether user camera orbiting should be allowed.
    pub orbit_enabled: bool,
    /// Set while a selection is in flight and input is locked.
    pub awaiting_return: bool,
}

impl Default for SequencerFlags {
    fn default() -> Self {
        Self {
            orbit_enabled: true,
            awaiting_return: false,
        }
    }
}
