//! WASM entry point - exposes the showcase sequencer to the page script.
//!
//! The page owns rendering, camera tweens and the side panel; it calls
//! `tick` once per animation frame and polls `next_event` to react.

use crate::config::WorkcellConfig;
use crate::scene::{Ray, Scene};
use crate::sequencer::{PhaseSequencer, SequencerEvent};
use glam::Vec3;
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct ArmShowcase {
    scene: Scene,
    sequencer: PhaseSequencer,
    pending: VecDeque<SequencerEvent>,
}

#[wasm_bindgen]
impl ArmShowcase {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ArmShowcase {
        Self::from_config(WorkcellConfig::default())
    }

    /// Builds from a RON workcell description, falling back to the showcase.
    pub fn from_ron(source: &str) -> ArmShowcase {
        match WorkcellConfig::from_ron_str(source) {
            Ok(config) => Self::from_config(config),
            Err(e) => {
                log::error!("workcell config rejected: {e}");
                Self::new()
            }
        }
    }

    /// Casts a pick ray; returns the picked object's label.
    pub fn pick(&mut self, ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) -> Option<String> {
        let ray = Ray::new(Vec3::new(ox, oy, oz), Vec3::new(dx, dy, dz));
        let id = self.sequencer.pick(&self.scene, &ray)?;
        self.scene.object(id).map(|o| o.label.clone())
    }

    pub fn tick(&mut self) -> String {
        let phase = self.sequencer.tick(&mut self.scene);
        self.pending.extend(self.sequencer.drain_events());
        phase.to_string()
    }

    /// Next queued event as `kind:label`, e.g. `placed:box2`.
    pub fn next_event(&mut self) -> Option<String> {
        let event = self.pending.pop_front()?;
        let label = |id| {
            self.scene
                .object(id)
                .map(|o| o.label.clone())
                .unwrap_or_default()
        };
        Some(match event {
            SequencerEvent::Selected { label, .. } => format!("selected:{label}"),
            SequencerEvent::GraspStarted { object } => format!("grasp:{}", label(object)),
            SequencerEvent::ObjectPlaced { object, .. } => format!("placed:{}", label(object)),
            SequencerEvent::SequenceComplete { object } => format!("complete:{}", label(object)),
            SequencerEvent::IdleResumed { input_restored } => format!("idle:{input_restored}"),
        })
    }

    pub fn orbit_enabled(&self) -> bool {
        self.sequencer.flags().orbit_enabled
    }

    pub fn joint_angles(&self) -> Vec<f32> {
        self.scene.chain().angles()
    }

    /// World position of an object as `[x, y, z]`, empty if unknown.
    pub fn object_position(&self, label: &str) -> Vec<f32> {
        self.scene
            .object_by_label(label)
            .and_then(|o| self.scene.world_position(o.id))
            .map(|p| p.to_array().to_vec())
            .unwrap_or_default()
    }

    /// Puts a placed object back on its plinth; only while idle.
    pub fn reset_object(&mut self, label: &str) -> bool {
        let Some(id) = self.scene.object_by_label(label).map(|o| o.id) else {
            return false;
        };
        self.sequencer.reset_object(&mut self.scene, id)
    }
}

impl ArmShowcase {
    fn from_config(config: WorkcellConfig) -> Self {
        let scene = config.build_scene();
        let sequencer = PhaseSequencer::new(config.sequencer, &scene);
        Self {
            scene,
            sequencer,
            pending: VecDeque::new(),
        }
    }
}

impl Default for ArmShowcase {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Warn).expect("Failed to init logger");
}
