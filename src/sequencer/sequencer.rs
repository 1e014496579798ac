use super::config::SequencerConfig;
use super::events::{SequencerEvent, SequencerFlags};
use super::phase::{
    effector_target_for_center, grasp_point, CarriedObject, CarryStep, Phase, PhaseState,
    PlacementPlan,
};
use crate::ik::{CcdSolver, JointPose};
use crate::math::Transform;
use crate::scene::{ObjectId, Ray, Scene};
use glam::Vec3;
use log::{debug, info, warn};
use std::collections::VecDeque;

/// Per-frame state machine driving the arm through `idle → tap → carry → return`.
///
/// All sequencing state lives here; the scene is borrowed for the duration
/// of a call and never stored.
#[derive(Debug, Clone)]
pub struct PhaseSequencer {
    config: SequencerConfig,
    idle_pose: JointPose,
    state: PhaseState,
    flags: SequencerFlags,
    ticks_in_phase: u32,
    events: VecDeque<SequencerEvent>,
}

impl PhaseSequencer {
    /// Solves the rest pose for `config.wait_position` from the chain's
    /// current angles; the arm holds it whenever the sequencer is idle.
    pub fn new(config: SequencerConfig, scene: &Scene) -> Self {
        let chain = scene.chain();
        let idle_pose = match CcdSolver::solve(chain, config.wait_position) {
            Some(result) => {
                debug!(
                    "idle pose solved: distance {:.4} after {} iterations",
                    result.final_distance, result.iterations
                );
                result.pose
            }
            None => chain.pose(),
        };

        Self {
            config,
            idle_pose,
            state: PhaseState::Idle,
            flags: SequencerFlags::default(),
            ticks_in_phase: 0,
            events: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn idle_pose(&self) -> &JointPose {
        &self.idle_pose
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn step(&self) -> Option<CarryStep> {
        self.carried().map(|c| c.step)
    }

    /// The object being carried; `Some` exactly while the phase is `carry`.
    pub fn carried(&self) -> Option<&CarriedObject> {
        match &self.state {
            PhaseState::Carry(carried) => Some(carried),
            _ => None,
        }
    }

    /// The object currently being reached for or carried.
    pub fn selected(&self) -> Option<ObjectId> {
        match &self.state {
            PhaseState::Tap { object, .. } => Some(*object),
            PhaseState::Carry(carried) => Some(carried.id),
            _ => None,
        }
    }

    pub fn tap_target(&self) -> Option<Vec3> {
        match &self.state {
            PhaseState::Tap { target, .. } => Some(*target),
            _ => None,
        }
    }

    pub fn flags(&self) -> SequencerFlags {
        self.flags
    }

    pub fn ticks_in_phase(&self) -> u32 {
        self.ticks_in_phase
    }

    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        self.events.drain(..).collect()
    }

    /// Starts a pick for `id`. Ignored unless idle and the object is still
    /// loose on the scene root.
    pub fn select(&mut self, scene: &Scene, id: ObjectId) -> bool {
        if self.phase() != Phase::Idle {
            debug!("selection of {} ignored in phase {}", id, self.phase());
            return false;
        }

        let Some(object) = scene.object(id) else {
            debug!("selection of unknown object {} ignored", id);
            return false;
        };
        if !object.is_selectable() {
            debug!("selection of {} ignored: not selectable", object.label);
            return false;
        }

        let target = object.local.position;
        let label = object.label.clone();

        self.enter(PhaseState::Tap { object: id, target });
        self.flags.orbit_enabled = false;
        self.flags.awaiting_return = true;

        info!("phase → tap: {} at {:?}", label, target);
        self.events.push_back(SequencerEvent::Selected {
            object: id,
            label,
            target,
        });
        true
    }

    /// Ray-picks the nearest selectable object and selects it.
    pub fn pick(&mut self, scene: &Scene, ray: &Ray) -> Option<ObjectId> {
        if self.phase() != Phase::Idle {
            return None;
        }
        let (id, hit) = scene.pick(ray)?;
        debug!("pick hit {} at t={:.3}", id, hit.t);
        self.select(scene, id).then_some(id)
    }

    /// Puts a placed object back at its spawn point. Only honoured while idle.
    pub fn reset_object(&mut self, scene: &mut Scene, id: ObjectId) -> bool {
        if self.phase() != Phase::Idle {
            debug!("reset of {} ignored in phase {}", id, self.phase());
            return false;
        }
        scene.reset_object(id)
    }

    /// Advances one frame and returns the phase afterwards.
    pub fn tick(&mut self, scene: &mut Scene) -> Phase {
        self.ticks_in_phase = self.ticks_in_phase.saturating_add(1);

        if let Some(desired) = self.desired_pose(scene) {
            let next = scene.chain().pose().approach(&desired, self.config.smoothing);
            scene.chain_mut().apply_pose(&next);
        }

        match self.phase() {
            Phase::Tap => self.check_reach(scene),
            Phase::Carry => self.advance_carry(scene),
            Phase::Idle | Phase::Return => {}
        }

        self.phase()
    }

    fn desired_pose(&mut self, scene: &Scene) -> Option<JointPose> {
        let chain = scene.chain();
        let pose = match &self.state {
            PhaseState::Idle => Some(self.idle_pose.clone()),
            PhaseState::Tap { target, .. } => CcdSolver::solve(chain, *target).map(|r| r.pose),
            PhaseState::Carry(carried) => {
                let effector = scene.effector_transform();
                let target = effector_target_for_center(
                    &effector,
                    carried.active_waypoint(),
                    carried.grasp_offset,
                );
                CcdSolver::solve(chain, target).map(|r| r.pose)
            }
            PhaseState::Return => {
                CcdSolver::solve(chain, self.config.wait_position).map(|r| r.pose)
            }
        };

        // No distance gate on the way home: any solved pose ends the return.
        if self.phase() == Phase::Return && pose.is_some() {
            self.finish_return();
        }
        pose
    }

    fn check_reach(&mut self, scene: &mut Scene) {
        let PhaseState::Tap { object, target } = self.state else {
            return;
        };

        let distance = scene.effector_transform().position.distance(target);
        if distance >= self.config.reach_distance {
            return;
        }

        let Some(original) = scene.world_transform(object) else {
            warn!("object {} vanished during tap, returning", object);
            self.enter(PhaseState::Return);
            return;
        };

        scene.attach_to_effector(object, self.config.grasp_offset);
        scene.set_placed(object, true);

        let carried = CarriedObject {
            id: object,
            original,
            grasp_offset: self.config.grasp_offset,
            plan: PlacementPlan::new(self.config.drop_point, self.config.hover_height),
            step: CarryStep::Above,
        };

        info!(
            "phase → carry: grasped {} after {} ticks (distance {:.4})",
            object, self.ticks_in_phase, distance
        );
        self.enter(PhaseState::Carry(carried));
        self.events.push_back(SequencerEvent::GraspStarted { object });
    }

    fn advance_carry(&mut self, scene: &mut Scene) {
        let PhaseState::Carry(carried) = &mut self.state else {
            return;
        };

        let waypoint = carried.active_waypoint();
        let effector = scene.effector_transform();
        let center = grasp_point(&effector, carried.grasp_offset);
        if center.distance(waypoint) >= self.config.carry_tolerance {
            return;
        }

        match carried.step {
            CarryStep::Above => {
                carried.step = CarryStep::Down;
                debug!("carry step → down");
            }
            CarryStep::Down => {
                let id = carried.id;
                let position = carried.plan.down_center;
                let placed = Transform {
                    position,
                    ..carried.original
                };
                scene.release_to_root(id, placed);
                carried.step = CarryStep::Up;

                info!("object {} placed at {:?}, carry step → up", id, position);
                self.events
                    .push_back(SequencerEvent::ObjectPlaced { object: id, position });
            }
            CarryStep::Up => {
                let id = carried.id;
                info!("phase → return");
                self.enter(PhaseState::Return);
                self.events
                    .push_back(SequencerEvent::SequenceComplete { object: id });
            }
        }
    }

    fn finish_return(&mut self) {
        let input_restored = self.flags.awaiting_return;
        if input_restored {
            self.flags.awaiting_return = false;
            self.flags.orbit_enabled = true;
        }

        info!("phase → idle");
        self.enter(PhaseState::Idle);
        self.events
            .push_back(SequencerEvent::IdleResumed { input_restored });
    }

    fn enter(&mut self, state: PhaseState) {
        self.state = state;
        self.ticks_in_phase = 0;
    }
}
