use arm_pickplace::sequencer::grasp_point;
use arm_pickplace::{
    CarryStep, ObjectId, Parent, Phase, PhaseSequencer, Ray, Scene, SequencerEvent, Transform,
    WorkcellConfig,
};
use glam::Vec3;
use pretty_assertions::assert_eq;

const TAP_BUDGET: u32 = 600;
const CYCLE_BUDGET: u32 = 4_000;

fn showcase() -> (Scene, PhaseSequencer) {
    let config = WorkcellConfig::default();
    let scene = config.build_scene();
    let sequencer = PhaseSequencer::new(config.sequencer, &scene);
    (scene, sequencer)
}

fn id_of(scene: &Scene, label: &str) -> ObjectId {
    scene.object_by_label(label).map(|o| o.id).unwrap()
}

fn allowed(from: Phase, to: Phase) -> bool {
    from == to
        || matches!(
            (from, to),
            (Phase::Idle, Phase::Tap)
                | (Phase::Tap, Phase::Carry)
                | (Phase::Carry, Phase::Return)
                | (Phase::Return, Phase::Idle)
        )
}

struct Trace {
    phases: Vec<Phase>,
    events: Vec<SequencerEvent>,
    placed_snapshot: Option<(Transform, Parent, Option<CarryStep>)>,
}

/// Ticks until idle, checking the per-tick invariants on the way.
fn run_cycle(scene: &mut Scene, sequencer: &mut PhaseSequencer, object: ObjectId) -> Trace {
    let mut trace = Trace {
        phases: vec![sequencer.phase()],
        events: sequencer.drain_events(),
        placed_snapshot: None,
    };

    for _ in 0..CYCLE_BUDGET {
        let before = sequencer.phase();
        let after = sequencer.tick(scene);

        assert!(allowed(before, after), "illegal transition {before} → {after}");
        assert_eq!(sequencer.carried().is_some(), after == Phase::Carry);

        if let Some(carried) = sequencer.carried() {
            if matches!(carried.step, CarryStep::Above | CarryStep::Down) {
                assert_eq!(scene.object(object).unwrap().parent, Parent::Effector);
            }
        }

        for event in sequencer.drain_events() {
            if matches!(event, SequencerEvent::ObjectPlaced { .. }) {
                let object = scene.object(object).unwrap();
                trace.placed_snapshot = Some((object.local, object.parent, sequencer.step()));
            }
            trace.events.push(event);
        }

        trace.phases.push(after);
        if after == Phase::Idle {
            return trace;
        }
    }

    panic!(
        "cycle did not finish within {CYCLE_BUDGET} ticks, stuck in {} / {:?}",
        sequencer.phase(),
        sequencer.step()
    );
}

#[test]
fn tap_reaches_the_selected_object_then_grasps_it() {
    let (mut scene, mut sequencer) = showcase();
    let id = id_of(&scene, "box1");
    let pickup = scene.world_position(id).unwrap();
    let reach = sequencer.config().reach_distance;

    assert!(sequencer.select(&scene, id));
    assert_eq!(sequencer.phase(), Phase::Tap);

    let mut ticks = 0;
    while sequencer.phase() == Phase::Tap {
        assert!(ticks < TAP_BUDGET, "effector never got within {reach} of {pickup:?}");
        sequencer.tick(&mut scene);
        ticks += 1;
    }

    assert_eq!(sequencer.phase(), Phase::Carry);
    assert_eq!(sequencer.step(), Some(CarryStep::Above));
    assert!(scene.effector_transform().position.distance(pickup) < reach);

    let object = scene.object(id).unwrap();
    assert_eq!(object.parent, Parent::Effector);
    assert!(object.placed);

    let carried = sequencer.carried().unwrap();
    assert_eq!(carried.id, id);
    assert_eq!(carried.original.position, pickup);
    // Attached at the grasp offset: the object centre is the grasp point.
    let expected = grasp_point(&scene.effector_transform(), carried.grasp_offset);
    assert!((scene.world_position(id).unwrap() - expected).length() < 1e-5);

    let events = sequencer.drain_events();
    assert_eq!(events.last(), Some(&SequencerEvent::GraspStarted { object: id }));
}

#[test]
fn full_cycle_emits_signals_in_order() {
    let (mut scene, mut sequencer) = showcase();
    let id = id_of(&scene, "box2");
    sequencer.select(&scene, id);

    let trace = run_cycle(&mut scene, &mut sequencer, id);
    let kinds: Vec<&str> = trace
        .events
        .iter()
        .map(|e| match e {
            SequencerEvent::Selected { .. } => "selected",
            SequencerEvent::GraspStarted { .. } => "grasp",
            SequencerEvent::ObjectPlaced { .. } => "placed",
            SequencerEvent::SequenceComplete { .. } => "complete",
            SequencerEvent::IdleResumed { .. } => "idle",
        })
        .collect();
    assert_eq!(kinds, vec!["selected", "grasp", "placed", "complete", "idle"]);

    let mut visited = trace.phases.clone();
    visited.dedup();
    assert_eq!(
        visited,
        vec![Phase::Tap, Phase::Carry, Phase::Return, Phase::Idle]
    );
}

#[test]
fn release_snaps_to_the_drop_point_with_original_scale() {
    let (mut scene, mut sequencer) = showcase();
    let id = id_of(&scene, "box3");
    let spawn = scene.world_transform(id).unwrap();
    let drop = sequencer.config().drop_point;
    sequencer.select(&scene, id);

    let trace = run_cycle(&mut scene, &mut sequencer, id);
    let (local, parent, step) = trace.placed_snapshot.expect("object was never placed");

    assert_eq!(parent, Parent::Root);
    assert_eq!(local.position, drop);
    assert_eq!(local.scale, spawn.scale);
    assert_eq!(step, Some(CarryStep::Up));

    assert!(trace.events.contains(&SequencerEvent::ObjectPlaced {
        object: id,
        position: drop,
    }));

    // Stays put after the arm leaves.
    assert_eq!(scene.world_position(id), Some(drop));
    assert!(scene.object(id).unwrap().placed);
}

#[test]
fn return_becomes_idle_on_the_first_solved_tick() {
    // Documented quirk: unlike every other transition, return → idle has no
    // distance gate, so `return` lasts exactly one tick.
    let (mut scene, mut sequencer) = showcase();
    let id = id_of(&scene, "box4");
    sequencer.select(&scene, id);

    let trace = run_cycle(&mut scene, &mut sequencer, id);
    let returning = trace.phases.iter().filter(|p| **p == Phase::Return).count();
    assert_eq!(returning, 1);
    assert_eq!(trace.phases.last(), Some(&Phase::Idle));

    let wait = sequencer.config().wait_position;
    assert!(
        scene.effector_transform().position.distance(wait) > sequencer.config().reach_distance,
        "arm should still be on its way home when idle resumes"
    );
}

#[test]
fn orbit_input_is_locked_for_the_whole_sequence() {
    let (mut scene, mut sequencer) = showcase();
    let id = id_of(&scene, "box1");
    assert!(sequencer.flags().orbit_enabled);

    sequencer.select(&scene, id);
    assert!(!sequencer.flags().orbit_enabled);

    let trace = run_cycle(&mut scene, &mut sequencer, id);
    assert_eq!(
        trace.events.last(),
        Some(&SequencerEvent::IdleResumed { input_restored: true })
    );
    assert!(sequencer.flags().orbit_enabled);
    assert!(!sequencer.flags().awaiting_return);
}

#[test]
fn dropping_back_on_the_pickup_point_restores_the_object() {
    let mut config = WorkcellConfig::default();
    let pickup = config.objects[0].position;
    config.sequencer.drop_point = pickup;

    let mut scene = config.build_scene();
    let mut sequencer = PhaseSequencer::new(config.sequencer, &scene);
    let id = id_of(&scene, "box1");
    let before = scene.world_transform(id).unwrap();

    sequencer.select(&scene, id);
    run_cycle(&mut scene, &mut sequencer, id);

    let after = scene.world_transform(id).unwrap();
    assert!((after.position - before.position).length() < 1e-5);
    assert_eq!(after.scale, before.scale);
    assert!(after.rotation.dot(before.rotation).abs() > 1.0 - 1e-6);
}

#[test]
fn placed_objects_cannot_be_picked_until_reset() {
    let (mut scene, mut sequencer) = showcase();
    let id = id_of(&scene, "box2");
    let spawn = scene.world_position(id).unwrap();

    sequencer.select(&scene, id);
    run_cycle(&mut scene, &mut sequencer, id);

    assert!(!sequencer.select(&scene, id));
    assert_eq!(sequencer.phase(), Phase::Idle);

    assert!(sequencer.reset_object(&mut scene, id));
    assert_eq!(scene.world_position(id), Some(spawn));
    assert!(sequencer.select(&scene, id));
}

#[test]
fn ray_pick_selects_the_object_under_the_cursor() {
    let (scene, mut sequencer) = showcase();
    let target = id_of(&scene, "box3");
    let eye = Vec3::new(0.25, 3.0, -0.85);

    let picked = sequencer.pick(&scene, &Ray::new(eye, Vec3::NEG_Y));
    assert_eq!(picked, Some(target));
    assert_eq!(sequencer.phase(), Phase::Tap);

    // A second pick while busy is dropped, not queued.
    let other = Ray::new(Vec3::new(0.7, 3.0, -0.6), Vec3::NEG_Y);
    assert_eq!(sequencer.pick(&scene, &other), None);
    assert_eq!(sequencer.selected(), Some(target));
}

#[test]
fn pick_into_empty_space_changes_nothing() {
    let (scene, mut sequencer) = showcase();
    let ray = Ray::new(Vec3::new(0.0, 3.0, 3.0), Vec3::Y);
    assert_eq!(sequencer.pick(&scene, &ray), None);
    assert_eq!(sequencer.phase(), Phase::Idle);
    assert!(sequencer.drain_events().is_empty());
}

#[test]
fn sequencing_is_deterministic() {
    let run = || {
        let (mut scene, mut sequencer) = showcase();
        let id = id_of(&scene, "box1");
        sequencer.select(&scene, id);
        let trace = run_cycle(&mut scene, &mut sequencer, id);
        (trace.phases.len(), scene.chain().angles())
    };
    assert_eq!(run(), run());
}

#[test]
fn lift_off_is_gated_on_the_grasp_point_not_the_released_object() {
    let (mut scene, mut sequencer) = showcase();
    let id = id_of(&scene, "box2");
    let tolerance = sequencer.config().carry_tolerance;
    sequencer.select(&scene, id);

    let mut ticks = 0;
    while sequencer.step() != Some(CarryStep::Up) {
        assert!(ticks < CYCLE_BUDGET, "never released the object");
        sequencer.tick(&mut scene);
        ticks += 1;
    }

    let carried = sequencer.carried().unwrap();
    let (offset, plan) = (carried.grasp_offset, carried.plan);
    let down = scene.world_position(id).unwrap();
    assert_eq!(down, plan.down_center);
    // The box itself sits a full hover height below the exit waypoint.
    assert!(down.distance(plan.hover_center) > tolerance);

    loop {
        assert!(ticks < CYCLE_BUDGET, "stalled lifting off the pedestal");
        let phase = sequencer.tick(&mut scene);
        ticks += 1;

        let grip = grasp_point(&scene.effector_transform(), offset);
        assert_eq!(scene.world_position(id), Some(down));
        assert_eq!(scene.object(id).unwrap().parent, Parent::Root);

        if phase == Phase::Return {
            assert!(grip.distance(plan.hover_center) < tolerance);
            break;
        }
        assert_eq!(sequencer.step(), Some(CarryStep::Up));
        assert!(grip.distance(plan.hover_center) >= tolerance);
    }
}
