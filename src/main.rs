use arm_pickplace::{Phase, PhaseSequencer, Ray, Scene, SequencerEvent, WorkcellConfig};
use glam::Vec3;
use log::{error, info, warn};
use std::process::ExitCode;

const EYE: Vec3 = Vec3::new(0.0, 2.0, 2.0);
const MAX_TICKS_PER_PICK: u32 = 5_000;

fn load_config() -> Result<WorkcellConfig, arm_pickplace::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => WorkcellConfig::load(path),
        None => Ok(WorkcellConfig::default()),
    }
}

/// Runs frames until the sequencer is back in idle. Returns the tick count,
/// or `None` if the arm stalled.
fn run_until_idle(sequencer: &mut PhaseSequencer, scene: &mut Scene) -> Option<u32> {
    for tick in 1..=MAX_TICKS_PER_PICK {
        let phase = sequencer.tick(scene);

        for event in sequencer.drain_events() {
            match event {
                SequencerEvent::GraspStarted { object } => {
                    info!("[{tick:>5}] grasp started on {object}");
                }
                SequencerEvent::ObjectPlaced { object, position } => {
                    info!("[{tick:>5}] {object} placed at {position:?}");
                }
                SequencerEvent::SequenceComplete { object } => {
                    info!("[{tick:>5}] done with {object}, returning");
                }
                SequencerEvent::IdleResumed { input_restored } => {
                    info!("[{tick:>5}] idle (input restored: {input_restored})");
                }
                SequencerEvent::Selected { label, .. } => {
                    info!("[{tick:>5}] selected {label}");
                }
            }
        }

        if phase == Phase::Idle {
            return Some(tick);
        }
    }
    None
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut scene = config.build_scene();
    let mut sequencer = PhaseSequencer::new(config.sequencer, &scene);

    let targets: Vec<(String, Vec3)> = scene
        .objects()
        .iter()
        .map(|o| (o.label.clone(), o.local.position))
        .collect();

    let mut previous = None;
    for (label, position) in targets {
        if let Some(id) = previous.take() {
            sequencer.reset_object(&mut scene, id);
        }

        let ray = Ray::new(EYE, position - EYE);
        let Some(id) = sequencer.pick(&scene, &ray) else {
            warn!("ray toward {label} hit nothing selectable");
            continue;
        };
        for event in sequencer.drain_events() {
            if let SequencerEvent::Selected { label, target, .. } = event {
                info!("picked {label} at {target:?}");
            }
        }

        match run_until_idle(&mut sequencer, &mut scene) {
            Some(ticks) => info!("cycle finished in {ticks} ticks"),
            None => {
                warn!(
                    "arm stalled in {} after {} ticks",
                    sequencer.phase(),
                    MAX_TICKS_PER_PICK
                );
                return ExitCode::FAILURE;
            }
        }
        previous = Some(id);
    }

    ExitCode::SUCCESS
}
