//! Scripted selection demo
//!
//! Builds a small scene with two controllers, sweeps the right hand across
//! the targets while it jitters, then reaches for the cube. Every selection
//! change is logged.
//!
//! Usage: selection_demo [config.toml|config.ron]

use rand::prelude::*;
use std::f32::consts::FRAC_PI_4;
use umi3d_browser::foundation::logging;
use umi3d_browser::prelude::*;

const TICK_RATE: f32 = 90.0;
const DURATION: f32 = 6.0;
const JITTER: f32 = 0.01;

fn load_config() -> Result<BrowserConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {path}");
            BrowserConfig::load_from_file(&path)?
        }
        None => BrowserConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn build_scene(world: &mut World) -> Vec<(Entity, &'static str)> {
    let mut named = Vec::new();

    let button = world.spawn_target(
        TargetComponent::new(Pose::from_position(Vec3::new(-0.6, 1.2, 1.5)))
            .with_kinds(TargetKind::CUSTOM_ELEMENT),
    );
    world.attach_collider(button, CollisionShape::cuboid(Vec3::new(0.2, 0.1, 0.02)), Vec3::zeros());
    named.push((button, "menu button"));

    let panel = world.spawn_target(
        TargetComponent::new(Pose::from_position(Vec3::new(1.5, 1.5, 3.0)))
            .with_kinds(TargetKind::SELECTABLE),
    );
    world.attach_collider(panel, CollisionShape::cuboid(Vec3::new(0.8, 0.5, 0.02)), Vec3::zeros());
    named.push((panel, "info panel"));

    let cube = world.spawn_target(TargetComponent::new(Pose::from_position(Vec3::new(0.2, 1.0, 0.6))));
    world.attach_collider(cube, CollisionShape::cuboid(Vec3::new(0.1, 0.1, 0.1)), Vec3::zeros());
    named.push((cube, "cube"));

    let ball = world.spawn_target(TargetComponent::new(Pose::from_position(Vec3::new(0.6, 1.0, 2.5))));
    world.attach_collider(ball, CollisionShape::sphere(0.15), Vec3::zeros());
    named.push((ball, "ball"));

    named
}

/// Right hand pose at `time`: a left-to-right sweep, then a reach for the cube
fn right_hand(time: f32, rng: &mut StdRng) -> Pose {
    let jitter = Vec3::new(
        rng.gen_range(-JITTER..JITTER),
        rng.gen_range(-JITTER..JITTER),
        0.0,
    );
    let shoulder = Vec3::new(0.2, 1.0, 0.0);

    if time < 4.0 {
        let yaw = -FRAC_PI_4 + FRAC_PI_4 * 2.0 * (time / 4.0);
        let direction = Vec3::new(yaw.sin(), 0.05, yaw.cos()) + jitter;
        Pose::looking_along(shoulder, direction)
    } else {
        let reach = ((time - 4.0) / 1.0).min(1.0);
        let position = shoulder + Vec3::new(0.0, 0.0, 0.5) * reach + jitter;
        Pose::looking_along(position, Vec3::z())
    }
}

fn describe(names: &[(Entity, &'static str)], entity: Entity) -> String {
    names
        .iter()
        .find(|(e, _)| *e == entity)
        .map_or_else(|| entity.to_string(), |(_, name)| (*name).to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);
    log::info!("Starting selection demo");

    let config = load_config()?;
    let mut world = World::new();
    let names = build_scene(&mut world);

    let left = world.add_controller(Pose::looking_along(Vec3::new(-0.2, 1.0, 0.0), -Vec3::z()));
    let right = world.add_controller(right_hand(0.0, &mut StdRng::seed_from_u64(0)));

    let mut selection = SelectionSystem::new(config.selection.clone());
    selection.add_controller(left);
    selection.add_controller(right);

    let mut scheduler = Scheduler::new(config.scheduler.clone());
    scheduler.add_system(Box::new(selection));

    let mut rng = StdRng::seed_from_u64(7);
    let mut timer = Timer::new();
    let dt = 1.0 / TICK_RATE;
    let mut pulses = 0;
    let mut previous: Option<SelectionCandidate> = None;

    while timer.total_time() < DURATION {
        timer.advance(dt);
        world.set_controller_pose(right, right_hand(timer.total_time(), &mut rng));
        scheduler.tick(&mut world, dt);
        pulses += world.drain_haptics().len();

        let Some(system) = scheduler.system::<SelectionSystem>() else {
            break;
        };
        if let Some(error) = system.last_error(right) {
            return Err(error.clone().into());
        }
        let current = system.manager(right).and_then(|m| m.current().copied());
        if current.map(|c| (c.target, c.origin)) != previous.map(|c| (c.target, c.origin)) {
            match current {
                Some(candidate) => log::info!(
                    "[{:5.2}s] selected {} ({}, {:?})",
                    timer.total_time(),
                    describe(&names, candidate.target),
                    candidate.kind,
                    candidate.origin
                ),
                None => log::info!("[{:5.2}s] selection released", timer.total_time()),
            }
            previous = current;
        }
    }

    if let Some(system) = scheduler.system_mut::<SelectionSystem>() {
        system.stop(&mut world);
    }
    log::info!(
        "Demo finished after {} frames, {} haptic pulses",
        world.frame(),
        pulses
    );
    Ok(())
}
