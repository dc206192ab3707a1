//! Fixed-order system scheduling
//!
//! Every tick runs two phases: zero or more fixed steps (geometry sweeps),
//! then exactly one variable update (detection and arbitration). Systems run
//! in the order they were added; there is no parallelism.

use super::{System, World};
use crate::config::SchedulerConfig;

/// System execution phases with explicit ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SystemPhase {
    /// Fixed simulation step: zone membership, stale-candidate sweeps
    FixedUpdate = 0,
    /// Per-frame logic: detection, scoring, arbitration, feedback
    Update = 1,
}

/// Single-threaded scheduler invoking registered systems in fixed order
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
    config: SchedulerConfig,
    accumulator: f32,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            systems: Vec::new(),
            config,
            accumulator: 0.0,
        }
    }

    /// Add a system; it runs after every system added before it
    pub fn add_system(&mut self, system: Box<dyn System>) {
        log::debug!("Registered system '{}'", system.name());
        self.systems.push(system);
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no system is registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// First registered system of type `T`
    pub fn system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|system| system.as_any().downcast_ref::<T>())
    }

    /// Mutable access to the first registered system of type `T`
    pub fn system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|system| system.as_any_mut().downcast_mut::<T>())
    }

    /// Advance the world by `delta_time` seconds
    ///
    /// Returns the number of fixed steps that ran.
    pub fn tick(&mut self, world: &mut World, delta_time: f32) -> u32 {
        let step = self.config.fixed_timestep;
        self.accumulator += delta_time.max(0.0);

        let mut steps = 0;
        while self.accumulator >= step && steps < self.config.max_fixed_steps_per_tick {
            self.run_phase(SystemPhase::FixedUpdate, world, step);
            self.accumulator -= step;
            steps += 1;
        }
        if self.accumulator >= step {
            log::warn!(
                "Dropping {:.3}s of simulation time after {} fixed steps",
                self.accumulator,
                steps
            );
            self.accumulator %= step;
        }

        self.run_phase(SystemPhase::Update, world, delta_time);
        world.advance_frame();
        steps
    }

    fn run_phase(&mut self, phase: SystemPhase, world: &mut World, dt: f32) {
        for system in &mut self.systems {
            match phase {
                SystemPhase::FixedUpdate => system.fixed_update(world, dt),
                SystemPhase::Update => system.update(world, dt),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl System for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn fixed_update(&mut self, _world: &mut World, _step: f32) {
            self.log.borrow_mut().push(format!("{}:fixed", self.name));
        }

        fn update(&mut self, _world: &mut World, _dt: f32) {
            self.log.borrow_mut().push(format!("{}:update", self.name));
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn scheduler_with(log: &Rc<RefCell<Vec<String>>>) -> Scheduler {
        let mut scheduler = Scheduler::new(SchedulerConfig {
            fixed_timestep: 0.5,
            max_fixed_steps_per_tick: 3,
        });
        for name in ["a", "b"] {
            scheduler.add_system(Box::new(Recorder { name, log: Rc::clone(log) }));
        }
        scheduler
    }

    #[test]
    fn test_phases_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = scheduler_with(&log);
        let mut world = World::new();

        let steps = scheduler.tick(&mut world, 0.5);

        assert_eq!(steps, 1);
        assert_eq!(*log.borrow(), vec!["a:fixed", "b:fixed", "a:update", "b:update"]);
        assert_eq!(world.frame(), 1);
    }

    #[test]
    fn test_fixed_steps_accumulate() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = scheduler_with(&log);
        let mut world = World::new();

        assert_eq!(scheduler.tick(&mut world, 0.3), 0);
        assert_eq!(scheduler.tick(&mut world, 0.3), 1);
        assert_eq!(scheduler.tick(&mut world, 1.0), 2);
    }

    #[test]
    fn test_fixed_steps_are_capped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = scheduler_with(&log);
        let mut world = World::new();

        assert_eq!(scheduler.tick(&mut world, 10.0), 3);
        // Surplus time was dropped rather than carried over
        assert_eq!(scheduler.tick(&mut world, 0.0), 0);
    }

    #[test]
    fn test_system_lookup_by_type() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = scheduler_with(&log);

        assert_eq!(scheduler.system::<Recorder>().map(|r| r.name), Some("a"));
        scheduler.system_mut::<Recorder>().unwrap().name = "renamed";
        assert_eq!(scheduler.system::<Recorder>().map(|r| r.name), Some("renamed"));
    }
}
