//! Selection system
//!
//! Drives one [`SelectionManager`] per controller from the scheduler:
//! zone tracking on fixed steps, detection and arbitration once per frame.

use super::error::SelectionError;
use super::manager::{SelectionManager, SelectionOutcome};
use crate::config::SelectionConfig;
use crate::ecs::{ControllerId, System, World};
use std::any::Any;
use std::collections::BTreeMap;

/// Per-controller selection, run by the [`Scheduler`](crate::ecs::Scheduler)
#[derive(Debug)]
pub struct SelectionSystem {
    config: SelectionConfig,
    managers: Vec<SelectionManager>,
    outcomes: BTreeMap<ControllerId, SelectionOutcome>,
    errors: BTreeMap<ControllerId, SelectionError>,
}

impl SelectionSystem {
    /// Create a system with no controller
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            managers: Vec::new(),
            outcomes: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Selection settings used for standard managers
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Add a controller with the standard selectors, already started
    pub fn add_controller(&mut self, controller: ControllerId) {
        let manager = SelectionManager::standard(controller, &self.config);
        self.add_manager(manager);
    }

    /// Add a custom manager and start it
    pub fn add_manager(&mut self, mut manager: SelectionManager) {
        manager.init();
        log::debug!("Selection started for {}", manager.controller());
        self.managers.push(manager);
    }

    /// Manager of `controller`
    pub fn manager(&self, controller: ControllerId) -> Option<&SelectionManager> {
        self.managers.iter().find(|manager| manager.controller() == controller)
    }

    /// Mutable manager of `controller`
    pub fn manager_mut(&mut self, controller: ControllerId) -> Option<&mut SelectionManager> {
        self.managers.iter_mut().find(|manager| manager.controller() == controller)
    }

    /// Outcome of the latest successful update for `controller`
    pub fn last_outcome(&self, controller: ControllerId) -> Option<SelectionOutcome> {
        self.outcomes.get(&controller).copied()
    }

    /// Fault raised by the latest update for `controller`, if it failed
    pub fn last_error(&self, controller: ControllerId) -> Option<&SelectionError> {
        self.errors.get(&controller)
    }

    /// Stop every manager and forget recorded outcomes
    pub fn stop(&mut self, world: &mut World) {
        for manager in &mut self.managers {
            manager.stop(world);
        }
        self.outcomes.clear();
        self.errors.clear();
    }

    fn record(&mut self, controller: ControllerId, result: Result<SelectionOutcome, SelectionError>) {
        match result {
            Ok(outcome) => {
                self.errors.remove(&controller);
                self.outcomes.insert(controller, outcome);
            }
            Err(error) => {
                log::error!("Selection failed for {controller}: {error}");
                self.errors.insert(controller, error);
            }
        }
    }
}

impl System for SelectionSystem {
    fn name(&self) -> &str {
        "selection"
    }

    fn fixed_update(&mut self, world: &mut World, _step: f32) {
        let mut failures = Vec::new();
        for manager in &mut self.managers {
            if let Err(error) = manager.fixed_update(world) {
                failures.push((manager.controller(), error));
            }
        }
        for (controller, error) in failures {
            self.record(controller, Err(error));
        }
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        let mut results = Vec::with_capacity(self.managers.len());
        for manager in &mut self.managers {
            results.push((manager.controller(), manager.update(world, delta_time)));
        }
        for (controller, result) in results {
            self.record(controller, result);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::TargetComponent;
    use crate::foundation::math::{Pose, Vec3};
    use crate::physics::collision::CollisionShape;

    #[test]
    fn test_update_commits_for_each_controller() {
        let mut world = World::new();
        let left = world.add_controller(Pose::from_position(Vec3::new(-1.0, 0.0, 0.0)));
        let right = world.add_controller(Pose::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let cube = world.spawn_target(TargetComponent::new(Pose::from_position(Vec3::new(1.0, 0.0, 0.1))));
        world.attach_collider(cube, CollisionShape::sphere(0.05), Vec3::zeros()).unwrap();

        let mut system = SelectionSystem::new(SelectionConfig::default());
        system.add_controller(left);
        system.add_controller(right);

        system.fixed_update(&mut world, 0.02);
        system.update(&mut world, 0.016);

        assert_eq!(system.last_outcome(left), Some(SelectionOutcome::Idle));
        match system.last_outcome(right) {
            Some(SelectionOutcome::Committed(candidate)) => assert_eq!(candidate.target, cube),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(world.highlight(cube).unwrap().selected);
    }

    #[test]
    fn test_missing_controller_records_error() {
        let mut world = World::new();
        let mut other = World::new();
        let ghost = other.add_controller(Pose::default());

        let mut system = SelectionSystem::new(SelectionConfig::default());
        system.add_controller(ghost);
        system.update(&mut world, 0.016);

        assert_eq!(system.last_error(ghost), Some(&SelectionError::UnknownController(ghost)));
        assert_eq!(system.last_outcome(ghost), None);
    }
}
