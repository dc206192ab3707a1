//! Detection methods
//!
//! Every detector runs the same lifecycle:
//!
//! ```text
//! Stopped --init--> Running --stop--> Stopped
//!                   Running --reinit--> Running (state cleared)
//! ```
//!
//! The lifecycle lives in provided methods of [`Detector`]; implementors
//! only supply the tracking and prediction steps.

use super::candidate::DetectionOrigin;
use super::zone::{ProximityZone, RaycastZone};
use crate::config::{ProximityConfig, RaycastConfig};
use crate::ecs::components::TargetKind;
use crate::ecs::{Entity, World};
use crate::foundation::math::Pose;
use crate::physics::collision::Ray;

/// Lifecycle state of a detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorState {
    /// Not tracking anything, predicts nothing
    #[default]
    Stopped,
    /// Tracking and predicting
    Running,
}

/// A method of reducing the world to at most one target per evaluation
pub trait Detector {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Channel reported on candidates from this detector
    fn origin(&self) -> DetectionOrigin;

    /// Current lifecycle state
    fn state(&self) -> DetectorState;

    /// Overwrite the lifecycle state. Use `init`/`stop` instead.
    fn set_state(&mut self, state: DetectorState);

    /// Clear every tracked object and score
    fn reset(&mut self);

    /// Per fixed step tracking with the controller at `pose`
    fn track(&mut self, world: &World, pose: &Pose);

    /// Best target for the controller at `pose`
    fn predict(&mut self, world: &World, pose: &Pose) -> Option<Entity>;

    /// Whether the detector is running
    fn is_running(&self) -> bool {
        self.state() == DetectorState::Running
    }

    /// Start detecting. Does nothing if already running.
    fn init(&mut self) {
        if self.is_running() {
            return;
        }
        self.reset();
        self.set_state(DetectorState::Running);
        log::debug!("{} detector started", self.name());
    }

    /// Stop detecting and clear all state
    ///
    /// Stopping a stopped detector leaves it stopped and cleared.
    fn stop(&mut self) {
        self.reset();
        if self.is_running() {
            self.set_state(DetectorState::Stopped);
            log::debug!("{} detector stopped", self.name());
        }
    }

    /// Clear accumulated state while staying in `Running`
    fn reinit(&mut self) {
        if !self.is_running() {
            log::debug!("{} detector reinit ignored while stopped", self.name());
            return;
        }
        self.reset();
        log::debug!("{} detector reinitialised", self.name());
    }

    /// Fixed step entry point, gated on the running state
    fn fixed_update(&mut self, world: &World, pose: &Pose) {
        if self.is_running() {
            self.track(world, pose);
        }
    }

    /// Predicted target, or `None` while stopped
    fn predict_target(&mut self, world: &World, pose: &Pose) -> Option<Entity> {
        if !self.is_running() {
            return None;
        }
        self.predict(world, pose)
    }
}

/// Nearest object inside the controller's trigger sphere
#[derive(Debug, Clone)]
pub struct ProximityDetector {
    zone: ProximityZone,
    kinds: TargetKind,
    state: DetectorState,
}

impl ProximityDetector {
    /// Create a stopped detector for targets carrying any of `kinds`
    pub fn new(config: &ProximityConfig, kinds: TargetKind) -> Self {
        Self {
            zone: ProximityZone::new(config.trigger_radius),
            kinds,
            state: DetectorState::Stopped,
        }
    }

    /// The underlying zone
    pub fn zone(&self) -> &ProximityZone {
        &self.zone
    }
}

impl Detector for ProximityDetector {
    fn name(&self) -> &str {
        "proximity"
    }

    fn origin(&self) -> DetectionOrigin {
        DetectionOrigin::Proximity
    }

    fn state(&self) -> DetectorState {
        self.state
    }

    fn set_state(&mut self, state: DetectorState) {
        self.state = state;
    }

    fn reset(&mut self) {
        self.zone.clear();
    }

    fn track(&mut self, world: &World, pose: &Pose) {
        self.zone.fixed_update(world, pose.position, self.kinds);
    }

    fn predict(&mut self, world: &World, pose: &Pose) -> Option<Entity> {
        self.zone
            .get_closest_in_zone(world, pose.position)
            .map(|(entity, _)| entity)
    }
}

/// Nearest object hit along the controller's pointing ray
#[derive(Debug, Clone)]
pub struct RaycastDetector {
    zone: RaycastZone,
    kinds: TargetKind,
    state: DetectorState,
}

impl RaycastDetector {
    /// Create a stopped detector for targets carrying any of `kinds`
    pub fn new(config: &RaycastConfig, kinds: TargetKind) -> Self {
        Self {
            zone: RaycastZone::new(config.max_distance),
            kinds,
            state: DetectorState::Stopped,
        }
    }
}

impl Detector for RaycastDetector {
    fn name(&self) -> &str {
        "raycast"
    }

    fn origin(&self) -> DetectionOrigin {
        DetectionOrigin::Pointing
    }

    fn state(&self) -> DetectorState {
        self.state
    }

    fn set_state(&mut self, state: DetectorState) {
        self.state = state;
    }

    // Stateless between ticks
    fn reset(&mut self) {}

    fn track(&mut self, _world: &World, _pose: &Pose) {}

    fn predict(&mut self, world: &World, pose: &Pose) -> Option<Entity> {
        let ray = Ray::new(pose.position, pose.forward());
        self.zone
            .get_closest_in_zone(world, &ray, self.kinds)
            .map(|hit| hit.entity)
    }
}
