//! IntenSelect pointing detector
//!
//! Cone scoring after de Haan, Koutek and Post (2005). Each evaluation
//! every object inside the cone gains `snappiness_rate`, and every scored
//! object outside the cone loses `stickiness_rate`. The highest positive
//! score is the predicted target, which makes the selection sticky against
//! hand jitter. Equal scores go to the object nearest the ray on the latest
//! evaluation.
//!
//! For an object whose centre projects at `d_proj > 0` along the ray and
//! lies `d_perp` away from it, the bent angle is
//!
//! ```text
//! rho = atan(d_perp / d_proj^k)
//! ```
//!
//! With `k < 1` the cone narrows beyond one metre, so distant objects must
//! be pointed at more precisely.

use super::candidate::DetectionOrigin;
use super::detector::{Detector, DetectorState};
use crate::config::IntenSelectConfig;
use crate::ecs::components::TargetKind;
use crate::ecs::{Entity, World};
use crate::foundation::math::{Pose, Vec3};
use crate::physics::collision::Ray;
use std::collections::BTreeMap;

/// Cone-scoring pointing detector
#[derive(Debug, Clone)]
pub struct IntenSelectDetector {
    config: IntenSelectConfig,
    kinds: TargetKind,
    state: DetectorState,
    scores: BTreeMap<Entity, f32>,
    alignment: BTreeMap<Entity, f32>,
}

impl IntenSelectDetector {
    /// Create a stopped detector for targets carrying any of `kinds`
    pub fn new(config: IntenSelectConfig, kinds: TargetKind) -> Self {
        Self {
            config,
            kinds,
            state: DetectorState::Stopped,
            scores: BTreeMap::new(),
            alignment: BTreeMap::new(),
        }
    }

    /// Active parameters
    pub fn config(&self) -> &IntenSelectConfig {
        &self.config
    }

    /// Current score of `entity`, if it is under consideration
    pub fn score(&self, entity: Entity) -> Option<f32> {
        self.scores.get(&entity).copied()
    }

    /// Number of objects under consideration
    pub fn tracked(&self) -> usize {
        self.scores.len()
    }

    /// Alignment of `point` with `ray`, or `None` outside the bent cone
    ///
    /// The result is in `[0, 1]`, 1 meaning exactly on the ray.
    pub fn contribution(&self, ray: &Ray, point: Vec3) -> Option<f32> {
        let (along, perpendicular) = ray.project(point);
        if along <= 0.0 {
            return None;
        }
        let rho = (perpendicular / along.powf(self.config.corrective_k))
            .atan()
            .to_degrees();
        (rho <= self.config.cone_angle).then(|| 1.0 - rho / self.config.cone_angle)
    }

    /// Apply one scoring pass. Returns `true` if a score saturated.
    fn accumulate(&mut self, world: &World, ray: &Ray) -> bool {
        let kinds = self.kinds;
        self.scores
            .retain(|entity, _| world.target(*entity).is_some_and(|target| target.accepts(kinds)));

        let mut in_cone = BTreeMap::new();
        for (entity, target) in world.targets() {
            if !target.accepts(kinds) {
                continue;
            }
            if let Some(contribution) = self.contribution(ray, target.pose.position) {
                in_cone.insert(entity, contribution);
            }
        }

        let IntenSelectConfig {
            snappiness_rate,
            stickiness_rate,
            score_min,
            score_max,
            ..
        } = self.config;

        for entity in in_cone.keys() {
            let score = self.scores.entry(*entity).or_insert(0.0);
            *score = (*score + snappiness_rate).clamp(score_min, score_max);
        }

        self.scores.retain(|entity, score| {
            if in_cone.contains_key(entity) {
                return true;
            }
            *score = (*score - stickiness_rate).clamp(score_min, score_max);
            *score > 0.0
        });
        self.alignment = in_cone;

        self.scores.values().any(|score| *score >= score_max)
    }

    /// Highest positive score; ties go to the better aligned object, then
    /// the lowest entity
    fn best(&self) -> Option<Entity> {
        let mut best: Option<(Entity, f32, f32)> = None;
        for (entity, score) in &self.scores {
            if *score <= 0.0 {
                continue;
            }
            let alignment = self.alignment.get(entity).copied().unwrap_or(0.0);
            let better = best.map_or(true, |(_, top, top_alignment)| {
                *score > top || (*score == top && alignment > top_alignment)
            });
            if better {
                best = Some((*entity, *score, alignment));
            }
        }
        best.map(|(entity, _, _)| entity)
    }
}

impl Detector for IntenSelectDetector {
    fn name(&self) -> &str {
        "intenselect"
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

    fn reset(&mut self) {
        self.scores.clear();
        self.alignment.clear();
    }

    // Drop vanished objects between evaluations
    fn track(&mut self, world: &World, _pose: &Pose) {
        let kinds = self.kinds;
        self.scores
            .retain(|entity, _| world.target(*entity).is_some_and(|target| target.accepts(kinds)));
        let scores = &self.scores;
        self.alignment.retain(|entity, _| scores.contains_key(entity));
    }

    fn predict(&mut self, world: &World, pose: &Pose) -> Option<Entity> {
        let ray = Ray::new(pose.position, pose.forward());
        if self.accumulate(world, &ray) {
            log::warn!(
                "IntenSelect score reached its maximum of {}",
                self.config.score_max
            );
            if self.config.reset_on_saturation {
                self.reset();
                return None;
            }
        }
        self.best()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::TargetComponent;
    use approx::assert_relative_eq;

    fn detector(reset_on_saturation: bool) -> IntenSelectDetector {
        let config = IntenSelectConfig {
            reset_on_saturation,
            ..Default::default()
        };
        let mut detector = IntenSelectDetector::new(config, TargetKind::INTERACTABLE);
        detector.init();
        detector
    }

    fn spawn_at(world: &mut World, position: Vec3) -> Entity {
        world.spawn_target(TargetComponent::new(Pose::from_position(position)))
    }

    #[test]
    fn test_score_accumulates_on_ray() {
        let mut world = World::new();
        let entity = spawn_at(&mut world, Vec3::new(0.0, 0.0, 2.0));
        let mut detector = detector(true);
        let pose = Pose::default();

        for _ in 0..10 {
            assert_eq!(detector.predict_target(&world, &pose), Some(entity));
        }
        assert_relative_eq!(detector.score(entity).unwrap(), 5.0);
    }

    #[test]
    fn test_score_clamps_at_maximum() {
        let mut world = World::new();
        let entity = spawn_at(&mut world, Vec3::new(0.0, 0.0, 2.0));
        let mut detector = detector(false);
        let pose = Pose::default();

        for _ in 0..200 {
            detector.predict_target(&world, &pose);
        }
        assert_relative_eq!(detector.score(entity).unwrap(), 70.0);
        assert_eq!(detector.predict_target(&world, &pose), Some(entity));
    }

    #[test]
    fn test_saturation_resets_scores() {
        let mut world = World::new();
        let entity = spawn_at(&mut world, Vec3::new(0.0, 0.0, 2.0));
        let mut detector = detector(true);
        let pose = Pose::default();

        for _ in 0..139 {
            detector.predict_target(&world, &pose);
        }
        assert_relative_eq!(detector.score(entity).unwrap(), 69.5);

        assert_eq!(detector.predict_target(&world, &pose), None);
        assert_eq!(detector.score(entity), None);
        assert!(detector.is_running());
    }

    #[test]
    fn test_score_decays_outside_cone() {
        let mut world = World::new();
        let entity = spawn_at(&mut world, Vec3::new(0.0, 0.0, 2.0));
        let mut detector = detector(true);

        for _ in 0..4 {
            detector.predict_target(&world, &Pose::default());
        }
        assert_relative_eq!(detector.score(entity).unwrap(), 2.0);

        let away = Pose::looking_along(Vec3::zeros(), Vec3::x());
        assert_eq!(detector.predict_target(&world, &away), Some(entity));
        assert_relative_eq!(detector.score(entity).unwrap(), 1.5);

        for _ in 0..2 {
            detector.predict_target(&world, &away);
        }
        assert_relative_eq!(detector.score(entity).unwrap(), 0.5);

        assert_eq!(detector.predict_target(&world, &away), None);
        assert_eq!(detector.score(entity), None);
    }

    #[test]
    fn test_equal_scores_go_to_better_aligned_object() {
        let mut world = World::new();
        // Lower id, so only alignment can make the other one win
        let off_axis = spawn_at(&mut world, Vec3::new(0.3, 0.0, 3.0));
        let aligned = spawn_at(&mut world, Vec3::new(0.0, 0.0, 3.0));
        let behind = spawn_at(&mut world, Vec3::new(0.0, 0.0, -3.0));
        let mut detector = detector(true);

        assert_eq!(detector.predict_target(&world, &Pose::default()), Some(aligned));
        assert_eq!(detector.score(off_axis), detector.score(aligned));
        assert_eq!(detector.score(behind), None);
    }

    #[test]
    fn test_off_axis_object_gains_full_rate_inside_cone() {
        let mut world = World::new();
        // 10 degrees off the ray at 2 m, inside a straight 15 degree cone
        let angle = 10f32.to_radians();
        let entity = spawn_at(&mut world, Vec3::new(2.0 * angle.sin(), 0.0, 2.0 * angle.cos()));
        let mut detector = IntenSelectDetector::new(
            IntenSelectConfig {
                corrective_k: 1.0,
                ..Default::default()
            },
            TargetKind::INTERACTABLE,
        );
        detector.init();

        for _ in 0..10 {
            assert_eq!(detector.predict_target(&world, &Pose::default()), Some(entity));
        }
        assert_relative_eq!(detector.score(entity).unwrap(), 5.0);
    }

    #[test]
    fn test_bent_cone_narrows_with_distance() {
        let detector = detector(true);
        let ray = Ray::new(Vec3::zeros(), Vec3::z());

        // 10 degrees off the ray at 10 m: inside a straight 15 degree cone
        let point = Vec3::new(10.0 * 10f32.to_radians().tan(), 0.0, 10.0);
        assert!(detector.contribution(&ray, point).is_none());

        let straight = IntenSelectDetector::new(
            IntenSelectConfig {
                corrective_k: 1.0,
                ..Default::default()
            },
            TargetKind::INTERACTABLE,
        );
        let contribution = straight.contribution(&ray, point).unwrap();
        assert_relative_eq!(contribution, 1.0 - 10.0 / 15.0, epsilon = 1e-4);
    }

    #[test]
    fn test_vanished_object_is_dropped() {
        let mut world = World::new();
        let entity = spawn_at(&mut world, Vec3::new(0.0, 0.0, 2.0));
        let mut detector = detector(true);
        let pose = Pose::default();

        detector.predict_target(&world, &pose);
        world.set_active(entity, false);
        detector.fixed_update(&world, &pose);

        assert_eq!(detector.score(entity), None);
        assert_eq!(detector.predict_target(&world, &pose), None);
    }

    #[test]
    fn test_stop_clears_scores() {
        let mut world = World::new();
        let entity = spawn_at(&mut world, Vec3::new(0.0, 0.0, 2.0));
        let mut detector = detector(true);
        let pose = Pose::default();

        detector.predict_target(&world, &pose);
        detector.stop();
        detector.stop();

        assert_eq!(detector.state(), DetectorState::Stopped);
        assert_eq!(detector.tracked(), 0);
        assert_eq!(detector.predict_target(&world, &pose), None);
        assert_eq!(detector.score(entity), None);
    }
}
