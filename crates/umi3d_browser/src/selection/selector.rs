//! Sub-selectors
//!
//! A [`TargetSelector`] owns the detectors for one [`SelectorKind`], turns
//! their predictions into candidates, and runs feedback when the manager
//! commits to or releases one of them.

use super::candidate::{DetectionOrigin, SelectionCandidate, SelectorKind};
use super::detector::{Detector, ProximityDetector, RaycastDetector};
use super::feedback::{HapticFeedback, HighlightFeedback, SelectionFeedback};
use super::intenselect::IntenSelectDetector;
use crate::config::SelectionConfig;
use crate::ecs::{ControllerId, World};
use crate::foundation::math::Pose;

/// Detectors and feedback for one family of targets
pub struct TargetSelector {
    kind: SelectorKind,
    detectors: Vec<Box<dyn Detector>>,
    feedback: Vec<Box<dyn SelectionFeedback>>,
    locked: bool,
    current: Option<SelectionCandidate>,
}

impl TargetSelector {
    /// Create a selector with no detector
    pub fn new(kind: SelectorKind) -> Self {
        Self {
            kind,
            detectors: Vec::new(),
            feedback: Vec::new(),
            locked: false,
            current: None,
        }
    }

    /// Proximity plus a pointing detector, with highlight and haptic feedback
    ///
    /// Interactables point through IntenSelect; UI elements and generic
    /// selectables use a plain ray cast.
    pub fn standard(kind: SelectorKind, config: &SelectionConfig) -> Self {
        let kinds = kind.target_kind();
        let pointing: Box<dyn Detector> = match kind {
            SelectorKind::Interactable => {
                Box::new(IntenSelectDetector::new(config.intenselect.clone(), kinds))
            }
            SelectorKind::CustomElement | SelectorKind::Selectable => {
                Box::new(RaycastDetector::new(&config.raycast, kinds))
            }
        };

        Self::new(kind)
            .with_detector(Box::new(ProximityDetector::new(&config.proximity, kinds)))
            .with_detector(pointing)
            .with_feedback(Box::new(HighlightFeedback))
            .with_feedback(Box::new(HapticFeedback::default()))
    }

    /// Add a detector; proximity detectors are always polled first
    pub fn with_detector(mut self, detector: Box<dyn Detector>) -> Self {
        self.detectors.push(detector);
        self.detectors
            .sort_by_key(|detector| detector.origin() != DetectionOrigin::Proximity);
        self
    }

    /// Add a feedback handler
    pub fn with_feedback(mut self, feedback: Box<dyn SelectionFeedback>) -> Self {
        self.feedback.push(feedback);
        self
    }

    /// Family of targets this selector handles
    pub fn kind(&self) -> SelectorKind {
        self.kind
    }

    /// Number of detectors
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// Currently committed candidate
    pub fn current(&self) -> Option<&SelectionCandidate> {
        self.current.as_ref()
    }

    /// Whether the selector is busy manipulating a target
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Freeze arbitration while a target is being manipulated
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Resume arbitration
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Start every detector
    pub fn init(&mut self) {
        for detector in &mut self.detectors {
            detector.init();
        }
    }

    /// Fixed step tracking for every detector
    pub fn fixed_update(&mut self, world: &World, pose: &Pose) {
        for detector in &mut self.detectors {
            detector.fixed_update(world, pose);
        }
    }

    /// One candidate per detector that predicts something, in detector order
    pub fn propose(
        &mut self,
        world: &World,
        controller: ControllerId,
        pose: &Pose,
    ) -> Vec<SelectionCandidate> {
        let kind = self.kind;
        self.detectors
            .iter_mut()
            .filter_map(|detector| {
                let target = detector.predict_target(world, pose)?;
                Some(SelectionCandidate::new(target, detector.origin(), kind, controller))
            })
            .collect()
    }

    /// Commit to `candidate`, releasing any different previous one
    ///
    /// Returns `false` if the same selection was already committed.
    pub fn select(&mut self, world: &mut World, candidate: SelectionCandidate) -> bool {
        if self
            .current
            .is_some_and(|current| current.same_selection(&candidate))
        {
            return false;
        }
        self.deselect(world);

        let committed = SelectionCandidate {
            projected: true,
            ..candidate
        };
        for feedback in &mut self.feedback {
            feedback.on_selected(world, &committed);
        }
        self.current = Some(committed);
        true
    }

    /// Release the committed candidate, if any
    pub fn deselect(&mut self, world: &mut World) -> Option<SelectionCandidate> {
        let previous = self.current.take()?;
        for feedback in &mut self.feedback {
            feedback.on_deselected(world, &previous);
        }
        Some(previous)
    }

    /// Release the selection and stop every detector
    pub fn stop(&mut self, world: &mut World) {
        self.deselect(world);
        self.locked = false;
        for detector in &mut self.detectors {
            detector.stop();
        }
    }
}

impl std::fmt::Debug for TargetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetSelector")
            .field("kind", &self.kind)
            .field("detectors", &self.detectors.iter().map(|d| d.name()).collect::<Vec<_>>())
            .field("feedback", &self.feedback.len())
            .field("locked", &self.locked)
            .field("current", &self.current)
            .finish()
    }
}
