//! Per-controller selection arbitration
//!
//! Each frame the manager polls its selectors in priority order and commits
//! to at most one candidate:
//!
//! 1. Skip the frame if any selector is locked.
//! 2. Gather proposals, custom elements first, then selectables, then
//!    interactables.
//! 3. With no proposal, release the current selection (after the optional
//!    debounce).
//! 4. Otherwise take the first proximity proposal, or failing that the
//!    first proposal overall.
//! 5. Release the previous selector's selection before committing through a
//!    different selector.

use super::candidate::{DetectionOrigin, SelectionCandidate, SelectorKind};
use super::error::SelectionError;
use super::selector::TargetSelector;
use crate::config::{ManagerConfig, SelectionConfig};
use crate::ecs::{ControllerId, World};
use crate::foundation::math::Pose;
use crate::foundation::time::Countdown;

/// What happened during one manager update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// A selector was locked; nothing was evaluated
    Skipped,
    /// Nothing proposed and nothing selected
    Idle,
    /// The committed candidate won again
    Kept(SelectionCandidate),
    /// A new candidate was committed
    Committed(SelectionCandidate),
    /// The previous candidate was released with nothing replacing it
    Deselected(SelectionCandidate),
    /// Nothing proposed; release is waiting on the debounce timer
    PendingDeselect,
}

/// Arbitrates the selectors of one controller
#[derive(Debug)]
pub struct SelectionManager {
    controller: ControllerId,
    config: ManagerConfig,
    selectors: Vec<TargetSelector>,
    current: Option<SelectionCandidate>,
    debounce: Countdown,
}

impl SelectionManager {
    /// Create a manager with no selector
    pub fn new(controller: ControllerId, config: ManagerConfig) -> Self {
        Self {
            controller,
            config,
            selectors: Vec::new(),
            current: None,
            debounce: Countdown::new(),
        }
    }

    /// Manager with the standard selector for every kind
    pub fn standard(controller: ControllerId, config: &SelectionConfig) -> Self {
        let mut manager = Self::new(controller, config.manager.clone());
        for kind in SelectorKind::ALL {
            manager.add_selector(TargetSelector::standard(kind, config));
        }
        manager
    }

    /// Register a selector, replacing any previous one of the same kind
    ///
    /// Selectors are kept in priority order whatever the registration order.
    pub fn add_selector(&mut self, selector: TargetSelector) -> Option<TargetSelector> {
        match self
            .selectors
            .binary_search_by_key(&selector.kind(), |existing| existing.kind())
        {
            Ok(index) => {
                log::warn!("Replacing {} selector", selector.kind());
                Some(std::mem::replace(&mut self.selectors[index], selector))
            }
            Err(index) => {
                self.selectors.insert(index, selector);
                None
            }
        }
    }

    /// Controller this manager selects for
    pub fn controller(&self) -> ControllerId {
        self.controller
    }

    /// Committed candidate
    pub fn current(&self) -> Option<&SelectionCandidate> {
        self.current.as_ref()
    }

    /// Registered selectors in priority order
    pub fn selectors(&self) -> &[TargetSelector] {
        &self.selectors
    }

    /// Selector handling `kind`
    pub fn selector(&self, kind: SelectorKind) -> Option<&TargetSelector> {
        self.selectors.iter().find(|selector| selector.kind() == kind)
    }

    /// Mutable selector handling `kind`, e.g. to lock it
    pub fn selector_mut(&mut self, kind: SelectorKind) -> Option<&mut TargetSelector> {
        self.selectors.iter_mut().find(|selector| selector.kind() == kind)
    }

    /// Start every selector's detectors
    pub fn init(&mut self) {
        for selector in &mut self.selectors {
            selector.init();
        }
    }

    fn pose(&self, world: &World) -> Result<Pose, SelectionError> {
        world
            .controller_pose(self.controller)
            .ok_or(SelectionError::UnknownController(self.controller))
    }

    /// Fixed step tracking for every selector
    pub fn fixed_update(&mut self, world: &World) -> Result<(), SelectionError> {
        let pose = self.pose(world)?;
        for selector in &mut self.selectors {
            selector.fixed_update(world, &pose);
        }
        Ok(())
    }

    /// Run one arbitration cycle
    pub fn update(&mut self, world: &mut World, delta_time: f32) -> Result<SelectionOutcome, SelectionError> {
        if self.selectors.iter().any(TargetSelector::is_locked) {
            return Ok(SelectionOutcome::Skipped);
        }

        let pose = self.pose(world)?;
        let controller = self.controller;
        let view: &World = world;
        let proposals: Vec<SelectionCandidate> = self
            .selectors
            .iter_mut()
            .flat_map(|selector| selector.propose(view, controller, &pose))
            .collect();

        let winner = proposals
            .iter()
            .find(|candidate| candidate.origin == DetectionOrigin::Proximity)
            .or_else(|| proposals.first())
            .copied();

        match winner {
            Some(candidate) => {
                self.debounce.cancel();
                self.commit(world, candidate)
            }
            None => Ok(self.release(world, delta_time)),
        }
    }

    fn release(&mut self, world: &mut World, delta_time: f32) -> SelectionOutcome {
        if self.current.is_none() {
            return SelectionOutcome::Idle;
        }
        if self.config.deselect_debounce > 0.0 {
            if !self.debounce.is_running() {
                self.debounce.start(self.config.deselect_debounce);
                return SelectionOutcome::PendingDeselect;
            }
            if !self.debounce.tick(delta_time) {
                return SelectionOutcome::PendingDeselect;
            }
        }
        match self.deselect(world) {
            Some(previous) => SelectionOutcome::Deselected(previous),
            None => SelectionOutcome::Idle,
        }
    }

    /// Commit `candidate` through the selector of its kind
    ///
    /// Fails if no selector handles the candidate's kind, which means the
    /// manager was wired without it.
    pub fn commit(
        &mut self,
        world: &mut World,
        candidate: SelectionCandidate,
    ) -> Result<SelectionOutcome, SelectionError> {
        let Some(index) = self
            .selectors
            .iter()
            .position(|selector| selector.kind() == candidate.kind)
        else {
            return Err(SelectionError::UnsupportedCandidate(candidate.kind));
        };

        if let Some(current) = self.current {
            if current.same_selection(&candidate) {
                return Ok(SelectionOutcome::Kept(current));
            }
            if current.kind != candidate.kind {
                self.deselect(world);
            }
        }

        self.selectors[index].select(world, candidate);
        let committed = self.selectors[index].current().copied().unwrap_or(candidate);
        log::debug!(
            "{} committed {} {} via {:?}",
            self.controller,
            committed.kind,
            committed.target,
            committed.origin
        );
        self.current = Some(committed);
        Ok(SelectionOutcome::Committed(committed))
    }

    /// Release the committed candidate, if any
    pub fn deselect(&mut self, world: &mut World) -> Option<SelectionCandidate> {
        let previous = self.current.take()?;
        self.debounce.cancel();
        if let Some(selector) = self.selectors.iter_mut().find(|s| s.kind() == previous.kind) {
            selector.deselect(world);
        }
        log::debug!("{} released {}", self.controller, previous.target);
        Some(previous)
    }

    /// Release everything and stop every detector
    pub fn stop(&mut self, world: &mut World) {
        self.deselect(world);
        self.debounce.cancel();
        for selector in &mut self.selectors {
            selector.stop(world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::TargetComponent;
    use crate::ecs::Entity;
    use crate::selection::detector::{Detector, DetectorState};
    use crate::selection::feedback::HighlightFeedback;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Detector returning whatever the test puts in its slot
    struct Scripted {
        origin: DetectionOrigin,
        slot: Rc<Cell<Option<Entity>>>,
        state: DetectorState,
    }

    impl Detector for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }
        fn origin(&self) -> DetectionOrigin {
            self.origin
        }
        fn state(&self) -> DetectorState {
            self.state
        }
        fn set_state(&mut self, state: DetectorState) {
            self.state = state;
        }
        fn reset(&mut self) {}
        fn track(&mut self, _world: &World, _pose: &Pose) {}
        fn predict(&mut self, _world: &World, _pose: &Pose) -> Option<Entity> {
            self.slot.get()
        }
    }

    fn scripted(kind: SelectorKind, origin: DetectionOrigin) -> (TargetSelector, Rc<Cell<Option<Entity>>>) {
        let slot = Rc::new(Cell::new(None));
        let selector = TargetSelector::new(kind)
            .with_detector(Box::new(Scripted {
                origin,
                slot: Rc::clone(&slot),
                state: DetectorState::Stopped,
            }))
            .with_feedback(Box::new(HighlightFeedback));
        (selector, slot)
    }

    fn setup(debounce: f32) -> (World, SelectionManager, Entity, Entity) {
        let mut world = World::new();
        let controller = world.add_controller(Pose::default());
        let a = world.spawn_target(TargetComponent::new(Pose::default()));
        let b = world.spawn_target(TargetComponent::new(Pose::default()));
        let manager = SelectionManager::new(
            controller,
            ManagerConfig {
                deselect_debounce: debounce,
            },
        );
        (world, manager, a, b)
    }

    fn committed_target(outcome: SelectionOutcome) -> Option<Entity> {
        match outcome {
            SelectionOutcome::Committed(candidate) => Some(candidate.target),
            _ => None,
        }
    }

    #[test]
    fn test_proximity_beats_pointing() {
        let (mut world, mut manager, a, b) = setup(0.0);
        let (ui, ui_slot) = scripted(SelectorKind::CustomElement, DetectionOrigin::Pointing);
        let (object, object_slot) = scripted(SelectorKind::Interactable, DetectionOrigin::Proximity);
        manager.add_selector(ui);
        manager.add_selector(object);
        manager.init();

        ui_slot.set(Some(a));
        object_slot.set(Some(b));

        let outcome = manager.update(&mut world, 0.016).unwrap();
        assert_eq!(committed_target(outcome), Some(b));
        assert_eq!(manager.current().unwrap().origin, DetectionOrigin::Proximity);
    }

    #[test]
    fn test_pointing_tie_follows_priority_order() {
        let (mut world, mut manager, a, b) = setup(0.0);
        let (selectable, selectable_slot) = scripted(SelectorKind::Selectable, DetectionOrigin::Pointing);
        let (ui, ui_slot) = scripted(SelectorKind::CustomElement, DetectionOrigin::Pointing);
        // Registered out of priority order on purpose
        manager.add_selector(selectable);
        manager.add_selector(ui);
        manager.init();

        selectable_slot.set(Some(a));
        ui_slot.set(Some(b));

        let outcome = manager.update(&mut world, 0.016).unwrap();
        assert_eq!(committed_target(outcome), Some(b));
        assert_eq!(manager.current().unwrap().kind, SelectorKind::CustomElement);
    }

    #[test]
    fn test_switching_selector_deselects_previous() {
        let (mut world, mut manager, a, b) = setup(0.0);
        let (ui, ui_slot) = scripted(SelectorKind::CustomElement, DetectionOrigin::Pointing);
        let (object, object_slot) = scripted(SelectorKind::Interactable, DetectionOrigin::Proximity);
        manager.add_selector(ui);
        manager.add_selector(object);
        manager.init();

        ui_slot.set(Some(a));
        manager.update(&mut world, 0.016).unwrap();
        assert!(world.highlight(a).unwrap().hovered);

        object_slot.set(Some(b));
        manager.update(&mut world, 0.016).unwrap();

        assert!(manager.selector(SelectorKind::CustomElement).unwrap().current().is_none());
        assert!(!world.highlight(a).unwrap().is_highlighted());
        assert!(world.highlight(b).unwrap().selected);
    }

    #[test]
    fn test_same_winner_is_kept() {
        let (mut world, mut manager, a, _) = setup(0.0);
        let (object, slot) = scripted(SelectorKind::Interactable, DetectionOrigin::Proximity);
        manager.add_selector(object);
        manager.init();

        slot.set(Some(a));
        manager.update(&mut world, 0.016).unwrap();
        let outcome = manager.update(&mut world, 0.016).unwrap();
        assert!(matches!(outcome, SelectionOutcome::Kept(candidate) if candidate.target == a && candidate.projected));
    }

    #[test]
    fn test_no_proposal_deselects_then_idles() {
        let (mut world, mut manager, a, _) = setup(0.0);
        let (object, slot) = scripted(SelectorKind::Interactable, DetectionOrigin::Proximity);
        manager.add_selector(object);
        manager.init();

        assert_eq!(manager.update(&mut world, 0.016).unwrap(), SelectionOutcome::Idle);

        slot.set(Some(a));
        manager.update(&mut world, 0.016).unwrap();
        slot.set(None);

        let outcome = manager.update(&mut world, 0.016).unwrap();
        assert!(matches!(outcome, SelectionOutcome::Deselected(candidate) if candidate.target == a));
        assert!(!world.highlight(a).unwrap().selected);
        assert_eq!(manager.update(&mut world, 0.016).unwrap(), SelectionOutcome::Idle);
    }

    #[test]
    fn test_debounce_delays_release() {
        let (mut world, mut manager, a, _) = setup(0.1);
        let (object, slot) = scripted(SelectorKind::Interactable, DetectionOrigin::Proximity);
        manager.add_selector(object);
        manager.init();

        slot.set(Some(a));
        manager.update(&mut world, 0.05).unwrap();
        slot.set(None);
        assert_eq!(manager.update(&mut world, 0.05).unwrap(), SelectionOutcome::PendingDeselect);

        // Reappearing before the deadline keeps the selection
        slot.set(Some(a));
        assert!(matches!(manager.update(&mut world, 0.05).unwrap(), SelectionOutcome::Kept(_)));

        slot.set(None);
        assert_eq!(manager.update(&mut world, 0.05).unwrap(), SelectionOutcome::PendingDeselect);
        assert_eq!(manager.update(&mut world, 0.05).unwrap(), SelectionOutcome::PendingDeselect);
        assert!(matches!(manager.update(&mut world, 0.05).unwrap(), SelectionOutcome::Deselected(_)));
    }

    #[test]
    fn test_locked_selector_skips_cycle() {
        let (mut world, mut manager, a, b) = setup(0.0);
        let (ui, _) = scripted(SelectorKind::CustomElement, DetectionOrigin::Pointing);
        let (object, slot) = scripted(SelectorKind::Interactable, DetectionOrigin::Proximity);
        manager.add_selector(ui);
        manager.add_selector(object);
        manager.init();

        slot.set(Some(a));
        manager.update(&mut world, 0.016).unwrap();

        manager.selector_mut(SelectorKind::CustomElement).unwrap().lock();
        slot.set(Some(b));
        assert_eq!(manager.update(&mut world, 0.016).unwrap(), SelectionOutcome::Skipped);
        assert_eq!(manager.current().unwrap().target, a);

        manager.selector_mut(SelectorKind::CustomElement).unwrap().unlock();
        assert_eq!(committed_target(manager.update(&mut world, 0.016).unwrap()), Some(b));
    }

    #[test]
    fn test_commit_without_matching_selector_fails() {
        let (mut world, mut manager, a, _) = setup(0.0);
        let (object, _) = scripted(SelectorKind::Interactable, DetectionOrigin::Proximity);
        manager.add_selector(object);

        let candidate = SelectionCandidate::new(
            a,
            DetectionOrigin::Pointing,
            SelectorKind::CustomElement,
            manager.controller(),
        );
        assert_eq!(
            manager.commit(&mut world, candidate),
            Err(SelectionError::UnsupportedCandidate(SelectorKind::CustomElement))
        );
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_unknown_controller_is_reported() {
        let mut world = World::new();
        let mut other = World::new();
        other.add_controller(Pose::default());
        let stray = other.add_controller(Pose::default());

        let mut manager = SelectionManager::new(stray, ManagerConfig::default());
        assert_eq!(
            manager.update(&mut world, 0.016),
            Err(SelectionError::UnknownController(stray))
        );
        assert!(manager.fixed_update(&world).is_err());
    }

    #[test]
    fn test_add_selector_replaces_same_kind() {
        let (_, mut manager, _, _) = setup(0.0);
        let (first, _) = scripted(SelectorKind::Selectable, DetectionOrigin::Pointing);
        let (second, _) = scripted(SelectorKind::Selectable, DetectionOrigin::Proximity);

        assert!(manager.add_selector(first).is_none());
        assert!(manager.add_selector(second).is_some());
        assert_eq!(manager.selectors().len(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut world, mut manager, a, _) = setup(0.0);
        let (object, slot) = scripted(SelectorKind::Interactable, DetectionOrigin::Proximity);
        manager.add_selector(object);
        manager.init();

        slot.set(Some(a));
        manager.update(&mut world, 0.016).unwrap();

        manager.stop(&mut world);
        manager.stop(&mut world);
        assert!(manager.current().is_none());
        assert!(!world.highlight(a).unwrap().selected);
        // Stopped detectors predict nothing
        assert_eq!(manager.update(&mut world, 0.016).unwrap(), SelectionOutcome::Idle);
    }
}
