//! Highlight state component
//!
//! Tracks whether a target is currently selected or hovered, as written by
//! visual feedback handlers. Several controllers may hold the same target;
//! the flags only clear when the last holder lets go.

use crate::ecs::{Component, ControllerId};
use std::collections::BTreeSet;

/// Component tracking highlight state of a target
///
/// # Examples
/// ```
/// # use umi3d_browser::ecs::components::HighlightComponent;
/// # use umi3d_browser::ecs::World;
/// # use umi3d_browser::foundation::math::Pose;
/// # let mut world = World::new();
/// # let hand = world.add_controller(Pose::default());
/// let mut highlight = HighlightComponent::default();
/// highlight.select(hand, 3);
/// assert!(highlight.is_highlighted());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightComponent {
    /// Whether any controller has this target selected
    pub selected: bool,

    /// Whether any controller is hovering this target (pointed at, not committed)
    pub hovered: bool,

    /// Frame when selection state last changed
    pub selection_frame: u64,

    /// Frame when hover state last changed
    pub hover_frame: u64,

    selected_by: BTreeSet<ControllerId>,
    hovered_by: BTreeSet<ControllerId>,
}

impl HighlightComponent {
    /// Mark target as selected by `controller`
    pub fn select(&mut self, controller: ControllerId, frame: u64) {
        self.selected_by.insert(controller);
        if !self.selected {
            self.selected = true;
            self.selection_frame = frame;
        }
    }

    /// Release `controller`'s selection; clears once no controller holds it
    pub fn deselect(&mut self, controller: ControllerId, frame: u64) {
        self.selected_by.remove(&controller);
        if self.selected && self.selected_by.is_empty() {
            self.selected = false;
            self.selection_frame = frame;
        }
    }

    /// Mark target as hovered by `controller`
    pub fn hover(&mut self, controller: ControllerId, frame: u64) {
        self.hovered_by.insert(controller);
        if !self.hovered {
            self.hovered = true;
            self.hover_frame = frame;
        }
    }

    /// Release `controller`'s hover; clears once no controller hovers it
    pub fn unhover(&mut self, controller: ControllerId, frame: u64) {
        self.hovered_by.remove(&controller);
        if self.hovered && self.hovered_by.is_empty() {
            self.hovered = false;
            self.hover_frame = frame;
        }
    }

    /// Whether `controller` has this target selected
    pub fn is_selected_by(&self, controller: ControllerId) -> bool {
        self.selected_by.contains(&controller)
    }

    /// Check if target is either selected or hovered
    pub fn is_highlighted(&self) -> bool {
        self.selected || self.hovered
    }
}

impl Component for HighlightComponent {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::foundation::math::Pose;

    fn two_hands() -> (ControllerId, ControllerId) {
        let mut world = World::new();
        (world.add_controller(Pose::default()), world.add_controller(Pose::default()))
    }

    #[test]
    fn test_select_deselect() {
        let (hand, _) = two_hands();
        let mut highlight = HighlightComponent::default();
        assert!(!highlight.selected);

        highlight.select(hand, 100);
        assert!(highlight.selected);
        assert_eq!(highlight.selection_frame, 100);

        // Repeated select keeps the original frame
        highlight.select(hand, 120);
        assert_eq!(highlight.selection_frame, 100);

        highlight.deselect(hand, 150);
        assert!(!highlight.selected);
        assert_eq!(highlight.selection_frame, 150);
    }

    #[test]
    fn test_hover_unhover() {
        let (hand, _) = two_hands();
        let mut highlight = HighlightComponent::default();

        highlight.hover(hand, 100);
        assert!(highlight.hovered);
        assert_eq!(highlight.hover_frame, 100);
        assert!(highlight.is_highlighted());

        highlight.unhover(hand, 150);
        assert!(!highlight.hovered);
        assert!(!highlight.is_highlighted());
    }

    #[test]
    fn test_selection_held_until_last_controller_releases() {
        let (left, right) = two_hands();
        let mut highlight = HighlightComponent::default();

        highlight.select(left, 1);
        highlight.select(right, 2);
        highlight.deselect(left, 3);
        assert!(highlight.selected);
        assert!(highlight.is_selected_by(right));
        assert!(!highlight.is_selected_by(left));
        assert_eq!(highlight.selection_frame, 1);

        highlight.deselect(right, 4);
        assert!(!highlight.selected);
        assert_eq!(highlight.selection_frame, 4);
    }

    #[test]
    fn test_release_by_non_holder_keeps_hover() {
        let (left, right) = two_hands();
        let mut highlight = HighlightComponent::default();

        highlight.hover(left, 1);
        highlight.unhover(right, 2);
        assert!(highlight.hovered);
    }
}
