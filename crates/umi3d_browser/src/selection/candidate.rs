//! Selection candidates
//!
//! A candidate is built fresh every evaluation and only lives until the
//! manager has arbitrated that tick.

use crate::ecs::components::TargetKind;
use crate::ecs::{ControllerId, Entity};
use std::fmt;

/// Detection channel that found a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionOrigin {
    /// Found along the controller's pointing direction
    Pointing,
    /// Found inside the controller's trigger volume
    Proximity,
}

/// Sub-selector family, declared in arbitration priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectorKind {
    /// World-space UI element
    CustomElement,
    /// Generic selectable
    Selectable,
    /// Interactable scene object
    Interactable,
}

impl SelectorKind {
    /// Every kind, highest priority first
    pub const ALL: [SelectorKind; 3] = [
        SelectorKind::CustomElement,
        SelectorKind::Selectable,
        SelectorKind::Interactable,
    ];

    /// Capability a target must carry to be claimed by this kind
    pub fn target_kind(self) -> TargetKind {
        match self {
            Self::CustomElement => TargetKind::CUSTOM_ELEMENT,
            Self::Selectable => TargetKind::SELECTABLE,
            Self::Interactable => TargetKind::INTERACTABLE,
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CustomElement => "custom-element",
            Self::Selectable => "selectable",
            Self::Interactable => "interactable",
        };
        f.write_str(name)
    }
}

/// One proposed target for one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCandidate {
    /// The object proposed for selection
    pub target: Entity,
    /// Channel that found it
    pub origin: DetectionOrigin,
    /// Selector family that proposed it
    pub kind: SelectorKind,
    /// Controller the proposal came from
    pub controller: ControllerId,
    /// Set once the candidate has been committed to projection
    pub projected: bool,
}

impl SelectionCandidate {
    /// Create an uncommitted candidate
    pub fn new(
        target: Entity,
        origin: DetectionOrigin,
        kind: SelectorKind,
        controller: ControllerId,
    ) -> Self {
        Self {
            target,
            origin,
            kind,
            controller,
            projected: false,
        }
    }

    /// Same object through the same channel, ignoring the projection flag
    pub fn same_selection(&self, other: &SelectionCandidate) -> bool {
        self.target == other.target && self.origin == other.origin && self.kind == other.kind
    }
}
