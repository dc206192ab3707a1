//! Interactive target component
//!
//! Marks an entity as something a controller can select, and which kinds of
//! selector may claim it.

use crate::foundation::math::Pose;
use crate::ecs::Component;
use bitflags::bitflags;

bitflags! {
    /// Capabilities a target exposes to selectors
    ///
    /// A target may carry several; each selector only considers targets
    /// carrying its own flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TargetKind: u32 {
        /// Custom world-space UI element (buttons, sliders)
        const CUSTOM_ELEMENT = 1 << 0;
        /// Generic selectable (menus, panels)
        const SELECTABLE = 1 << 1;
        /// Interactable scene object (grab, trigger tools)
        const INTERACTABLE = 1 << 2;
    }
}

/// Component describing an interactive object
///
/// # Examples
/// ```
/// # use umi3d_browser::ecs::components::{TargetComponent, TargetKind};
/// # use umi3d_browser::foundation::math::{Pose, Vec3};
/// let target = TargetComponent::new(Pose::from_position(Vec3::new(0.0, 1.0, 2.0)))
///     .with_kinds(TargetKind::INTERACTABLE | TargetKind::SELECTABLE);
/// assert!(target.accepts(TargetKind::SELECTABLE));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TargetComponent {
    /// World-space pose
    pub pose: Pose,

    /// Which selectors may claim this target
    pub kinds: TargetKind,

    /// Inactive targets are invisible to every detector
    pub active: bool,
}

impl TargetComponent {
    /// Create an active interactable target
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            kinds: TargetKind::INTERACTABLE,
            active: true,
        }
    }

    /// Replace the capability flags
    pub fn with_kinds(mut self, kinds: TargetKind) -> Self {
        self.kinds = kinds;
        self
    }

    /// Set the active state
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether this target is active and carries any of `kinds`
    pub fn accepts(&self, kinds: TargetKind) -> bool {
        self.active && self.kinds.intersects(kinds)
    }
}

impl Component for TargetComponent {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_matching_kind() {
        let target = TargetComponent::new(Pose::default())
            .with_kinds(TargetKind::CUSTOM_ELEMENT | TargetKind::INTERACTABLE);

        assert!(target.accepts(TargetKind::CUSTOM_ELEMENT));
        assert!(target.accepts(TargetKind::INTERACTABLE));
        assert!(!target.accepts(TargetKind::SELECTABLE));
    }

    #[test]
    fn test_inactive_target_accepts_nothing() {
        let target = TargetComponent::new(Pose::default()).with_active(false);
        assert!(!target.accepts(TargetKind::all()));
    }
}
