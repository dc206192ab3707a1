//! Selection feedback
//!
//! Handlers run when a selector commits to or releases a target. They write
//! their effect into the [`World`] (highlight flags, haptic queue) for
//! other layers to consume.

use super::candidate::{DetectionOrigin, SelectionCandidate};
use crate::ecs::components::HapticPulse;
use crate::ecs::World;

/// Reaction to selection changes
pub trait SelectionFeedback {
    /// A candidate was committed
    fn on_selected(&mut self, world: &mut World, candidate: &SelectionCandidate);

    /// A previously committed candidate was released
    fn on_deselected(&mut self, world: &mut World, candidate: &SelectionCandidate);
}

/// Vibrates the controller when something is selected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticFeedback {
    /// Pulse length in seconds
    pub duration: f32,
    /// Pulse strength in [0, 1]
    pub amplitude: f32,
}

impl Default for HapticFeedback {
    fn default() -> Self {
        Self {
            duration: 0.05,
            amplitude: 0.3,
        }
    }
}

impl SelectionFeedback for HapticFeedback {
    fn on_selected(&mut self, world: &mut World, candidate: &SelectionCandidate) {
        world.push_haptic(HapticPulse {
            controller: candidate.controller,
            duration: self.duration,
            amplitude: self.amplitude.clamp(0.0, 1.0),
        });
    }

    fn on_deselected(&mut self, _world: &mut World, _candidate: &SelectionCandidate) {}
}

/// Flags the selected target for visual highlighting
///
/// Proximity selections mark the target selected; pointing selections only
/// mark it hovered. Releasing one controller's selection leaves the flags of
/// other controllers holding the same target untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightFeedback;

impl SelectionFeedback for HighlightFeedback {
    fn on_selected(&mut self, world: &mut World, candidate: &SelectionCandidate) {
        let frame = world.frame();
        if let Some(highlight) = world.highlight_mut(candidate.target) {
            match candidate.origin {
                DetectionOrigin::Proximity => highlight.select(candidate.controller, frame),
                DetectionOrigin::Pointing => highlight.hover(candidate.controller, frame),
            }
        }
    }

    fn on_deselected(&mut self, world: &mut World, candidate: &SelectionCandidate) {
        let frame = world.frame();
        // Target may already be despawned
        if let Some(highlight) = world.highlight_mut(candidate.target) {
            highlight.deselect(candidate.controller, frame);
            highlight.unhover(candidate.controller, frame);
        }
    }
}
