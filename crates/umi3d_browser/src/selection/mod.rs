//! VR target selection
//!
//! Per controller, detectors reduce the world to at most one target each,
//! sub-selectors turn predictions into candidates, and a manager commits to
//! a single winner every frame.
//!
//! # Module Organization
//!
//! - [`candidate`] - Candidates and selector kinds
//! - [`zone`] - Proximity and ray-cast detection zones
//! - [`detector`] - Detector lifecycle and the zone-backed detectors
//! - [`intenselect`] - Cone-scoring pointing detector
//! - [`selector`] - Per-kind sub-selectors
//! - [`manager`] - Per-controller arbitration
//! - [`feedback`] - Highlight and haptic reactions
//! - [`system`] - Scheduler integration

pub mod candidate;
pub mod zone;
pub mod detector;
pub mod intenselect;
pub mod selector;
pub mod manager;
pub mod feedback;
pub mod system;
mod error;

pub use candidate::{DetectionOrigin, SelectionCandidate, SelectorKind};
pub use zone::{ProximityZone, RaycastZone};
pub use detector::{Detector, DetectorState, ProximityDetector, RaycastDetector};
pub use intenselect::IntenSelectDetector;
pub use selector::TargetSelector;
pub use manager::{SelectionManager, SelectionOutcome};
pub use feedback::{HapticFeedback, HighlightFeedback, SelectionFeedback};
pub use system::SelectionSystem;
pub use error::SelectionError;
