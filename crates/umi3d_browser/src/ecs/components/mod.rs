//! ECS Components module
//!
//! Data attached to entities in the [`World`](super::World)

pub mod target;
pub mod collision;
pub mod highlight;
pub mod haptics;

pub use target::{TargetComponent, TargetKind};
pub use collision::ColliderComponent;
pub use highlight::HighlightComponent;
pub use haptics::HapticPulse;
