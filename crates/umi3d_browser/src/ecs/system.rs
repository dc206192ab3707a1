//! System trait

use super::World;
use std::any::Any;

/// System trait for processing the world once per tick
///
/// Systems are run by the [`Scheduler`](super::Scheduler) in registration
/// order, on the calling thread.
pub trait System {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Run once per fixed simulation step, before `update`
    fn fixed_update(&mut self, _world: &mut World, _step: f32) {}

    /// Run once per tick
    fn update(&mut self, world: &mut World, delta_time: f32);

    /// Downcast to Any for type-specific access
    fn as_any(&self) -> &dyn Any;

    /// Downcast to Any for mutable type-specific access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
