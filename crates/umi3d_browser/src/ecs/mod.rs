//! Entity-Component-System implementation
//!
//! An explicit world, a handful of components and a single-threaded
//! scheduler. Systems receive their dependencies as arguments.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod system;
pub mod scheduler;

pub use world::{World, MAX_PENDING_HAPTICS};
pub use entity::{ColliderId, ControllerId, Entity};
pub use component::Component;
pub use system::System;
pub use scheduler::{Scheduler, SystemPhase};
