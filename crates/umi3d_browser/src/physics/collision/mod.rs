//! Collision geometry used by selection zones
//!
//! # Module Organization
//!
//! - [`primitives`] - Basic geometric primitives (rays, spheres, oriented boxes)
//! - [`shape`] - Local-space shapes attached to colliders
//!
//! # Key Types
//!
//! - [`CollisionShape`] - Local-space shape stored on a collider
//! - [`WorldSpaceShape`] - Temporary world-space shape for queries
//! - [`Ray`], [`BoundingSphere`], [`OrientedBox`] - Primitive geometric types

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{BoundingSphere, OrientedBox, Ray, RayHit};
pub use shape::{CollisionShape, WorldSpaceShape};
