//! Physics module
//!
//! Geometric queries (overlap, closest point, ray cast) over the colliders
//! registered in the [`World`](crate::ecs::World).

pub mod collision;

pub use collision::{BoundingSphere, CollisionShape, OrientedBox, Ray, RayHit, WorldSpaceShape};
