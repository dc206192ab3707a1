//! Collider component
//!
//! A collider is its own record, owned by a target entity. One target may own
//! several colliders; selection zones remember which collider brought a
//! target in.

use crate::ecs::{ColliderId, Component, Entity};
use crate::foundation::math::{Pose, Vec3};
use crate::physics::collision::{CollisionShape, WorldSpaceShape};

/// Collider attached to a target entity
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderComponent {
    /// Identifier of this collider
    pub id: ColliderId,

    /// Entity this collider belongs to
    pub owner: Entity,

    /// The collision shape, in the owner's local frame
    pub shape: CollisionShape,

    /// Offset from the owner's origin, in the owner's local frame
    pub offset: Vec3,

    /// Disabled colliders produce no overlaps or hits
    pub enabled: bool,
}

impl ColliderComponent {
    /// Shape placed at the owner's pose
    pub fn world_shape(&self, owner_pose: &Pose) -> WorldSpaceShape {
        self.shape.to_world_space(owner_pose, self.offset)
    }
}

impl Component for ColliderComponent {}
