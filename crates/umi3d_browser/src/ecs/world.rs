//! ECS World implementation
//!
//! Owns every target, collider and controller pose. Systems receive it by
//! `&mut` from the scheduler; nothing here is global.

use super::components::{
    ColliderComponent, HapticPulse, HighlightComponent, TargetComponent,
};
use super::{ColliderId, ControllerId, Entity};
use crate::foundation::math::{Pose, Vec3};
use crate::physics::collision::{CollisionShape, WorldSpaceShape};
use std::collections::{BTreeMap, VecDeque};

/// Haptic pulses kept before the oldest is dropped
pub const MAX_PENDING_HAPTICS: usize = 64;

/// ECS World containing all entities and components
///
/// Storage is ordered by identifier so every iteration is deterministic.
#[derive(Debug, Default)]
pub struct World {
    next_entity_id: u32,
    next_collider_id: u32,
    next_controller_id: u32,
    targets: BTreeMap<Entity, TargetComponent>,
    highlights: BTreeMap<Entity, HighlightComponent>,
    colliders: BTreeMap<ColliderId, ColliderComponent>,
    controllers: BTreeMap<ControllerId, Pose>,
    haptic_queue: VecDeque<HapticPulse>,
    frame: u64,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new target entity
    pub fn spawn_target(&mut self, target: TargetComponent) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.targets.insert(entity, target);
        self.highlights.insert(entity, HighlightComponent::default());
        entity
    }

    /// Attach a collider to an existing target
    ///
    /// Returns `None` if the entity does not exist.
    pub fn attach_collider(
        &mut self,
        owner: Entity,
        shape: CollisionShape,
        offset: Vec3,
    ) -> Option<ColliderId> {
        if !self.targets.contains_key(&owner) {
            return None;
        }
        let id = ColliderId(self.next_collider_id);
        self.next_collider_id += 1;
        self.colliders.insert(
            id,
            ColliderComponent {
                id,
                owner,
                shape,
                offset,
                enabled: true,
            },
        );
        Some(id)
    }

    /// Destroy a target and every collider it owns
    pub fn despawn(&mut self, entity: Entity) -> bool {
        let existed = self.targets.remove(&entity).is_some();
        self.highlights.remove(&entity);
        self.colliders.retain(|_, collider| collider.owner != entity);
        existed
    }

    /// Remove a single collider
    pub fn remove_collider(&mut self, id: ColliderId) -> bool {
        self.colliders.remove(&id).is_some()
    }

    /// Activate or deactivate a target
    pub fn set_active(&mut self, entity: Entity, active: bool) -> bool {
        match self.targets.get_mut(&entity) {
            Some(target) => {
                target.active = active;
                true
            }
            None => false,
        }
    }

    /// Enable or disable a collider
    pub fn set_collider_enabled(&mut self, id: ColliderId, enabled: bool) -> bool {
        match self.colliders.get_mut(&id) {
            Some(collider) => {
                collider.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Move a target
    pub fn set_pose(&mut self, entity: Entity, pose: Pose) -> bool {
        match self.targets.get_mut(&entity) {
            Some(target) => {
                target.pose = pose;
                true
            }
            None => false,
        }
    }

    /// Get a target component
    pub fn target(&self, entity: Entity) -> Option<&TargetComponent> {
        self.targets.get(&entity)
    }

    /// Iterate over all targets in creation order
    pub fn targets(&self) -> impl Iterator<Item = (Entity, &TargetComponent)> {
        self.targets.iter().map(|(entity, target)| (*entity, target))
    }

    /// Get a target's highlight state
    pub fn highlight(&self, entity: Entity) -> Option<&HighlightComponent> {
        self.highlights.get(&entity)
    }

    /// Get a target's highlight state mutably
    pub fn highlight_mut(&mut self, entity: Entity) -> Option<&mut HighlightComponent> {
        self.highlights.get_mut(&entity)
    }

    /// Get a collider
    pub fn collider(&self, id: ColliderId) -> Option<&ColliderComponent> {
        self.colliders.get(&id)
    }

    /// Iterate over all colliders in creation order
    pub fn colliders(&self) -> impl Iterator<Item = &ColliderComponent> {
        self.colliders.values()
    }

    /// Whether a collider can currently be touched: it exists, is enabled,
    /// and its owner exists and is active
    pub fn is_collider_live(&self, id: ColliderId) -> bool {
        self.colliders.get(&id).is_some_and(|collider| {
            collider.enabled
                && self
                    .targets
                    .get(&collider.owner)
                    .is_some_and(|target| target.active)
        })
    }

    /// World-space shape of a collider, placed at its owner's pose
    pub fn collider_shape(&self, id: ColliderId) -> Option<WorldSpaceShape> {
        let collider = self.colliders.get(&id)?;
        let owner = self.targets.get(&collider.owner)?;
        Some(collider.world_shape(&owner.pose))
    }

    /// Register a tracked controller
    pub fn add_controller(&mut self, pose: Pose) -> ControllerId {
        let id = ControllerId(self.next_controller_id);
        self.next_controller_id += 1;
        self.controllers.insert(id, pose);
        id
    }

    /// Update a controller's tracked pose
    pub fn set_controller_pose(&mut self, id: ControllerId, pose: Pose) -> bool {
        match self.controllers.get_mut(&id) {
            Some(current) => {
                *current = pose;
                true
            }
            None => false,
        }
    }

    /// Current pose of a controller
    pub fn controller_pose(&self, id: ControllerId) -> Option<Pose> {
        self.controllers.get(&id).copied()
    }

    /// Iterate over registered controllers
    pub fn controllers(&self) -> impl Iterator<Item = ControllerId> + '_ {
        self.controllers.keys().copied()
    }

    /// Queue a haptic pulse for the device layer
    ///
    /// The device layer must call [`World::drain_haptics`] every frame. At
    /// most [`MAX_PENDING_HAPTICS`] pulses are kept; past that the oldest
    /// pulse is dropped.
    pub fn push_haptic(&mut self, pulse: HapticPulse) {
        if self.haptic_queue.len() >= MAX_PENDING_HAPTICS {
            if let Some(dropped) = self.haptic_queue.pop_front() {
                log::warn!(
                    "Haptic queue full, dropping pulse for {}",
                    dropped.controller
                );
            }
        }
        self.haptic_queue.push_back(pulse);
    }

    /// Take every queued haptic pulse, oldest first
    pub fn drain_haptics(&mut self) -> Vec<HapticPulse> {
        self.haptic_queue.drain(..).collect()
    }

    /// Current frame number
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the frame counter (called once per scheduler tick)
    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }
}
