//! Detection zones
//!
//! A zone is a geometric predicate plus the live set of objects satisfying
//! it. Each object appears at most once, mapped to the collider that brought
//! it in.

use crate::ecs::components::TargetKind;
use crate::ecs::{ColliderId, Entity, World};
use crate::foundation::math::Vec3;
use crate::physics::collision::{BoundingSphere, Ray, RayHit};
use std::collections::{BTreeSet, HashMap};

/// Trigger sphere carried by a controller
///
/// Membership changes on enter/exit events, derived each fixed step by
/// diffing the set of overlapping colliders with the previous step. A sweep
/// after every step drops members whose collider or target went away
/// without an exit event.
#[derive(Debug, Clone)]
pub struct ProximityZone {
    radius: f32,
    members: HashMap<Entity, ColliderId>,
    overlapping: BTreeSet<ColliderId>,
}

impl ProximityZone {
    /// Create an empty zone with the given trigger radius
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            members: HashMap::new(),
            overlapping: BTreeSet::new(),
        }
    }

    /// Trigger radius in metres
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of member objects
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the zone holds no object
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `entity` is a member
    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains_key(&entity)
    }

    /// Collider through which `entity` entered
    pub fn collider_of(&self, entity: Entity) -> Option<ColliderId> {
        self.members.get(&entity).copied()
    }

    /// Geometry enter event
    ///
    /// Adds the collider's owner if it is live, carries one of `kinds`, and
    /// is not already a member. Returns whether it was added.
    pub fn on_enter(&mut self, world: &World, collider: ColliderId, kinds: TargetKind) -> bool {
        if !world.is_collider_live(collider) {
            return false;
        }
        let Some(owner) = world.collider(collider).map(|c| c.owner) else {
            return false;
        };
        if !world.target(owner).is_some_and(|target| target.accepts(kinds)) {
            return false;
        }
        if self.members.contains_key(&owner) {
            return false;
        }
        log::trace!("{owner} entered proximity zone through {collider}");
        self.members.insert(owner, collider);
        true
    }

    /// Geometry exit event
    ///
    /// Removes the owner mapped through `collider`. If another of its
    /// colliders still overlaps, the owner stays and is remapped to it.
    pub fn on_exit(&mut self, world: &World, collider: ColliderId) -> bool {
        let Some(owner) = self
            .members
            .iter()
            .find_map(|(entity, id)| (*id == collider).then_some(*entity))
        else {
            return false;
        };

        let replacement = self.overlapping.iter().copied().find(|id| {
            *id != collider
                && world.is_collider_live(*id)
                && world.collider(*id).is_some_and(|c| c.owner == owner)
        });

        match replacement {
            Some(id) => {
                self.members.insert(owner, id);
                false
            }
            None => {
                log::trace!("{owner} left proximity zone through {collider}");
                self.members.remove(&owner);
                true
            }
        }
    }

    /// Drop members whose collider or target was destroyed or deactivated
    ///
    /// Returns the number of members removed.
    pub fn sweep(&mut self, world: &World) -> usize {
        let before = self.members.len();
        self.members.retain(|_, collider| world.is_collider_live(*collider));
        let removed = before - self.members.len();
        if removed > 0 {
            log::debug!("Swept {removed} stale proximity candidates");
        }
        removed
    }

    /// One fixed simulation step with the trigger centred on `origin`
    pub fn fixed_update(&mut self, world: &World, origin: Vec3, kinds: TargetKind) {
        let trigger = BoundingSphere::new(origin, self.radius);
        let current: BTreeSet<ColliderId> = world
            .colliders()
            .filter(|collider| world.is_collider_live(collider.id))
            .filter(|collider| {
                world
                    .collider_shape(collider.id)
                    .is_some_and(|shape| shape.intersects_sphere(&trigger))
            })
            .map(|collider| collider.id)
            .collect();

        let exited: Vec<ColliderId> = self.overlapping.difference(&current).copied().collect();
        let entered: Vec<ColliderId> = current.difference(&self.overlapping).copied().collect();
        self.overlapping = current;

        for collider in exited {
            self.on_exit(world, collider);
        }
        for collider in entered {
            self.on_enter(world, collider, kinds);
        }
        self.sweep(world);
    }

    /// Member whose collider surface is nearest to `origin`
    ///
    /// Ties go to the lowest entity id. Members whose collider has vanished
    /// are skipped.
    pub fn get_closest_in_zone(&self, world: &World, origin: Vec3) -> Option<(Entity, f32)> {
        self.members
            .iter()
            .filter_map(|(entity, collider)| {
                let shape = world.collider_shape(*collider)?;
                Some((*entity, shape.distance_to(origin)))
            })
            .min_by(|(ea, da), (eb, db)| da.total_cmp(db).then(ea.cmp(eb)))
    }

    /// Forget every member and every overlap
    pub fn clear(&mut self) {
        self.members.clear();
        self.overlapping.clear();
    }
}

/// Ray intersection zone along a controller's pointing direction
#[derive(Debug, Clone, Copy)]
pub struct RaycastZone {
    max_distance: f32,
}

impl RaycastZone {
    /// Create a zone ignoring hits beyond `max_distance`
    pub fn new(max_distance: f32) -> Self {
        Self { max_distance }
    }

    /// Every object hit by `ray`, nearest first, one hit per object
    ///
    /// Ties go to the lowest entity id.
    pub fn cast(&self, world: &World, ray: &Ray, kinds: TargetKind) -> Vec<RayHit> {
        let mut best: HashMap<Entity, RayHit> = HashMap::new();

        for collider in world.colliders() {
            if !world.is_collider_live(collider.id) {
                continue;
            }
            if !world.target(collider.owner).is_some_and(|target| target.accepts(kinds)) {
                continue;
            }
            let Some(shape) = world.collider_shape(collider.id) else {
                continue;
            };
            let Some(distance) = shape.intersect_ray(ray, self.max_distance) else {
                continue;
            };

            let hit = RayHit {
                entity: collider.owner,
                collider: collider.id,
                distance,
                point: ray.point_at(distance),
            };
            best.entry(collider.owner)
                .and_modify(|existing| {
                    if distance < existing.distance {
                        *existing = hit;
                    }
                })
                .or_insert(hit);
        }

        let mut hits: Vec<RayHit> = best.into_values().collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.entity.cmp(&b.entity)));
        hits
    }

    /// Nearest object hit by `ray`
    pub fn get_closest_in_zone(&self, world: &World, ray: &Ray, kinds: TargetKind) -> Option<RayHit> {
        self.cast(world, ray, kinds).into_iter().next()
    }
}
