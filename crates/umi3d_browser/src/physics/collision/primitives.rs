//! Primitive collision shapes and intersection algorithms
//!
//! Provides basic geometric primitives (rays, spheres, oriented boxes) with
//! the intersection and closest-point queries used by selection zones.

use crate::ecs::{ColliderId, Entity};
use crate::foundation::math::{Quat, Vec3};

/// A ray for ray casting and pointing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Split `point - origin` into the distance along the ray and the
    /// distance away from it
    pub fn project(&self, point: Vec3) -> (f32, f32) {
        let offset = point - self.origin;
        let along = offset.dot(&self.direction);
        let perpendicular = (offset - self.direction * along).magnitude();
        (along, perpendicular)
    }
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The entity owning the collider that was hit
    pub entity: Entity,
    /// The collider that was hit
    pub collider: ColliderId,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Closest point of the solid sphere to `point`; a point inside the
    /// sphere is its own closest point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let offset = point - self.center;
        let distance = offset.magnitude();
        if distance <= self.radius {
            point
        } else {
            self.center + offset * (self.radius / distance)
        }
    }

    /// Test ray intersection with this sphere
    /// Returns the distance along the ray if hit, None otherwise
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        // Vector from ray origin to sphere center
        let oc = ray.origin - self.center;

        // Solve: |origin + t*direction - center|^2 = radius^2
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        // Origin inside the sphere counts as a hit at distance 0
        if t1 >= 0.0 {
            Some(t1)
        } else if t2 >= 0.0 {
            Some(0.0)
        } else {
            None
        }
    }
}

/// A box with arbitrary orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Center in world space
    pub center: Vec3,
    /// Orientation of the box axes
    pub rotation: Quat,
    /// Half size along each local axis
    pub half_extents: Vec3,
}

impl OrientedBox {
    /// Creates a new oriented box
    pub fn new(center: Vec3, rotation: Quat, half_extents: Vec3) -> Self {
        Self {
            center,
            rotation,
            half_extents,
        }
    }

    fn to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.center)
    }

    /// Closest point of the solid box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let local = self.to_local(point);
        let clamped = Vec3::new(
            local.x.clamp(-self.half_extents.x, self.half_extents.x),
            local.y.clamp(-self.half_extents.y, self.half_extents.y),
            local.z.clamp(-self.half_extents.z, self.half_extents.z),
        );
        self.center + self.rotation * clamped
    }

    /// Radius of the sphere enclosing the box
    pub fn bounding_radius(&self) -> f32 {
        self.half_extents.magnitude()
    }

    /// Slab test in the box's local frame
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let origin = self.to_local(ray.origin);
        let direction = self.rotation.inverse() * ray.direction;

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let extent = self.half_extents[axis];
            if direction[axis].abs() < f32::EPSILON {
                // Parallel to this slab: must already be inside it
                if origin[axis] < -extent || origin[axis] > extent {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / direction[axis];
            let mut t0 = (-extent - origin[axis]) * inv;
            let mut t1 = (extent - origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            None
        } else {
            Some(t_min.max(0.0))
        }
    }
}
