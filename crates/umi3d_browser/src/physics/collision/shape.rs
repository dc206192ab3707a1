//! High-level collision shape abstractions
//!
//! Shapes are stored in the owner's local frame and transformed to world
//! space on demand, right before a query.

use super::primitives::{BoundingSphere, OrientedBox, Ray};
use crate::foundation::math::{Pose, Vec3};

/// Collision shape types (stored in LOCAL SPACE)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// A spherical shape (radius only, position from the owner's pose)
    Sphere(f32),
    /// A box given by its half extents, oriented with the owner
    Box(Vec3),
}

impl CollisionShape {
    /// Creates a spherical collision shape with given radius
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere(radius)
    }

    /// Creates a box collision shape from its full size
    pub fn cuboid(size: Vec3) -> Self {
        Self::Box(size * 0.5)
    }

    /// Get the bounding radius in local space
    pub fn local_bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere(radius) => *radius,
            Self::Box(half_extents) => half_extents.magnitude(),
        }
    }

    /// Place this shape in world space at `pose`, shifted by `offset`
    /// (expressed in the pose's local frame)
    pub fn to_world_space(&self, pose: &Pose, offset: Vec3) -> WorldSpaceShape {
        let center = pose.transform_point(offset);
        match self {
            Self::Sphere(radius) => WorldSpaceShape::Sphere(BoundingSphere::new(center, *radius)),
            Self::Box(half_extents) => {
                WorldSpaceShape::Box(OrientedBox::new(center, pose.rotation, *half_extents))
            }
        }
    }
}

/// World-space collision shape (temporary, for testing only)
#[derive(Debug, Clone, Copy)]
pub enum WorldSpaceShape {
    /// World-space sphere
    Sphere(BoundingSphere),
    /// World-space oriented box
    Box(OrientedBox),
}

impl WorldSpaceShape {
    /// Get center position
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::Box(obb) => obb.center,
        }
    }

    /// Get bounding sphere
    pub fn bounding_sphere(&self) -> BoundingSphere {
        match self {
            Self::Sphere(sphere) => *sphere,
            Self::Box(obb) => BoundingSphere::new(obb.center, obb.bounding_radius()),
        }
    }

    /// Closest point on (or inside) the shape to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.closest_point(point),
            Self::Box(obb) => obb.closest_point(point),
        }
    }

    /// Distance from `point` to the shape surface, 0 when inside
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (self.closest_point(point) - point).magnitude()
    }

    /// Whether the shape overlaps a trigger sphere
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        match self {
            Self::Sphere(own) => own.intersects(sphere),
            Self::Box(obb) => {
                (obb.closest_point(sphere.center) - sphere.center).magnitude_squared()
                    <= sphere.radius * sphere.radius
            }
        }
    }

    /// Test ray intersection with this collision shape
    /// Returns distance to hit if intersected within `max_distance`
    pub fn intersect_ray(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        let distance = match self {
            Self::Sphere(sphere) => sphere.intersect_ray(ray),
            Self::Box(obb) => obb.intersect_ray(ray),
        }?;
        (distance <= max_distance).then_some(distance)
    }
}
