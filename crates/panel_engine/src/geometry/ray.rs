//! Viewer rays for surface targeting and widget hit-testing

use crate::foundation::math::Vec3;

/// A ray from a viewer's eye position along their look direction
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

    /// Perpendicular distance from the ray line to a point
    ///
    /// Returns `(distance, t)` where `t` is the projection scalar of the
    /// point onto the ray. `None` when the point projects behind the origin,
    /// so targets behind the viewer never register.
    pub fn closest_approach(&self, point: Vec3) -> Option<(f32, f32)> {
        let to_point = point - self.origin;
        let t = to_point.dot(&self.direction);
        if t <= 0.0 {
            return None;
        }
        let closest = self.point_at(t);
        Some(((closest - point).magnitude(), t))
    }
}
