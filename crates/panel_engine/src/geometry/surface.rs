//! Panel surfaces: quadrilateral text surfaces in world space
//!
//! A [`PanelSurface`] is defined by four ordered corner points. Everything
//! else (normal, basis, dimensions, world/local mappings) is derived on
//! demand so that corner mutation by edit widgets never leaves stale state.
//!
//! Surfaces can be transiently degenerate, e.g. during placement when both
//! anchor corners coincide. Every derived query returns `None` in that case
//! instead of producing NaN geometry.

use crate::content::ContentProvider;
use crate::foundation::math::{is_finite, Mat4, Point3, Vec3, WORLD_FORWARD, WORLD_UP};
use crate::geometry::ray::Ray;

/// Minimum surface extent; anything narrower counts as degenerate
pub const MIN_EXTENT: f32 = 0.2;

/// Rays closer to parallel than this never intersect the surface plane
const PARALLEL_EPSILON: f32 = 1e-4;

/// Local (u, v) coordinates of each corner, in corner order
///
/// corner 0 = bottom-left, 1 = bottom-right, 2 = top-right, 3 = top-left.
pub(crate) const CORNER_UV: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Result of a ray-surface intersection test
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Fraction along the bottom edge, in [0, 1]
    pub u: f32,
    /// Fraction along the left edge, in [0, 1]
    pub v: f32,
}

/// Right-handed orthonormal frame of a surface
#[derive(Debug, Clone, Copy)]
pub struct SurfaceBasis {
    /// In-plane horizontal axis
    pub right: Vec3,
    /// In-plane vertical axis
    pub up: Vec3,
    /// Facing direction of the plane
    pub normal: Vec3,
}

/// A rectangular text surface placed in 3D space
pub struct PanelSurface {
    /// Corner points in world space; 0 = bottom-left, counter-clockwise
    pub corners: [Vec3; 4],
    /// Free-form display label
    pub name: String,
    /// Per-frame hover highlight, consumed when the surface renders
    pub hovered: bool,
    content: Option<Box<dyn ContentProvider>>,
}

impl std::fmt::Debug for PanelSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelSurface")
            .field("corners", &self.corners)
            .field("name", &self.name)
            .field("hovered", &self.hovered)
            .field("has_content", &self.content.is_some())
            .finish()
    }
}

impl PanelSurface {
    /// Create a surface from four ordered corners
    pub fn new(corners: [Vec3; 4], name: impl Into<String>) -> Self {
        Self {
            corners,
            name: name.into(),
            hovered: false,
            content: None,
        }
    }

    /// Attach a content provider that supplies this surface's text each frame
    #[must_use]
    pub fn with_content(mut self, provider: Box<dyn ContentProvider>) -> Self {
        self.content = Some(provider);
        self
    }

    /// Replace the surface's content provider
    pub fn set_content(&mut self, provider: Option<Box<dyn ContentProvider>>) {
        self.content = provider;
    }

    /// The attached content provider, if any
    pub fn content(&self) -> Option<&dyn ContentProvider> {
        self.content.as_deref()
    }

    /// Width and height measured along the bottom and left edges
    pub fn dimensions(&self) -> (f32, f32) {
        let width = (self.corners[1] - self.corners[0]).magnitude();
        let height = (self.corners[3] - self.corners[0]).magnitude();
        (width, height)
    }

    /// Average of the four corners
    pub fn center(&self) -> Vec3 {
        (self.corners[0] + self.corners[1] + self.corners[2] + self.corners[3]) / 4.0
    }

    /// True when the surface is too small or collapsed to have geometry
    ///
    /// Written so that NaN dimensions also count as degenerate.
    pub fn is_degenerate(&self) -> bool {
        if self.corners[0] == self.corners[2] {
            return true;
        }
        if self.corners.iter().any(|c| !is_finite(c)) {
            return true;
        }
        let (width, height) = self.dimensions();
        !(width >= MIN_EXTENT && height >= MIN_EXTENT)
    }

    /// Unit normal of the surface plane, `None` when degenerate
    pub fn normal(&self) -> Option<Vec3> {
        if self.is_degenerate() {
            return None;
        }
        let edge1 = self.corners[1] - self.corners[0];
        let edge2 = self.corners[3] - self.corners[0];
        edge1.cross(&edge2).try_normalize(f32::EPSILON)
    }

    /// Right-handed orthonormal frame {right, up, normal}
    ///
    /// `right` comes from crossing the normal with world up; nearly
    /// horizontal surfaces substitute world Z so the cross product stays
    /// well-conditioned.
    pub fn basis(&self) -> Option<SurfaceBasis> {
        let normal = self.normal()?;
        let reference = if normal.dot(&WORLD_UP).abs() > 0.99 {
            WORLD_FORWARD
        } else {
            WORLD_UP
        };
        let right = normal.cross(&reference).try_normalize(f32::EPSILON)?;
        let up = normal.cross(&right).try_normalize(f32::EPSILON)?;
        Some(SurfaceBasis { right, up, normal })
    }

    /// Affine transform from local surface space into world space
    ///
    /// Translation is corner 0; the rotation columns are the bottom-edge
    /// unit, the up-edge unit, and the normal.
    pub fn orientation_transform(&self) -> Option<Mat4> {
        let normal = self.normal()?;
        let bottom = (self.corners[1] - self.corners[0]).try_normalize(f32::EPSILON)?;
        let up = (self.corners[3] - self.corners[0]).try_normalize(f32::EPSILON)?;
        let c0 = self.corners[0];
        Some(Mat4::new(
            bottom.x, up.x, normal.x, c0.x, //
            bottom.y, up.y, normal.y, c0.y, //
            bottom.z, up.z, normal.z, c0.z, //
            0.0, 0.0, 0.0, 1.0,
        ))
    }

    /// Map normalized in-plane coordinates to a world position
    ///
    /// `u`, `v` ∈ [0, 1] span the surface ((0, 0) at corner 0); `w` is an
    /// unscaled offset along the normal. `None` when the surface is
    /// degenerate or the result is not finite.
    pub fn local_to_world(&self, u: f32, v: f32, w: f32) -> Option<Vec3> {
        let (width, height) = self.dimensions();
        let transform = self.orientation_transform()?;
        let point = transform.transform_point(&Point3::new(u * width, v * height, w));
        let world = point.coords;
        is_finite(&world).then_some(world)
    }

    /// Intersect a ray with the surface rectangle
    ///
    /// Solves the ray-plane equation, then projects the hit point onto the
    /// bottom and left edges; the hit only counts when both fractions land
    /// inside [0, 1], i.e. within the rectangle rather than the infinite
    /// plane.
    pub fn ray_intersect(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        let normal = self.normal()?;
        let denominator = normal.dot(&ray.direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = normal.dot(&(self.corners[0] - ray.origin)) / denominator;
        if t < 0.0 || t > max_distance {
            return None;
        }

        let bottom = self.corners[1] - self.corners[0];
        let left = self.corners[3] - self.corners[0];
        let relative = ray.point_at(t) - self.corners[0];
        let u = relative.dot(&bottom) / bottom.magnitude_squared();
        let v = relative.dot(&left) / left.magnitude_squared();

        if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
            Some(SurfaceHit { t, u, v })
        } else {
            None
        }
    }

    /// Derive all four corners of a vertical rectangle from two anchor points
    ///
    /// The lower-Y input lands on the bottom edge and the higher-Y input on
    /// the top edge; the two missing corners keep their partner's X/Z and
    /// substitute the other input's Y, so edges stay axis-aligned within the
    /// anchor span. `flipped` places the inputs on the 1&3 diagonal instead
    /// of 0&2, which corner-resize needs to know which corner moved.
    pub fn generate_corners(first: Vec3, second: Vec3, flipped: bool) -> [Vec3; 4] {
        let (lower, upper) = if first.y < second.y {
            (first, second)
        } else {
            (second, first)
        };
        let height = upper.y - lower.y;

        if flipped {
            let c1 = lower;
            let c3 = upper;
            let c0 = Vec3::new(upper.x, upper.y - height, upper.z);
            let c2 = Vec3::new(lower.x, lower.y + height, lower.z);
            [c0, c1, c2, c3]
        } else {
            let c0 = lower;
            let c2 = upper;
            let c1 = Vec3::new(upper.x, upper.y - height, upper.z);
            let c3 = Vec3::new(lower.x, lower.y + height, lower.z);
            [c0, c1, c2, c3]
        }
    }

    /// Rebuild the rectangle by dragging corner `index` to `target`
    ///
    /// The diagonal corner `(index + 2) % 4` is the pivot and is left
    /// bit-for-bit untouched. The target is projected onto the surface's
    /// current bottom- and left-edge directions, so resize keeps working for
    /// panels in any orientation, and the two adjacent corners are rewritten
    /// to keep the quad rectangular. Returns `false` without mutating
    /// anything when the result would be narrower than `min_extent` on
    /// either axis or would turn the rectangle inside out.
    pub fn resize_from_corner(&mut self, index: usize, target: Vec3, min_extent: f32) -> bool {
        debug_assert!(index < 4);
        let pivot_index = (index + 2) % 4;
        let pivot = self.corners[pivot_index];

        let Some(bottom) = (self.corners[1] - self.corners[0]).try_normalize(f32::EPSILON) else {
            return false;
        };
        let Some(left) = (self.corners[3] - self.corners[0]).try_normalize(f32::EPSILON) else {
            return false;
        };

        let delta = target - pivot;
        let along_bottom = delta.dot(&bottom);
        let along_left = delta.dot(&left);

        // Signed local offsets of the dragged corner relative to the pivot.
        let (su, sv) = CORNER_UV[index];
        let (pu, pv) = CORNER_UV[pivot_index];
        let du = su - pu; // always ±1 across a diagonal
        let dv = sv - pv;

        let new_width = along_bottom * du;
        let new_height = along_left * dv;
        if !new_width.is_finite() || !new_height.is_finite() {
            return false;
        }
        if new_width < min_extent || new_height < min_extent {
            return false;
        }

        let width_step = bottom * (along_bottom * du);
        let height_step = left * (along_left * dv);
        let mut next = self.corners;
        for (j, corner) in next.iter_mut().enumerate() {
            if j == pivot_index {
                continue;
            }
            let (ju, jv) = CORNER_UV[j];
            *corner = pivot + width_step * (ju - pu) + height_step * (jv - pv);
        }
        self.corners = next;
        true
    }
}
