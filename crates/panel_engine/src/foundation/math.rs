//! Math utilities and types
//!
//! Provides fundamental math types for the panel geometry engine.

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// World up axis used to orient surface bases
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Fallback axis when a surface normal is nearly parallel to [`WORLD_UP`]
pub const WORLD_FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// True when every component of the vector is a finite number
pub fn is_finite(v: &Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Snap every component of a vector to the nearest multiple of `cell`
///
/// Used by the placement tool so panel anchors land on a coarse grid.
pub fn snap_to_grid(v: Vec3, cell: f32) -> Vec3 {
    Vec3::new(
        (v.x / cell).round() * cell,
        (v.y / cell).round() * cell,
        (v.z / cell).round() * cell,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_snap_to_grid() {
        let snapped = snap_to_grid(Vec3::new(1.06, -0.19, 2.5), 0.125);
        assert_relative_eq!(snapped.x, 1.0);
        assert_relative_eq!(snapped.y, -0.25);
        assert_relative_eq!(snapped.z, 2.5);
    }

    #[test]
    fn test_is_finite() {
        assert!(is_finite(&Vec3::new(1.0, 2.0, 3.0)));
        assert!(!is_finite(&Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(!is_finite(&Vec3::new(0.0, f32::INFINITY, 0.0)));
    }
}
