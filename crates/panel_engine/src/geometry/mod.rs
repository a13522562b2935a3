//! Surface geometry: rays, panel surfaces, and intersection tests

pub mod ray;
pub mod surface;

pub use ray::Ray;
pub use surface::{PanelSurface, SurfaceBasis, SurfaceHit, MIN_EXTENT};
