//! Text fitting: scale rendered content to exactly span a surface
//!
//! Glyphs have arbitrary pixel widths, so a string's rendered extent rarely
//! matches a panel's physical width on its own. The fitter measures the
//! content against the glyph table and builds the affine transform that
//! stretches the text block to cover the surface's local [0, 1] span,
//! whatever the underlying font metrics are.

use crate::core::config::FitConfig;
use crate::foundation::math::{Mat4, Vec3};
use crate::geometry::PanelSurface;
use crate::text::glyphs::GlyphMetrics;

/// Computes content-to-surface transforms
#[derive(Debug, Clone, Copy)]
pub struct TextFitter<'a, M: GlyphMetrics> {
    metrics: &'a M,
    config: &'a FitConfig,
}

impl<'a, M: GlyphMetrics> TextFitter<'a, M> {
    /// Create a fitter over a glyph table and fitting constants
    pub fn new(metrics: &'a M, config: &'a FitConfig) -> Self {
        Self { metrics, config }
    }

    /// Character grid a surface can hold, `None` when degenerate
    ///
    /// Columns and rows both derive from the base font size, so the grid
    /// tracks the surface's physical dimensions.
    pub fn character_grid(&self, surface: &PanelSurface) -> Option<(u32, u32)> {
        if surface.is_degenerate() {
            return None;
        }
        let (width, height) = surface.dimensions();
        let columns = (width / self.config.base_font_size) as u32;
        let rows = (height / self.config.base_font_size) as u32;
        Some((columns, rows))
    }

    /// Pixel advance budget for a surface's content
    pub fn advance_budget(&self, columns: u32) -> u32 {
        columns * self.config.average_advance
    }

    /// Normalizing transform of the raw text block
    ///
    /// Re-centers the text's local origin, then scales horizontally by
    /// `reference_unit / measured_pixel_width` so the measured extent maps
    /// to exactly one content unit. Vertical scale is fixed.
    pub fn content_transform(&self, measured_pixel_width: f32) -> Mat4 {
        let horizontal = self.config.reference_unit / measured_pixel_width;
        Mat4::new_translation(&Vec3::new(
            self.config.text_offset_x * horizontal + 0.5,
            0.0,
            0.0,
        )) * Mat4::new_nonuniform_scaling(&Vec3::new(
            horizontal * self.config.background_width_scale,
            self.config.vertical_scale,
            1.0,
        ))
    }

    /// Full world transform for rendering `content` onto `surface`
    ///
    /// Orientation transform, scaled by (width, height / line count, 1),
    /// composed with the content transform. `None` for degenerate surfaces,
    /// unmeasurable content, or a non-finite result.
    pub fn fit(&self, surface: &PanelSurface, content: &str) -> Option<Mat4> {
        let orientation = surface.orientation_transform()?;
        let measured = self.metrics.measure(content) as f32;
        if measured <= 0.0 {
            return None;
        }

        let (width, height) = surface.dimensions();
        let line_count = content.lines().count().max(1) as f32;
        let transform = orientation
            * Mat4::new_nonuniform_scaling(&Vec3::new(width, height / line_count, 1.0))
            * self.content_transform(measured);

        transform.iter().all(|v| v.is_finite()).then_some(transform)
    }
}
