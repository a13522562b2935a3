//! Per-frame surface rendering
//!
//! Asks each surface's content provider for a string sized to the surface's
//! character grid, fits it, and emits exactly one text primitive. Surfaces
//! without valid geometry are skipped for the frame and recover on their own
//! once their corners become valid again.

use crate::core::config::FitConfig;
use crate::geometry::PanelSurface;
use crate::render::{PrimitiveContent, RenderPrimitive, RenderSink};
use crate::text::{GlyphMetrics, TextFitter};

/// Renders panel surfaces into a primitive sink
#[derive(Debug, Clone, Copy)]
pub struct PanelRenderer<'a, M: GlyphMetrics> {
    fitter: TextFitter<'a, M>,
    config: &'a FitConfig,
}

impl<'a, M: GlyphMetrics> PanelRenderer<'a, M> {
    /// Create a renderer over a glyph table and fitting constants
    pub fn new(metrics: &'a M, config: &'a FitConfig) -> Self {
        Self {
            fitter: TextFitter::new(metrics, config),
            config,
        }
    }

    /// Render one surface for this frame
    ///
    /// Consumes the surface's hover highlight flag. Degenerate geometry and
    /// non-finite fits skip the frame silently.
    pub fn render(&self, surface: &mut PanelSurface, sink: &mut dyn RenderSink) {
        let hovered = std::mem::take(&mut surface.hovered);

        let Some((columns, rows)) = self.fitter.character_grid(surface) else {
            return;
        };
        let budget = self.fitter.advance_budget(columns);

        // No provider renders as a blank surface, not an empty one.
        let content = surface
            .content()
            .map_or_else(|| " ".to_string(), |provider| provider.content(budget, rows));

        let Some(transform) = self.fitter.fit(surface, &content) else {
            return;
        };

        sink.submit(RenderPrimitive {
            transform,
            content: PrimitiveContent::Text {
                text: content,
                line_width: budget * self.config.line_width_scale,
                hovered,
            },
        });
    }
}
