//! Text measurement and surface fitting

pub mod fitter;
pub mod glyphs;

pub use fitter::TextFitter;
pub use glyphs::{GlyphMetrics, GlyphTableError, GlyphWidthTable};
