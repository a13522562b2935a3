//! Render primitives and the per-frame panel renderer
//!
//! This crate computes transforms and content; the host application draws.
//! Each frame the renderer emits [`RenderPrimitive`] values into a
//! [`RenderSink`] supplied by the host.

pub mod panel_renderer;

pub use panel_renderer::PanelRenderer;

use crate::foundation::math::Mat4;

/// Visual state of an edit handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStyle {
    /// Not targeted
    Idle,
    /// Under the viewer's ray this tick
    Hovered,
    /// Grabbed and being dragged
    Selected,
}

/// What a primitive draws
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveContent {
    /// A block of text
    Text {
        /// The content string, possibly multi-line
        text: String,
        /// Pixel width the renderer should wrap at
        line_width: u32,
        /// Whether the owning surface is hover-highlighted this frame
        hovered: bool,
    },
    /// A solid handle box
    Block {
        /// Visual state of the handle
        style: HandleStyle,
    },
}

/// One drawable item: a world transform plus its content descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPrimitive {
    /// World transform of the primitive
    pub transform: Mat4,
    /// What to draw
    pub content: PrimitiveContent,
}

/// Receives the primitives produced each frame
pub trait RenderSink {
    /// Accept one primitive for drawing
    fn submit(&mut self, primitive: RenderPrimitive);
}

impl RenderSink for Vec<RenderPrimitive> {
    fn submit(&mut self, primitive: RenderPrimitive) {
        self.push(primitive);
    }
}
