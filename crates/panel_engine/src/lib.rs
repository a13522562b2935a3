//! # Panel Engine
//!
//! A planar panel geometry and interactive widget engine. Panels are
//! rectangular text surfaces placed anywhere in a 3D world, defined by four
//! ordered corner points. The engine derives an orthonormal basis and
//! world/local mappings from those corners, targets surfaces and edit handles
//! with viewer rays, fits arbitrary text content to a surface's physical
//! dimensions, and runs the tick-driven state machine that lets a viewer
//! grab a handle and drag-edit a panel in real time.
//!
//! ## Quick Start
//!
//! ```
//! use panel_engine::prelude::*;
//!
//! let mut manager = PanelManager::new();
//! let corners = PanelSurface::generate_corners(
//!     Vec3::new(0.0, 1.0, 0.0),
//!     Vec3::new(2.0, 3.0, 0.0),
//!     false,
//! );
//! let id = manager.add(PanelSurface::new(corners, "status"));
//!
//! let surface = manager.get(id).unwrap();
//! let (width, height) = surface.dimensions();
//! assert!((width - 2.0).abs() < 1e-6 && (height - 2.0).abs() < 1e-6);
//! ```
//!
//! Rendering and input plumbing stay outside the crate: content arrives
//! through [`content::ContentProvider`], glyph metrics through
//! [`text::GlyphMetrics`], pointer input as [`geometry::Ray`] values, and
//! draw output leaves through [`render::RenderSink`].

pub mod content;
pub mod core;
pub mod foundation;
pub mod geometry;
pub mod manager;
pub mod placement;
pub mod render;
pub mod text;
pub mod widget;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        content::{ContentProvider, StaticContent},
        core::config::{Config, ConfigError, FitConfig, InteractionConfig, PanelEngineConfig},
        foundation::math::{Mat4, Vec3, Vec4},
        geometry::{PanelSurface, Ray, SurfaceHit},
        manager::{PanelId, PanelManager, PanelRecord},
        placement::{PlacementAction, PlacementTool},
        render::{HandleStyle, PanelRenderer, PrimitiveContent, RenderPrimitive, RenderSink},
        text::{GlyphMetrics, GlyphWidthTable, TextFitter},
        widget::{PanelWidget, WidgetController, WidgetKind},
    };
}
