//! Edit handles: draggable widgets bound to a panel surface
//!
//! Two variants share one widget type: the move handle translates all four
//! corners, and each corner handle relocates one corner while its diagonal
//! opposite stays fixed. A widget holds only the manager key of its owner
//! surface, never the surface itself, so a removed panel can't leave a
//! dangling edit handle.
//!
//! Each widget steps through idle, hovered, and selected states. Hover is
//! recomputed every tick by the controller; selection snapshots a drag
//! anchor which every subsequent drag tick measures against, so translation
//! never accumulates per-tick error.

use log::debug;

use crate::core::config::InteractionConfig;
use crate::foundation::math::{is_finite, Mat4, Vec3};
use crate::geometry::surface::CORNER_UV;
use crate::geometry::{PanelSurface, Ray};
use crate::manager::PanelId;
use crate::render::{HandleStyle, PrimitiveContent, RenderPrimitive, RenderSink};

/// Which edit operation a widget performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Translates the whole surface
    Move,
    /// Relocates one corner (by index) around its fixed diagonal
    Corner(usize),
}

/// Snapshot taken when a widget is selected
#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    /// Widget position at selection time
    position: Vec3,
    /// Corner snapshot, present for the move variant only
    corners: Option<[Vec3; 4]>,
}

/// A draggable handle bound to a panel surface
#[derive(Debug)]
pub struct PanelWidget {
    /// Manager key of the surface this widget edits (non-owning)
    pub panel: PanelId,
    /// Edit operation variant
    pub kind: WidgetKind,
    /// Ray distance within which this widget can be hovered
    pub selection_radius: f32,
    /// Under the viewer's ray this tick (recomputed, never latched)
    pub hovered: bool,
    /// Currently grabbed
    pub selected: bool,
    anchor: Option<DragAnchor>,
}

impl PanelWidget {
    /// Create the move handle for a surface
    pub fn move_widget(panel: PanelId, config: &InteractionConfig) -> Self {
        Self {
            panel,
            kind: WidgetKind::Move,
            selection_radius: config.move_selection_radius,
            hovered: false,
            selected: false,
            anchor: None,
        }
    }

    /// Create the corner handle for corner `index` of a surface
    pub fn corner_widget(panel: PanelId, index: usize, config: &InteractionConfig) -> Self {
        debug_assert!(index < 4);
        Self {
            panel,
            kind: WidgetKind::Corner(index),
            selection_radius: config.corner_selection_radius,
            hovered: false,
            selected: false,
            anchor: None,
        }
    }

    /// World position used for hit-testing and drag targeting
    ///
    /// The move handle sits at the surface center, slightly off the plane
    /// along the normal; a corner handle sits on its corner. `None` when
    /// the surface is degenerate or a coordinate is not finite, in which
    /// case the widget skips this frame entirely.
    pub fn position(&self, surface: &PanelSurface, config: &InteractionConfig) -> Option<Vec3> {
        match self.kind {
            WidgetKind::Move => surface.local_to_world(0.5, 0.5, config.handle_forward_offset),
            WidgetKind::Corner(index) => {
                if surface.is_degenerate() {
                    return None;
                }
                let corner = surface.corners[index];
                is_finite(&corner).then_some(corner)
            }
        }
    }

    /// World position of the rendered handle box
    ///
    /// Corner handles are nudged toward the surface interior by an offset
    /// scaled inversely with the surface dimensions, so the box keeps a
    /// constant world size however large the panel grows.
    pub fn render_position(
        &self,
        surface: &PanelSurface,
        config: &InteractionConfig,
    ) -> Option<Vec3> {
        match self.kind {
            WidgetKind::Move => self.position(surface, config),
            WidgetKind::Corner(index) => {
                let (width, height) = surface.dimensions();
                if !(width > 0.0 && height > 0.0) {
                    return None;
                }
                let (u, v) = CORNER_UV[index];
                let inset_u = config.handle_size / width;
                let inset_v = config.handle_size / height;
                let u = if u == 0.0 { inset_u } else { 1.0 - inset_u };
                let v = if v == 0.0 { inset_v } else { 1.0 - inset_v };
                surface.local_to_world(u, v, 0.0)
            }
        }
    }

    /// Enter the selected state, capturing the drag anchor
    ///
    /// The move variant additionally snapshots all four corners; drag ticks
    /// translate from the snapshot rather than the live geometry.
    pub fn select(&mut self, surface: &PanelSurface, config: &InteractionConfig) {
        self.selected = true;
        self.anchor = self.position(surface, config).map(|position| DragAnchor {
            position,
            corners: matches!(self.kind, WidgetKind::Move).then_some(surface.corners),
        });
    }

    /// Leave the selected state, abandoning any in-progress drag
    pub fn deselect(&mut self) {
        self.selected = false;
        self.anchor = None;
    }

    /// Apply one drag tick while selected
    ///
    /// The drag target is the viewer ray projected to the widget's current
    /// distance from the eye, i.e. onto the sphere through the widget
    /// position. A tick without an anchor is a logged no-op.
    pub fn on_selected_tick(
        &mut self,
        ray: &Ray,
        surface: &mut PanelSurface,
        config: &InteractionConfig,
    ) {
        let Some(anchor) = self.anchor else {
            debug!("drag tick without an active anchor, ignoring");
            return;
        };
        let Some(position) = self.position(surface, config) else {
            return;
        };

        let distance = (position - ray.origin).magnitude();
        let target = ray.origin + ray.direction * distance;
        if !is_finite(&target) {
            return;
        }

        match self.kind {
            WidgetKind::Move => {
                // Translate from the selection-time snapshot, not the live
                // corners, so repeated ticks cannot accumulate drift.
                let Some(snapshot) = anchor.corners else {
                    debug!("move drag without a corner snapshot, ignoring");
                    return;
                };
                let delta = target - anchor.position;
                surface.corners = snapshot.map(|corner| corner + delta);
            }
            WidgetKind::Corner(index) => {
                // Rejected resizes (too small, inverted) simply leave the
                // corners untouched for this tick.
                let _ = surface.resize_from_corner(index, target, config.min_extent);
            }
        }
    }

    /// Emit this widget's handle box for the frame
    ///
    /// Skipped when the handle position is invalid this frame.
    pub fn render(
        &self,
        surface: &PanelSurface,
        config: &InteractionConfig,
        sink: &mut dyn RenderSink,
    ) {
        let Some(position) = self.render_position(surface, config) else {
            return;
        };
        let style = if self.selected {
            HandleStyle::Selected
        } else if self.hovered {
            HandleStyle::Hovered
        } else {
            HandleStyle::Idle
        };
        sink.submit(RenderPrimitive {
            transform: Mat4::new_translation(&position)
                * Mat4::new_scaling(config.handle_size),
            content: PrimitiveContent::Block { style },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::PanelManager;
    use approx::assert_relative_eq;

    fn facing_panel() -> PanelSurface {
        // Vertical 2x2 panel in the z = 5 plane, facing +z
        PanelSurface::new(
            [
                Vec3::new(0.0, 0.0, 5.0),
                Vec3::new(2.0, 0.0, 5.0),
                Vec3::new(2.0, 2.0, 5.0),
                Vec3::new(0.0, 2.0, 5.0),
            ],
            "facing",
        )
    }

    fn panel_key() -> PanelId {
        // Keys only matter for identity in these tests
        let mut manager = PanelManager::new();
        manager.add(facing_panel())
    }

    #[test]
    fn test_move_widget_position_is_center_with_offset() {
        let config = InteractionConfig::default();
        let widget = PanelWidget::move_widget(panel_key(), &config);
        let surface = facing_panel();
        let position = widget.position(&surface, &config).unwrap();
        assert_relative_eq!(
            position,
            Vec3::new(1.0, 1.0, 5.0 + config.handle_forward_offset),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_corner_widget_positions() {
        let config = InteractionConfig::default();
        let surface = facing_panel();
        for index in 0..4 {
            let widget = PanelWidget::corner_widget(panel_key(), index, &config);
            assert_eq!(
                widget.position(&surface, &config).unwrap(),
                surface.corners[index]
            );
        }
    }

    #[test]
    fn test_render_position_insets_scale_with_dimensions() {
        let config = InteractionConfig::default();
        let widget = PanelWidget::corner_widget(panel_key(), 0, &config);

        let small = facing_panel();
        let near_small = widget.render_position(&small, &config).unwrap();
        let offset_small = (near_small - small.corners[0]).magnitude();

        let mut large = facing_panel();
        assert!(large.resize_from_corner(2, Vec3::new(8.0, 8.0, 5.0), config.min_extent));
        let near_large = widget.render_position(&large, &config).unwrap();
        let offset_large = (near_large - large.corners[0]).magnitude();

        // Same world-space inset regardless of panel size
        assert_relative_eq!(offset_small, offset_large, epsilon = 1e-5);
    }

    #[test]
    fn test_position_invalid_for_degenerate_surface() {
        let config = InteractionConfig::default();
        let surface = PanelSurface::new([Vec3::new(1.0, 1.0, 1.0); 4], "collapsed");
        let move_widget = PanelWidget::move_widget(panel_key(), &config);
        let corner_widget = PanelWidget::corner_widget(panel_key(), 2, &config);
        assert!(move_widget.position(&surface, &config).is_none());
        assert!(corner_widget.position(&surface, &config).is_none());

        let mut sink = Vec::new();
        move_widget.render(&surface, &config, &mut sink);
        corner_widget.render(&surface, &config, &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_move_drag_has_no_per_tick_drift() {
        let config = InteractionConfig::default();
        let mut surface = facing_panel();
        let snapshot = surface.corners;
        let mut widget = PanelWidget::move_widget(panel_key(), &config);

        let eye = Vec3::new(1.0, 1.0, 10.0);
        widget.select(&surface, &config);
        let anchor = widget.position(&surface, &config).unwrap();
        let radius = (anchor - eye).magnitude();

        // Each tick the widget rides the view sphere through its own
        // position, so the target stays at a constant eye distance and the
        // final corners depend only on the last ray.
        let directions = [
            Vec3::new(0.1, 0.0, -1.0),
            Vec3::new(-0.2, 0.1, -1.0),
            Vec3::new(0.3, -0.2, -1.0),
        ];
        let mut last_target = anchor;
        for direction in directions {
            let ray = Ray::new(eye, direction);
            widget.on_selected_tick(&ray, &mut surface, &config);
            last_target = eye + ray.direction * radius;
        }

        let delta = last_target - anchor;
        for i in 0..4 {
            assert_relative_eq!(surface.corners[i], snapshot[i] + delta, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_corner_drag_keeps_diagonal_bit_for_bit() {
        let config = InteractionConfig::default();
        let mut surface = facing_panel();
        let diagonal_before = surface.corners[3];
        let mut widget = PanelWidget::corner_widget(panel_key(), 1, &config);

        widget.select(&surface, &config);
        // Ray from straight ahead of the corner, aiming wide
        let eye = Vec3::new(2.0, 0.0, 10.0);
        let ray = Ray::new(eye, Vec3::new(0.3, -0.1, -1.0));
        widget.on_selected_tick(&ray, &mut surface, &config);

        assert_eq!(surface.corners[3], diagonal_before);
        let (width, height) = surface.dimensions();
        assert!(width > 2.0);
        assert!(height > 2.0);
    }

    #[test]
    fn test_drag_tick_without_anchor_is_noop() {
        let config = InteractionConfig::default();
        let mut surface = facing_panel();
        let before = surface.corners;
        let mut widget = PanelWidget::move_widget(panel_key(), &config);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        widget.on_selected_tick(&ray, &mut surface, &config);
        assert_eq!(surface.corners, before);
    }

    #[test]
    fn test_deselect_clears_anchor() {
        let config = InteractionConfig::default();
        let mut surface = facing_panel();
        let mut widget = PanelWidget::move_widget(panel_key(), &config);

        widget.select(&surface, &config);
        widget.deselect();
        assert!(!widget.selected);

        let before = surface.corners;
        let ray = Ray::new(Vec3::new(5.0, 5.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        widget.on_selected_tick(&ray, &mut surface, &config);
        assert_eq!(surface.corners, before);
    }
}
