//! Per-tick widget orchestration
//!
//! The controller owns the single edit session: at most one surface has
//! widgets at a time, and at most one widget is selected. Each tick it
//! recomputes hover from the current viewer ray, applies use actions
//! (select, deselect, open or close the session), then advances the
//! selected drag. Everything runs on the caller's thread; there is no
//! interior locking.

use log::{debug, info, warn};

use crate::core::config::InteractionConfig;
use crate::geometry::Ray;
use crate::manager::{PanelId, PanelManager};
use crate::render::RenderSink;
use crate::widget::handles::PanelWidget;

/// Drives hover, selection, and drag for the active edit session
#[derive(Debug)]
pub struct WidgetController {
    config: InteractionConfig,
    widgets: Vec<PanelWidget>,
    selected: Option<usize>,
    session: Option<PanelId>,
}

impl WidgetController {
    /// Create a controller with the given interaction constants
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            widgets: Vec::new(),
            selected: None,
            session: None,
        }
    }

    /// Surface currently under edit, if any
    pub fn session(&self) -> Option<PanelId> {
        self.session
    }

    /// Widgets of the active session
    pub fn widgets(&self) -> &[PanelWidget] {
        &self.widgets
    }

    /// Open an edit session on `panel`, replacing any existing session
    ///
    /// Spawns the move handle plus one handle per corner.
    pub fn open_session(&mut self, panel: PanelId) {
        self.close_session();
        self.widgets.push(PanelWidget::move_widget(panel, &self.config));
        for index in 0..4 {
            self.widgets
                .push(PanelWidget::corner_widget(panel, index, &self.config));
        }
        self.session = Some(panel);
        info!("opened edit session with {} widgets", self.widgets.len());
    }

    /// Close the active session, abandoning any in-progress drag
    ///
    /// Safe to call with no session open.
    pub fn close_session(&mut self) {
        if self.session.is_some() {
            debug!("closing edit session");
        }
        self.widgets.clear();
        self.selected = None;
        self.session = None;
    }

    /// Advance the controller by one tick
    ///
    /// `ray` is the viewer's aim for this tick and `use_action` is true on
    /// the tick the use control was pressed. Order per tick: validate the
    /// session owner, recompute hover, apply the use action, then advance
    /// the selected drag.
    pub fn tick(&mut self, manager: &mut PanelManager, ray: &Ray, use_action: bool) {
        // A removed panel tears the whole session down.
        if let Some(panel) = self.session {
            if manager.get(panel).is_none() {
                warn!("edit session owner was removed, closing session");
                self.close_session();
            }
        }

        let hovered = self.update_hover(manager, ray);

        // The surface under the ray gets its highlight for this frame
        // whether or not a session is open.
        let surface_hit = manager.nearest_surface_along_ray(ray, self.config.max_ray_distance);
        if let Some((panel, _)) = surface_hit {
            if let Some(surface) = manager.get_mut(panel) {
                surface.hovered = true;
            }
        }

        if use_action {
            self.apply_use_action(manager, hovered, surface_hit.map(|(panel, _)| panel));
        }

        if let Some(index) = self.selected {
            let widget = &mut self.widgets[index];
            if let Some(surface) = manager.get_mut(widget.panel) {
                widget.on_selected_tick(ray, surface, &self.config);
            }
        }
    }

    /// Emit handle boxes for the active session
    pub fn render_widgets(&self, manager: &PanelManager, sink: &mut dyn RenderSink) {
        for widget in &self.widgets {
            if let Some(surface) = manager.get(widget.panel) {
                widget.render(surface, &self.config, sink);
            }
        }
    }

    /// Recompute hover flags; returns the index of the hovered widget
    ///
    /// The nearest widget whose distance from the ray line is within its
    /// own selection radius wins. Hover is never latched: a widget the ray
    /// has moved off goes back to idle immediately.
    fn update_hover(&mut self, manager: &PanelManager, ray: &Ray) -> Option<usize> {
        let mut nearest: Option<(usize, f32)> = None;
        for (index, widget) in self.widgets.iter_mut().enumerate() {
            widget.hovered = false;
            let Some(surface) = manager.get(widget.panel) else {
                continue;
            };
            let Some(position) = widget.position(surface, &self.config) else {
                continue;
            };
            let Some((distance, _)) = ray.closest_approach(position) else {
                continue;
            };
            if distance > widget.selection_radius {
                continue;
            }
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }

        let hovered = nearest.map(|(index, _)| index);
        if let Some(index) = hovered {
            self.widgets[index].hovered = true;
        }
        hovered
    }

    /// Handle one press of the use control
    ///
    /// On a widget: toggle its selection. Off any widget: a surface under
    /// the ray opens a session when none is active and closes the active
    /// one otherwise. A press into empty space does nothing.
    fn apply_use_action(
        &mut self,
        manager: &PanelManager,
        hovered: Option<usize>,
        surface_under_ray: Option<PanelId>,
    ) {
        if let Some(index) = hovered {
            if self.selected == Some(index) {
                self.widgets[index].deselect();
                self.selected = None;
            } else {
                if let Some(previous) = self.selected.take() {
                    self.widgets[previous].deselect();
                }
                let widget = &mut self.widgets[index];
                if let Some(surface) = manager.get(widget.panel) {
                    widget.select(surface, &self.config);
                    self.selected = Some(index);
                }
            }
            return;
        }

        // Open/close only applies when the ray actually hits a surface.
        let Some(panel) = surface_under_ray else {
            return;
        };
        if self.session.is_some() {
            self.close_session();
        } else {
            self.open_session(panel);
        }
    }
}
