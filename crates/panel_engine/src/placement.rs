//! Two-click panel placement
//!
//! The first trigger pins the panel's first corner at the snapped aim
//! point; until the second trigger the tool keeps a preview surface whose
//! far corner tracks the aim every tick. The second trigger hands the
//! preview to the manager as a real panel.

use log::info;

use crate::content::ContentProvider;
use crate::core::config::InteractionConfig;
use crate::foundation::math::{snap_to_grid, Vec3};
use crate::geometry::{PanelSurface, Ray};
use crate::manager::{PanelId, PanelManager};

/// Outcome of one placement trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementAction {
    /// First corner pinned; the tool now shows a preview
    FirstCornerSet,
    /// Preview committed to the manager as a real panel
    Committed(PanelId),
}

/// Interactive two-click panel creation tool
#[derive(Debug)]
pub struct PlacementTool {
    config: InteractionConfig,
    first_corner: Option<Vec3>,
    preview: Option<PanelSurface>,
}

impl PlacementTool {
    /// Create a tool with the given interaction constants
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            first_corner: None,
            preview: None,
        }
    }

    /// Whether a first corner is pinned and a preview is live
    pub fn is_active(&self) -> bool {
        self.first_corner.is_some()
    }

    /// The live preview surface, if any
    pub fn preview(&self) -> Option<&PanelSurface> {
        self.preview.as_ref()
    }

    /// The live preview surface, mutable (e.g. to attach content early)
    pub fn preview_mut(&mut self) -> Option<&mut PanelSurface> {
        self.preview.as_mut()
    }

    /// Aim point for this ray: fixed reach along the ray, snapped to grid
    pub fn target_position(&self, ray: &Ray) -> Vec3 {
        snap_to_grid(
            ray.origin + ray.direction * self.config.placement_reach,
            self.config.snap_cell,
        )
    }

    /// Track the aim point: regenerate the preview's corners each tick
    pub fn tick(&mut self, ray: &Ray) {
        let target = self.target_position(ray);
        if let (Some(first), Some(preview)) = (self.first_corner, self.preview.as_mut()) {
            preview.corners = PanelSurface::generate_corners(first, target, false);
        }
    }

    /// Handle one press of the placement control
    pub fn trigger(&mut self, ray: &Ray, manager: &mut PanelManager) -> PlacementAction {
        let target = self.target_position(ray);
        if self.first_corner.is_none() {
            self.first_corner = Some(target);
            let corners = PanelSurface::generate_corners(target, target, false);
            self.preview = Some(PanelSurface::new(corners, "Unnamed panel"));
            info!("placement: first corner pinned at {target:?}");
            return PlacementAction::FirstCornerSet;
        }

        // Second press: the preview already tracks this tick's target.
        self.tick(ray);
        let surface = self
            .preview
            .take()
            .unwrap_or_else(|| PanelSurface::new([target; 4], "Unnamed panel"));
        self.first_corner = None;
        let id = manager.add(surface);
        info!("placement: panel committed");
        PlacementAction::Committed(id)
    }

    /// Abandon the pinned corner and preview
    pub fn cancel(&mut self) {
        self.first_corner = None;
        self.preview = None;
    }

    /// Attach a content provider to the live preview
    pub fn set_preview_content(&mut self, provider: Box<dyn ContentProvider>) {
        if let Some(preview) = self.preview.as_mut() {
            preview.set_content(Some(provider));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn aim(origin: Vec3, toward: Vec3) -> Ray {
        Ray::new(origin, toward - origin)
    }

    #[test]
    fn test_target_position_snaps_to_grid() {
        let tool = PlacementTool::new(InteractionConfig::default());
        // Reach 3.0 along +x from a slightly offset origin.
        let ray = Ray::new(Vec3::new(0.03, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let target = tool.target_position(&ray);
        // 3.03 snaps to the nearest 0.125 cell.
        assert_relative_eq!(target.x, 3.0);
        assert_relative_eq!(target.y, 1.0);
        assert_relative_eq!(target.z, 0.0);
    }

    #[test]
    fn test_two_triggers_commit_a_panel() {
        let mut tool = PlacementTool::new(InteractionConfig::default());
        let mut manager = PanelManager::new();

        let eye = Vec3::new(0.0, 1.0, 0.0);
        let first = tool.trigger(&aim(eye, Vec3::new(3.0, 1.0, 0.0)), &mut manager);
        assert_eq!(first, PlacementAction::FirstCornerSet);
        assert!(tool.is_active());
        assert!(manager.is_empty());

        // Move the aim, then commit.
        let second = tool.trigger(&aim(eye, Vec3::new(0.0, 3.0, 3.0)), &mut manager);
        let PlacementAction::Committed(id) = second else {
            panic!("expected a committed panel");
        };
        assert!(!tool.is_active());
        assert!(tool.preview().is_none());

        let surface = manager.get(id).unwrap();
        let expected = PanelSurface::generate_corners(
            Vec3::new(3.0, 1.0, 0.0),
            tool.target_position(&aim(eye, Vec3::new(0.0, 3.0, 3.0))),
            false,
        );
        assert_eq!(surface.corners, expected);
    }

    #[test]
    fn test_preview_tracks_aim_between_triggers() {
        let mut tool = PlacementTool::new(InteractionConfig::default());
        let mut manager = PanelManager::new();

        let eye = Vec3::zeros();
        tool.trigger(&aim(eye, Vec3::new(3.0, 0.0, 0.0)), &mut manager);

        let ray = aim(eye, Vec3::new(0.0, 3.0, 0.0));
        tool.tick(&ray);
        let preview = tool.preview().unwrap();
        let expected = PanelSurface::generate_corners(
            Vec3::new(3.0, 0.0, 0.0),
            tool.target_position(&ray),
            false,
        );
        assert_eq!(preview.corners, expected);
    }

    #[test]
    fn test_cancel_discards_preview() {
        let mut tool = PlacementTool::new(InteractionConfig::default());
        let mut manager = PanelManager::new();

        tool.trigger(
            &Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)),
            &mut manager,
        );
        tool.cancel();
        assert!(!tool.is_active());
        assert!(tool.preview().is_none());
        assert!(manager.is_empty());
    }
}
