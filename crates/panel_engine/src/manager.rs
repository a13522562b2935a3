//! Panel surface ownership and lookup
//!
//! The manager is the single owner of every live surface. Everything else
//! (widgets, tools, the demo app) refers to surfaces by [`PanelId`], a
//! generational key: removing a panel invalidates its key forever, so a
//! stale reference can never resurrect or alias another surface.

use log::info;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::foundation::math::Vec3;
use crate::geometry::{PanelSurface, Ray, SurfaceHit};
use crate::render::{PanelRenderer, RenderSink};
use crate::text::GlyphMetrics;

slotmap::new_key_type! {
    /// Generational key identifying a surface owned by a [`PanelManager`]
    pub struct PanelId;
}

/// Serializable snapshot of one panel
///
/// Content providers are live objects and do not persist; a restored panel
/// comes back blank until the host reattaches its provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    /// Corner positions, bottom-left first, counterclockwise
    pub corners: [Vec3; 4],
    /// Display name
    pub name: String,
}

/// Owns all live panel surfaces
#[derive(Debug, Default)]
pub struct PanelManager {
    surfaces: SlotMap<PanelId, PanelSurface>,
}

impl PanelManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a surface, returning its key
    pub fn add(&mut self, surface: PanelSurface) -> PanelId {
        info!("registering panel '{}'", surface.name);
        self.surfaces.insert(surface)
    }

    /// Remove a surface, returning it if the key was live
    pub fn remove(&mut self, id: PanelId) -> Option<PanelSurface> {
        let removed = self.surfaces.remove(id);
        if let Some(surface) = &removed {
            info!("removed panel '{}'", surface.name);
        }
        removed
    }

    /// Look up a surface by key
    pub fn get(&self, id: PanelId) -> Option<&PanelSurface> {
        self.surfaces.get(id)
    }

    /// Look up a surface mutably by key
    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut PanelSurface> {
        self.surfaces.get_mut(id)
    }

    /// Number of live surfaces
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether no surfaces are live
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Iterate over all live surfaces
    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &PanelSurface)> {
        self.surfaces.iter()
    }

    /// Iterate mutably over all live surfaces
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PanelId, &mut PanelSurface)> {
        self.surfaces.iter_mut()
    }

    /// Closest surface the ray hits within `max_distance`
    ///
    /// Ties on distance are broken arbitrarily; degenerate surfaces never
    /// report a hit and so are skipped naturally.
    pub fn nearest_surface_along_ray(
        &self,
        ray: &Ray,
        max_distance: f32,
    ) -> Option<(PanelId, SurfaceHit)> {
        let mut nearest: Option<(PanelId, SurfaceHit)> = None;
        for (id, surface) in self.surfaces.iter() {
            let Some(hit) = surface.ray_intersect(ray, max_distance) else {
                continue;
            };
            if nearest.as_ref().is_none_or(|(_, best)| hit.t < best.t) {
                nearest = Some((id, hit));
            }
        }
        nearest
    }

    /// Render every surface into the sink
    pub fn render_all<M: GlyphMetrics>(
        &mut self,
        renderer: &PanelRenderer<'_, M>,
        sink: &mut dyn RenderSink,
    ) {
        for (_, surface) in self.surfaces.iter_mut() {
            renderer.render(surface, sink);
        }
    }

    /// Snapshot every surface for persistence
    pub fn to_records(&self) -> Vec<PanelRecord> {
        self.surfaces
            .values()
            .map(|surface| PanelRecord {
                corners: surface.corners,
                name: surface.name.clone(),
            })
            .collect()
    }

    /// Recreate surfaces from persisted records
    ///
    /// Restored panels have no content provider attached.
    pub fn from_records(records: Vec<PanelRecord>) -> Self {
        let mut manager = Self::new();
        for record in records {
            manager.add(PanelSurface::new(record.corners, record.name));
        }
        manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticContent;
    use crate::core::config::FitConfig;
    use crate::text::GlyphWidthTable;

    fn panel_at(x: f32, name: &str) -> PanelSurface {
        PanelSurface::new(
            [
                Vec3::new(x, 0.0, 0.0),
                Vec3::new(x + 2.0, 0.0, 0.0),
                Vec3::new(x + 2.0, 2.0, 0.0),
                Vec3::new(x, 2.0, 0.0),
            ],
            name,
        )
    }

    #[test]
    fn test_add_get_remove() {
        let mut manager = PanelManager::new();
        let id = manager.add(panel_at(0.0, "first"));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get(id).unwrap().name, "first");

        let removed = manager.remove(id).unwrap();
        assert_eq!(removed.name, "first");
        assert!(manager.is_empty());
        // The key is dead after removal.
        assert!(manager.get(id).is_none());
        assert!(manager.remove(id).is_none());
    }

    #[test]
    fn test_nearest_surface_prefers_closer_hit() {
        let mut manager = PanelManager::new();
        // Two panels stacked along the view axis, both spanning x [0, 2].
        let near = manager.add(PanelSurface::new(
            [
                Vec3::new(0.0, 0.0, 5.0),
                Vec3::new(2.0, 0.0, 5.0),
                Vec3::new(2.0, 2.0, 5.0),
                Vec3::new(0.0, 2.0, 5.0),
            ],
            "near",
        ));
        manager.add(PanelSurface::new(
            [
                Vec3::new(0.0, 0.0, 2.0),
                Vec3::new(2.0, 0.0, 2.0),
                Vec3::new(2.0, 2.0, 2.0),
                Vec3::new(0.0, 2.0, 2.0),
            ],
            "far",
        ));

        let ray = Ray::new(Vec3::new(1.0, 1.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let (id, hit) = manager.nearest_surface_along_ray(&ray, 100.0).unwrap();
        assert_eq!(id, near);
        assert!((hit.t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_surface_respects_max_distance() {
        let mut manager = PanelManager::new();
        manager.add(panel_at(0.0, "far"));
        let ray = Ray::new(Vec3::new(1.0, 1.0, 200.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(manager.nearest_surface_along_ray(&ray, 100.0).is_none());
    }

    #[test]
    fn test_records_round_trip_without_content() {
        let mut manager = PanelManager::new();
        let id = manager.add(
            panel_at(1.0, "kept").with_content(Box::new(StaticContent::new("body"))),
        );
        let corners = manager.get(id).unwrap().corners;

        let records = manager.to_records();
        let restored = PanelManager::from_records(records);
        assert_eq!(restored.len(), 1);

        let (_, surface) = restored.iter().next().unwrap();
        assert_eq!(surface.name, "kept");
        assert_eq!(surface.corners, corners);
        assert!(surface.content().is_none());
    }

    #[test]
    fn test_records_serialize_as_ron() {
        let mut manager = PanelManager::new();
        manager.add(panel_at(0.0, "saved"));

        let text = ron::to_string(&manager.to_records()).unwrap();
        let records: Vec<PanelRecord> = ron::from_str(&text).unwrap();
        assert_eq!(records, manager.to_records());
    }

    #[test]
    fn test_render_all_emits_one_primitive_per_panel() {
        let table = GlyphWidthTable::new();
        let config = FitConfig::default();
        let renderer = PanelRenderer::new(&table, &config);

        let mut manager = PanelManager::new();
        manager.add(panel_at(0.0, "a").with_content(Box::new(StaticContent::new("a"))));
        manager.add(panel_at(5.0, "b").with_content(Box::new(StaticContent::new("b"))));

        let mut sink = Vec::new();
        manager.render_all(&renderer, &mut sink);
        assert_eq!(sink.len(), 2);
    }
}
