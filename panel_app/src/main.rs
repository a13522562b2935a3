//! Panel demo application
//!
//! This demonstrates the engine end to end without a window: a scripted
//! viewer places a panel with the two-click tool, opens an edit session,
//! drags the move handle, and the frame's render primitives are logged.

use panel_engine::prelude::*;

/// Scripted viewer session over one panel manager
pub struct DemoApp {
    config: PanelEngineConfig,
    glyphs: GlyphWidthTable,
    manager: PanelManager,
    placement: PlacementTool,
    controller: WidgetController,
    eye: Vec3,
}

impl DemoApp {
    pub fn new() -> Self {
        let config = PanelEngineConfig::default();
        log::info!("Creating panel demo application...");
        Self {
            glyphs: GlyphWidthTable::new(),
            manager: PanelManager::new(),
            placement: PlacementTool::new(config.interaction.clone()),
            controller: WidgetController::new(config.interaction.clone()),
            config,
            eye: Vec3::new(1.0, 1.0, 10.0),
        }
    }

    /// Viewer ray from the eye through a world point
    fn aim(&self, toward: Vec3) -> Ray {
        Ray::new(self.eye, toward - self.eye)
    }

    /// Place a panel with the two-click tool and attach its content
    fn place_panel(&mut self) -> PanelId {
        log::info!("Placing a panel with the two-click tool...");
        self.placement
            .trigger(&self.aim(Vec3::new(0.0, 0.0, 5.0)), &mut self.manager);
        self.placement.set_preview_content(Box::new(StaticContent::new(
            "panel demo\nlive text fitting",
        )));

        // Sweep the aim so the preview tracks, then commit.
        self.placement.tick(&self.aim(Vec3::new(1.0, 1.0, 5.0)));
        let action = self
            .placement
            .trigger(&self.aim(Vec3::new(2.0, 2.0, 5.0)), &mut self.manager);
        let PlacementAction::Committed(id) = action else {
            unreachable!("second trigger always commits");
        };
        id
    }

    /// Open an edit session, grab the move handle, and drag it
    fn edit_panel(&mut self, id: PanelId) {
        let center = self.manager.get(id).map(|surface| surface.center());
        let Some(center) = center else {
            return;
        };

        // Use on the surface opens the session; use on the move handle
        // grabs it; the following ticks drag the panel sideways.
        let ray = self.aim(center);
        self.controller.tick(&mut self.manager, &ray, true);
        let ray = self.aim(center);
        self.controller.tick(&mut self.manager, &ray, true);
        for step in 1..=5 {
            let toward = center + Vec3::new(0.2 * step as f32, 0.0, 0.0);
            let ray = self.aim(toward);
            self.controller.tick(&mut self.manager, &ray, false);
        }
        log::info!(
            "Dragged panel to center {:?}",
            self.manager.get(id).map(PanelSurface::center)
        );
    }

    /// Render one frame and log every primitive
    fn render_frame(&mut self) {
        let renderer = PanelRenderer::new(&self.glyphs, &self.config.fit);
        let mut sink: Vec<RenderPrimitive> = Vec::new();
        self.manager.render_all(&renderer, &mut sink);
        self.controller.render_widgets(&self.manager, &mut sink);

        log::info!("Frame produced {} primitives", sink.len());
        for primitive in &sink {
            match &primitive.content {
                PrimitiveContent::Text {
                    text,
                    line_width,
                    hovered,
                } => log::info!(
                    "  text ({} chars, line width {line_width}, hovered {hovered}): {:?}",
                    text.len(),
                    text.lines().next().unwrap_or_default()
                ),
                PrimitiveContent::Block { style } => {
                    log::info!("  handle block ({style:?})");
                }
            }
        }
    }

    pub fn run(&mut self) {
        let id = self.place_panel();
        log::info!(
            "Placed panel with dimensions {:?}",
            self.manager.get(id).map(PanelSurface::dimensions)
        );
        self.edit_panel(id);
        self.render_frame();

        let records = self.manager.to_records();
        log::info!("Session snapshot holds {} panel record(s)", records.len());
    }
}

impl Default for DemoApp {
    fn default() -> Self {
        Self::new()
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting panel demo");
    DemoApp::new().run();
    log::info!("Panel demo finished");
}
