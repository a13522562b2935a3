//! # Engine Configuration
//!
//! Named configuration for text fitting and interaction. The fitting math
//! depends on a handful of renderer-specific constants (reference pixel
//! width, base scale factors); they live here as explicit, serializable
//! configuration passed into [`crate::text::TextFitter`] rather than ambient
//! global state.

use serde::{Deserialize, Serialize};

use crate::geometry::MIN_EXTENT;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Validation error
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Text Fitting Configuration
///
/// Constants that tie content measurement to the renderer's glyph raster.
/// The defaults match a 4-pixel reference unit and a half-block base font.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitConfig {
    /// World height of one character row at scale 1
    pub base_font_size: f32,
    /// Average character advance in pixels, used to size the content grid
    pub average_advance: u32,
    /// Reference pixel width that maps to one horizontal content unit
    pub reference_unit: f32,
    /// Horizontal scale applied after pixel normalization
    pub background_width_scale: f32,
    /// Fixed vertical scale of the rendered text block
    pub vertical_scale: f32,
    /// Horizontal origin offset of the text block, in normalized units
    pub text_offset_x: f32,
    /// Multiplier from the advance budget to the primitive's line width
    pub line_width_scale: u32,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            base_font_size: 0.5,
            average_advance: 7,
            reference_unit: 4.0,
            background_width_scale: 40.0,
            vertical_scale: 4.0,
            text_offset_x: -0.1,
            line_width_scale: 80,
        }
    }
}

impl FitConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_font_size <= 0.0 {
            return Err(ConfigError::Invalid(
                "base_font_size must be positive".to_string(),
            ));
        }
        if self.reference_unit <= 0.0 {
            return Err(ConfigError::Invalid(
                "reference_unit must be positive".to_string(),
            ));
        }
        if self.average_advance == 0 {
            return Err(ConfigError::Invalid(
                "average_advance must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// # Interaction Configuration
///
/// Thresholds and radii for widget hit-testing, drag editing, and panel
/// placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Minimum panel width/height; smaller drags are rejected
    pub min_extent: f32,
    /// Hit-test radius of the move handle
    pub move_selection_radius: f32,
    /// Hit-test radius of each corner handle
    pub corner_selection_radius: f32,
    /// World-space size of a rendered handle box
    pub handle_size: f32,
    /// Forward offset of the move handle off the surface plane
    pub handle_forward_offset: f32,
    /// Maximum ray distance for surface and widget targeting
    pub max_ray_distance: f32,
    /// How far in front of the viewer placement anchors land
    pub placement_reach: f32,
    /// Grid cell placement anchors snap to
    pub snap_cell: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_extent: MIN_EXTENT,
            move_selection_radius: 0.5,
            corner_selection_radius: 0.3,
            handle_size: 0.15,
            handle_forward_offset: 0.05,
            max_ray_distance: 100.0,
            placement_reach: 3.0,
            snap_cell: 0.125,
        }
    }
}

impl InteractionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_extent <= 0.0 {
            return Err(ConfigError::Invalid(
                "min_extent must be positive".to_string(),
            ));
        }
        if self.move_selection_radius <= 0.0 || self.corner_selection_radius <= 0.0 {
            return Err(ConfigError::Invalid(
                "selection radii must be positive".to_string(),
            ));
        }
        if self.max_ray_distance <= 0.0 {
            return Err(ConfigError::Invalid(
                "max_ray_distance must be positive".to_string(),
            ));
        }
        if self.snap_cell <= 0.0 {
            return Err(ConfigError::Invalid(
                "snap_cell must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// # Complete Engine Configuration
///
/// Top-level configuration covering all panel engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelEngineConfig {
    /// Text fitting constants
    pub fit: FitConfig,
    /// Interaction thresholds and radii
    pub interaction: InteractionConfig,
}

impl PanelEngineConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fit.validate()?;
        self.interaction.validate()?;
        Ok(())
    }
}

impl Config for PanelEngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PanelEngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PanelEngineConfig::default();
        config.fit.base_font_size = 0.0;
        assert!(config.validate().is_err());

        let mut config = PanelEngineConfig::default();
        config.interaction.min_extent = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PanelEngineConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: PanelEngineConfig = toml::from_str(&text).unwrap();
        assert!((parsed.fit.base_font_size - config.fit.base_font_size).abs() < f32::EPSILON);
        assert_eq!(parsed.fit.average_advance, config.fit.average_advance);
        assert!(
            (parsed.interaction.snap_cell - config.interaction.snap_cell).abs() < f32::EPSILON
        );
    }

    #[test]
    fn test_save_and_load_toml_file() {
        let file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        let path = file.path().to_str().unwrap();

        let mut config = PanelEngineConfig::default();
        config.interaction.placement_reach = 5.5;
        config.save_to_file(path).unwrap();

        let loaded = PanelEngineConfig::load_from_file(path).unwrap();
        assert!((loaded.interaction.placement_reach - 5.5).abs() < f32::EPSILON);
        assert_eq!(loaded.fit.average_advance, config.fit.average_advance);
    }

    #[test]
    fn test_save_and_load_ron_file() {
        let file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        let path = file.path().to_str().unwrap();

        let mut config = PanelEngineConfig::default();
        config.fit.base_font_size = 0.25;
        config.save_to_file(path).unwrap();

        let loaded = PanelEngineConfig::load_from_file(path).unwrap();
        assert!((loaded.fit.base_font_size - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let config = PanelEngineConfig::default();
        assert!(matches!(
            config.save_to_file("panels.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        // Loading checks the extension only after the file is read.
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let path = file.path().to_str().unwrap();
        assert!(matches!(
            PanelEngineConfig::load_from_file(path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
