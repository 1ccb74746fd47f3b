//! Inventory panel configuration.
//!
//! Grid size, pop-out rule and presentation tuning. Configuration can be
//! loaded from and saved to a TOML file.

use crate::edge::PopOutRule;
use satchel_common::{GridDims, SatchelError, SatchelResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Inventory configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    // === Grid ===
    /// Grid rows
    pub rows: u32,
    /// Grid columns
    pub columns: u32,
    /// Slot rectangles narrower or shorter than this are not laid out yet
    pub min_slot_extent: f32,

    // === Pop-out ===
    /// Which rule pops an item out of the grid
    pub pop_out: PopOutRule,
    /// Edge pad in pixels
    pub edge_pad: f32,
    /// Edge buffer in pixels
    pub edge_buffer: f32,
    /// Per-event cursor delta for the threshold rule
    pub drag_threshold: f32,

    // === Presentation ===
    /// Ghost side length in pixels
    pub ghost_size: f32,
    /// Ghost interpolation speed
    pub ghost_follow_speed: f32,
    /// Animate items displaced by live moves
    pub slide_enabled: bool,
    /// Slide duration in seconds
    pub slide_duration: f32,

    // === Events ===
    /// Event bus capacity
    pub event_capacity: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            // Grid
            rows: 3,
            columns: 4,
            min_slot_extent: 1.0,

            // Pop-out
            pop_out: PopOutRule::EdgeCrossing,
            edge_pad: 1.0,
            edge_buffer: 1.0,
            drag_threshold: 4.0,

            // Presentation
            ghost_size: 100.0,
            ghost_follow_speed: 25.0,
            slide_enabled: true,
            slide_duration: 0.15,

            // Events
            event_capacity: 256,
        }
    }
}

impl InventoryConfig {
    /// Grid dimensions.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        GridDims::new(self.rows, self.columns)
    }

    /// Combined edge pad and buffer.
    #[must_use]
    pub fn edge_margin(&self) -> f32 {
        self.edge_pad + self.edge_buffer
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(text: &str) -> SatchelResult<Self> {
        let mut config: Self =
            toml::from_str(text).map_err(|e| SatchelError::Config(e.to_string()))?;
        config.validate();
        Ok(config)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> SatchelResult<()> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| SatchelError::Config(e.to_string()))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        // Grid
        self.rows = self.rows.clamp(1, 16);
        self.columns = self.columns.clamp(1, 16);
        self.min_slot_extent = self.min_slot_extent.max(0.0);

        // Pop-out
        self.edge_pad = self.edge_pad.max(0.0);
        self.edge_buffer = self.edge_buffer.max(0.0);
        self.drag_threshold = self.drag_threshold.max(0.0);

        // Presentation
        self.ghost_size = self.ghost_size.clamp(8.0, 512.0);
        self.ghost_follow_speed = self.ghost_follow_speed.max(0.0);
        self.slide_duration = self.slide_duration.clamp(0.01, 2.0);

        // Events
        self.event_capacity = self.event_capacity.clamp(16, 65_536);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_three_by_four_grid() {
        let config = InventoryConfig::default();
        assert_eq!(config.dims().capacity(), 12);
        assert!((config.edge_margin() - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.pop_out, PopOutRule::EdgeCrossing);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = InventoryConfig::from_toml("rows = 5\npop_out = \"threshold\"\n")
            .expect("valid toml");
        assert_eq!(config.rows, 5);
        assert_eq!(config.columns, 4);
        assert_eq!(config.pop_out, PopOutRule::Threshold);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = InventoryConfig::from_toml("rows = \"many\"").expect_err("rows must be a number");
        assert!(matches!(err, SatchelError::Config(_)));
    }

    #[test]
    fn test_validate_clamps() {
        let mut config = InventoryConfig {
            rows: 0,
            columns: 99,
            slide_duration: 0.0,
            ..InventoryConfig::default()
        };
        config.validate();
        assert_eq!(config.rows, 1);
        assert_eq!(config.columns, 16);
        assert!(config.slide_duration > 0.0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("inventory.toml");

        let config = InventoryConfig {
            rows: 4,
            pop_out: PopOutRule::Threshold,
            ..InventoryConfig::default()
        };
        config.save_to(&path).expect("save succeeds");

        assert_eq!(InventoryConfig::load_from(&path), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = InventoryConfig::load_from(dir.path().join("absent.toml"));
        assert_eq!(config, InventoryConfig::default());
    }
}
