use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Rows the terminal layout keeps for header, pad and footer.
const RESERVED_ROWS: u16 = 3 + 5 + 3;

/// Smallest board the responsive fit will shrink to.
pub const MIN_TILE_COUNT: usize = 5;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of the square play surface, in surface units
    pub canvas_size: u32,
    /// Side of a single tile, in surface units
    pub grid_size: u32,
    /// Tick interval at the start of a game
    pub initial_interval_ms: u64,
    /// How much each eaten food shortens the tick interval
    pub interval_step_ms: u64,
    /// The tick interval never drops below this
    pub min_interval_ms: u64,
    /// Points per food
    pub food_score: u32,
    /// Shortest drag, in cells, that counts as a swipe
    pub min_swipe_distance: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_size: 400,
            grid_size: 20,
            initial_interval_ms: 150,
            interval_step_ms: 2,
            min_interval_ms: 50,
            food_score: 10,
            min_swipe_distance: 3,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom surface and tile size
    pub fn new(canvas_size: u32, grid_size: u32) -> Self {
        Self {
            canvas_size,
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(200, 20)
    }

    /// Create a large board
    pub fn large() -> Self {
        Self::new(600, 20)
    }

    /// Load a configuration from a JSON file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Number of cells along each axis
    pub fn tile_count(&self) -> usize {
        if self.grid_size == 0 {
            return 0;
        }
        (self.canvas_size / self.grid_size) as usize
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn interval_step(&self) -> Duration {
        Duration::from_millis(self.interval_step_ms)
    }

    /// Largest tile count, capped at the configured one, whose board fits a
    /// terminal of `cols` x `rows`. Each cell is two columns wide and the
    /// board carries a one-cell border. Tiny terminals still get
    /// [`MIN_TILE_COUNT`] cells unless the configured board is smaller.
    pub fn tile_count_for_viewport(&self, cols: u16, rows: u16) -> usize {
        let by_width = (cols.saturating_sub(2) / 2) as usize;
        let by_height = rows.saturating_sub(RESERVED_ROWS + 2) as usize;

        self.tile_count()
            .min(by_width)
            .min(by_height)
            .max(MIN_TILE_COUNT.min(self.tile_count()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size == 0 {
            return Err("grid_size must be positive".to_string());
        }
        if self.canvas_size < self.grid_size {
            return Err(format!(
                "canvas_size ({}) must hold at least one tile of grid_size ({})",
                self.canvas_size, self.grid_size
            ));
        }
        if self.canvas_size % self.grid_size != 0 {
            return Err(format!(
                "canvas_size ({}) must be a multiple of grid_size ({})",
                self.canvas_size, self.grid_size
            ));
        }
        if self.min_interval_ms == 0 {
            return Err("min_interval_ms must be positive".to_string());
        }
        if self.min_interval_ms > self.initial_interval_ms {
            return Err(format!(
                "min_interval_ms ({}) cannot exceed initial_interval_ms ({})",
                self.min_interval_ms, self.initial_interval_ms
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.tile_count(), 20);
        assert_eq!(config.initial_interval(), Duration::from_millis(150));
        assert_eq!(config.min_interval(), Duration::from_millis(50));
        assert_eq!(config.food_score, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(320, 20);
        assert_eq!(config.tile_count(), 16);
        assert_eq!(GameConfig::small().tile_count(), 10);
        assert_eq!(GameConfig::large().tile_count(), 30);
    }

    #[test]
    fn test_validation_zero_grid_size() {
        let config = GameConfig::new(400, 0);
        assert_eq!(config.tile_count(), 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_canvas_not_multiple() {
        assert!(GameConfig::new(410, 20).validate().is_err());
        assert!(GameConfig::new(10, 20).validate().is_err());
    }

    #[test]
    fn test_validation_interval_floor() {
        let config = GameConfig {
            min_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            min_interval_ms: 200,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_viewport_fit() {
        let config = GameConfig::default();

        // Roomy terminal keeps the configured board
        assert_eq!(config.tile_count_for_viewport(200, 60), 20);

        // Narrow terminal: (30 - 2) / 2 = 14 cells
        assert_eq!(config.tile_count_for_viewport(30, 60), 14);

        // Short terminal: 30 - 13 = 17 rows
        assert_eq!(config.tile_count_for_viewport(200, 30), 17);

        // Never below the minimum
        assert_eq!(config.tile_count_for_viewport(4, 4), MIN_TILE_COUNT);
    }

    #[test]
    fn test_viewport_fit_never_exceeds_tiny_board() {
        let config = GameConfig::new(80, 20);
        assert!(config.validate().is_ok());
        assert_eq!(config.tile_count(), 4);

        assert_eq!(config.tile_count_for_viewport(200, 80), 4);
        assert_eq!(config.tile_count_for_viewport(4, 4), 4);
    }

    #[test]
    fn test_from_file_partial() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "canvas_size": 300, "min_interval_ms": 80 }"#).unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.canvas_size, 300);
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.min_interval_ms, 80);
        assert_eq!(config.tile_count(), 15);
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = GameConfig::from_file(&temp_dir.path().join("nope.json"));
        assert!(result.is_err());
    }
}
