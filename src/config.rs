//! Editor configuration.
//!
//! Loaded from a JSON file or built from defaults. Every field is optional
//! in the file; missing fields take their default.
//!
//! ```no_run
//! use swatchbook::Config;
//! use std::path::Path;
//!
//! let config = Config::from_json_file(Path::new("swatchbook.json"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorValue};
use crate::error::PaletteError;
use crate::history::DEFAULT_CAPACITY;
use crate::store::DEFAULT_RECENT_LIMIT;

/// A seed color as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedColor {
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of palette snapshots kept for undo/redo
    pub history_capacity: usize,

    /// Length of the recent-colors list
    pub recent_limit: usize,

    /// How many colors "generate accessible" appends
    pub accessible_count: usize,

    /// Display name of a new palette
    pub palette_name: String,

    /// Palette a new session starts from
    pub initial_palette: Vec<SeedColor>,
}

impl Default for Config {
    fn default() -> Self {
        let seed = |hex: &str, name: &str| SeedColor {
            hex: hex.to_string(),
            name: Some(name.to_string()),
        };
        Self {
            history_capacity: DEFAULT_CAPACITY,
            recent_limit: DEFAULT_RECENT_LIMIT,
            accessible_count: 5,
            palette_name: "My Color Palette".to_string(),
            initial_palette: vec![
                seed("#FF6B6B", "Coral Red"),
                seed("#4ECDC4", "Turquoise"),
                seed("#45B7D1", "Sky Blue"),
                seed("#96CEB4", "Mint Green"),
                seed("#FFEAA7", "Banana Yellow"),
            ],
        }
    }
}

impl Config {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config JSON: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), PaletteError> {
        if self.history_capacity == 0 {
            return Err(PaletteError::config("history_capacity must be at least 1"));
        }
        if self.recent_limit == 0 {
            return Err(PaletteError::config("recent_limit must be at least 1"));
        }
        if self.accessible_count == 0 {
            return Err(PaletteError::config("accessible_count must be at least 1"));
        }
        for seed in &self.initial_palette {
            Color::from_hex(&seed.hex)?;
        }
        Ok(())
    }

    /// The seed colors as palette entries with ids `1..=n`.
    pub fn initial_colors(&self) -> std::result::Result<Vec<ColorValue>, PaletteError> {
        self.initial_palette
            .iter()
            .enumerate()
            .map(|(i, seed)| ColorValue::new((i + 1).to_string(), &seed.hex, seed.name.clone()))
            .collect()
    }
}
