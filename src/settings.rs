//! Run configuration
//!
//! Supplied by the page (or a file, natively) at start-up. Never persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Difficulty;

/// Options recognised by `TowerState::reset`
///
/// Field names serialize in camelCase so page-side JSON reads naturally.
/// Missing fields take their defaults. Values are not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TowerConfig {
    /// Side length of the square base block
    pub base_size: f32,
    /// Vertical distance between levels (presentation only)
    pub level_height: f32,
    /// Easy-mode speed, units per millisecond
    pub speed_easy: f32,
    /// Hard-mode speed, units per millisecond
    pub speed_hard: f32,
    pub tolerance_easy: f32,
    pub tolerance_hard: f32,
    /// Reaching `max_level + 1` wins the run
    pub max_level: u32,
    /// Moving blocks reflect at ±this coordinate
    pub oscillation_limit: f32,
    /// Spawn displacement from the previous block's center
    pub spawn_offset: f32,
    /// Difficulty the run starts in
    pub difficulty: Difficulty,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            base_size: BASE_SIZE,
            level_height: LEVEL_HEIGHT,
            speed_easy: SPEED_EASY,
            speed_hard: SPEED_HARD,
            tolerance_easy: TOLERANCE_EASY,
            tolerance_hard: TOLERANCE_HARD,
            max_level: MAX_LEVEL,
            oscillation_limit: OSCILLATION_LIMIT,
            spawn_offset: SPAWN_OFFSET,
            difficulty: Difficulty::Easy,
        }
    }
}

impl TowerConfig {
    /// Parse from JSON; absent fields fall back to defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Oscillation speed for the given difficulty
    pub fn speed(&self, difficulty: Difficulty) -> f32 {
        match difficulty {
            Difficulty::Easy => self.speed_easy,
            Difficulty::Hard => self.speed_hard,
        }
    }

    /// Snap tolerance for the given difficulty
    pub fn tolerance(&self, difficulty: Difficulty) -> f32 {
        match difficulty {
            Difficulty::Easy => self.tolerance_easy,
            Difficulty::Hard => self.tolerance_hard,
        }
    }

    /// Load overrides from the page's `#tower-config` JSON element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("tower-config"))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded tower config from page");
                    return config;
                }
                Err(e) => log::warn!("Ignoring malformed tower config: {}", e),
            }
        }

        log::info!("Using default tower config");
        Self::default()
    }

    /// Load overrides from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded tower config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
