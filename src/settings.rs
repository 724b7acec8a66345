//! Simulation settings
//!
//! Loaded from a JSON file next to the level data; every field falls back to
//! the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Fixed tick rate the host loop should run at
    pub tick_rate_hz: u32,
    /// Ticks the hero needs to cross one tile
    pub hero_ticks_per_tile: u32,
    /// Ticks an enemy needs to cross one tile
    pub enemy_ticks_per_tile: u32,
    /// Lifetime of a celebration burst
    pub celebration_ticks: u32,

    // === Camera ===
    /// Pixel size of one tile
    pub cell_size: f32,
    /// Viewport width in tiles
    pub viewport_tiles_width: u32,
    /// Viewport height in tiles
    pub viewport_tiles_height: u32,
    /// Fraction of the remaining distance closed per tick (1.0 = snap to hero)
    pub camera_smoothing: f32,

    // === Determinism ===
    /// Seed for roaming enemies; the RNG is reseeded on every level start
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            hero_ticks_per_tile: HERO_TICKS_PER_TILE,
            enemy_ticks_per_tile: ENEMY_TICKS_PER_TILE,
            celebration_ticks: CELEBRATION_TICKS,

            cell_size: CELL_SIZE,
            viewport_tiles_width: VIEWPORT_TILES_WIDTH,
            viewport_tiles_height: VIEWPORT_TILES_HEIGHT,
            camera_smoothing: CAMERA_SMOOTHING,

            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings from a file, falling back to defaults if it can't be read
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Fixed timestep in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }

    /// Viewport size in pixels
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(
            self.viewport_tiles_width as f32,
            self.viewport_tiles_height as f32,
        ) * self.cell_size
    }

    /// Clamp values that would stall the simulation
    fn sanitized(mut self) -> Self {
        self.tick_rate_hz = self.tick_rate_hz.max(1);
        self.hero_ticks_per_tile = self.hero_ticks_per_tile.max(1);
        self.enemy_ticks_per_tile = self.enemy_ticks_per_tile.max(1);
        self.camera_smoothing = self.camera_smoothing.clamp(0.01, 1.0);
        self
    }
}
