//! Tile Level - runtime core for tile-based puzzle levels
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level state, placements, tick pass)
//! - `levels`: Level data source and the built-in catalog
//! - `platform`: Input and loop collaborators driving the simulation
//! - `settings`: Data-driven tuning loaded from JSON

pub mod error;
pub mod levels;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{CatalogError, LevelError, PlacementError};
pub use levels::{LevelCatalog, LevelData, LevelSource, LevelTheme, PlacementConfig};
pub use settings::Settings;
pub use sim::{LevelPhase, LevelSnapshot, LevelState, StartReport};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE_HZ: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Pixel size of one tile, used for camera transforms
    pub const CELL_SIZE: f32 = 16.0;
    /// Visible area in tiles
    pub const VIEWPORT_TILES_WIDTH: u32 = 20;
    pub const VIEWPORT_TILES_HEIGHT: u32 = 11;

    /// Ticks the hero needs to cross one tile
    pub const HERO_TICKS_PER_TILE: u32 = 8;
    /// Enemies walk at half the hero's pace
    pub const ENEMY_TICKS_PER_TILE: u32 = 16;
    /// Lifetime of the flour pickup burst
    pub const CELEBRATION_TICKS: u32 = 30;

    /// Fraction of the remaining distance the camera closes each tick (1.0 = snap)
    pub const CAMERA_SMOOTHING: f32 = 1.0;

    pub const DEFAULT_SEED: u64 = 0x5eed_f10a;
}
