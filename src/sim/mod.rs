//! Deterministic level simulation
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, reseeded on every level start
//! - Stable iteration order (placement insertion order)
//! - No rendering dependencies

pub mod camera;
pub mod direction;
pub mod enemy;
pub mod factory;
pub mod hero;
pub mod inventory;
pub mod objects;
pub mod placement;
pub mod state;
pub mod tick;

#[cfg(test)]
pub(crate) mod testing;

pub use camera::Camera;
pub use direction::{Direction, Motion};
pub use factory::PlacementFactory;
pub use inventory::{Inventory, InventoryEntry, InventoryItem, KeyColor};
pub use placement::{Placement, PlacementId, PlacementKind, PlacementType};
pub use state::{LevelBounds, LevelPhase, LevelSnapshot, LevelState, StartReport};
pub use tick::{Neighbors, TickContext};
