//! Platform abstraction layer
//!
//! Handles host-facing concerns the simulation should not know about:
//! - Held directional input
//! - Loop running state and wall-clock frame pacing

pub mod game_loop;
pub mod input;

pub use game_loop::{FrameClock, GameLoop};
pub use input::{DirectionControls, DirectionHandle, DirectionSource};
