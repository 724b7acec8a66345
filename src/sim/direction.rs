//! Grid directions and tile-to-tile motion

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Cardinal direction on the tile grid (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in tile coordinates
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Tile reached by stepping once from `from`
    pub fn step(self, from: IVec2) -> IVec2 {
        from + self.offset()
    }
}

/// An in-flight move between two adjacent tiles
///
/// The owning placement keeps its origin tile until the move finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub direction: Direction,
    /// Ticks left before arrival
    pub remaining: u32,
    /// Total ticks the move takes
    pub duration: u32,
}

impl Motion {
    pub fn new(direction: Direction, duration: u32) -> Self {
        let duration = duration.max(1);
        Self {
            direction,
            remaining: duration,
            duration,
        }
    }

    /// Advance one tick; returns true on arrival
    pub fn advance(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    /// Completed fraction of the move in [0, 1]
    pub fn progress(&self) -> f32 {
        1.0 - self.remaining as f32 / self.duration as f32
    }

    /// Interpolated display position of a body moving from `origin`
    pub fn display_pos(&self, origin: IVec2) -> Vec2 {
        origin.as_vec2() + self.direction.offset().as_vec2() * self.progress()
    }
}
