//! Viewport that follows the hero

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Camera transform in pixels
///
/// `transform` is the offset a renderer applies to the level layer so the
/// hero's tile sits in the middle of the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub transform: Vec2,
}

impl Camera {
    /// Camera already centered on the hero
    pub fn focused_on(hero_pos: Vec2, settings: &Settings) -> Self {
        Self {
            transform: Self::target_transform(hero_pos, settings),
        }
    }

    fn target_transform(hero_pos: Vec2, settings: &Settings) -> Vec2 {
        let half_cell = settings.cell_size / 2.0;
        let hero_center = hero_pos * settings.cell_size + Vec2::splat(half_cell);
        settings.viewport_size() / 2.0 - hero_center
    }

    /// Move toward the hero's (interpolated) tile position
    pub fn tick(&mut self, hero_pos: Vec2, settings: &Settings) {
        let target = Self::target_transform(hero_pos, settings);
        self.transform = self.transform.lerp(target, settings.camera_smoothing);
    }
}
