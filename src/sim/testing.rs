//! Shared fixtures for simulation tests

use std::cell::RefCell;
use std::rc::Rc;

use glam::IVec2;

use super::placement::PlacementType;
use super::state::{LevelSnapshot, LevelState};
use crate::levels::{LevelCatalog, LevelData, LevelTheme, PlacementConfig};
use crate::platform::{DirectionControls, DirectionHandle};
use crate::settings::Settings;

pub type Emitted = Rc<RefCell<Vec<LevelSnapshot>>>;

pub fn place(placement_type: PlacementType, x: i32, y: i32) -> PlacementConfig {
    PlacementConfig::new(placement_type, x, y)
}

/// Started level with default settings, recording every emitted snapshot
pub fn level_of(width: i32, height: i32, placements: Vec<PlacementConfig>) -> (LevelState, Emitted) {
    level_with_settings(width, height, placements, Settings::default())
}

pub fn level_with_settings(
    width: i32,
    height: i32,
    placements: Vec<PlacementConfig>,
    settings: Settings,
) -> (LevelState, Emitted) {
    let catalog = LevelCatalog::new().with_level(
        "test",
        LevelData {
            theme: LevelTheme::Green,
            tiles_width: width,
            tiles_height: height,
            placements,
        },
    );
    let emitted: Emitted = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&emitted);
    let mut level = LevelState::new("test", catalog, move |snapshot: &LevelSnapshot| {
        sink.borrow_mut().push(snapshot.clone())
    })
    .with_settings(settings);
    level.start().unwrap();
    (level, emitted)
}

/// Bind fresh controls to the level and hand back the pressing side
pub fn held(level: &mut LevelState) -> DirectionHandle {
    let controls = DirectionControls::new();
    let handle = controls.handle();
    level.bind_controls(controls);
    handle
}

pub fn tick_n(level: &mut LevelState, n: usize) {
    for _ in 0..n {
        level.tick();
    }
}

pub fn hero_pos(level: &LevelState) -> IVec2 {
    level.hero().map(|h| h.pos).unwrap()
}
