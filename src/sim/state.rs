//! Level state and lifecycle
//!
//! `LevelState` is the authoritative owner of everything a running level
//! needs: placements, inventory, camera, input and loop handle. The per-frame
//! step lives in `tick.rs`.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::camera::Camera;
use super::factory::PlacementFactory;
use super::inventory::Inventory;
use super::placement::{Placement, PlacementId, PlacementType};
use crate::error::{LevelError, PlacementError};
use crate::levels::{LevelSource, LevelTheme, PlacementConfig};
use crate::platform::{DirectionControls, DirectionSource, GameLoop};
use crate::settings::Settings;

/// Callback receiving one snapshot per tick
pub type EmitFn = Box<dyn FnMut(&LevelSnapshot)>;

/// Lifecycle phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LevelPhase {
    /// Constructed, `start()` not called yet
    Ready,
    Running,
    Completed,
    Dead,
    /// `destroy()` was called
    Destroyed,
}

impl LevelPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LevelPhase::Completed | LevelPhase::Dead | LevelPhase::Destroyed
        )
    }
}

/// Play area size with a one-tile invalid border around it
///
/// Valid tiles are `1..=width` by `1..=height`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelBounds {
    pub width: i32,
    pub height: i32,
}

impl LevelBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_out_of_bounds(&self, pos: IVec2) -> bool {
        pos.x <= 0 || pos.y <= 0 || pos.x >= self.width + 1 || pos.y >= self.height + 1
    }
}

/// Immutable per-tick view handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSnapshot {
    pub theme: LevelTheme,
    pub tiles_width: i32,
    pub tiles_height: i32,
    pub placements: Vec<Placement>,
    pub death_outcome: Option<PlacementType>,
    pub is_completed: bool,
    pub camera_transform_x: f32,
    pub camera_transform_y: f32,
    pub inventory: Inventory,
    /// Ticks run since the last `start()`
    pub tick: u64,
}

/// Non-fatal problems found while starting a level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartReport {
    /// Placement configs the factory could not build
    pub rejected: Vec<PlacementError>,
}

/// Authoritative state of one level
pub struct LevelState {
    pub(super) id: String,
    pub(super) levels: Box<dyn LevelSource>,
    pub(super) settings: Settings,
    pub(super) on_emit: EmitFn,
    pub(super) controls: Box<dyn DirectionSource>,

    pub(super) theme: LevelTheme,
    pub(super) bounds: LevelBounds,
    pub(super) is_completed: bool,
    pub(super) death_outcome: Option<PlacementType>,

    /// Insertion order is tick order
    pub(super) placements: Vec<Placement>,
    pub(super) hero_id: Option<PlacementId>,
    pub(super) inventory: Inventory,
    pub(super) camera: Camera,
    pub(super) factory: PlacementFactory,
    pub(super) rng: Pcg32,
    pub(super) game_loop: GameLoop,
    pub(super) ticks: u64,
    pub(super) destroyed: bool,
}

impl LevelState {
    /// Create a level bound to `level_id`; nothing runs until [`LevelState::start`]
    pub fn new(
        level_id: impl Into<String>,
        levels: impl LevelSource + 'static,
        on_emit: impl FnMut(&LevelSnapshot) + 'static,
    ) -> Self {
        let settings = Settings::default();
        Self {
            id: level_id.into(),
            levels: Box::new(levels),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            on_emit: Box::new(on_emit),
            controls: Box::new(DirectionControls::new()),
            theme: LevelTheme::default(),
            bounds: LevelBounds::default(),
            is_completed: false,
            death_outcome: None,
            placements: Vec::new(),
            hero_id: None,
            inventory: Inventory::new(),
            camera: Camera::default(),
            factory: PlacementFactory::new(),
            game_loop: GameLoop::new(),
            ticks: 0,
            destroyed: false,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_controls(mut self, controls: impl DirectionSource + 'static) -> Self {
        self.bind_controls(controls);
        self
    }

    /// Swap the input source, releasing the previous one
    pub fn bind_controls(&mut self, controls: impl DirectionSource + 'static) {
        self.controls.unbind();
        self.controls = Box::new(controls);
    }

    /// (Re)initialize the level from its data and start the loop
    ///
    /// On error the previous state is left untouched.
    pub fn start(&mut self) -> Result<StartReport, LevelError> {
        if self.destroyed {
            return Err(LevelError::Destroyed(self.id.clone()));
        }
        let data = self
            .levels
            .level(&self.id)
            .ok_or_else(|| LevelError::UnknownLevel(self.id.clone()))?;

        let mut report = StartReport::default();
        let mut placements = Vec::with_capacity(data.placements.len());
        for config in &data.placements {
            match self.factory.create(config, &self.settings) {
                Ok(placement) => placements.push(placement),
                Err(e) => report.rejected.push(e),
            }
        }

        let heroes: Vec<&Placement> = placements.iter().filter(|p| p.is_hero()).collect();
        let hero = match heroes.as_slice() {
            [hero] => *hero,
            [] => return Err(LevelError::MissingHero(self.id.clone())),
            _ => {
                return Err(LevelError::DuplicateHero {
                    level: self.id.clone(),
                    count: heroes.len(),
                });
            }
        };
        let hero_id = hero.id;
        let camera = Camera::focused_on(hero.display_pos(), &self.settings);

        self.game_loop.stop();
        self.is_completed = false;
        self.death_outcome = None;
        self.theme = data.theme;
        self.bounds = LevelBounds::new(data.tiles_width, data.tiles_height);
        self.placements = placements;
        self.inventory = Inventory::new();
        self.hero_id = Some(hero_id);
        self.camera = camera;
        self.rng = Pcg32::seed_from_u64(self.settings.seed);
        self.ticks = 0;
        self.game_loop.start();

        log::info!(
            "Level {} started: {}x{}, {} placements ({} rejected)",
            self.id,
            data.tiles_width,
            data.tiles_height,
            self.placements.len(),
            report.rejected.len()
        );
        Ok(report)
    }

    /// Append a placement; it joins the tick order from the next pass
    pub fn add_placement(&mut self, config: PlacementConfig) -> Result<PlacementId, PlacementError> {
        self.ensure_active()?;
        if PlacementType::from_tag(&config.type_tag) == Some(PlacementType::Hero)
            && self.hero_id.is_some()
        {
            return Err(PlacementError::HeroAlreadyPresent);
        }
        let placement = self.factory.create(&config, &self.settings)?;
        let id = placement.id;
        self.placements.push(placement);
        Ok(id)
    }

    /// Remove the placement with `id`
    pub fn delete_placement(&mut self, id: PlacementId) -> Result<Placement, PlacementError> {
        self.ensure_active()?;
        if self.hero_id == Some(id) {
            return Err(PlacementError::HeroNotDeletable(id));
        }
        let index = self.index_of(id).ok_or(PlacementError::NotFound(id))?;
        Ok(self.placements.remove(index))
    }

    /// Record how the hero died and stop the loop; the first terminal signal wins
    pub fn set_death_outcome(&mut self, cause: PlacementType) {
        if self.is_terminal() {
            log::debug!("Ignoring death by {} in level {}: already over", cause, self.id);
            return;
        }
        self.death_outcome = Some(cause);
        self.game_loop.stop();
        log::info!("Level {} lost: hero killed by {}", self.id, cause);
    }

    /// Mark the level complete and stop the loop; the first terminal signal wins
    pub fn complete_level(&mut self) {
        if self.is_terminal() {
            log::debug!("Ignoring completion of level {}: already over", self.id);
            return;
        }
        self.is_completed = true;
        self.game_loop.stop();
        log::info!("Level {} completed after {} ticks", self.id, self.ticks);
    }

    /// Stop the loop and release input; later calls do nothing
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.game_loop.stop();
        self.controls.unbind();
        log::debug!("Level {} destroyed", self.id);
    }

    /// Whether (x, y) touches or crosses the one-tile border frame
    pub fn is_position_out_of_bounds(&self, x: i32, y: i32) -> bool {
        self.bounds.is_out_of_bounds(IVec2::new(x, y))
    }

    /// Snapshot for the renderer
    pub fn get_state(&self) -> LevelSnapshot {
        LevelSnapshot {
            theme: self.theme,
            tiles_width: self.bounds.width,
            tiles_height: self.bounds.height,
            placements: self.placements.clone(),
            death_outcome: self.death_outcome,
            is_completed: self.is_completed,
            camera_transform_x: self.camera.transform.x,
            camera_transform_y: self.camera.transform.y,
            inventory: self.inventory.clone(),
            tick: self.ticks,
        }
    }

    pub fn phase(&self) -> LevelPhase {
        if self.destroyed {
            LevelPhase::Destroyed
        } else if self.death_outcome.is_some() {
            LevelPhase::Dead
        } else if self.is_completed {
            LevelPhase::Completed
        } else if self.game_loop.is_running() {
            LevelPhase::Running
        } else {
            LevelPhase::Ready
        }
    }

    /// Placements can only change between `start()` and `destroy()`
    fn ensure_active(&self) -> Result<(), PlacementError> {
        if self.destroyed || self.hero_id.is_none() {
            return Err(PlacementError::Inactive(self.id.clone()));
        }
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.phase().is_terminal()
    }

    pub fn is_running(&self) -> bool {
        self.game_loop.is_running()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> LevelTheme {
        self.theme
    }

    pub fn bounds(&self) -> LevelBounds {
        self.bounds
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn hero_id(&self) -> Option<PlacementId> {
        self.hero_id
    }

    /// The live hero placement
    pub fn hero(&self) -> Option<&Placement> {
        self.hero_id.and_then(|id| self.placement(id))
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn death_outcome(&self) -> Option<PlacementType> {
        self.death_outcome
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Ticks run since the last `start()`
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(super) fn index_of(&self, id: PlacementId) -> Option<usize> {
        self.placements.iter().position(|p| p.id == id)
    }
}

impl Drop for LevelState {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for LevelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelState")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .field("bounds", &self.bounds)
            .field("placements", &self.placements.len())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
