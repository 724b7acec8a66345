//! Fixed timestep level tick
//!
//! One call to [`LevelState::tick`] is one synchronous step: hero intent, a
//! single pass over every placement in insertion order, camera, emission.
//! Placements never hold a reference to the level; they get a
//! [`TickContext`] for the duration of their update and queue structural
//! changes on it.

use glam::IVec2;
use rand_pcg::Pcg32;

use super::inventory::Inventory;
use super::placement::{Placement, PlacementId, PlacementType};
use super::state::{LevelBounds, LevelState};
use crate::levels::PlacementConfig;
use crate::settings::Settings;

/// Structural change requested by a placement during its update
#[derive(Debug, Clone, PartialEq)]
pub(super) enum LevelCommand {
    Add(PlacementConfig),
    Delete(PlacementId),
    Die(PlacementType),
    Complete,
}

/// Every placement except the one being updated
pub struct Neighbors<'a> {
    before: &'a mut [Placement],
    after: &'a mut [Placement],
}

impl<'a> Neighbors<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.before.iter().chain(self.after.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Placement> + '_ {
        self.before.iter_mut().chain(self.after.iter_mut())
    }

    /// Placements on the given tile
    pub fn at(&self, pos: IVec2) -> impl Iterator<Item = &Placement> + '_ {
        self.iter().filter(move |p| p.pos == pos)
    }

    pub fn get(&self, id: PlacementId) -> Option<&Placement> {
        self.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlacementId) -> Option<&mut Placement> {
        self.iter_mut().find(|p| p.id == id)
    }
}

/// What a placement may see and do while it updates
pub struct TickContext<'a> {
    pub settings: &'a Settings,
    pub inventory: &'a mut Inventory,
    /// Level RNG, reseeded on every start
    pub rng: &'a mut Pcg32,
    pub others: Neighbors<'a>,
    /// `None` while the hero itself is updating
    hero_id: Option<PlacementId>,
    bounds: LevelBounds,
    commands: &'a mut Vec<LevelCommand>,
}

impl TickContext<'_> {
    /// The hero, unless it is the placement being updated
    pub fn hero(&self) -> Option<&Placement> {
        self.hero_id.and_then(|id| self.others.get(id))
    }

    pub fn is_out_of_bounds(&self, pos: IVec2) -> bool {
        self.bounds.is_out_of_bounds(pos)
    }

    /// Whether `mover` can not enter `target`
    pub fn is_blocked(&self, mover: PlacementType, target: IVec2) -> bool {
        self.is_out_of_bounds(target) || self.others.at(target).any(|p| p.is_solid_for(mover))
    }

    /// Spawn a placement after the current update; it ticks from the next pass
    pub fn add_placement(&mut self, config: PlacementConfig) {
        self.commands.push(LevelCommand::Add(config));
    }

    /// Remove a placement (possibly the caller) after the current update
    pub fn delete_placement(&mut self, id: PlacementId) {
        self.commands.push(LevelCommand::Delete(id));
    }

    pub fn set_death_outcome(&mut self, cause: PlacementType) {
        self.commands.push(LevelCommand::Die(cause));
    }

    pub fn complete_level(&mut self) {
        self.commands.push(LevelCommand::Complete);
    }
}

impl LevelState {
    /// Advance the level by one fixed step
    ///
    /// Returns false without doing anything when the loop is not running.
    pub fn tick(&mut self) -> bool {
        if self.destroyed || !self.game_loop.is_running() {
            return false;
        }

        // Hero intent
        if let (Some(hero_id), Some(direction)) = (self.hero_id, self.controls.direction()) {
            self.with_placement(hero_id, |hero, ctx| {
                hero.controller_move_requested(direction, ctx)
            });
        }

        // Uniform pass; ids added mid-pass wait for the next one
        let order: Vec<PlacementId> = self.placements.iter().map(|p| p.id).collect();
        for id in order {
            self.with_placement(id, |placement, ctx| placement.tick(ctx));
        }

        if let Some(focus) = self.hero().map(Placement::display_pos) {
            self.camera.tick(focus, &self.settings);
        }

        self.ticks += 1;
        let snapshot = self.get_state();
        (self.on_emit)(&snapshot);
        true
    }

    /// Run `f` on one placement with a context over the rest of the level
    ///
    /// Returns false if the placement no longer exists.
    fn with_placement<F>(&mut self, id: PlacementId, f: F) -> bool
    where
        F: FnOnce(&mut Placement, &mut TickContext<'_>),
    {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut commands = Vec::new();
        {
            let (before, rest) = self.placements.split_at_mut(index);
            let Some((placement, after)) = rest.split_first_mut() else {
                return false;
            };
            let hero_id = self.hero_id.filter(|hero_id| *hero_id != id);
            let mut ctx = TickContext {
                settings: &self.settings,
                inventory: &mut self.inventory,
                rng: &mut self.rng,
                others: Neighbors { before, after },
                hero_id,
                bounds: self.bounds,
                commands: &mut commands,
            };
            f(placement, &mut ctx);
        }
        self.apply_commands(commands);
        true
    }

    fn apply_commands(&mut self, commands: Vec<LevelCommand>) {
        for command in commands {
            match command {
                LevelCommand::Add(config) => {
                    if let Err(e) = self.add_placement(config) {
                        log::warn!("Level {}: spawn rejected: {}", self.id, e);
                    }
                }
                LevelCommand::Delete(id) => {
                    if let Err(e) = self.delete_placement(id) {
                        log::debug!("Level {}: delete skipped: {}", self.id, e);
                    }
                }
                LevelCommand::Die(cause) => self.set_death_outcome(cause),
                LevelCommand::Complete => self.complete_level(),
            }
        }
    }
}
