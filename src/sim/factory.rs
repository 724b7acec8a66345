//! Builds placements from level data and assigns their ids

use glam::IVec2;

use super::direction::Direction;
use super::enemy::Enemy;
use super::hero::Hero;
use super::inventory::KeyColor;
use super::objects::{Celebration, Conveyor, Goal, Key, Lock, Pickup};
use super::placement::{Placement, PlacementId, PlacementKind, PlacementType};
use crate::error::PlacementError;
use crate::levels::PlacementConfig;
use crate::settings::Settings;

/// Placement constructor owning the level's id counter
///
/// Ids are never reused, not even across level restarts.
#[derive(Debug, Clone)]
pub struct PlacementFactory {
    next_id: PlacementId,
}

impl Default for PlacementFactory {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl PlacementFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new placement id
    fn next_placement_id(&mut self) -> PlacementId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build a placement from its config; unknown type tags are rejected
    pub fn create(
        &mut self,
        config: &PlacementConfig,
        settings: &Settings,
    ) -> Result<Placement, PlacementError> {
        let Some(placement_type) = PlacementType::from_tag(&config.type_tag) else {
            log::warn!("No placement type found for {:?}", config.type_tag);
            return Err(PlacementError::UnknownType(config.type_tag.clone()));
        };

        Ok(Placement {
            id: self.next_placement_id(),
            pos: IVec2::new(config.x, config.y),
            kind: initial_kind(placement_type, config, settings),
        })
    }
}

fn initial_kind(
    placement_type: PlacementType,
    config: &PlacementConfig,
    settings: &Settings,
) -> PlacementKind {
    let direction = config.direction.unwrap_or(Direction::Right);
    let color = config.color.unwrap_or(KeyColor::Blue);
    match placement_type {
        PlacementType::Hero => PlacementKind::Hero(Hero::new(direction)),
        PlacementType::Goal => PlacementKind::Goal(Goal::default()),
        PlacementType::Wall => PlacementKind::Wall,
        PlacementType::Flour => PlacementKind::Flour(Pickup::default()),
        PlacementType::Celebration => PlacementKind::Celebration(Celebration {
            ticks_left: settings.celebration_ticks,
        }),
        PlacementType::Lock => PlacementKind::Lock(Lock { color }),
        PlacementType::Key => PlacementKind::Key(Key::new(color)),
        PlacementType::Water => PlacementKind::Water,
        PlacementType::WaterPickup => PlacementKind::WaterPickup(Pickup::default()),
        PlacementType::GroundEnemy => PlacementKind::GroundEnemy(Enemy::new(direction)),
        PlacementType::FlyingEnemy => PlacementKind::FlyingEnemy(Enemy::new(direction)),
        PlacementType::RoamingEnemy => PlacementKind::RoamingEnemy(Enemy::new(direction)),
        PlacementType::Conveyor => PlacementKind::Conveyor(Conveyor { direction }),
    }
}
