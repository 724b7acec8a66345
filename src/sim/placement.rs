//! Placements: the positioned entities a level is made of
//!
//! Every placement shares one contract (`tick`, plus move requests for the
//! hero) dispatched over a closed set of variants.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::direction::{Direction, Motion};
use super::enemy::{self, Enemy};
use super::hero::{self, Hero};
use super::inventory::InventoryItem;
use super::objects::{self, Celebration, Conveyor, Goal, Key, Lock, Pickup};
use super::tick::TickContext;

/// Runtime identifier, unique within a level for its whole lifetime
pub type PlacementId = u32;

/// Type tag of a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementType {
    Hero,
    Goal,
    Wall,
    Flour,
    Celebration,
    Lock,
    Key,
    Water,
    WaterPickup,
    GroundEnemy,
    FlyingEnemy,
    RoamingEnemy,
    Conveyor,
}

impl PlacementType {
    pub const ALL: [PlacementType; 13] = [
        PlacementType::Hero,
        PlacementType::Goal,
        PlacementType::Wall,
        PlacementType::Flour,
        PlacementType::Celebration,
        PlacementType::Lock,
        PlacementType::Key,
        PlacementType::Water,
        PlacementType::WaterPickup,
        PlacementType::GroundEnemy,
        PlacementType::FlyingEnemy,
        PlacementType::RoamingEnemy,
        PlacementType::Conveyor,
    ];

    /// Tag used in level data
    pub fn tag(self) -> &'static str {
        match self {
            PlacementType::Hero => "HERO",
            PlacementType::Goal => "GOAL",
            PlacementType::Wall => "WALL",
            PlacementType::Flour => "FLOUR",
            PlacementType::Celebration => "CELEBRATION",
            PlacementType::Lock => "LOCK",
            PlacementType::Key => "KEY",
            PlacementType::Water => "WATER",
            PlacementType::WaterPickup => "WATER_PICKUP",
            PlacementType::GroundEnemy => "GROUND_ENEMY",
            PlacementType::FlyingEnemy => "FLYING_ENEMY",
            PlacementType::RoamingEnemy => "ROAMING_ENEMY",
            PlacementType::Conveyor => "CONVEYOR",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    pub fn is_enemy(self) -> bool {
        matches!(
            self,
            PlacementType::GroundEnemy | PlacementType::FlyingEnemy | PlacementType::RoamingEnemy
        )
    }

    /// Bodies that walk between tiles and ride conveyors
    pub fn is_mover(self) -> bool {
        self == PlacementType::Hero || self.is_enemy()
    }
}

impl std::fmt::Display for PlacementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Variant-specific state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementKind {
    Hero(Hero),
    Goal(Goal),
    Wall,
    Flour(Pickup),
    Celebration(Celebration),
    Lock(Lock),
    Key(Key),
    Water,
    WaterPickup(Pickup),
    GroundEnemy(Enemy),
    FlyingEnemy(Enemy),
    RoamingEnemy(Enemy),
    Conveyor(Conveyor),
}

/// A positioned entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub id: PlacementId,
    /// Tile coordinates; a moving body keeps its origin tile until arrival
    pub pos: IVec2,
    #[serde(flatten)]
    pub kind: PlacementKind,
}

impl Placement {
    pub fn placement_type(&self) -> PlacementType {
        match &self.kind {
            PlacementKind::Hero(_) => PlacementType::Hero,
            PlacementKind::Goal(_) => PlacementType::Goal,
            PlacementKind::Wall => PlacementType::Wall,
            PlacementKind::Flour(_) => PlacementType::Flour,
            PlacementKind::Celebration(_) => PlacementType::Celebration,
            PlacementKind::Lock(_) => PlacementType::Lock,
            PlacementKind::Key(_) => PlacementType::Key,
            PlacementKind::Water => PlacementType::Water,
            PlacementKind::WaterPickup(_) => PlacementType::WaterPickup,
            PlacementKind::GroundEnemy(_) => PlacementType::GroundEnemy,
            PlacementKind::FlyingEnemy(_) => PlacementType::FlyingEnemy,
            PlacementKind::RoamingEnemy(_) => PlacementType::RoamingEnemy,
            PlacementKind::Conveyor(_) => PlacementType::Conveyor,
        }
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.kind, PlacementKind::Hero(_))
    }

    pub fn motion(&self) -> Option<&Motion> {
        match &self.kind {
            PlacementKind::Hero(hero) => hero.motion.as_ref(),
            PlacementKind::GroundEnemy(enemy)
            | PlacementKind::FlyingEnemy(enemy)
            | PlacementKind::RoamingEnemy(enemy) => enemy.motion.as_ref(),
            _ => None,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.motion().is_some()
    }

    /// Interpolated position for rendering and the camera
    pub fn display_pos(&self) -> Vec2 {
        match self.motion() {
            Some(motion) => motion.display_pos(self.pos),
            None => self.pos.as_vec2(),
        }
    }

    /// Start a one-tile move; returns false for stationary placements or bodies already moving
    pub fn start_motion(&mut self, direction: Direction, duration: u32) -> bool {
        let slot = match &mut self.kind {
            PlacementKind::Hero(hero) => &mut hero.motion,
            PlacementKind::GroundEnemy(enemy)
            | PlacementKind::FlyingEnemy(enemy)
            | PlacementKind::RoamingEnemy(enemy) => &mut enemy.motion,
            _ => return false,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(Motion::new(direction, duration));
        true
    }

    /// Whether this placement stops `mover` from entering its tile
    pub fn is_solid_for(&self, mover: PlacementType) -> bool {
        match &self.kind {
            PlacementKind::Wall | PlacementKind::Lock(_) => true,
            PlacementKind::Water => matches!(
                mover,
                PlacementType::GroundEnemy | PlacementType::RoamingEnemy
            ),
            PlacementKind::GroundEnemy(_)
            | PlacementKind::FlyingEnemy(_)
            | PlacementKind::RoamingEnemy(_) => mover.is_enemy(),
            _ => false,
        }
    }

    /// Death cause if the hero shares a tile with this placement
    pub fn damages_hero(&self, can_swim: bool) -> Option<PlacementType> {
        match &self.kind {
            PlacementKind::Water if !can_swim => Some(PlacementType::Water),
            PlacementKind::GroundEnemy(_)
            | PlacementKind::FlyingEnemy(_)
            | PlacementKind::RoamingEnemy(_) => Some(self.placement_type()),
            _ => None,
        }
    }

    /// Mark a collectible as picked up, returning what goes in the inventory
    pub fn collect(&mut self) -> Option<InventoryItem> {
        match &mut self.kind {
            PlacementKind::Flour(pickup) => pickup.take().then_some(InventoryItem::Flour),
            PlacementKind::WaterPickup(pickup) => {
                pickup.take().then_some(InventoryItem::WaterPickup)
            }
            PlacementKind::Key(key) => key.take(),
            _ => None,
        }
    }

    pub fn is_uncollected_flour(&self) -> bool {
        matches!(&self.kind, PlacementKind::Flour(pickup) if !pickup.collected)
    }

    /// Per-frame update
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let id = self.id;
        let placement_type = self.placement_type();
        let Placement { pos, kind, .. } = self;
        match kind {
            PlacementKind::Hero(state) => hero::tick(state, pos, ctx),
            PlacementKind::Goal(goal) => objects::tick_goal(goal, *pos, ctx),
            PlacementKind::Celebration(celebration) => {
                objects::tick_celebration(celebration, id, ctx)
            }
            PlacementKind::GroundEnemy(state)
            | PlacementKind::FlyingEnemy(state)
            | PlacementKind::RoamingEnemy(state) => enemy::tick(placement_type, state, pos, ctx),
            PlacementKind::Conveyor(conveyor) => objects::tick_conveyor(conveyor, *pos, ctx),
            PlacementKind::Wall
            | PlacementKind::Flour(_)
            | PlacementKind::Lock(_)
            | PlacementKind::Key(_)
            | PlacementKind::Water
            | PlacementKind::WaterPickup(_) => {}
        }
    }

    /// Directional input forwarded by the level; only the hero reacts
    pub fn controller_move_requested(&mut self, direction: Direction, ctx: &mut TickContext<'_>) {
        if let PlacementKind::Hero(state) = &mut self.kind {
            hero::controller_move_requested(state, self.pos, direction, ctx);
        }
    }
}
