//! Static and passive placements: goal, pickups, locks, conveyors, effects

use glam::IVec2;
use serde::Serialize;

use super::direction::Direction;
use super::inventory::{InventoryItem, KeyColor};
use super::placement::{PlacementId, PlacementType};
use super::tick::TickContext;

/// Level exit; disabled while flour remains uncollected
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Goal {
    pub disabled: bool,
}

/// Flour or water pickup
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pickup {
    pub collected: bool,
}

impl Pickup {
    /// Returns true the first time only
    pub fn take(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Key {
    pub color: KeyColor,
    pub collected: bool,
}

impl Key {
    pub fn new(color: KeyColor) -> Self {
        Self {
            color,
            collected: false,
        }
    }

    pub fn take(&mut self) -> Option<InventoryItem> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(InventoryItem::Key(self.color))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lock {
    pub color: KeyColor,
}

/// Short-lived burst left behind by a flour pickup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Celebration {
    pub ticks_left: u32,
}

/// Belt that pushes idle bodies one tile along its direction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conveyor {
    pub direction: Direction,
}

/// Whether no flour is left to collect
pub(super) fn all_flour_collected(ctx: &TickContext<'_>) -> bool {
    !ctx.others.iter().any(|p| p.is_uncollected_flour())
}

/// Whether an enabled goal sits on `pos`
pub(super) fn is_open_goal_at(pos: IVec2, ctx: &TickContext<'_>) -> bool {
    ctx.others
        .at(pos)
        .any(|p| p.placement_type() == PlacementType::Goal)
        && all_flour_collected(ctx)
}

/// The hero's tile only changes on arrival, so a goal ticking before the hero
/// still sees a hero that is leaving the goal tile.
pub(super) fn tick_goal(goal: &mut Goal, pos: IVec2, ctx: &mut TickContext<'_>) {
    goal.disabled = !all_flour_collected(ctx);
    if goal.disabled {
        return;
    }
    if ctx.hero().is_some_and(|hero| hero.pos == pos) {
        ctx.complete_level();
    }
}

pub(super) fn tick_celebration(
    celebration: &mut Celebration,
    id: PlacementId,
    ctx: &mut TickContext<'_>,
) {
    celebration.ticks_left = celebration.ticks_left.saturating_sub(1);
    if celebration.ticks_left == 0 {
        ctx.delete_placement(id);
    }
}

pub(super) fn tick_conveyor(conveyor: &Conveyor, pos: IVec2, ctx: &mut TickContext<'_>) {
    let rider = ctx
        .others
        .iter()
        .find(|p| p.pos == pos && p.placement_type().is_mover() && !p.is_moving())
        .map(|p| (p.id, p.placement_type()));
    let Some((rider_id, rider_type)) = rider else {
        return;
    };

    if ctx.is_blocked(rider_type, conveyor.direction.step(pos)) {
        return;
    }
    let duration = if rider_type == PlacementType::Hero {
        ctx.settings.hero_ticks_per_tile
    } else {
        ctx.settings.enemy_ticks_per_tile
    };
    if let Some(rider) = ctx.others.get_mut(rider_id) {
        rider.start_motion(conveyor.direction, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::placement::PlacementKind;
    use crate::sim::testing::{hero_pos, held, level_of, level_with_settings, place, tick_n};

    #[test]
    fn test_goal_waits_for_all_flour() {
        let (mut level, _) = level_of(
            4,
            1,
            vec![
                place(PlacementType::Hero, 1, 1),
                place(PlacementType::Goal, 2, 1),
                place(PlacementType::Flour, 3, 1),
            ],
        );
        let input = held(&mut level);
        input.press(Direction::Right);
        let per_tile = level.settings().hero_ticks_per_tile as usize;

        // Standing on the goal with flour left does nothing
        tick_n(&mut level, per_tile);
        assert_eq!(hero_pos(&level), IVec2::new(2, 1));
        assert!(!level.is_completed());
        let snapshot = level.get_state();
        let goal = snapshot
            .placements
            .iter()
            .find(|p| p.placement_type() == PlacementType::Goal)
            .map(|g| &g.kind);
        assert!(matches!(goal, Some(PlacementKind::Goal(Goal { disabled: true }))));

        tick_n(&mut level, per_tile);
        assert_eq!(level.inventory().count(InventoryItem::Flour), 1);

        input.release(Direction::Right);
        input.press(Direction::Left);
        tick_n(&mut level, per_tile);
        assert!(level.is_completed());
    }

    #[test]
    fn test_celebration_removes_itself() {
        let settings = Settings {
            celebration_ticks: 3,
            ..Default::default()
        };
        let (mut level, emitted) = level_with_settings(
            4,
            1,
            vec![
                place(PlacementType::Hero, 1, 1),
                place(PlacementType::Flour, 2, 1),
            ],
            settings,
        );
        let input = held(&mut level);
        input.press(Direction::Right);
        let per_tile = level.settings().hero_ticks_per_tile as usize;
        tick_n(&mut level, per_tile);
        input.release(Direction::Right);

        let celebration_id = {
            let emitted = emitted.borrow();
            let last = emitted.last().unwrap();
            let celebration = last
                .placements
                .iter()
                .find(|p| p.placement_type() == PlacementType::Celebration)
                .expect("flour pickup spawns a celebration");
            assert_eq!(celebration.pos, IVec2::new(2, 1));
            assert!(last.placements.iter().filter(|p| p.id == celebration.id).count() == 1);
            celebration.id
        };

        tick_n(&mut level, 2);
        assert!(level.placements().iter().any(|p| p.id == celebration_id));
        tick_n(&mut level, 1);
        assert!(!level.placements().iter().any(|p| p.id == celebration_id));
    }

    #[test]
    fn test_conveyor_carries_idle_hero() {
        let (mut level, _) = level_of(
            5,
            5,
            vec![
                place(PlacementType::Hero, 1, 1),
                place(PlacementType::Conveyor, 1, 1).with_direction(Direction::Right),
            ],
        );
        let per_tile = level.settings().hero_ticks_per_tile as usize;

        // Belt starts the move after the hero's own update, so arrival lands one tick later
        tick_n(&mut level, per_tile);
        assert_eq!(hero_pos(&level), IVec2::new(1, 1));
        tick_n(&mut level, 1);
        assert_eq!(hero_pos(&level), IVec2::new(2, 1));

        // Off the belt the hero stays put without input
        tick_n(&mut level, per_tile * 2);
        assert_eq!(hero_pos(&level), IVec2::new(2, 1));
    }

    #[test]
    fn test_conveyor_respects_blockers() {
        let (mut level, _) = level_of(
            5,
            5,
            vec![
                place(PlacementType::Hero, 1, 1),
                place(PlacementType::Conveyor, 1, 1).with_direction(Direction::Up),
            ],
        );
        tick_n(&mut level, 30);
        assert_eq!(hero_pos(&level), IVec2::new(1, 1));
    }

    #[test]
    fn test_pickup_take_once() {
        let mut pickup = Pickup::default();
        assert!(pickup.take());
        assert!(!pickup.take());

        let mut key = Key::new(KeyColor::Blue);
        assert_eq!(key.take(), Some(InventoryItem::Key(KeyColor::Blue)));
        assert_eq!(key.take(), None);
    }
}
