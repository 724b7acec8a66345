//! The player-controlled placement
//!
//! Movement requests are resolved against bounds and blockers; arrival on a
//! tile triggers pickups, hazards and the goal.

use glam::IVec2;
use serde::Serialize;

use super::direction::{Direction, Motion};
use super::inventory::InventoryItem;
use super::objects;
use super::placement::{PlacementKind, PlacementType};
use super::tick::TickContext;
use crate::levels::PlacementConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hero {
    /// Last requested direction, for sprite facing
    pub facing: Direction,
    pub motion: Option<Motion>,
}

impl Hero {
    pub fn new(facing: Direction) -> Self {
        Self {
            facing,
            motion: None,
        }
    }
}

pub(super) fn controller_move_requested(
    hero: &mut Hero,
    pos: IVec2,
    direction: Direction,
    ctx: &mut TickContext<'_>,
) {
    if hero.motion.is_some() {
        return;
    }
    hero.facing = direction;

    let target = direction.step(pos);
    if ctx.is_out_of_bounds(target) {
        return;
    }

    // Walking into a lock with the matching key opens it; the hero steps in next frame
    let unlockable = ctx.others.at(target).find_map(|p| match &p.kind {
        PlacementKind::Lock(lock) if ctx.inventory.has(InventoryItem::Key(lock.color)) => {
            Some(p.id)
        }
        _ => None,
    });
    if let Some(lock_id) = unlockable {
        log::debug!("Hero unlocked lock {} at {}", lock_id, target);
        ctx.delete_placement(lock_id);
        return;
    }

    if ctx.is_blocked(PlacementType::Hero, target) {
        return;
    }
    hero.motion = Some(Motion::new(direction, ctx.settings.hero_ticks_per_tile));
}

pub(super) fn tick(hero: &mut Hero, pos: &mut IVec2, ctx: &mut TickContext<'_>) {
    let Some(motion) = hero.motion.as_mut() else {
        return;
    };
    if !motion.advance() {
        return;
    }
    let direction = motion.direction;
    hero.motion = None;
    *pos = direction.step(*pos);
    handle_arrival(*pos, ctx);
}

fn handle_arrival(pos: IVec2, ctx: &mut TickContext<'_>) {
    let mut celebrations = Vec::new();
    for placement in ctx.others.iter_mut().filter(|p| p.pos == pos) {
        if let Some(item) = placement.collect() {
            ctx.inventory.add(item);
            if item == InventoryItem::Flour {
                celebrations.push(PlacementConfig::new(PlacementType::Celebration, pos.x, pos.y));
            }
        }
    }
    for config in celebrations {
        ctx.add_placement(config);
    }

    let can_swim = ctx.inventory.has(InventoryItem::WaterPickup);
    let cause = ctx.others.at(pos).find_map(|p| p.damages_hero(can_swim));
    if let Some(cause) = cause {
        ctx.set_death_outcome(cause);
    }

    if objects::is_open_goal_at(pos, ctx) {
        ctx.complete_level();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::inventory::KeyColor;
    use crate::sim::testing::{hero_pos, held, level_of, place, tick_n};

    #[test]
    fn test_walks_one_tile_per_move() {
        let (mut level, _) = level_of(5, 5, vec![place(PlacementType::Hero, 1, 1)]);
        let input = held(&mut level);
        input.press(Direction::Right);

        let ticks = level.settings().hero_ticks_per_tile as usize;
        tick_n(&mut level, ticks - 1);
        assert_eq!(hero_pos(&level), IVec2::new(1, 1));
        assert!(level.hero().unwrap().is_moving());

        tick_n(&mut level, 1);
        assert_eq!(hero_pos(&level), IVec2::new(2, 1));
    }

    #[test]
    fn test_blocked_by_bounds_and_walls() {
        let (mut level, _) = level_of(
            3,
            3,
            vec![
                place(PlacementType::Hero, 1, 1),
                place(PlacementType::Wall, 2, 1),
            ],
        );
        let input = held(&mut level);

        input.press(Direction::Up);
        tick_n(&mut level, 20);
        assert_eq!(hero_pos(&level), IVec2::new(1, 1));

        input.press(Direction::Right);
        tick_n(&mut level, 20);
        assert_eq!(hero_pos(&level), IVec2::new(1, 1));
        assert_eq!(
            level.hero().map(|h| &h.kind),
            Some(&PlacementKind::Hero(Hero::new(Direction::Right)))
        );
    }

    #[test]
    fn test_key_opens_matching_lock() {
        let (mut level, _) = level_of(
            5,
            1,
            vec![
                place(PlacementType::Hero, 1, 1),
                place(PlacementType::Key, 2, 1).with_color(KeyColor::Green),
                place(PlacementType::Lock, 3, 1).with_color(KeyColor::Green),
            ],
        );
        let input = held(&mut level);
        input.press(Direction::Right);
        let per_tile = level.settings().hero_ticks_per_tile as usize;

        tick_n(&mut level, per_tile);
        assert!(level.inventory().has(InventoryItem::Key(KeyColor::Green)));
        assert_eq!(level.placements().len(), 3);

        // Next request opens the lock instead of moving
        tick_n(&mut level, 1);
        assert_eq!(level.placements().len(), 2);
        assert_eq!(hero_pos(&level), IVec2::new(2, 1));

        tick_n(&mut level, per_tile);
        assert_eq!(hero_pos(&level), IVec2::new(3, 1));
    }

    #[test]
    fn test_wrong_key_keeps_lock_closed() {
        let (mut level, _) = level_of(
            5,
            1,
            vec![
                place(PlacementType::Hero, 1, 1),
                place(PlacementType::Key, 2, 1).with_color(KeyColor::Blue),
                place(PlacementType::Lock, 3, 1).with_color(KeyColor::Green),
            ],
        );
        let input = held(&mut level);
        input.press(Direction::Right);
        tick_n(&mut level, 40);

        assert_eq!(hero_pos(&level), IVec2::new(2, 1));
        assert_eq!(level.placements().len(), 3);
    }

    #[test]
    fn test_water_kills_without_pickup() {
        let (mut level, emitted) = level_of(
            5,
            1,
            vec![
                place(PlacementType::Hero, 1, 1),
                place(PlacementType::Water, 2, 1),
            ],
        );
        let input = held(&mut level);
        input.press(Direction::Right);
        tick_n(&mut level, 40);

        let per_tile = level.settings().hero_ticks_per_tile as usize;
        assert_eq!(level.death_outcome(), Some(PlacementType::Water));
        assert_eq!(emitted.borrow().len(), per_tile);
    }

    #[test]
    fn test_water_pickup_allows_swimming() {
        let (mut level, _) = level_of(
            5,
            1,
            vec![
                place(PlacementType::Hero, 1, 1),
                place(PlacementType::WaterPickup, 2, 1),
                place(PlacementType::Water, 3, 1),
            ],
        );
        let input = held(&mut level);
        input.press(Direction::Right);
        let per_tile = level.settings().hero_ticks_per_tile as usize;
        tick_n(&mut level, per_tile * 3);

        assert_eq!(level.death_outcome(), None);
        assert_eq!(hero_pos(&level), IVec2::new(4, 1));
        assert!(level.inventory().has(InventoryItem::WaterPickup));
    }
}
