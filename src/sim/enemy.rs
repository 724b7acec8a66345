//! Autonomous hazards: ground, flying and roaming enemies
//!
//! All three share one walker; they differ in what blocks them and in how
//! they turn when blocked.

use glam::IVec2;
use rand::Rng;
use serde::Serialize;

use super::direction::{Direction, Motion};
use super::placement::PlacementType;
use super::tick::TickContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enemy {
    /// Current heading
    pub direction: Direction,
    pub motion: Option<Motion>,
}

impl Enemy {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            motion: None,
        }
    }
}

pub(super) fn tick(
    kind: PlacementType,
    enemy: &mut Enemy,
    pos: &mut IVec2,
    ctx: &mut TickContext<'_>,
) {
    if enemy.motion.is_none() {
        try_start_move(kind, enemy, *pos, ctx);
    }

    if let Some(motion) = enemy.motion.as_mut() {
        if motion.advance() {
            let direction = motion.direction;
            enemy.motion = None;
            *pos = direction.step(*pos);
        }
    }

    let touches_hero = ctx.hero().is_some_and(|hero| hero.pos == *pos);
    if touches_hero {
        ctx.set_death_outcome(kind);
    }
}

fn try_start_move(kind: PlacementType, enemy: &mut Enemy, pos: IVec2, ctx: &mut TickContext<'_>) {
    if ctx.is_blocked(kind, enemy.direction.step(pos)) {
        enemy.direction = match kind {
            PlacementType::RoamingEnemy => pick_open_direction(kind, pos, ctx).unwrap_or(enemy.direction),
            _ => enemy.direction.opposite(),
        };
        if ctx.is_blocked(kind, enemy.direction.step(pos)) {
            return;
        }
    }
    enemy.motion = Some(Motion::new(enemy.direction, ctx.settings.enemy_ticks_per_tile));
}

/// Random unblocked heading from the level's seeded RNG
fn pick_open_direction(kind: PlacementType, pos: IVec2, ctx: &mut TickContext<'_>) -> Option<Direction> {
    let open: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| !ctx.is_blocked(kind, d.step(pos)))
        .collect();
    if open.is_empty() {
        return None;
    }
    let pick = ctx.rng.random_range(0..open.len());
    Some(open[pick])
}
