//! Move-then-check obstacle queries shared by the player, enemies and
//! projectiles.
//!
//! Callers build a hitbox at the position they *want* to occupy (via the
//! `dx`/`dy` probe on [`Collider::hitbox`]) and ask whether anything in the
//! listed categories is in the way. Categories are searched in the order
//! given, entities within a category in list order, and the first hit wins.

use crate::geometry::{Collider, Rect};
use crate::world::World;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Enemies,
    Tiles,
    Doodads,
    Characters,
}

/// The first entity found blocking a probe.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Obstacle {
    Enemy(usize),
    Tile(usize),
    Doodad(usize),
    Character(usize),
}

/// What blocks the player, in priority order. Enemies come first so a
/// bump into an enemy is always recorded as contact damage.
pub const PLAYER_OBSTACLES: [ObstacleKind; 4] = [
    ObstacleKind::Enemies,
    ObstacleKind::Tiles,
    ObstacleKind::Doodads,
    ObstacleKind::Characters,
];

/// What blocks an enemy stepping toward the player.
pub const ENEMY_OBSTACLES: [ObstacleKind; 2] = [ObstacleKind::Enemies, ObstacleKind::Doodads];

fn first_hit<'a, T: Collider + 'a>(
    rect: &Rect,
    items: impl IntoIterator<Item = &'a T>,
    skip: Option<usize>,
) -> Option<usize> {
    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != skip)
        .find(|(_, item)| rect.overlaps(&item.hitbox(0, 0)))
        .map(|(i, _)| i)
}

/// Find the first obstacle overlapping `rect`.
///
/// `skip_enemy` excludes one enemy index so an enemy never blocks itself.
pub fn probe(world: &World, rect: &Rect, kinds: &[ObstacleKind], skip_enemy: Option<usize>) -> Option<Obstacle> {
    if rect.is_empty() {
        return None;
    }
    kinds.iter().find_map(|kind| match kind {
        ObstacleKind::Enemies => first_hit(rect, &world.enemies, skip_enemy).map(Obstacle::Enemy),
        ObstacleKind::Tiles => first_hit(rect, &world.tiles, None).map(Obstacle::Tile),
        ObstacleKind::Doodads => first_hit(rect, &world.doodads, None).map(Obstacle::Doodad),
        ObstacleKind::Characters => first_hit(rect, &world.characters, None).map(Obstacle::Character),
    })
}
