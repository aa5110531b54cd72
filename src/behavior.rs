//! Enemy decision loop.
//!
//! Every frame each enemy either holds its attack pose, fires along an axis
//! it shares with the player, or takes a one-pixel step to line up.

use glam::IVec2;

use crate::collision::{self, ENEMY_OBSTACLES};
use crate::entity::{Team, change_sprite};
use crate::events::GameEvent;
use crate::geometry::{Collider, Direction, Rect};
use crate::sprite::sprite_key;
use crate::world::World;

/// What an enemy is doing right now.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Idle,
    Walk(Direction),
    Attack(Direction),
}

impl Command {
    pub fn is_attack(self) -> bool {
        matches!(self, Command::Attack(_))
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::Idle => None,
            Command::Walk(d) | Command::Attack(d) => Some(d),
        }
    }

    /// Snake-case name, e.g. `attack_south`.
    pub fn name(self) -> String {
        match self {
            Command::Idle => "idle".to_string(),
            Command::Walk(d) => format!("walk_{}", d.name().to_lowercase()),
            Command::Attack(d) => format!("attack_{}", d.name().to_lowercase()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Behavior {
    pub command: Command,
    /// Frames to hold an attack before re-evaluating.
    pub pause: u32,
    /// Frames held so far.
    pub paused: u32,
}

impl Behavior {
    pub fn new(pause: u32) -> Self {
        Self { command: Command::Idle, pause, paused: 0 }
    }

    /// Count one frame of attack hold. Returns true while the hold should
    /// continue; once the budget is spent the counter is cleared and the
    /// enemy decides again this same frame.
    fn hold(&mut self) -> bool {
        if self.command.is_attack() {
            self.paused += 1;
            if self.paused < self.pause {
                return true;
            }
        }
        self.paused = 0;
        false
    }
}

/// Run every enemy's behavior, then step its animation.
pub fn update_enemies(world: &mut World, events: &mut Vec<GameEvent>) {
    for i in 0..world.enemies.len() {
        advance_behavior(world, i, events);
        let enemy = &mut world.enemies[i];
        enemy.anim.step(&enemy.sprite);
    }
}

/// One decision for enemy `index`.
pub fn advance_behavior(world: &mut World, index: usize, events: &mut Vec<GameEvent>) {
    let Some(enemy) = world.enemies.get_mut(index) else { return };
    if enemy.behavior.hold() {
        return;
    }

    let player_rect = world.player.hitbox(0, 0);
    let enemy_rect = world.enemies[index].hitbox(0, 0);
    let (px, py) = (player_rect.center_x(), player_rect.bottom());
    let (ex, ey) = (enemy_rect.center_x(), enemy_rect.bottom());

    if ex == px {
        if py > ey {
            attack(world, index, Direction::South, &enemy_rect, events);
        } else if py < ey {
            attack(world, index, Direction::North, &enemy_rect, events);
        }
    } else if ey == py {
        if px > ex {
            attack(world, index, Direction::East, &enemy_rect, events);
        } else {
            attack(world, index, Direction::West, &enemy_rect, events);
        }
    } else {
        let x_diff = (ex - px).abs();
        let y_diff = (ey - py).abs();
        // Close whichever gap is already smaller, so the enemy lines up on
        // that axis first and then fires down the other.
        let dir = if x_diff < y_diff {
            if ex < px { Direction::East } else { Direction::West }
        } else if ey < py {
            Direction::South
        } else {
            Direction::North
        };
        walk(world, index, dir);
    }
}

/// Where a shot leaves the enemy: the middle of the edge facing `dir`,
/// at foot level for sideways shots.
fn muzzle(rect: &Rect, dir: Direction) -> IVec2 {
    match dir {
        Direction::South => IVec2::new(rect.center_x(), rect.max.y),
        Direction::North => IVec2::new(rect.center_x(), rect.min.y),
        Direction::East => IVec2::new(rect.max.x, rect.max.y),
        Direction::West => IVec2::new(rect.min.x, rect.max.y),
    }
}

fn attack(world: &mut World, index: usize, dir: Direction, rect: &Rect, events: &mut Vec<GameEvent>) {
    let families = &world.config.sprites;
    let pose = world.sprites.lookup(&sprite_key(&families.enemy, "attack", dir)).cloned();
    let shot = world.sprites.lookup(&sprite_key(&families.enemy_projectile, "", dir)).cloned();

    let enemy = &mut world.enemies[index];
    enemy.behavior.command = Command::Attack(dir);
    enemy.facing = dir;
    if let Some(pose) = pose {
        change_sprite(&mut enemy.sprite, &mut enemy.anim, &pose);
    }
    tracing::debug!(enemy = index, command = %enemy.behavior.command.name(), "enemy attacks");

    if let Some(shot) = shot {
        let speed = world.config.projectile_speed;
        world.spawn_projectile(muzzle(rect, dir), shot, speed, dir, Team::Enemy, events);
    }
}

fn walk(world: &mut World, index: usize, dir: Direction) {
    let step = dir.offset();
    let probe = world.enemies[index].hitbox(step.x, step.y);
    if collision::probe(world, &probe, &ENEMY_OBSTACLES, Some(index)).is_some() {
        // Blocked: wait a frame rather than pushing through.
        return;
    }

    let pose = world
        .sprites
        .lookup(&sprite_key(&world.config.sprites.enemy, "walk", dir))
        .cloned();
    let enemy = &mut world.enemies[index];
    if enemy.behavior.command != Command::Walk(dir) {
        tracing::debug!(enemy = index, command = %Command::Walk(dir).name(), "enemy changes course");
    }
    enemy.behavior.command = Command::Walk(dir);
    enemy.facing = dir;
    if let Some(pose) = pose {
        change_sprite(&mut enemy.sprite, &mut enemy.anim, &pose);
    }
    enemy.pos += step;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names() {
        assert_eq!(Command::Attack(Direction::South).name(), "attack_south");
        assert_eq!(Command::Walk(Direction::West).name(), "walk_west");
        assert_eq!(Command::Idle.name(), "idle");
    }

    #[test]
    fn hold_counts_up_to_budget() {
        let mut b = Behavior { command: Command::Attack(Direction::North), pause: 3, paused: 0 };
        assert!(b.hold());
        assert!(b.hold());
        assert_eq!(b.paused, 2);
        assert!(!b.hold());
        assert_eq!(b.paused, 0);
    }

    #[test]
    fn walking_never_holds() {
        let mut b = Behavior { command: Command::Walk(Direction::East), pause: 60, paused: 7 };
        assert!(!b.hold());
        assert_eq!(b.paused, 0);
    }
}
