//! Projectile flight, culling and team-aware hit tests.

use crate::collision::{self, Obstacle, ObstacleKind};
use crate::entity::Team;
use crate::events::{DespawnReason, GameEvent};
use crate::geometry::Collider;
use crate::world::World;

const ENEMY_SHOT_TARGETS: [ObstacleKind; 2] = [ObstacleKind::Characters, ObstacleKind::Doodads];
const PLAYER_SHOT_TARGETS: [ObstacleKind; 2] = [ObstacleKind::Enemies, ObstacleKind::Doodads];

/// Move every projectile, then drop the ones that left the field or hit
/// something.
///
/// An enemy shot touching the player is *not* removed here; it is flagged
/// in `world.projectile_collision` and the damage pass takes it out.
pub fn update_projectiles(world: &mut World, events: &mut Vec<GameEvent>) {
    let player_rect = world.player.hitbox(0, 0);
    let mut remove: Vec<usize> = Vec::new();

    for i in 0..world.projectiles.len() {
        let p = &mut world.projectiles[i];
        p.advance();
        p.anim.step(&p.sprite);
        let (id, owner, pos) = (p.id(), p.owner(), p.pos);

        if !world.config.in_projectile_bounds(pos) {
            remove.push(i);
            events.push(GameEvent::ProjectileDespawned { id, reason: DespawnReason::OutOfBounds });
            continue;
        }

        let hb = world.projectiles[i].hitbox(0, 0);
        let hit = match owner {
            Team::Enemy => {
                if hb.overlaps(&player_rect) {
                    // First shot to land this frame is the one that counts.
                    if world.projectile_collision.is_none() {
                        world.projectile_collision = Some(id);
                    }
                    continue;
                }
                collision::probe(world, &hb, &ENEMY_SHOT_TARGETS, None)
            }
            Team::Player => collision::probe(world, &hb, &PLAYER_SHOT_TARGETS, None),
        };

        let reason = match hit {
            // Tiles are not in either target list.
            None | Some(Obstacle::Tile(_)) => continue,
            Some(Obstacle::Enemy(enemy)) => {
                events.push(GameEvent::EnemyStruck { enemy, projectile: id });
                DespawnReason::HitEnemy
            }
            Some(Obstacle::Character(_)) => DespawnReason::HitCharacter,
            Some(Obstacle::Doodad(_)) => DespawnReason::HitDoodad,
        };
        tracing::debug!(projectile = id.0, ?reason, "projectile hit");
        remove.push(i);
        events.push(GameEvent::ProjectileDespawned { id, reason });
    }

    // Indices are ascending; removing from the back means each swap pulls in
    // an element that was already kept.
    for &i in remove.iter().rev() {
        world.projectiles.swap_remove(i);
    }
}
