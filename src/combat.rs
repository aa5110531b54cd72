//! Turns this frame's collision markers into player damage.

use crate::events::{DamageCause, DespawnReason, GameEvent};
use crate::world::World;

/// Apply at most one point of damage per frame.
///
/// A projectile hit takes priority over enemy contact. Both markers are
/// cleared whichever one fires, so leftover contact never carries over into
/// the next frame.
pub fn resolve_damage(world: &mut World, events: &mut Vec<GameEvent>) {
    if let Some(id) = world.projectile_collision.take() {
        world.enemy_collision = None;
        world.player.health -= 1;
        if let Some(i) = world.projectiles.iter().position(|p| p.id() == id) {
            world.projectiles.swap_remove(i);
            events.push(GameEvent::ProjectileDespawned { id, reason: DespawnReason::HitPlayer });
        }
        tracing::info!(health = world.player.health, projectile = id.0, "player hit by projectile");
        events.push(GameEvent::PlayerDamaged { health: world.player.health, cause: DamageCause::Projectile(id) });
        return;
    }

    if let Some(enemy) = world.enemy_collision.take() {
        world.player.health -= 1;
        tracing::info!(health = world.player.health, enemy, "player hurt by enemy contact");
        events.push(GameEvent::PlayerDamaged { health: world.player.health, cause: DamageCause::EnemyContact(enemy) });
    }
}
