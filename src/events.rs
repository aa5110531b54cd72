//! Things that happened during one simulation step, in the order they
//! happened. The renderer and audio layer consume these; tests assert on them.

use crate::entity::{ProjectileId, Team};
use crate::geometry::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DamageCause {
    Projectile(ProjectileId),
    /// Index of the enemy the player walked into.
    EnemyContact(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DespawnReason {
    OutOfBounds,
    HitPlayer,
    HitEnemy,
    HitCharacter,
    HitDoodad,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayerDamaged { health: i32, cause: DamageCause },
    ProjectileSpawned { id: ProjectileId, owner: Team, direction: Direction },
    ProjectileDespawned { id: ProjectileId, reason: DespawnReason },
    /// A player shot reached an enemy. Enemies have no health, so this is
    /// reported and nothing else happens.
    EnemyStruck { enemy: usize, projectile: ProjectileId },
    AttackStarted { facing: Direction },
    InteractionStarted { character: usize },
    InteractionEnded { character: usize },
}
