//! Player controller: walking, facing, attacking.

use crate::collision::{self, Obstacle, PLAYER_OBSTACLES};
use crate::entity::{Team, WeaponId, Wielder};
use crate::events::GameEvent;
use crate::geometry::{Collider, Direction};
use crate::input::{Action, Controls};
use crate::sprite::sprite_key;
use crate::world::World;

/// One frame of player control.
pub fn update_player(world: &mut World, controls: &impl Controls, events: &mut Vec<GameEvent>) {
    let anim_end = step_animation(world);

    for dir in Direction::ALL {
        if !controls.is_held(Action::movement(dir)) {
            continue;
        }
        // Restart the walk cycle on a fresh press, when releasing another key
        // leaves this one as the newest still held, or when an attack just
        // finished with the key down.
        let restart = controls.is_pressed(Action::movement(dir))
            || (controls.other_direction_released(dir) && controls.is_most_recent_direction(dir))
            || anim_end;
        if restart {
            world.player.facing = dir;
            set_pose(world, "walk", dir);
        }
        try_step(world, dir);
    }

    if !controls.any_direction_held() && !world.player.attacking {
        let facing = world.player.facing;
        set_pose(world, "stand", facing);
    }

    if !world.player.attacking && controls.is_held(Action::Attack) {
        start_attack(world, events);
    }
}

/// Step the player's animation. Returns true if an attack just finished.
fn step_animation(world: &mut World) -> bool {
    let player = &mut world.player;
    let wrapped = player.anim.step(&player.sprite);
    let frame = player.anim.frame;
    let weapon = player.weapon;

    if let Some(weapon) = weapon.and_then(|WeaponId(i)| world.weapons.get_mut(i)) {
        weapon.anim.frame = frame;
    }

    if !(wrapped && world.player.attacking) {
        return false;
    }
    world.player.attacking = false;
    if let Some(weapon) = weapon.and_then(|WeaponId(i)| world.weapons.get_mut(i)) {
        weapon.is_attacking = false;
        weapon.anim.reset();
    }
    true
}

/// Select `{player}{action}{dir}` and restart the animation. A missing
/// sprite keeps the current one but still restarts it.
fn set_pose(world: &mut World, action: &str, dir: Direction) {
    let key = sprite_key(&world.config.sprites.player, action, dir);
    if let Some(sprite) = world.sprites.lookup(&key) {
        world.player.sprite = sprite.clone();
    }
    world.player.anim.reset();
}

/// Try to move one pixel toward `dir`. Bumping an enemy blocks the move and
/// marks it for contact damage.
fn try_step(world: &mut World, dir: Direction) {
    let step = dir.offset();
    let probe = world.player.hitbox(step.x, step.y);
    match collision::probe(world, &probe, &PLAYER_OBSTACLES, None) {
        None => world.player.pos += step,
        Some(Obstacle::Enemy(i)) => world.enemy_collision = Some(i),
        Some(_) => {}
    }
}

fn start_attack(world: &mut World, events: &mut Vec<GameEvent>) {
    let facing = world.player.facing;
    world.player.attacking = true;
    set_pose(world, "attack", facing);
    events.push(GameEvent::AttackStarted { facing });

    let Some(WeaponId(w)) = world.player.weapon else { return };
    let Some(weapon) = world.weapons.get(w) else { return };
    let blade = world.sprites.lookup(&sprite_key(&weapon.sprite_prefix, "", facing)).cloned();
    let shot = weapon.shot.clone();

    let weapon = &mut world.weapons[w];
    weapon.anim.reset();
    weapon.wielder = Some(Wielder::Player);
    weapon.is_attacking = true;
    if let Some(blade) = blade {
        weapon.sprite = blade;
    }

    if let Some(shot) = shot {
        if let Some(sprite) = world.sprites.lookup(&sprite_key(&shot.sprite_prefix, "", facing)).cloned() {
            let pos = world.player.pos;
            world.spawn_projectile(pos, sprite, shot.speed, facing, Team::Player, events);
        }
    }
}
