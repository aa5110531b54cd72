/// Projectile flight, culling, team rules and batch removal.
use glam::IVec2;

use grame::World;
use grame::entity::{Character, Doodad, Enemy, ProjectileId, Team, Tile};
use grame::events::{DespawnReason, GameEvent};
use grame::geometry::Direction;
use grame::projectile::update_projectiles;

mod common;

fn fire(w: &mut World, x: i32, y: i32, speed: i32, dir: Direction, owner: Team) -> ProjectileId {
    let sprite = common::sprite(&grame::sprite::sprite_key("fireball", "", dir));
    let mut events = Vec::new();
    w.spawn_projectile(IVec2::new(x, y), sprite, speed, dir, owner, &mut events)
}

fn despawns(events: &[GameEvent]) -> Vec<(ProjectileId, DespawnReason)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ProjectileDespawned { id, reason } => Some((*id, *reason)),
            _ => None,
        })
        .collect()
}

#[test]
fn moves_speed_pixels_per_frame() {
    let mut w = common::world_with_player(160, 300);
    let id = fire(&mut w, 0, 100, 3, Direction::East, Team::Enemy);
    let mut events = Vec::new();
    for expected in [3, 6, 9, 12] {
        update_projectiles(&mut w, &mut events);
        assert_eq!(w.projectile(id).unwrap().pos, IVec2::new(expected, 100));
    }
    assert!(events.is_empty());
}

#[test]
fn culled_past_four_screen_widths() {
    let mut w = common::world_with_player(160, 300);
    let id = fire(&mut w, 1275, 100, 3, Direction::East, Team::Enemy);
    let mut events = Vec::new();

    update_projectiles(&mut w, &mut events);
    assert_eq!(w.projectile(id).unwrap().pos.x, 1278);

    update_projectiles(&mut w, &mut events);
    assert!(w.projectiles.is_empty());
    assert_eq!(despawns(&events), vec![(id, DespawnReason::OutOfBounds)]);
}

#[test]
fn culled_past_minus_two_screen_widths() {
    let mut w = common::world_with_player(160, 300);
    fire(&mut w, -637, 100, 3, Direction::West, Team::Enemy);
    let mut events = Vec::new();
    update_projectiles(&mut w, &mut events);
    // Exactly on the margin is still inside.
    assert_eq!(w.projectiles[0].pos.x, -640);
    update_projectiles(&mut w, &mut events);
    assert!(w.projectiles.is_empty());
}

#[test]
fn vertical_margin_uses_screen_height() {
    let mut w = common::world_with_player(160, 300);
    fire(&mut w, 100, 958, 2, Direction::South, Team::Enemy);
    let mut events = Vec::new();
    update_projectiles(&mut w, &mut events);
    assert_eq!(w.projectiles.len(), 1);
    update_projectiles(&mut w, &mut events);
    assert!(w.projectiles.is_empty());
}

#[test]
fn removes_every_flagged_projectile_exactly_once() {
    let mut w = common::world_with_player(160, 300);
    let mut ids = Vec::new();
    for i in 0..6 {
        // Even slots are about to leave the field.
        let x = if i % 2 == 0 { 1280 } else { 100 };
        ids.push(fire(&mut w, x, 50 + i * 10, 3, Direction::East, Team::Enemy));
    }
    let mut events = Vec::new();
    update_projectiles(&mut w, &mut events);

    assert_eq!(w.projectiles.len(), 3);
    let mut left: Vec<_> = w.projectiles.iter().map(|p| p.id()).collect();
    left.sort();
    assert_eq!(left, vec![ids[1], ids[3], ids[5]]);
    assert_eq!(despawns(&events).len(), 3);
}

#[test]
fn enemy_shot_on_player_is_flagged_not_removed() {
    let mut w = common::world_with_player(100, 100);
    let first = fire(&mut w, 90, 100, 2, Direction::East, Team::Enemy);
    let second = fire(&mut w, 110, 100, 2, Direction::West, Team::Enemy);
    let mut events = Vec::new();
    update_projectiles(&mut w, &mut events);

    assert_eq!(w.projectile_collision, Some(first));
    assert!(w.projectile(first).is_some());
    assert!(w.projectile(second).is_some());
    assert!(events.is_empty());
}

#[test]
fn enemy_shot_stops_at_characters_and_doodads() {
    let mut w = common::world_with_player(300, 300);
    let mut library = grame::dialogue::DialogueLibrary::default();
    library.insert("elder", grame::dialogue::DialogueGraph::new("a", grame::dialogue::DialogueNode::new("hi"), vec![]));
    w.characters.push(
        Character::new(IVec2::new(40, 50), common::sprite("elderStandSouth"), library.into_graphs(), "elder").unwrap(),
    );
    w.doodads.push(Doodad::new(IVec2::new(140, 50), common::sprite("tree")));

    let at_elder = fire(&mut w, 28, 50, 2, Direction::East, Team::Enemy);
    let at_tree = fire(&mut w, 128, 50, 2, Direction::East, Team::Enemy);
    let mut events = Vec::new();
    update_projectiles(&mut w, &mut events);

    assert!(w.projectiles.is_empty());
    let mut got = despawns(&events);
    got.sort_by_key(|(id, _)| *id);
    assert_eq!(got, vec![(at_elder, DespawnReason::HitCharacter), (at_tree, DespawnReason::HitDoodad)]);
}

#[test]
fn collider_tiles_do_not_stop_shots() {
    let mut w = common::world_with_player(300, 300);
    w.tiles.push(Tile::solid(IVec2::new(40, 50), common::sprite("stump")));
    let enemy_shot = fire(&mut w, 30, 50, 2, Direction::East, Team::Enemy);
    let player_shot = fire(&mut w, 50, 50, 2, Direction::West, Team::Player);
    let mut events = Vec::new();
    update_projectiles(&mut w, &mut events);

    assert!(despawns(&events).is_empty());
    assert_eq!(w.projectile(enemy_shot).map(|p| p.pos), Some(IVec2::new(32, 50)));
    assert_eq!(w.projectile(player_shot).map(|p| p.pos), Some(IVec2::new(48, 50)));
}

#[test]
fn player_shot_strikes_enemy_and_spares_player() {
    let mut w = common::world_with_player(50, 100);
    w.enemies.push(Enemy::new(IVec2::new(130, 100), common::sprite("skeletonWizardStandSouth"), 60));
    let id = fire(&mut w, 117, 100, 3, Direction::East, Team::Player);
    // Starts on top of the player: friendly fire is ignored.
    let friendly = fire(&mut w, 48, 100, 1, Direction::North, Team::Player);
    let mut events = Vec::new();
    update_projectiles(&mut w, &mut events);

    assert!(w.projectile(id).is_none());
    assert!(w.projectile(friendly).is_some());
    assert_eq!(w.projectile_collision, None);
    assert!(events.contains(&GameEvent::EnemyStruck { enemy: 0, projectile: id }));
    assert_eq!(despawns(&events), vec![(id, DespawnReason::HitEnemy)]);
}

#[test]
fn projectile_animation_steps_each_frame() {
    let mut w = common::world_with_player(160, 300);
    let id = fire(&mut w, 0, 0, 1, Direction::East, Team::Enemy);
    let sprite = grame::sprite::Sprite::new("spinner", 8, 8).with_frames(3, 1);
    w.projectiles[0].sprite = sprite;
    let mut events = Vec::new();
    update_projectiles(&mut w, &mut events);
    assert_eq!(w.projectile(id).unwrap().anim.frame, 1);
    update_projectiles(&mut w, &mut events);
    assert_eq!(w.projectile(id).unwrap().anim.frame, 0);
}
