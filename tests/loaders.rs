/// Building a world from the shipped assets and the demo level.
use glam::IVec2;

use grame::World;
use grame::config::GameConfig;
use grame::dialogue::DialogueLibrary;
use grame::error::GameError;
use grame::level::{CharacterSpec, LevelConfig, ShotSpec};
use grame::sprite::SpriteSheet;

mod common;
use common::Driver;

fn assets() -> (SpriteSheet, DialogueLibrary) {
    let root = env!("CARGO_MANIFEST_DIR");
    let sprites = SpriteSheet::load_folder(format!("{root}/{}", grame::DEFAULT_SPRITE_DIR)).unwrap();
    let dialogue = DialogueLibrary::load(format!("{root}/{}", grame::DEFAULT_DIALOGUE_FILE)).unwrap();
    (sprites, dialogue)
}

#[test]
fn shipped_sprites_are_keyed_by_camel_case_stem() {
    let (sprites, _) = assets();
    assert_eq!(sprites.len(), 36);
    let walk = sprites.get("skeletonWizardWalkEast").unwrap();
    assert_eq!(walk.frame_len, 5);
    assert_eq!(sprites.get("linkAttackNorth").unwrap().handle(0), Some(IVec2::new(12, 10)));
    assert!(sprites.get("link_walk_east").is_none());
}

#[test]
fn demo_level_builds() {
    let (sprites, dialogue) = assets();
    let w = World::from_level(GameConfig::default(), &LevelConfig::demo(), sprites, &dialogue).unwrap();

    assert_eq!(w.player.pos, IVec2::new(8, 21));
    assert_eq!(w.player.health, 100);
    assert_eq!(w.player.sprite.name, "linkStandSouth");
    assert!(w.player.weapon.is_some());
    assert_eq!(w.characters.len(), 1);
    assert_eq!(w.characters[0].dialogue_key(), "elder");
    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.enemies[0].behavior.pause, 60);
    assert_eq!(w.doodads.len(), 2);
    assert_eq!(w.tiles.iter().filter(|t| t.collider).count(), 2);
    assert_eq!(w.tiles.len(), 20 * 19 + 2);
}

#[test]
fn demo_level_runs() {
    let (sprites, dialogue) = assets();
    let mut w = World::from_level(GameConfig::default(), &LevelConfig::demo(), sprites, &dialogue).unwrap();
    let mut d = Driver::new();
    for _ in 0..600 {
        d.step(&mut w);
    }
    assert_eq!(w.frame, 600);
    assert!(w.player.health <= 100);
}

#[test]
fn characters_keep_separate_progress() {
    let (sprites, dialogue) = assets();
    let mut level = LevelConfig::demo();
    level.characters.push(CharacterSpec { x: 200, y: 32, sprite: "elderStandSouth".into(), dialogue: "elder".into() });
    let mut w = World::from_level(GameConfig::default(), &level, sprites, &dialogue).unwrap();

    use grame::dialogue::Interaction;
    w.characters[0].advance_phrase();
    assert_eq!(w.characters[0].graph().unwrap().current_key(), "ask");
    assert_eq!(w.characters[1].graph().unwrap().current_key(), "greeting");
    w.characters[0].reset_dialogue();
    assert_eq!(w.characters[0].graph().unwrap().current_key(), "greeting");
}

#[test]
fn missing_sprite_is_reported() {
    let (_, dialogue) = assets();
    let err = World::from_level(GameConfig::default(), &LevelConfig::demo(), SpriteSheet::new(), &dialogue)
        .err()
        .unwrap();
    assert!(matches!(err, GameError::MissingSprite(_)), "got {err}");
}

#[test]
fn missing_shot_sprite_is_reported() {
    let (sprites, dialogue) = assets();
    let mut level = LevelConfig::demo();
    if let Some(weapon) = level.weapon.as_mut() {
        weapon.shot = Some(ShotSpec { sprite_prefix: "boomerang".into(), speed: 3 });
    }
    let err = World::from_level(GameConfig::default(), &level, sprites, &dialogue).err().unwrap();
    assert!(matches!(err, GameError::MissingSprite(ref name) if name.starts_with("boomerang")));
}

#[test]
fn unknown_dialogue_is_reported() {
    let (sprites, dialogue) = assets();
    let mut level = LevelConfig::demo();
    level.characters[0].dialogue = "ghost".into();
    let err = World::from_level(GameConfig::default(), &level, sprites, &dialogue).err().unwrap();
    assert!(matches!(err, GameError::MissingDialogue(ref key) if key == "ghost"));
}

#[test]
fn config_file_overrides() {
    let config = GameConfig::from_json(r#"{"player_health": 3, "enemy_pause": 5}"#, "game.json").unwrap();
    let (sprites, dialogue) = assets();
    let w = World::from_level(config, &LevelConfig::demo(), sprites, &dialogue).unwrap();
    assert_eq!(w.player.health, 3);
    // The demo pins its enemy's pause explicitly.
    assert_eq!(w.enemies[0].behavior.pause, 60);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = DialogueLibrary::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, GameError::Io { .. }));
}
