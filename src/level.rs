// ── LevelConfig ───────────────────────────────────────────────────────────────
//
// Static layout of a level: where everything starts and which sprite it wears.
// Read once at startup and turned into a `World` by `World::from_level`.

use std::path::Path;

use glam::IVec2;
use serde::Deserialize;

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::geometry::Direction;
use crate::sprite::sprite_key;

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Spawn {
    pub x: i32,
    pub y: i32,
}

impl Spawn {
    pub fn pos(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ShotSpec {
    pub sprite_prefix: String,
    pub speed: i32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WeaponSpec {
    /// `sword` → `swordNorth`, `swordEast`, ...
    pub sprite_prefix: String,
    #[serde(default)]
    pub shot: Option<ShotSpec>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CharacterSpec {
    pub x: i32,
    pub y: i32,
    pub sprite: String,
    /// Name of the dialogue graph the character starts with.
    pub dialogue: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EnemySpec {
    pub x: i32,
    pub y: i32,
    /// Falls back to `GameConfig::enemy_pause`.
    #[serde(default)]
    pub pause: Option<u32>,
}

/// Anything that is just a sprite at a point: doodads and collider tiles.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PropSpec {
    pub x: i32,
    pub y: i32,
    pub sprite: String,
}

/// A grid of floor tiles covering `[origin, (width, height))`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FloorSpec {
    pub sprite: String,
    pub origin_x: i32,
    pub origin_y: i32,
    pub step: i32,
    pub width: i32,
    pub height: i32,
}

impl FloorSpec {
    /// Anchor points of every floor tile, row by row.
    pub fn positions(&self) -> Vec<IVec2> {
        if self.step <= 0 {
            return Vec::new();
        }
        let step = self.step as usize;
        (self.origin_y..self.height)
            .step_by(step)
            .flat_map(|y| (self.origin_x..self.width).step_by(step).map(move |x| IVec2::new(x, y)))
            .collect()
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LevelConfig {
    pub player: Spawn,
    pub weapon: Option<WeaponSpec>,
    pub characters: Vec<CharacterSpec>,
    pub enemies: Vec<EnemySpec>,
    pub doodads: Vec<PropSpec>,
    pub floor: Option<FloorSpec>,
    pub colliders: Vec<PropSpec>,
}

impl LevelConfig {
    pub fn from_json(json: &str, origin: impl AsRef<Path>) -> Result<Self> {
        let level: Self = serde_json::from_str(json).map_err(|e| GameError::parse(origin.as_ref(), e))?;
        level.validate()?;
        Ok(level)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GameError::io(path, e))?;
        Self::from_json(&text, path)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(floor) = &self.floor {
            if floor.step <= 0 {
                return Err(GameError::InvalidConfig(format!("floor step must be positive, got {}", floor.step)));
            }
        }
        if let Some(shot) = self.weapon.as_ref().and_then(|w| w.shot.as_ref()) {
            if shot.speed <= 0 {
                return Err(GameError::InvalidConfig(format!("weapon shot speed must be positive, got {}", shot.speed)));
            }
        }
        Ok(())
    }

    /// The hand-built meadow: an elder by the spawn point, one skeleton
    /// wizard, two trees, two stumps and a field of grass.
    pub fn demo() -> Self {
        Self {
            player: Spawn { x: 8, y: 21 },
            weapon: Some(WeaponSpec { sprite_prefix: "sword".into(), shot: None }),
            characters: vec![CharacterSpec {
                x: 32,
                y: 32,
                sprite: "elderStandSouth".into(),
                dialogue: "elder".into(),
            }],
            enemies: vec![EnemySpec { x: 256, y: 128, pause: Some(60) }],
            doodads: vec![
                PropSpec { x: 128, y: 128, sprite: "tree".into() },
                PropSpec { x: 256, y: 256, sprite: "tree".into() },
            ],
            floor: Some(FloorSpec {
                sprite: "grass".into(),
                origin_x: 8,
                origin_y: 16,
                step: 16,
                width: 320,
                height: 320,
            }),
            colliders: vec![
                PropSpec { x: 64, y: 128, sprite: "stump".into() },
                PropSpec { x: 96, y: 160, sprite: "stump".into() },
            ],
        }
    }

    /// Every sprite key this level can ask for at runtime.
    pub fn required_sprites(&self, config: &GameConfig) -> Vec<String> {
        let families = &config.sprites;
        let mut keys = Vec::new();
        for dir in Direction::ALL {
            for action in ["stand", "walk", "attack"] {
                keys.push(sprite_key(&families.player, action, dir));
            }
            if !self.enemies.is_empty() {
                keys.push(sprite_key(&families.enemy, "walk", dir));
                keys.push(sprite_key(&families.enemy, "attack", dir));
                keys.push(sprite_key(&families.enemy_projectile, "", dir));
            }
            if let Some(weapon) = &self.weapon {
                keys.push(sprite_key(&weapon.sprite_prefix, "", dir));
                if let Some(shot) = &weapon.shot {
                    keys.push(sprite_key(&shot.sprite_prefix, "", dir));
                }
            }
        }
        if !self.enemies.is_empty() {
            keys.push(sprite_key(&families.enemy, "stand", Direction::South));
        }
        keys.extend(self.characters.iter().map(|c| c.sprite.clone()));
        keys.extend(self.doodads.iter().chain(&self.colliders).map(|p| p.sprite.clone()));
        keys.extend(self.floor.iter().map(|f| f.sprite.clone()));
        keys.sort();
        keys.dedup();
        keys
    }
}
