//! Shared fixtures: a tiny in-memory sprite sheet, world builders and a
//! keyboard driver that feeds the real input path.
#![allow(dead_code)]

use glam::IVec2;

use grame::World;
use grame::config::GameConfig;
use grame::events::GameEvent;
use grame::geometry::Direction;
use grame::input::{Action, ActionMap, Bound, InputState, KeyCode};
use grame::entity::Player;
use grame::sprite::{Sprite, SpriteSheet, sprite_key};

/// Every sprite the simulation can ask for. All bodies are 16x16, shots and
/// blades 8x8.
pub fn sheet() -> SpriteSheet {
    let mut sheet = SpriteSheet::new();
    for dir in Direction::ALL {
        sheet.insert(Sprite::new(sprite_key("link", "stand", dir), 16, 16));
        sheet.insert(Sprite::new(sprite_key("link", "walk", dir), 16, 16).with_frames(3, 4));
        sheet.insert(Sprite::new(sprite_key("link", "attack", dir), 16, 16).with_frames(3, 2));
        sheet.insert(Sprite::new(sprite_key("skeletonWizard", "stand", dir), 16, 16));
        sheet.insert(Sprite::new(sprite_key("skeletonWizard", "walk", dir), 16, 16).with_frames(3, 4));
        sheet.insert(Sprite::new(sprite_key("skeletonWizard", "attack", dir), 16, 16).with_frames(3, 8));
        sheet.insert(Sprite::new(sprite_key("fireball", "", dir), 8, 8));
        sheet.insert(Sprite::new(sprite_key("arrow", "", dir), 8, 8));
        sheet.insert(Sprite::new(sprite_key("sword", "", dir), 8, 8));
    }
    for name in ["elderStandSouth", "tree", "grass", "stump"] {
        sheet.insert(Sprite::new(name, 16, 16));
    }
    sheet
}

pub fn sprite(name: &str) -> Sprite {
    sheet().get(name).cloned().unwrap_or_else(|| panic!("no test sprite {name}"))
}

/// A world holding only the player, standing at `(x, y)`.
pub fn world_with_player(x: i32, y: i32) -> World {
    let config = GameConfig::default();
    let player = Player::new(IVec2::new(x, y), sprite("linkStandSouth"), config.player_health);
    World::new(config, sheet(), player)
}

/// Drives the simulation through `InputState` and the default key bindings.
pub struct Driver {
    pub map: ActionMap<Action>,
    pub input: InputState,
}

impl Driver {
    pub fn new() -> Self {
        Self { map: ActionMap::default_bindings(), input: InputState::new() }
    }

    /// Hold exactly `keys` from the next step on: anything else is released.
    pub fn hold(&mut self, keys: &[KeyCode]) {
        for key in self.input.keys_held.clone() {
            if !keys.contains(&key) {
                self.input.release(key);
            }
        }
        for &key in keys {
            self.input.press(key);
        }
    }

    pub fn controls(&self) -> Bound<'_, Action> {
        Bound::new(&self.map, &self.input)
    }

    pub fn step(&mut self, world: &mut World) -> Vec<GameEvent> {
        let events = world.step(&self.controls());
        self.input.end_frame();
        events
    }

    /// Press then release `key` over two steps; returns the second step's
    /// events.
    pub fn tap(&mut self, world: &mut World, key: KeyCode) -> Vec<GameEvent> {
        self.hold(&[key]);
        self.step(world);
        self.hold(&[]);
        self.step(world)
    }
}
