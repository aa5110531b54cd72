pub mod behavior;
pub mod collision;
pub mod combat;
pub mod config;
pub mod dialogue;
pub mod entity;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod level;
pub mod player;
pub mod projectile;
pub mod render;
pub mod sprite;
pub mod world;

pub use error::{GameError, Result};
pub use world::World;

/// Sprite manifests shipped with the demo, relative to the crate root.
pub const DEFAULT_SPRITE_DIR: &str = "assets/sprites";
/// Dialogue file shipped with the demo, relative to the crate root.
pub const DEFAULT_DIALOGUE_FILE: &str = "assets/dialogue/dialogue.json";
