// ── GameConfig ────────────────────────────────────────────────────────────────

use std::path::Path;

use glam::IVec2;
use serde::Deserialize;

use crate::error::{GameError, Result};

/// Sprite family prefixes. Members are looked up as
/// `{prefix}{Action}{Direction}`, e.g. `linkWalkEast`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpriteFamilies {
    pub player: String,
    pub enemy: String,
    /// Projectile fired by enemies (`fireball` → `fireballNorth`, ...).
    pub enemy_projectile: String,
}

impl Default for SpriteFamilies {
    fn default() -> Self {
        Self {
            player: "link".into(),
            enemy: "skeletonWizard".into(),
            enemy_projectile: "fireball".into(),
        }
    }
}

/// Largest accepted screen dimension. Keeps the projectile margins well
/// inside `i32`.
pub const MAX_SCREEN_SIZE: i32 = 1 << 16;

/// Tunables for a game session. Every field has a default, so a config file
/// only needs to name what it changes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Logical screen width in pixels.
    pub screen_width: i32,
    /// Logical screen height in pixels.
    pub screen_height: i32,
    pub player_health: i32,
    /// Pixels per frame for enemy projectiles.
    pub projectile_speed: i32,
    /// Frames an enemy holds its attack pose before deciding again.
    pub enemy_pause: u32,
    pub sprites: SpriteFamilies,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 320,
            screen_height: 240,
            player_health: 100,
            projectile_speed: 2,
            enemy_pause: 60,
            sprites: SpriteFamilies::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str, origin: impl AsRef<Path>) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| GameError::parse(origin.as_ref(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GameError::io(path, e))?;
        Self::from_json(&text, path)
    }

    pub fn validate(&self) -> Result<()> {
        let valid = 1..=MAX_SCREEN_SIZE;
        if !valid.contains(&self.screen_width) || !valid.contains(&self.screen_height) {
            return Err(GameError::InvalidConfig(format!(
                "screen size must be within 1..={MAX_SCREEN_SIZE}, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.projectile_speed <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "projectile_speed must be positive, got {}",
                self.projectile_speed
            )));
        }
        if self.player_health <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "player_health must be positive, got {}",
                self.player_health
            )));
        }
        Ok(())
    }

    /// Projectiles live while inside a wide margin around the screen:
    /// `[-2w, 4w]` horizontally and `[-2h, 4h]` vertically.
    pub fn in_projectile_bounds(&self, pos: IVec2) -> bool {
        let (w, h) = (self.screen_width, self.screen_height);
        let span = |n: i32| n.saturating_mul(-2)..=n.saturating_mul(4);
        span(w).contains(&pos.x) && span(h).contains(&pos.y)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
