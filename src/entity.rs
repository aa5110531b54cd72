//! Plain entity records. There is no hierarchy: each kind carries the state
//! it needs and opts into [`Collider`] / [`Renderable`](crate::render::Renderable)
//! by trait impl.

use std::collections::HashMap;

use glam::IVec2;

use crate::behavior::Behavior;
use crate::dialogue::{DialogueGraph, DialogueOption, Interaction};
use crate::error::{GameError, Result};
use crate::geometry::{Collider, Direction, HitboxShape, Rect, hitbox};
use crate::sprite::Sprite;

// ── Animation ────────────────────────────────────────────────────────────────

/// Frame cursor for a multi-frame sprite.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Animation {
    pub frame: i32,
    /// Simulation frames the current sprite frame has been shown for.
    pub elapsed: i32,
}

impl Animation {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance one simulation frame. Returns true when the cycle wraps back
    /// to frame 0.
    ///
    /// The frame index runs modulo `frame_len - 1`: the last frame of every
    /// strip is a rest pose that the cycle never lands on.
    pub fn step(&mut self, sprite: &Sprite) -> bool {
        if !sprite.is_animated() {
            return false;
        }
        self.elapsed += 1;
        // Frame 0 counts as the first tick, hence >=.
        if self.elapsed >= sprite.frame_dur {
            self.elapsed = 0;
            self.frame = (self.frame + 1) % (sprite.frame_len - 1);
            return self.frame == 0;
        }
        false
    }
}

/// Swap `slot` to `next`, restarting `anim` only when the sprite actually
/// changes. Returns true on a change.
pub(crate) fn change_sprite(slot: &mut Sprite, anim: &mut Animation, next: &Sprite) -> bool {
    if slot.name == next.name {
        return false;
    }
    *slot = next.clone();
    anim.reset();
    true
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Index into [`World::weapons`](crate::world::World::weapons).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WeaponId(pub usize);

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: IVec2,
    /// Last direction moved or faced; always set.
    pub facing: Direction,
    /// True while the attack animation plays.
    pub attacking: bool,
    pub sprite: Sprite,
    pub anim: Animation,
    pub health: i32,
    pub weapon: Option<WeaponId>,
}

impl Player {
    pub fn new(pos: IVec2, sprite: Sprite, health: i32) -> Self {
        Self {
            pos,
            facing: Direction::South,
            attacking: false,
            sprite,
            anim: Animation::default(),
            health,
            weapon: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Collider for Player {
    fn hitbox(&self, dx: i32, dy: i32) -> Rect {
        hitbox(self.pos, &self.sprite, HitboxShape::Perspective, dx, dy)
    }
}

// ── Character ────────────────────────────────────────────────────────────────

/// A friendly NPC the player can talk to.
#[derive(Clone, Debug)]
pub struct Character {
    pub pos: IVec2,
    pub facing: Direction,
    pub sprite: Sprite,
    pub anim: Animation,
    dialogue_graphs: HashMap<String, DialogueGraph>,
    dialogue_key: String,
}

impl Character {
    /// Fails if `dialogue_key` is not one of `dialogue_graphs`.
    pub fn new(
        pos: IVec2,
        sprite: Sprite,
        dialogue_graphs: HashMap<String, DialogueGraph>,
        dialogue_key: impl Into<String>,
    ) -> Result<Self> {
        let dialogue_key = dialogue_key.into();
        if !dialogue_graphs.contains_key(&dialogue_key) {
            return Err(GameError::MissingDialogue(dialogue_key));
        }
        Ok(Self {
            pos,
            facing: Direction::South,
            sprite,
            anim: Animation::default(),
            dialogue_graphs,
            dialogue_key,
        })
    }

    pub fn dialogue_key(&self) -> &str {
        &self.dialogue_key
    }

    /// Switch which conversation this character holds.
    pub fn set_dialogue(&mut self, key: &str) -> Result<()> {
        if !self.dialogue_graphs.contains_key(key) {
            return Err(GameError::MissingDialogue(key.to_string()));
        }
        self.dialogue_key = key.to_string();
        Ok(())
    }

    /// Rewind the active conversation to its root.
    pub fn reset_dialogue(&mut self) {
        if let Some(graph) = self.dialogue_graphs.get_mut(&self.dialogue_key) {
            graph.reset();
        }
    }

    pub fn graph(&self) -> Option<&DialogueGraph> {
        self.dialogue_graphs.get(&self.dialogue_key)
    }

    fn graph_mut(&mut self) -> Option<&mut DialogueGraph> {
        self.dialogue_graphs.get_mut(&self.dialogue_key)
    }
}

impl Interaction for Character {
    fn dialogue(&self) -> &str {
        self.graph().map_or("", |g| g.dialogue())
    }

    fn options(&self) -> &[DialogueOption] {
        self.graph().map(|g| g.options()).unwrap_or(&[])
    }

    fn selected_option(&self) -> usize {
        self.graph().map_or(0, |g| g.selected_option())
    }

    fn select_option(&mut self, delta: i32) {
        if let Some(g) = self.graph_mut() {
            g.select_option(delta);
        }
    }

    fn advance_rune(&mut self) {
        if let Some(g) = self.graph_mut() {
            g.advance_rune();
        }
    }

    fn advance_phrase(&mut self) {
        if let Some(g) = self.graph_mut() {
            g.advance_phrase();
        }
    }

    fn is_exhausted(&self) -> bool {
        self.graph().is_some_and(|g| g.is_exhausted())
    }
}

impl Collider for Character {
    fn hitbox(&self, dx: i32, dy: i32) -> Rect {
        hitbox(self.pos, &self.sprite, HitboxShape::Perspective, dx, dy)
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: IVec2,
    pub facing: Direction,
    pub sprite: Sprite,
    pub anim: Animation,
    pub behavior: Behavior,
}

impl Enemy {
    pub fn new(pos: IVec2, sprite: Sprite, pause: u32) -> Self {
        Self {
            pos,
            facing: Direction::South,
            sprite,
            anim: Animation::default(),
            behavior: Behavior::new(pause),
        }
    }
}

impl Collider for Enemy {
    fn hitbox(&self, dx: i32, dy: i32) -> Rect {
        hitbox(self.pos, &self.sprite, HitboxShape::Perspective, dx, dy)
    }
}

// ── Weapon ───────────────────────────────────────────────────────────────────

/// Who is holding a weapon. A handle resolved against the world at draw
/// time, never a pointer. Only the player attacks with a weapon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Wielder {
    Player,
}

/// A ranged shot a weapon fires when its attack starts.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponShot {
    /// Sprite family of the projectile (`arrow` → `arrowEast`, ...).
    pub sprite_prefix: String,
    pub speed: i32,
}

#[derive(Clone, Debug)]
pub struct Weapon {
    /// Sprite family; the facing direction picks the member.
    pub sprite_prefix: String,
    pub sprite: Sprite,
    pub anim: Animation,
    pub wielder: Option<Wielder>,
    /// The weapon is only drawn while this is set.
    pub is_attacking: bool,
    pub shot: Option<WeaponShot>,
}

impl Weapon {
    pub fn new(sprite_prefix: impl Into<String>, sprite: Sprite) -> Self {
        Self {
            sprite_prefix: sprite_prefix.into(),
            sprite,
            anim: Animation::default(),
            wielder: None,
            is_attacking: false,
            shot: None,
        }
    }

    pub fn with_shot(mut self, shot: WeaponShot) -> Self {
        self.shot = Some(shot);
        self
    }
}

// ── Projectile ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u32);

/// Which side fired a projectile, and therefore what it can hurt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Team {
    Enemy,
    Player,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: IVec2,
    pub sprite: Sprite,
    pub anim: Animation,
    id: ProjectileId,
    speed: i32,
    dir: Direction,
    owner: Team,
}

impl Projectile {
    pub fn new(id: ProjectileId, pos: IVec2, sprite: Sprite, speed: i32, dir: Direction, owner: Team) -> Self {
        Self { pos, sprite, anim: Animation::default(), id, speed, dir, owner }
    }

    pub fn id(&self) -> ProjectileId {
        self.id
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn owner(&self) -> Team {
        self.owner
    }

    pub fn is_enemy(&self) -> bool {
        self.owner == Team::Enemy
    }

    /// Move one frame's worth along the travel direction.
    pub fn advance(&mut self) {
        self.pos += self.dir.offset() * self.speed;
    }
}

impl Collider for Projectile {
    // Projectiles are small and flat; the whole frame is the hitbox.
    fn hitbox(&self, dx: i32, dy: i32) -> Rect {
        hitbox(self.pos, &self.sprite, HitboxShape::Full, dx, dy)
    }
}

// ── Scenery ──────────────────────────────────────────────────────────────────

/// Static scenery: trees, rocks, signs.
#[derive(Clone, Debug)]
pub struct Doodad {
    pub pos: IVec2,
    pub sprite: Sprite,
}

impl Doodad {
    pub fn new(pos: IVec2, sprite: Sprite) -> Self {
        Self { pos, sprite }
    }
}

impl Collider for Doodad {
    fn hitbox(&self, dx: i32, dy: i32) -> Rect {
        hitbox(self.pos, &self.sprite, HitboxShape::Full, dx, dy)
    }
}

/// A floor tile, or a blocking tile when `collider` is set.
#[derive(Clone, Debug)]
pub struct Tile {
    pub pos: IVec2,
    pub sprite: Sprite,
    pub collider: bool,
}

impl Tile {
    pub fn floor(pos: IVec2, sprite: Sprite) -> Self {
        Self { pos, sprite, collider: false }
    }

    pub fn solid(pos: IVec2, sprite: Sprite) -> Self {
        Self { pos, sprite, collider: true }
    }
}

impl Collider for Tile {
    fn hitbox(&self, dx: i32, dy: i32) -> Rect {
        let shape = if self.collider { HitboxShape::Full } else { HitboxShape::None };
        hitbox(self.pos, &self.sprite, shape, dx, dy)
    }
}
