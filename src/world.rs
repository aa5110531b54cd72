// =============================================================================
// WORLD.RS: The simulation aggregate
//
// Every entity list, the collision markers and the active conversation live
// here. Update passes receive `&mut World` explicitly; nothing is global.
// =============================================================================

use glam::IVec2;

use crate::behavior;
use crate::combat;
use crate::config::GameConfig;
use crate::dialogue::{DialogueLibrary, Interaction};
use crate::entity::{
    Character, Doodad, Enemy, Player, Projectile, ProjectileId, Team, Tile, Weapon, WeaponId, WeaponShot,
};
use crate::error::Result;
use crate::events::GameEvent;
use crate::geometry::Direction;
use crate::input::Controls;
use crate::interaction::{self, DialogueView};
use crate::level::LevelConfig;
use crate::player;
use crate::projectile;
use crate::sprite::{Sprite, SpriteSheet, sprite_key};

pub struct World {
    pub config: GameConfig,
    pub sprites: SpriteSheet,
    pub player: Player,
    pub weapons: Vec<Weapon>,
    pub characters: Vec<Character>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub doodads: Vec<Doodad>,
    pub tiles: Vec<Tile>,
    /// Index of the character the player is talking to.
    pub interaction: Option<usize>,
    /// Enemy the player walked into this frame.
    pub enemy_collision: Option<usize>,
    /// Enemy shot that reached the player this frame.
    pub projectile_collision: Option<ProjectileId>,
    next_projectile_id: u32,
    /// Completed simulation steps.
    pub frame: u64,
}

impl World {
    /// An empty world holding only the player.
    pub fn new(config: GameConfig, sprites: SpriteSheet, player: Player) -> Self {
        Self {
            config,
            sprites,
            player,
            weapons: Vec::new(),
            characters: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            doodads: Vec::new(),
            tiles: Vec::new(),
            interaction: None,
            enemy_collision: None,
            projectile_collision: None,
            next_projectile_id: 0,
            frame: 0,
        }
    }

    /// Build a world from a level layout.
    ///
    /// Every sprite the level can reach at runtime must be in `sprites`, and
    /// every character's dialogue key must name a graph in `dialogue`. Each
    /// character gets its own copy of the library so conversations progress
    /// independently.
    pub fn from_level(
        config: GameConfig,
        level: &LevelConfig,
        sprites: SpriteSheet,
        dialogue: &DialogueLibrary,
    ) -> Result<Self> {
        config.validate()?;
        level.validate()?;
        let required = level.required_sprites(&config);
        sprites.require_all(required.iter().map(String::as_str))?;

        let stand = sprites.require(&sprite_key(&config.sprites.player, "stand", Direction::South))?.clone();
        let player = Player::new(level.player.pos(), stand, config.player_health);
        let mut world = Self::new(config, sprites, player);

        if let Some(spec) = &level.weapon {
            let blade = world.sprites.require(&sprite_key(&spec.sprite_prefix, "", Direction::East))?.clone();
            let mut weapon = Weapon::new(spec.sprite_prefix.clone(), blade);
            if let Some(shot) = &spec.shot {
                weapon = weapon.with_shot(WeaponShot { sprite_prefix: shot.sprite_prefix.clone(), speed: shot.speed });
            }
            world.player.weapon = Some(world.add_weapon(weapon));
        }

        for spec in &level.characters {
            let sprite = world.sprites.require(&spec.sprite)?.clone();
            let character =
                Character::new(IVec2::new(spec.x, spec.y), sprite, dialogue.clone().into_graphs(), &spec.dialogue)?;
            world.characters.push(character);
        }

        if !level.enemies.is_empty() {
            let stand = world.sprites.require(&sprite_key(&world.config.sprites.enemy, "stand", Direction::South))?.clone();
            for spec in &level.enemies {
                let pause = spec.pause.unwrap_or(world.config.enemy_pause);
                world.enemies.push(Enemy::new(IVec2::new(spec.x, spec.y), stand.clone(), pause));
            }
        }

        for spec in &level.doodads {
            let sprite = world.sprites.require(&spec.sprite)?.clone();
            world.doodads.push(Doodad::new(IVec2::new(spec.x, spec.y), sprite));
        }

        if let Some(floor) = &level.floor {
            let sprite = world.sprites.require(&floor.sprite)?.clone();
            world.tiles.extend(floor.positions().into_iter().map(|pos| Tile::floor(pos, sprite.clone())));
        }
        for spec in &level.colliders {
            let sprite = world.sprites.require(&spec.sprite)?.clone();
            world.tiles.push(Tile::solid(IVec2::new(spec.x, spec.y), sprite));
        }

        tracing::info!(
            characters = world.characters.len(),
            enemies = world.enemies.len(),
            doodads = world.doodads.len(),
            tiles = world.tiles.len(),
            "level built"
        );
        Ok(world)
    }

    pub fn add_weapon(&mut self, weapon: Weapon) -> WeaponId {
        self.weapons.push(weapon);
        WeaponId(self.weapons.len() - 1)
    }

    /// Put a projectile in flight and return its id.
    pub fn spawn_projectile(
        &mut self,
        pos: IVec2,
        sprite: Sprite,
        speed: i32,
        dir: Direction,
        owner: Team,
        events: &mut Vec<GameEvent>,
    ) -> ProjectileId {
        let id = ProjectileId(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
        tracing::debug!(projectile = id.0, ?owner, ?dir, x = pos.x, y = pos.y, "projectile spawned");
        self.projectiles.push(Projectile::new(id, pos, sprite, speed, dir, owner));
        events.push(GameEvent::ProjectileSpawned { id, owner, direction: dir });
        id
    }

    /// Advance the simulation by one frame.
    ///
    /// While a conversation is open only the dialogue runs. Otherwise the
    /// player moves first, then enemies decide, projectiles fly, and finally
    /// this frame's collision markers turn into damage.
    pub fn step(&mut self, controls: &impl Controls) -> Vec<GameEvent> {
        let mut events = Vec::new();
        interaction::update_interaction(self, controls, &mut events);
        if self.interaction.is_none() {
            player::update_player(self, controls, &mut events);
            behavior::update_enemies(self, &mut events);
            projectile::update_projectiles(self, &mut events);
            combat::resolve_damage(self, &mut events);
        }
        self.frame += 1;
        events
    }

    /// Snapshot of the open conversation, if any.
    pub fn dialogue_view(&self) -> Option<DialogueView> {
        let index = self.interaction?;
        let character = self.characters.get(index)?;
        Some(DialogueView {
            character: index,
            text: character.dialogue().to_string(),
            options: character.options().iter().map(|o| o.label.clone()).collect(),
            selected: character.selected_option(),
            exhausted: character.is_exhausted(),
        })
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id() == id)
    }
}
