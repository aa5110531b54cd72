//! Talking to characters: starting a conversation and driving it frame by
//! frame.

use crate::dialogue::Interaction;
use crate::events::GameEvent;
use crate::geometry::{Collider, Direction};
use crate::input::{Action, Controls};
use crate::sprite::sprite_key;
use crate::world::World;

/// What a dialogue box needs to draw the open conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueView {
    /// Index of the character speaking.
    pub character: usize,
    /// Revealed part of the current phrase.
    pub text: String,
    pub options: Vec<String>,
    pub selected: usize,
    /// The next confirm closes the conversation.
    pub exhausted: bool,
}

/// Dialogue pass. Runs first every frame; when it leaves a conversation
/// open, the rest of the frame is skipped.
pub fn update_interaction(world: &mut World, controls: &impl Controls, events: &mut Vec<GameEvent>) {
    match world.interaction {
        Some(index) => converse(world, index, controls, events),
        None => {
            if controls.is_released(Action::Interact) && !world.player.attacking {
                try_start(world, events);
            }
        }
    }
}

fn converse(world: &mut World, index: usize, controls: &impl Controls, events: &mut Vec<GameEvent>) {
    let Some(character) = world.characters.get_mut(index) else {
        tracing::warn!(character = index, "interaction target vanished");
        world.interaction = None;
        return;
    };

    character.advance_rune();
    if controls.is_released(Action::MoveWest) {
        character.select_option(-1);
    } else if controls.is_released(Action::MoveEast) {
        character.select_option(1);
    } else if controls.is_released(Action::Interact) {
        let exhausted = character.is_exhausted();
        character.advance_phrase();
        if exhausted {
            world.interaction = None;
            tracing::info!(character = index, "interaction ended");
            events.push(GameEvent::InteractionEnded { character: index });
        }
    }
}

/// Open a conversation with the first character standing face to face with
/// the player.
fn try_start(world: &mut World, events: &mut Vec<GameEvent>) {
    let player_rect = world.player.hitbox(0, 0);
    let Some((index, side)) = world
        .characters
        .iter()
        .enumerate()
        .find_map(|(i, c)| player_rect.adjacent_side(&c.hitbox(0, 0)).map(|side| (i, side)))
    else {
        return;
    };

    face(world, side);
    world.characters[index].facing = side.opposite();
    world.interaction = Some(index);
    tracing::info!(character = index, facing = side.name(), "interaction started");
    events.push(GameEvent::InteractionStarted { character: index });
}

/// Turn the player toward `dir` in the standing pose.
fn face(world: &mut World, dir: Direction) {
    let player = &mut world.player;
    player.facing = dir;
    player.anim.reset();
    let key = sprite_key(&world.config.sprites.player, "stand", dir);
    if let Some(sprite) = world.sprites.lookup(&key) {
        player.sprite = sprite.clone();
    }
}
