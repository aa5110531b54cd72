// Headless demo: builds the meadow level, plays a short scripted session and
// logs what happened. Run with `RUST_LOG=debug` to see every projectile.
//
//     grame [game.json] [level.json]

use std::collections::HashMap;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use grame::config::GameConfig;
use grame::dialogue::DialogueLibrary;
use grame::events::GameEvent;
use grame::input::{ActionMap, Bound, InputState, KeyCode};
use grame::level::LevelConfig;
use grame::render::render_list;
use grame::sprite::SpriteSheet;
use grame::{DEFAULT_DIALOGUE_FILE, DEFAULT_SPRITE_DIR, World};

// ── Script ───────────────────────────────────────────────────────────────────

/// Keys to hold and for how many frames.
const SCRIPT: &[(&[KeyCode], u32)] = &[
    (&[KeyCode::ArrowRight], 9),
    (&[KeyCode::ArrowDown], 6),
    (&[], 1),
    // Face the elder and talk until the conversation closes.
    (&[KeyCode::Enter], 1),
    (&[], 40),
    (&[KeyCode::Enter], 1),
    (&[], 40),
    (&[KeyCode::Enter], 1),
    (&[], 40),
    (&[KeyCode::Enter], 1),
    (&[], 2),
    // Walk out into the field and swing.
    (&[KeyCode::ArrowDown], 60),
    (&[KeyCode::ArrowRight, KeyCode::ArrowDown], 40),
    (&[KeyCode::Space], 1),
    (&[], 30),
    (&[KeyCode::ArrowRight], 120),
    (&[], 240),
];

fn run(world: &mut World) -> HashMap<&'static str, u32> {
    let map = ActionMap::default_bindings();
    let mut input = InputState::new();
    let mut tally: HashMap<&'static str, u32> = HashMap::new();

    for &(keys, frames) in SCRIPT {
        for key in input.keys_held.clone() {
            if !keys.contains(&key) {
                input.release(key);
            }
        }
        for &key in keys {
            input.press(key);
        }
        for _ in 0..frames {
            let events = world.step(&Bound::new(&map, &input));
            for event in &events {
                let name = match event {
                    GameEvent::PlayerDamaged { .. } => "damage",
                    GameEvent::ProjectileSpawned { .. } => "shots",
                    GameEvent::ProjectileDespawned { .. } => "despawns",
                    GameEvent::EnemyStruck { .. } => "enemy_hits",
                    GameEvent::AttackStarted { .. } => "attacks",
                    GameEvent::InteractionStarted { .. } => "conversations",
                    GameEvent::InteractionEnded { .. } => "goodbyes",
                };
                *tally.entry(name).or_default() += 1;
            }
            if let Some(view) = world.dialogue_view() {
                if view.text.len() == 1 {
                    tracing::info!(options = ?view.options, "elder begins a new line");
                }
            }
            input.end_frame();
            if !world.player.is_alive() {
                tracing::warn!(frame = world.frame, "player died");
                return tally;
            }
        }
    }
    tally
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn start() -> grame::Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let level = match args.next() {
        Some(path) => LevelConfig::load(path)?,
        None => LevelConfig::demo(),
    };

    let sprites = SpriteSheet::load_folder(DEFAULT_SPRITE_DIR)?;
    let dialogue = DialogueLibrary::load(DEFAULT_DIALOGUE_FILE)?;
    tracing::info!(sprites = sprites.len(), "assets loaded");

    let mut world = World::from_level(config, &level, sprites, &dialogue)?;
    let tally = run(&mut world);

    let mut counts: Vec<_> = tally.into_iter().collect();
    counts.sort();
    tracing::info!(
        frames = world.frame,
        health = world.player.health,
        x = world.player.pos.x,
        y = world.player.pos.y,
        projectiles = world.projectiles.len(),
        draw_calls = render_list(&world).len(),
        ?counts,
        "session finished"
    );
    Ok(())
}
