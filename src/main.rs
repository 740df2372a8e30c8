//! Barrage headless driver
//!
//! Runs the simulation for a fixed number of frames with scripted input and
//! logs what happened. Usage: `barrage [config.json] [seed]`.

use std::process::ExitCode;

use anyhow::{Context, Result};
use barrage::sim::{EntityKind, GameState, SimEvent, TickInput, tick};
use barrage::{GameConfig, TextureAtlas};

const FRAME_DT: f64 = 1.0 / 60.0;
const FRAMES: u64 = 60 * 30;
const DEFAULT_SEED: u64 = 0x5eed;

/// Texture sizes of the stock sprite sheet
fn stock_atlas() -> TextureAtlas {
    let mut atlas = TextureAtlas::new();
    atlas.insert("playerShip1_blue.png", 99.0, 75.0);
    atlas.insert("laserBlue07.png", 9.0, 37.0);
    atlas.insert("laserRed07.png", 9.0, 37.0);
    atlas.insert("enemyBlack5.png", 97.0, 84.0);
    atlas.insert("meteorGrey_big1.png", 101.0, 84.0);
    atlas
}

/// Sweep left and right, switching fire slot every two seconds
fn scripted_input(frame: u64) -> TickInput {
    let second = frame / 60;
    let slot = ((second / 2) % 8) as u8;
    let mut input = TickInput::firing(slot);
    if (second / 3) % 2 == 0 {
        input.left = true;
    } else {
        input.right = true;
    }
    input
}

fn load_config(path: Option<&str>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {path}"))?;
            GameConfig::from_json(&json).with_context(|| format!("parsing config {path}"))
        }
        None => Ok(GameConfig::default()),
    }
}

fn parse_seed(arg: Option<&str>) -> Result<u64> {
    match arg {
        Some(seed) => seed
            .parse()
            .with_context(|| format!("invalid seed '{seed}'")),
        None => Ok(DEFAULT_SEED),
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let seed = parse_seed(args.get(1).map(String::as_str))?;

    let mut state =
        GameState::new(config, &stock_atlas(), seed).context("setting up the simulation")?;
    log::info!("Barrage (headless) running {FRAMES} frames");

    for frame in 0..FRAMES {
        let events = tick(&mut state, &scripted_input(frame), FRAME_DT);
        for event in &events {
            match event {
                SimEvent::EnemyDestroyed { pos } => {
                    log::debug!("hostile destroyed at ({:.0}, {:.0})", pos.x, pos.y)
                }
                SimEvent::PlayerHit { pos } => {
                    log::debug!("player hit at ({:.0}, {:.0})", pos.x, pos.y)
                }
            }
        }

        if frame % 60 == 59 {
            let m = &state.manager;
            log::info!(
                "t={:>2}s score={} shots={} hostiles={} hostile_shots={} effects={}",
                (frame + 1) / 60,
                state.score.score,
                m.active_count(EntityKind::PlayerShot),
                m.active_count(EntityKind::Hostile),
                m.active_count(EntityKind::HostileShot),
                m.active_count(EntityKind::Effect),
            );
        }
    }

    println!(
        "score {} ({} kills, {} hits taken) after {} ticks",
        state.score.score, state.score.kills, state.score.hits_taken, state.time_ticks
    );
    for kind in EntityKind::ALL {
        println!("{kind:>12} pool: {}", state.manager.pool_size(kind));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("barrage: {err:#}");
            ExitCode::FAILURE
        }
    }
}
