use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use glam::DVec3;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use blitz_app::game_loop::{spawn_game_loop, TICK_DURATION};
use blitz_app::state::AppState;
use blitz_core::commands::PlayerCommand;
use blitz_core::constants::{ENEMY_HALF_EXTENTS, PLAYER_EYE_HEIGHT};
use blitz_core::state::GameStateSnapshot;
use blitz_core::types::aim_angles;
use blitz_sim::SimConfig;

/// Headless first-person combat sandbox
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON scenario config; defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How long to hold fire on the first enemy
    #[arg(short, long, default_value_t = 5.0)]
    seconds: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blitz_sim=info,blitz_app=info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };

    let state = AppState::new();
    let tx = spawn_game_loop(config, state.latest_snapshot.clone())
        .context("spawning game loop")?;
    *state
        .command_tx
        .lock()
        .map_err(|_| anyhow::anyhow!("command channel poisoned"))? = Some(tx);
    *state
        .running
        .lock()
        .map_err(|_| anyhow::anyhow!("running flag poisoned"))? = true;

    state.send(PlayerCommand::StartScenario);
    state.send(PlayerCommand::SetFireHeld { held: true });

    let deadline = Instant::now() + Duration::from_secs_f64(args.seconds.max(0.0));
    while Instant::now() < deadline {
        if let Some(pose) = state.snapshot().as_ref().and_then(aim_at_first_enemy) {
            state.send(pose);
        }
        std::thread::sleep(TICK_DURATION);
    }
    state.send(PlayerCommand::SetFireHeld { held: false });

    let summary = state.snapshot().context("no snapshot produced")?;
    state.shutdown();

    tracing::info!(
        tick = summary.time.tick,
        elapsed_secs = summary.time.elapsed_secs,
        enemies = summary.enemies.len(),
        marks = summary.marks.len(),
        "run finished"
    );
    for enemy in &summary.enemies {
        tracing::info!(
            index = enemy.index,
            health = enemy.health,
            state = ?enemy.ai_state,
            x = enemy.position.x,
            z = enemy.position.z,
            "enemy"
        );
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Pose that keeps the player in place and aims at the lowest-index enemy.
fn aim_at_first_enemy(snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
    let player = snapshot.player.as_ref()?;
    let target = snapshot.enemies.first()?;
    let eye = player.position + DVec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0);
    let body = target.position + DVec3::new(0.0, ENEMY_HALF_EXTENTS[1], 0.0);
    let (yaw, pitch) = aim_angles(eye, body);
    Some(PlayerCommand::SetPlayerPose {
        position: player.position,
        yaw,
        pitch,
    })
}
