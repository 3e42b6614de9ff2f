//! ChaCuN headless runner: plays a game between bots and prints the result.

use anyhow::Context;
use chacun_core::BotDifficulty;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod session;

use session::{GameSession, SessionConfig};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let players: usize = std::env::var("CHACUN_PLAYERS")
        .unwrap_or_else(|_| "2".into())
        .parse()
        .context("CHACUN_PLAYERS must be a number")?;
    let seed: u64 = match std::env::var("CHACUN_SEED") {
        Ok(seed) => seed.parse().context("CHACUN_SEED must be a number")?,
        Err(_) => rand::random(),
    };
    let difficulty = match std::env::var("CHACUN_BOTS").as_deref() {
        Ok("easy") => BotDifficulty::Easy,
        Ok("medium") | Err(_) => BotDifficulty::Medium,
        Ok(other) => anyhow::bail!("Unknown bot difficulty {other:?}"),
    };
    let config = SessionConfig {
        catalog: std::env::var("CHACUN_CATALOG").ok(),
        players,
        seed,
        difficulty,
    };

    info!("Starting ChaCuN game with {} players, seed {}", players, seed);

    let report = GameSession::new(&config)?.run()?;

    if std::env::var("CHACUN_JSON").is_ok() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for message in &report.messages {
        println!("{}", message.text);
    }
    println!();
    for (player, points) in &report.scores {
        println!("{player}: {points}");
    }

    Ok(())
}
