//! Run one full match on the console, one JSON event per line.
//!
//! Usage: `run_match [seed] [duration_s]`

use anyhow::{Context, Result};

use ps_core::engine::MatchEngine;
use ps_core::models::{Player, PlayerRole, Team};

fn roster(id: u32, name: &str, color: &str) -> Team {
    let players = (0..11)
        .map(|i| {
            let role = match i {
                0 => PlayerRole::Goalkeeper,
                1..=4 => PlayerRole::Defender,
                5..=8 => PlayerRole::Midfielder,
                _ => PlayerRole::Forward,
            };
            Player::new(id * 100 + i, format!("{name} #{}", i + 1), role)
        })
        .collect();
    Team {
        id,
        name: name.to_string(),
        color: color.to_string(),
        players,
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse().context("seed must be an integer")?,
        None => 42,
    };
    let duration_s: u32 = match args.next() {
        Some(raw) => raw.parse().context("duration must be seconds")?,
        None => 300,
    };

    let home = roster(1, "Red United", "#d32f2f");
    let away = roster(2, "Blue Rovers", "#1976d2");

    let mut engine = MatchEngine::start(home, away, duration_s, seed)?;
    engine.on_event(Box::new(|event| {
        if let Ok(line) = serde_json::to_string(event) {
            println!("{line}");
        }
    }));
    engine.simulate();

    let score = engine.score();
    println!("final: Red United {} - {} Blue Rovers", score.home, score.away);
    Ok(())
}
