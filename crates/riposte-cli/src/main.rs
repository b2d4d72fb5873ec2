//! Riposte CLI - run seeded encounters against the adaptive opponent.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rayon::prelude::*;
use riposte_ai::{AdaptiveController, Personality};
use riposte_core::{
    CombatLog, CombatMove, CombatResolver, CombatSession, Combatant, CombatantId, CombatantKind,
    Environment, Outcome, RandomDice,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::EncounterConfig;

/// Riposte - turn-based opposed-move combat against an adaptive opponent
#[derive(Parser, Debug)]
#[command(name = "riposte")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Encounter configuration (JSON); the built-in Hero vs Bandit without it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the first session (overrides the configuration)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Round limit per session (overrides the configuration)
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Independent sessions to run in parallel, seeded seed, seed + 1, ...
    #[arg(short = 'n', long, default_value_t = 1)]
    sessions: u64,

    /// Write every session's combat log to this file as JSON
    #[arg(long)]
    log_json: Option<PathBuf>,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// What one session produced.
#[derive(Debug, Serialize)]
struct SessionReport {
    seed: u64,
    outcome: Outcome,
    rounds: u32,
    player: Combatant,
    opponent: Combatant,
    final_personality: Personality,
    log: CombatLog,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Next affordable move in the rotation, or the free fallback.
fn next_player_move(rotation: &[CombatMove], turn: &mut usize, player: &Combatant) -> CombatMove {
    for _ in 0..rotation.len() {
        let candidate = &rotation[*turn % rotation.len()];
        *turn += 1;
        if player.can_afford(&candidate.cost) {
            return candidate.clone();
        }
    }
    CombatMove::fallback()
}

fn run_session(
    config: &EncounterConfig,
    seed: u64,
    max_rounds: Option<u32>,
) -> Result<SessionReport> {
    let controller = AdaptiveController::new(config.personality.clone(), config.opponent_kit()?)?;
    let rotation = config.player_rotation()?;

    let mut session_config = config.session;
    if let Some(limit) = max_rounds {
        session_config.max_rounds = limit;
    }

    let mut session = CombatSession::new(
        config.player.build(CombatantId::new(0), CombatantKind::Player),
        config.opponent.build(CombatantId::new(1), CombatantKind::Enemy),
        controller,
        RandomDice::seeded(seed),
    )
    .with_environment(Environment::from_tags(config.scene.iter().copied()))
    .with_resolver(CombatResolver::with_config(config.resolver))
    .with_config(session_config);

    let mut turn = 0;
    while session.outcome() == Outcome::Ongoing {
        let player_move = next_player_move(&rotation, &mut turn, session.player());
        let round = session.log().next_round();
        let result = session
            .play_round(&player_move)
            .with_context(|| format!("session {seed}, round {round}"))?;
        debug!(
            round,
            actor = %result.actor_name,
            actor_move = %result.actor_move_name,
            target_move = %result.target_move_name,
            success = result.actor_success,
            magnitude = result.effect_magnitude,
            hooks = ?result.narrative_hooks,
            "round played"
        );
    }

    let outcome = session.outcome();
    info!(
        seed,
        ?outcome,
        rounds = session.log().round_count(),
        player_health = session.player().health().current(),
        opponent_health = session.opponent_state().health().current(),
        "session finished"
    );

    Ok(SessionReport {
        seed,
        outcome,
        rounds: session.log().round_count(),
        player: session.player().clone(),
        opponent: session.opponent_state().clone(),
        final_personality: session.opponent().personality().clone(),
        log: session.log().clone(),
    })
}

fn print_summary(reports: &[SessionReport]) {
    let count = |outcome: Outcome| reports.iter().filter(|r| r.outcome == outcome).count();
    let total_rounds: u64 = reports.iter().map(|r| u64::from(r.rounds)).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean_rounds = if reports.is_empty() {
        0.0
    } else {
        total_rounds as f64 / reports.len() as f64
    };

    println!("sessions:          {}", reports.len());
    println!("player victories:  {}", count(Outcome::PlayerVictory));
    println!("opponent victories: {}", count(Outcome::OpponentVictory));
    println!("round limit:       {}", count(Outcome::RoundLimit));
    println!("mean rounds:       {mean_rounds:.2}");

    if let [report] = reports {
        for result in report.log.iter() {
            let verdict = if result.actor_success { "hits" } else { "is read" };
            println!(
                "  round {:>2}: {} ({}) {} by {} ({}) {}-{}{}",
                result.round,
                result.actor_name,
                result.actor_move_name,
                verdict,
                result.target_name,
                result.target_move_name,
                result.actor_roll,
                result.target_roll,
                result
                    .damage_dealt
                    .map_or_else(String::new, |damage| format!(", {damage} damage")),
            );
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => EncounterConfig::load(path)?,
        None => EncounterConfig::default(),
    };
    config.validate()?;
    let seed = args.seed.unwrap_or(config.seed);

    info!(seed, sessions = args.sessions, "running encounters");
    let reports = (0..args.sessions)
        .into_par_iter()
        .map(|i| run_session(&config, seed.wrapping_add(i), args.rounds))
        .collect::<Result<Vec<_>>>()?;

    print_summary(&reports);

    if let Some(path) = &args.log_json {
        let json = serde_json::to_string_pretty(&reports).context("serializing combat logs")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing combat logs to {}", path.display()))?;
        info!(path = %path.display(), "combat logs written");
    }

    Ok(())
}
