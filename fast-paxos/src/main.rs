use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use fast_paxos::{
    config::RunConfig, simulation::RoundReport, Accepted, Outcome, QuorumPolicy,
};

mod main_basic;
mod main_concurrent;

/// Runs a set of proposers against one acceptor collection and reports who
/// reached consensus.
#[derive(Debug, Parser)]
#[command(name = "fast-paxos", version)]
struct Cli {
    /// YAML run configuration; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Proposer kind: `classic` or `fast`.
    #[arg(short, long)]
    mode: Option<QuorumPolicy>,

    /// Number of acceptors.
    #[arg(short, long)]
    acceptors: Option<usize>,

    /// Run every proposer on its own thread against shared acceptors.
    #[arg(long)]
    concurrent: bool,

    /// Print a JSON report instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    config: RunConfig,
    rounds: Vec<RoundReport<i64>>,
    learned: Option<Accepted<i64>>,
}

fn main() -> Result<()> {
    // Honours RUST_LOG, e.g. RUST_LOG=debug to see every promise and accept.
    env_logger::init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let (rounds, learned) = if config.concurrent {
        main_concurrent::run(&config)?
    } else {
        main_basic::run(&config)?
    };

    let summary = Summary {
        config,
        rounds,
        learned,
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RunConfig::for_mode(cli.mode.unwrap_or(QuorumPolicy::Classic)),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(acceptors) = cli.acceptors {
        config.acceptors = acceptors;
    }
    config.concurrent |= cli.concurrent;
    config.validate().context("invalid run configuration")?;
    Ok(config)
}

fn print_summary(summary: &Summary) {
    let prefix = match summary.config.mode {
        QuorumPolicy::Classic => "Proposer",
        QuorumPolicy::Fast => "Fast Proposer",
    };
    println!(
        "Running {} Paxos with {} acceptors{}...",
        summary.config.mode,
        summary.config.acceptors,
        if summary.config.concurrent { " (concurrent)" } else { "" }
    );
    for round in &summary.rounds {
        match &round.outcome {
            Outcome::Decided(value) => println!(
                "{} {} reached consensus with value: {}",
                prefix, round.number, value
            ),
            Outcome::NoConsensus => {
                println!("{} {} failed to reach consensus", prefix, round.number)
            }
        }
    }
    match &summary.learned {
        Some(accepted) => println!(
            "Learner: value {} chosen under proposal {}",
            accepted.value, accepted.number
        ),
        None => println!("Learner: no value accepted by a quorum"),
    }
}
