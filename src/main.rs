//! boxing_ring CLI
//!
//! Registers boxers, shows the leaderboard and runs fights against the local
//! SQLite store. Every command checks the store first and exits non-zero if
//! it is unreachable or has no `boxers` table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use boxing_ring::config::logging::init_tracing;
use boxing_ring::{
    BoxerCard, BoxerRegistry, FightOutcome, LeaderboardSort, NewBoxer, Ring, RngSource, Settings,
    SqliteRepo,
};

#[derive(Parser, Debug)]
#[command(name = "boxing_ring", version, about = "Boxer registry and ring simulator")]
struct Cli {
    /// SQLite database file (overrides the settings file)
    #[arg(long, env = "BOXING_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Settings file (defaults to settings.ron in the data directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "BOXING_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new boxer
    Create {
        #[arg(long)]
        name: String,
        /// Weight in lbs (at least 125)
        #[arg(long)]
        weight: u32,
        /// Height in cm
        #[arg(long)]
        height: f64,
        /// Reach in cm
        #[arg(long)]
        reach: f64,
        /// Age (18 to 40)
        #[arg(long)]
        age: u32,
    },
    /// Remove a boxer by ID
    Delete { id: i64 },
    /// Look up a boxer by ID or name
    Get {
        #[arg(long, required_unless_present = "name", conflicts_with = "name")]
        id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Boxers with at least one fight, best first
    Leaderboard {
        /// wins | win_pct
        #[arg(long, default_value = "wins")]
        sort_by: String,
    },
    /// Record a single fight result for a boxer
    UpdateStats {
        id: i64,
        /// win | loss
        result: String,
    },
    /// Put two boxers in the ring and fight
    Fight {
        first: String,
        second: String,
        /// Seed the random draw for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check the store is reachable and has the boxers table
    Health,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Command, registry: &BoxerRegistry<SqliteRepo>) -> Result<()> {
    match command {
        Command::Create {
            name,
            weight,
            height,
            reach,
            age,
        } => {
            let boxer = registry.create(NewBoxer::new(name, weight, height, reach, age))?;
            print_json(&BoxerCard::new(&boxer)?)
        }
        Command::Delete { id } => {
            registry.delete(id)?;
            print_json(&json!({ "deleted": id }))
        }
        Command::Get { id, name } => {
            let boxer = match (id, name) {
                (Some(id), _) => registry.get_by_id(id)?,
                (None, Some(name)) => registry.get_by_name(&name)?,
                (None, None) => anyhow::bail!("either --id or --name is required"),
            };
            print_json(&BoxerCard::new(&boxer)?)
        }
        Command::Leaderboard { sort_by } => {
            let sort: LeaderboardSort = sort_by.parse()?;
            print_json(&registry.leaderboard(sort)?)
        }
        Command::UpdateStats { id, result } => {
            let outcome: FightOutcome = result.parse()?;
            registry.update_stats(id, outcome)?;
            print_json(&BoxerCard::new(&registry.get_by_id(id)?)?)
        }
        Command::Fight {
            first,
            second,
            seed,
        } => {
            let mut ring = Ring::new();
            ring.enter(registry.get_by_name(&first)?)?;
            ring.enter(registry.get_by_name(&second)?)?;

            let mut rng = match seed {
                Some(seed) => RngSource::seeded(seed),
                None => RngSource::from_entropy(),
            };
            let winner = ring.fight(registry, &mut rng)?;
            print_json(&json!({ "winner": winner }))
        }
        Command::Health => print_json(&json!({ "status": "ok" })),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, std::io::stderr);

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load_or_default(),
    };
    if let Some(db_path) = cli.db_path {
        settings.store.db_path = db_path;
    }
    info!("Using database at {:?}", settings.store.db_path);

    let repo = SqliteRepo::open(&settings.store).context("failed to open the boxer store")?;
    if let Err(e) = repo.health_check() {
        error!("Startup health check failed: {e}");
        return Err(e.into());
    }

    let registry = BoxerRegistry::new(repo);
    run(cli.command, &registry)
}
