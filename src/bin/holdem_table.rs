use std::path::PathBuf;

use clap::Parser;
use holdem_table::arena::{
    historian::{DirectoryHistorian, LoggingHistorian},
    TableConfig, TableConfigError, TableLoopBuilder, TableLoopError,
};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "holdem_table",
    about = "Play a No-Limit Hold'em table until one player has every chip",
    long_about = "Seat agents at a table and deal hands until only one of them has chips left.\n\
                  Without --config five threshold agents sit down with 1000 chips each."
)]
struct Args {
    /// Table configuration as a JSON file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Seed for shuffling and for random agents without their own seed
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Stop after this many hands
    #[arg(short = 'n', long)]
    max_hands: Option<usize>,

    /// Write every hand as JSON into this directory
    #[arg(short = 'd', long)]
    history_dir: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] TableConfigError),
    #[error(transparent)]
    TableLoop(#[from] TableLoopError),
    #[error("invalid table: {0}")]
    Table(#[from] holdem_table::arena::TableBuilderError),
}

fn init_tracing(verbosity: u8) {
    // RUST_LOG wins over -v
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("warn,holdem_table={level}"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    init_tracing(args.verbosity);

    let config = match &args.config {
        Some(path) => TableConfig::from_file(path)?,
        None => TableConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, players = config.players.len(), "Starting table");

    let table = config.build_table()?;
    let agents = config.build_agents(seed);

    let mut builder = TableLoopBuilder::default()
        .table(table)
        .agents(agents)
        .historian(Box::new(LoggingHistorian::new()));
    if let Some(dir) = args.history_dir {
        builder = builder.historian(Box::new(DirectoryHistorian::new(dir)));
    }
    if let Some(max_hands) = args.max_hands {
        builder = builder.max_hands(max_hands);
    }
    let mut table_loop = builder.build()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let result = table_loop.run(&mut rng);

    println!("Hands played: {}", result.hands_played);
    match &result.winner {
        Some(winner) => println!("Winner: {winner}"),
        None => println!("No winner yet"),
    }
    for (name, stack) in result.standings.iter() {
        println!("  {name:<12} {stack:>8}");
    }
    Ok(())
}
