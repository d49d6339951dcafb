//! Podium CLI - terminal front-end for the Olympics analytics engine.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = commands::Session::open(&cli).and_then(|session| match cli.command {
        Commands::Overview => commands::overview::run(&session),
        Commands::Tally { year, country } => commands::medals::tally(&session, year, country),
        Commands::Trend { metric } => commands::trends::trend(&session, metric),
        Commands::Events => commands::trends::events(&session),
        Commands::Athletes { sport, country } => {
            commands::athletes::top(&session, sport, country)
        }
        Commands::Country { name } => commands::medals::country(&session, &name),
        Commands::Ages { histogram, density } => {
            commands::athletes::ages(&session, histogram, density)
        }
        Commands::GoldAges { sports } => commands::athletes::gold_ages(&session, sports),
        Commands::Physique { sport } => commands::athletes::physique(&session, &sport),
        Commands::Gender { sport } => commands::trends::gender(&session, sport.as_deref()),
        Commands::Diagnostics => commands::diagnostics::run(&session),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
