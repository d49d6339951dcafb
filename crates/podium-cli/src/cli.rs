//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use podium::analysis::{Selection, TrendMetric};
use std::path::PathBuf;

/// Podium: analytics over historical Olympic Games results
#[derive(Parser)]
#[command(name = "podium")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Athlete events file (overrides the configuration)
    #[arg(long, global = true, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// NOC regions file (overrides the configuration)
    #[arg(long, global = true, value_name = "FILE")]
    pub regions: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Headline counts: editions, hosts, sports, events, nations, athletes
    Overview,

    /// Medal tally, optionally for one year and/or country
    Tally {
        /// Year, or "Overall"
        #[arg(long, default_value = "Overall")]
        year: Selection<i32>,

        /// Country (region name), or "Overall"
        #[arg(long, default_value = "Overall")]
        country: Selection<String>,
    },

    /// Distinct nations, events or athletes per edition
    Trend {
        /// What to count: nations, events or athletes
        #[arg(value_name = "METRIC")]
        metric: TrendMetric,
    },

    /// Distinct events per sport and year
    Events,

    /// Most successful athletes overall, in a sport or for a country
    Athletes {
        /// Sport, or "Overall" (unknown sports list the available ones)
        #[arg(long, conflicts_with = "country")]
        sport: Option<Selection<String>>,

        /// Country, or "Overall"
        #[arg(long)]
        country: Option<Selection<String>>,
    },

    /// Year-wise medals, sport heatmap and top athletes for one country
    Country {
        /// Region name
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Age distribution of all athletes and of medallists
    Ages {
        /// Show 2-year histogram bins instead of summaries
        #[arg(long, conflicts_with = "density")]
        histogram: bool,

        /// Show kernel density curves instead of summaries
        #[arg(long)]
        density: bool,
    },

    /// Age distribution of gold medallists by sport
    GoldAges {
        /// Sports to include (default: Athletics, Swimming, Gymnastics, Rowing)
        #[arg(value_name = "SPORT")]
        sports: Vec<String>,
    },

    /// Height and weight of athletes in one sport
    Physique {
        /// Sport name
        #[arg(value_name = "SPORT")]
        sport: String,
    },

    /// Male and female participation per year
    Gender {
        /// Restrict to one sport
        #[arg(long)]
        sport: Option<String>,
    },

    /// Source metadata, canonicalization report and diagnostics
    Diagnostics,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table, csv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
