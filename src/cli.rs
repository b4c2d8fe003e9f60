use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Aeolus renewable-resource tier generator.
#[derive(Parser)]
#[command(
    name = "aeolus",
    version,
    about = "Capacity-factor tier generation over gridded resource data"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate tiers for every geometry in a GeoJSON file.
    Generate(GenerateArgs),
    /// Select the top percent of grid cells by mean capacity factor.
    TopPercent(TopPercentArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "aeolus.toml")]
    pub config: PathBuf,

    /// Override grid NetCDF path from config.
    #[arg(short, long)]
    pub grid: Option<PathBuf>,

    /// Override geometry GeoJSON path from config.
    #[arg(long)]
    pub geometries: Option<PathBuf>,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `top-percent` subcommand.
#[derive(clap::Args)]
pub struct TopPercentArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "aeolus.toml")]
    pub config: PathBuf,

    /// Override grid NetCDF path from config.
    #[arg(short, long)]
    pub grid: Option<PathBuf>,

    /// Override selection percentage from config.
    #[arg(short, long)]
    pub percent: Option<f64>,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
