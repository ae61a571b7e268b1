// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use pet_spotter::config::{CaptureConfig, Config, FacingMode};
use pet_spotter::errors::AppResult;
use pet_spotter::sightings::PetKind;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "pet-spotter")]
#[command(about = "Camera capture and sighting log for Pet Spotter")]
#[command(version = pet_spotter::constants::app_info::version())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a photo
    Photo {
        /// Output directory (default: platform pictures dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Camera facing (user or environment)
        #[arg(long)]
        facing: Option<FacingMode>,
    },

    /// Capture a photo and record a sighting
    Spot {
        /// Output directory (default: platform pictures dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Kind of pet (cat, dog, other)
        #[arg(short, long, default_value = "cat")]
        kind: PetKind,

        /// Pet name
        #[arg(short, long)]
        name: Option<String>,

        /// Star rating, 1 to 5
        #[arg(short, long, default_value = "5")]
        rating: u8,

        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,

        /// Sighting latitude
        #[arg(long, default_value = "40.7128")]
        latitude: f64,

        /// Sighting longitude
        #[arg(long, default_value = "-74.006")]
        longitude: f64,
    },

    /// Run a live preview status loop until Ctrl-C
    Preview,
}

fn main() -> AppResult<()> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=pet_spotter=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let args = Cli::parse();
    let config = Config::load();

    match args.command {
        Commands::Photo { output, facing } => {
            let capture = with_facing(config.capture.clone(), facing);
            cli::take_photo(capture, output.or(config.output_dir))
        }
        Commands::Spot {
            output,
            kind,
            name,
            rating,
            description,
            latitude,
            longitude,
        } => cli::spot(
            config.capture.clone(),
            output.or(config.output_dir),
            kind,
            name,
            rating,
            description,
            latitude,
            longitude,
        ),
        Commands::Preview => cli::preview(config.capture),
    }
}

/// Apply a CLI facing override to the configured capture settings
fn with_facing(mut capture: CaptureConfig, facing: Option<FacingMode>) -> CaptureConfig {
    if let Some(facing) = facing {
        capture.facing_mode = facing;
    }
    capture
}
