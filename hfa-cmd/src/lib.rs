//! Command implementations for the HFA CLI.
//!
//! Provides subcommands for assessing a child, exporting the assessment
//! log, summarizing it by class, and inspecting the active bands.

use clap::Subcommand;
use std::path::PathBuf;

pub mod assess;
pub mod bands;
pub mod export;
pub mod settings;

use settings::PresetArg;

#[derive(Subcommand)]
pub enum Command {
    /// Assess one child's height-for-age
    Assess(assess::AssessArgs),

    /// Export the whole assessment log as CSV
    Export {
        /// Path to the assessment log CSV
        #[arg(short = 'l', long)]
        log: PathBuf,

        /// Output CSV path
        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Count assessments per class, sex and status
    Summary {
        /// Path to the assessment log CSV
        #[arg(short = 'l', long)]
        log: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the threshold bands and advice for a preset
    Bands {
        /// Policy preset
        #[arg(long, value_enum, default_value = "standard")]
        preset: PresetArg,

        /// TOML file overriding parts of the preset
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Assess(args) => assess::run_assess(&args).map(|_| ()),
        Command::Export { log, output } => export::run_export(&log, &output),
        Command::Summary { log, json } => export::run_summary(&log, json),
        Command::Bands { preset, config } => bands::run_bands(preset.into(), config.as_deref()),
    }
}
