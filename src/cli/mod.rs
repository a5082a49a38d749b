//! CLI interface for notechart

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rhythm-game note charts from audio onsets
#[derive(Parser)]
#[command(name = "notechart")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a note chart from an audio file
    Generate {
        /// Input audio file (WAV)
        input: PathBuf,

        /// Output chart file
        output: PathBuf,

        /// Onset detector sensitivity (lower detects more onsets)
        #[arg(short, long)]
        sensitivity: f32,

        /// Amplitude ceiling; louder onsets become unbounded notes
        #[arg(short, long)]
        upper_bound: Option<i32>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Detect onsets and print them without building a chart
    Onsets {
        /// Input audio file (WAV)
        input: PathBuf,

        /// Onset detector sensitivity (lower detects more onsets)
        #[arg(short, long)]
        sensitivity: f32,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "notechart.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}
