//! Notechart - rhythm-game note charts from audio

use anyhow::{bail, Context, Result};
use clap::Parser;
use notechart::audio::{Decoder, WavDecoder};
use notechart::chart::{classify, ChartWriter};
use notechart::config::{self, NotechartConfig};
use notechart::onset::{Detector, SpectralFluxDetector};
use std::path::Path;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            sensitivity,
            upper_bound,
            config: config_path,
        } => {
            let cfg = load_or_default(config_path.as_deref())?;

            if !input.exists() {
                bail!("input file {:?} does not exist", input);
            }

            // Claim the output path before doing any work on the audio.
            let mut writer = ChartWriter::create(&output)
                .with_context(|| format!("cannot create output file {:?}", output))?;

            let mut detector_cfg = cfg.detector.to_detector_config();
            detector_cfg.activation_threshold = sensitivity;
            let detector = SpectralFluxDetector::new(detector_cfg)
                .context("could not create onset detector")?;

            println!("Decoding {:?}...", input);
            let audio = WavDecoder
                .open(&input)
                .with_context(|| format!("could not decode {:?}", input))?;
            println!(
                "  {} Hz, {} channel(s), {:.1}s",
                audio.sample_rate,
                audio.channels,
                audio.duration_secs()
            );

            println!("Detecting onsets (sensitivity {})...", sensitivity);
            let onsets = detector.detect(&audio)?;
            println!("  {} onsets detected", onsets.len());

            let mut classifier_cfg = cfg.chart.to_classifier_config();
            if let Some(bound) = upper_bound {
                classifier_cfg.amplitude_upper_bound = bound;
            }
            let notes = classify(&onsets, classifier_cfg)
                .context("could not classify onsets (try lowering the sensitivity)")?;

            writer.write_all(&notes)?;
            writer.finalize()?;
            println!("Wrote {} notes to {:?}", notes.len(), output);
        }

        Commands::Onsets {
            input,
            sensitivity,
            config: config_path,
        } => {
            let cfg = load_or_default(config_path.as_deref())?;

            if !input.exists() {
                bail!("input file {:?} does not exist", input);
            }

            let mut detector_cfg = cfg.detector.to_detector_config();
            detector_cfg.activation_threshold = sensitivity;
            let detector = SpectralFluxDetector::new(detector_cfg)
                .context("could not create onset detector")?;

            let audio = WavDecoder
                .open(&input)
                .with_context(|| format!("could not decode {:?}", input))?;

            let onsets = detector.detect(&audio)?;
            println!("{} onsets:", onsets.len());
            for onset in &onsets {
                println!("  {:8.3}s  {:8.2}", onset.time, onset.amplitude);
            }
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Window size: {}", cfg.detector.window_size);
                    println!("  Hop size: {}", cfg.detector.hop_size);
                    println!(
                        "  Activation threshold: {}",
                        cfg.detector.activation_threshold
                    );
                    println!("  Min onset gap: {} ms", cfg.detector.min_gap_ms);
                    println!(
                        "  Amplitude upper bound: {}",
                        cfg.chart.amplitude_upper_bound
                    );
                }
                Err(e) => {
                    println!("Configuration is invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../notechart.example.yaml");

            let path = "notechart.yaml";
            if Path::new(path).exists() {
                println!("notechart.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created notechart.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

/// Load the given configuration file, or fall back to defaults
fn load_or_default(path: Option<&Path>) -> Result<NotechartConfig> {
    match path {
        Some(path) => {
            println!("Loading configuration from {:?}...", path);
            config::load_config(path)
        }
        None => Ok(NotechartConfig::default()),
    }
}
