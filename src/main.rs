// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

// Command-line front end for the underwater acoustic TDOA analyzer.
// All numerical work lives in the library; this binary only wires
// configuration in and prints results out.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use rust_hydroacoustic::config::Config;
use rust_hydroacoustic::evaluation::SensitivityAnalysis;
use rust_hydroacoustic::run_analysis;

/// Underwater acoustic TDOA estimation with GCC-PHAT cross-correlation
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run the RMSE-vs-SNR sensitivity sweep instead of a single analysis
    #[arg(long)]
    sweep: bool,

    /// Override the sound speed in m/s
    #[arg(long)]
    sound_speed: Option<f64>,

    /// Override the signal-to-noise ratio in dB
    #[arg(long)]
    snr: Option<f64>,

    /// Override the number of trials per sweep level
    #[arg(long)]
    trials: Option<usize>,

    /// Noise seed for a single analysis run
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    show_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(sound_speed) = args.sound_speed {
        config.array.sound_speed = sound_speed;
    }
    if let Some(snr) = args.snr {
        config.emitter.snr_db = snr;
    }
    if let Some(trials) = args.trials {
        config.sweep.trials = trials;
    }
    config.validate()?;

    if args.show_config {
        print!("{}", serde_yml::to_string(&config)?);
        return Ok(());
    }

    if args.sweep {
        run_sweep(config)
    } else {
        run_single(config, args.seed)
    }
}

fn run_single(config: Config, seed: u64) -> Result<()> {
    info!("running single TDOA analysis (seed {})", seed);
    let analysis = run_analysis(&config, seed)?;

    println!("========================================");
    println!(
        " Estimated TDOA:   {:>10.4} ms",
        analysis.estimated_tdoa_s * 1000.0
    );
    println!(
        " Theoretical TDOA: {:>10.4} ms",
        analysis.theoretical_tdoa_s * 1000.0
    );
    println!(" Error:            {:>10.6} ms", analysis.error_ms);
    println!("========================================");
    Ok(())
}

fn run_sweep(config: Config) -> Result<()> {
    let resolution_ms = 1000.0 / config.emitter.sample_rate_hz();
    let rows = SensitivityAnalysis::new(config).run();

    println!(" SNR [dB] | RMSE [ms] | trials | skipped");
    println!("----------+-----------+--------+--------");
    for row in &rows {
        match row.rmse_ms {
            Some(rmse) => println!(
                " {:>8.1} | {:>9.5} | {:>6} | {:>7}",
                row.snr_db, rmse, row.effective_trials, row.skipped_trials
            ),
            None => println!(
                " {:>8.1} | {:>9} | {:>6} | {:>7}",
                row.snr_db, "n/a", row.effective_trials, row.skipped_trials
            ),
        }
    }
    println!();
    println!(" sampling resolution: {:.5} ms", resolution_ms);
    Ok(())
}
