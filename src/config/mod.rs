// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! # Configuration Module
//!
//! Strongly-typed configuration for the TDOA analyzer, loaded from a YAML
//! file or constructed programmatically. Every run consumes exactly one
//! validated [`Config`]; validation fails fast, before any synthesis or
//! estimation happens.
//!
//! ## Sections
//!
//! - [`ArrayConfig`] - source and hydrophone geometry, sound speed, channel
//!   attenuation and the designated TDOA pair
//! - [`EmitterConfig`] - tonal content, SNR, sampling grid and impulsive
//!   disturbances of the synthetic source
//! - [`SweepConfig`] - SNR range, step and trial count of the sensitivity
//!   sweep
//!
//! ## Example
//!
//! ```
//! use rust_hydroacoustic::config::Config;
//!
//! let config = Config::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod array;
pub mod emitter;
pub mod sweep;

pub use array::ArrayConfig;
pub use emitter::EmitterConfig;
pub use sweep::SweepConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised by configuration validation.
///
/// All variants are structural: they are detected before the pipeline runs
/// and abort the run immediately.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tone frequency/amplitude lists differ in length ({frequencies} vs {amplitudes})")]
    ToneLengthMismatch { frequencies: usize, amplitudes: usize },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite")]
    NonFinite { name: &'static str },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("at least two hydrophones are required, got {0}")]
    TooFewHydrophones(usize),

    #[error(
        "invalid hydrophone pair: reference {reference}, measurement {measurement} \
         (array has {count} hydrophones)"
    )]
    InvalidPair {
        reference: usize,
        measurement: usize,
        count: usize,
    },

    #[error("sweep start {start} dB is above stop {stop} dB")]
    InvalidSweepRange { start: f64, stop: f64 },

    #[error("sweep trial count must be non-zero")]
    ZeroTrials,
}

/// Aggregate configuration for one analyzer run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Hydrophone array geometry and medium
    #[serde(default)]
    pub array: ArrayConfig,

    /// Emitted source signal profile
    #[serde(default)]
    pub emitter: EmitterConfig,

    /// Sensitivity sweep parameters
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl Config {
    /// Load a configuration from a YAML file.
    ///
    /// Missing sections and fields fall back to their defaults. The loaded
    /// configuration is validated before being returned.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_yml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Checks performed:
    /// - tone frequency and amplitude lists have equal length (an empty
    ///   pair is allowed: zero tones means an all-zero clean signal)
    /// - sample rate, duration, sound speed and sweep step are positive
    /// - all coordinates, amplitudes and attenuation coefficients are finite
    /// - the array has at least two hydrophones and the TDOA pair indices
    ///   are distinct and in range
    /// - the sweep range is non-empty and the trial count non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let emitter = &self.emitter;
        if emitter.tone_frequencies_khz.len() != emitter.tone_amplitudes.len() {
            return Err(ConfigError::ToneLengthMismatch {
                frequencies: emitter.tone_frequencies_khz.len(),
                amplitudes: emitter.tone_amplitudes.len(),
            });
        }
        check_positive("sample rate", emitter.sample_rate_khz)?;
        check_positive("signal duration", emitter.duration_s)?;
        check_finite("tone frequencies", emitter.tone_frequencies_khz.iter())?;
        check_finite("tone amplitudes", emitter.tone_amplitudes.iter())?;
        if !emitter.impulse_max_amplitude.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "impulse max amplitude",
            });
        }
        if emitter.impulse_max_amplitude < 0.0 {
            return Err(ConfigError::Negative {
                name: "impulse max amplitude",
                value: emitter.impulse_max_amplitude,
            });
        }

        let array = &self.array;
        check_positive("sound speed", array.sound_speed)?;
        check_finite("source position", array.source.iter())?;
        for position in &array.hydrophones {
            check_finite("hydrophone position", position.iter())?;
        }
        check_finite("channel attenuation", array.channel_attenuation.iter())?;
        if !array.bearing_deg.is_finite() {
            return Err(ConfigError::NonFinite { name: "bearing" });
        }
        if array.hydrophones.len() < 2 {
            return Err(ConfigError::TooFewHydrophones(array.hydrophones.len()));
        }
        let count = array.hydrophones.len();
        if array.reference_hydrophone >= count
            || array.measurement_hydrophone >= count
            || array.reference_hydrophone == array.measurement_hydrophone
        {
            return Err(ConfigError::InvalidPair {
                reference: array.reference_hydrophone,
                measurement: array.measurement_hydrophone,
                count,
            });
        }

        let sweep = &self.sweep;
        check_positive("sweep step", sweep.snr_step_db)?;
        if sweep.snr_start_db > sweep.snr_stop_db {
            return Err(ConfigError::InvalidSweepRange {
                start: sweep.snr_start_db,
                stop: sweep.snr_stop_db,
            });
        }
        if sweep.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }

        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

fn check_finite<'a, I>(name: &'static str, values: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a f64>,
{
    if values.into_iter().any(|v| !v.is_finite()) {
        return Err(ConfigError::NonFinite { name });
    }
    Ok(())
}
