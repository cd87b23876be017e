// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Emitter profile configuration
//!
//! This module defines the synthetic source signal: its tonal content, the
//! signal-to-noise ratio of the broadband noise floor, the sampling grid and
//! the impulsive disturbance model.

use serde::{Deserialize, Serialize};

/// Profile of the emitted source signal.
///
/// The clean signal is a sum of sinusoids at `tone_frequencies_khz` with the
/// matching `tone_amplitudes` (the two lists must have equal length). On top
/// of that the synthesizer adds zero-mean Gaussian noise whose standard
/// deviation is derived from `snr_db` relative to the clean signal, and
/// optionally `impulse_count` sparse impulsive outliers.
///
/// # Example
///
/// ```
/// use rust_hydroacoustic::config::EmitterConfig;
///
/// let emitter = EmitterConfig::default();
/// assert_eq!(emitter.tone_frequencies_khz.len(), emitter.tone_amplitudes.len());
/// assert_eq!(emitter.num_samples(), 20_000); // 0.2 s at 100 kHz
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Tonal frequencies in kHz
    #[serde(default = "default_tone_frequencies")]
    pub tone_frequencies_khz: Vec<f64>,

    /// Per-tone amplitudes; must match the frequency list in length
    #[serde(default = "default_tone_amplitudes")]
    pub tone_amplitudes: Vec<f64>,

    /// Signal-to-noise ratio in dB, relative to the clean tonal signal
    #[serde(default = "default_snr_db")]
    pub snr_db: f64,

    /// Sampling rate in kHz
    #[serde(default = "default_sample_rate_khz")]
    pub sample_rate_khz: f64,

    /// Signal duration in seconds
    #[serde(default = "default_duration_s")]
    pub duration_s: f64,

    /// Number of impulsive disturbances injected into the signal
    #[serde(default)]
    pub impulse_count: usize,

    /// Maximum impulse amplitude, as a fraction of the signal peak
    #[serde(default = "default_impulse_max_amplitude")]
    pub impulse_max_amplitude: f64,
}

fn default_tone_frequencies() -> Vec<f64> {
    vec![1.0, 1.5, 2.0]
}

fn default_tone_amplitudes() -> Vec<f64> {
    vec![0.1, 0.1, 0.1]
}

fn default_snr_db() -> f64 {
    20.0
}

fn default_sample_rate_khz() -> f64 {
    100.0
}

fn default_duration_s() -> f64 {
    0.2
}

fn default_impulse_max_amplitude() -> f64 {
    0.5
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            tone_frequencies_khz: default_tone_frequencies(),
            tone_amplitudes: default_tone_amplitudes(),
            snr_db: default_snr_db(),
            sample_rate_khz: default_sample_rate_khz(),
            duration_s: default_duration_s(),
            impulse_count: 0,
            impulse_max_amplitude: default_impulse_max_amplitude(),
        }
    }
}

impl EmitterConfig {
    /// Sampling rate in Hz.
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_khz * 1000.0
    }

    /// Number of samples on the time grid `t = 0, 1/Fs, ... < duration`.
    pub fn num_samples(&self) -> usize {
        (self.duration_s * self.sample_rate_hz()).round() as usize
    }
}
