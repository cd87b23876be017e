// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Sensitivity sweep configuration

use serde::{Deserialize, Serialize};

/// Parameters of the SNR sensitivity sweep.
///
/// The evaluation harness walks the inclusive range
/// `[snr_start_db, snr_stop_db]` in `snr_step_db` increments and runs
/// `trials` independent simulations at every level. `base_seed` anchors the
/// per-trial seed derivation, so a whole sweep is reproducible from a single
/// number while its trials stay statistically independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// First noise level in dB
    #[serde(default = "default_snr_start_db")]
    pub snr_start_db: f64,

    /// Last noise level in dB (inclusive)
    #[serde(default = "default_snr_stop_db")]
    pub snr_stop_db: f64,

    /// Step between noise levels in dB
    #[serde(default = "default_snr_step_db")]
    pub snr_step_db: f64,

    /// Number of trials per noise level
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Seed anchoring the per-trial random streams
    #[serde(default)]
    pub base_seed: u64,
}

fn default_snr_start_db() -> f64 {
    -5.0
}

fn default_snr_stop_db() -> f64 {
    25.0
}

fn default_snr_step_db() -> f64 {
    2.0
}

fn default_trials() -> usize {
    20
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            snr_start_db: default_snr_start_db(),
            snr_stop_db: default_snr_stop_db(),
            snr_step_db: default_snr_step_db(),
            trials: default_trials(),
            base_seed: 0,
        }
    }
}

impl SweepConfig {
    /// Noise levels of the sweep, in ascending order.
    pub fn levels(&self) -> Vec<f64> {
        let span = self.snr_stop_db - self.snr_start_db;
        // Tolerate float fuzz at the inclusive upper bound
        let count = (span / self.snr_step_db + 1e-9).floor() as usize + 1;
        (0..count)
            .map(|i| self.snr_start_db + i as f64 * self.snr_step_db)
            .collect()
    }
}
