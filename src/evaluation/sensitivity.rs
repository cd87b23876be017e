// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! # Sensitivity Analysis Harness
//!
//! Quantifies estimator accuracy against the broadband noise level. For
//! every SNR level of the configured sweep the harness runs a batch of
//! independent trials - synthesize, propagate, estimate - and aggregates
//! the absolute delay errors into a root-mean-square value in milliseconds.
//!
//! ## Partial-failure policy
//!
//! A trial whose estimation fails is logged and counted as skipped, not
//! propagated: one pathological draw must not abort a whole sweep. Skipped
//! trials are excluded from the RMSE denominator and reported in
//! [`TrialStatistics`] so the effective sample size stays visible. A level
//! where every trial was skipped yields `rmse_ms: None` - the degenerate
//! case is surfaced explicitly instead of leaking a NaN into the report.
//!
//! ## Trial independence
//!
//! Each trial's noise realization is seeded from the sweep `base_seed`
//! mixed with the level and trial indices (SplitMix64), so trials are
//! independent random streams while the whole sweep stays reproducible
//! from a single number.

use crate::config::Config;
use crate::processing::correlation::GccPhatEstimator;
use crate::processing::DelayEstimator;
use crate::simulation::{propagate, propagation_paths, theoretical_tdoa, SourceSynthesizer};
use log::{info, warn};

/// Accuracy statistics for one noise level of the sweep.
#[derive(Debug, Clone)]
pub struct TrialStatistics {
    /// Noise level of this row in dB
    pub snr_db: f64,

    /// Root-mean-square delay error in milliseconds over the surviving
    /// trials; `None` when every trial at this level was skipped
    pub rmse_ms: Option<f64>,

    /// Number of trials that produced an estimate
    pub effective_trials: usize,

    /// Number of trials skipped due to estimation failures
    pub skipped_trials: usize,
}

/// SNR sweep runner.
pub struct SensitivityAnalysis {
    config: Config,
}

impl SensitivityAnalysis {
    /// Create a sweep runner for a validated configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the sweep and return one statistics row per noise level, in
    /// ascending SNR order.
    pub fn run(&self) -> Vec<TrialStatistics> {
        let array = &self.config.array;
        let sweep = &self.config.sweep;
        let sample_rate = self.config.emitter.sample_rate_hz();

        let paths = propagation_paths(array);
        let expected_tdoa = theoretical_tdoa(array);
        let estimator = GccPhatEstimator::new(sample_rate);

        info!(
            "sensitivity sweep: {} levels x {} trials, theoretical TDOA {:.4} ms",
            sweep.levels().len(),
            sweep.trials,
            expected_tdoa * 1000.0
        );

        sweep
            .levels()
            .iter()
            .enumerate()
            .map(|(level_index, &snr_db)| {
                let mut emitter = self.config.emitter.clone();
                emitter.snr_db = snr_db;
                let synthesizer = SourceSynthesizer::new(&emitter);

                let mut errors = Vec::with_capacity(sweep.trials);
                let mut skipped = 0usize;

                for trial in 0..sweep.trials {
                    let seed = derive_trial_seed(sweep.base_seed, level_index, trial);
                    let source = synthesizer.synthesize(seed);
                    let received = propagate(&source, &paths, array, sample_rate);

                    let sig = &received[array.measurement_hydrophone];
                    let refsig = &received[array.reference_hydrophone];
                    match estimator.estimate(sig, refsig) {
                        Ok(result) => errors.push((result.delay_s - expected_tdoa).abs()),
                        Err(e) => {
                            warn!(
                                "skipping trial {} at {} dB: {}",
                                trial, snr_db, e
                            );
                            skipped += 1;
                        }
                    }
                }

                let rmse = rmse_ms(&errors);
                match rmse {
                    Some(value) => info!(
                        "SNR {:>5.1} dB | RMSE {:.5} ms ({} trials, {} skipped)",
                        snr_db,
                        value,
                        errors.len(),
                        skipped
                    ),
                    None => warn!(
                        "SNR {:>5.1} dB | all {} trials skipped, no RMSE",
                        snr_db, skipped
                    ),
                }

                TrialStatistics {
                    snr_db,
                    rmse_ms: rmse,
                    effective_trials: errors.len(),
                    skipped_trials: skipped,
                }
            })
            .collect()
    }
}

/// Root-mean-square of the error samples, in milliseconds.
///
/// Returns `None` for an empty sample set instead of NaN.
fn rmse_ms(errors_s: &[f64]) -> Option<f64> {
    if errors_s.is_empty() {
        return None;
    }
    let mean_square = errors_s.iter().map(|e| e * e).sum::<f64>() / errors_s.len() as f64;
    Some(mean_square.sqrt() * 1000.0)
}

/// Mix the sweep base seed with level and trial indices (SplitMix64).
fn derive_trial_seed(base_seed: u64, level_index: usize, trial: usize) -> u64 {
    let stream = ((level_index as u64) << 32) | trial as u64;
    split_mix64(base_seed ^ split_mix64(stream))
}

fn split_mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmitterConfig, SweepConfig};

    fn fast_config() -> Config {
        Config {
            emitter: EmitterConfig {
                duration_s: 0.02,
                ..EmitterConfig::default()
            },
            sweep: SweepConfig {
                snr_start_db: 15.0,
                snr_stop_db: 25.0,
                snr_step_db: 5.0,
                trials: 3,
                base_seed: 0,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_rmse_of_known_errors() {
        // RMSE of 3 ms and 4 ms is sqrt(12.5) ms
        let rmse = rmse_ms(&[3e-3, 4e-3]).unwrap();
        assert!((rmse - 12.5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_rmse_empty_is_none() {
        assert!(rmse_ms(&[]).is_none());
    }

    #[test]
    fn test_trial_seeds_are_distinct() {
        let mut seeds = std::collections::HashSet::new();
        for level in 0..16 {
            for trial in 0..20 {
                assert!(seeds.insert(derive_trial_seed(0, level, trial)));
            }
        }
    }

    #[test]
    fn test_trial_seeds_depend_on_base() {
        assert_ne!(derive_trial_seed(0, 1, 1), derive_trial_seed(1, 1, 1));
    }

    #[test]
    fn test_sweep_produces_one_row_per_level() {
        let config = fast_config();
        let rows = SensitivityAnalysis::new(config.clone()).run();

        assert_eq!(rows.len(), config.sweep.levels().len());
        for (row, level) in rows.iter().zip(config.sweep.levels()) {
            assert_eq!(row.snr_db, level);
            assert_eq!(row.effective_trials + row.skipped_trials, 3);
        }
    }

    #[test]
    fn test_clean_sweep_has_no_skips_and_small_error() {
        let rows = SensitivityAnalysis::new(fast_config()).run();
        for row in &rows {
            assert_eq!(row.skipped_trials, 0);
            // At SNR >= 15 dB the estimate is within a sample period of
            // the theoretical value; a sample period is 0.01 ms here.
            assert!(row.rmse_ms.unwrap() <= 0.011, "rmse {:?}", row.rmse_ms);
        }
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let config = fast_config();
        let a = SensitivityAnalysis::new(config.clone()).run();
        let b = SensitivityAnalysis::new(config).run();
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.rmse_ms, rb.rmse_ms);
        }
    }
}
