// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! # Seeded Noise Generator
//!
//! This module provides the pseudo-random source used by the signal
//! synthesizer. It produces:
//!
//! 1. Uniform draws - for impulsive disturbance positions and amplitudes
//! 2. Gaussian draws (Box-Muller transform) - for broadband additive noise
//!
//! The generator is explicitly seeded so that every synthesized waveform is
//! bit-reproducible for a given `(configuration, seed)` pair. Callers that
//! need statistically independent realizations must vary the seed; the
//! evaluation harness derives one seed per trial.
//!
//! ## Examples
//!
//! ```
//! use rust_hydroacoustic::utility::noise_generator::NoiseGenerator;
//!
//! let mut generator = NoiseGenerator::new(12345);
//!
//! // A standard-normal draw
//! let z = generator.gaussian();
//! assert!(z.is_finite());
//!
//! // A uniform draw in [0, 1)
//! let u = generator.uniform();
//! assert!((0.0..1.0).contains(&u));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded pseudo-random generator for noise synthesis.
///
/// Wraps a seeded [`StdRng`] and layers a Box-Muller transform on top for
/// Gaussian output. The transform yields two independent normal samples per
/// pair of uniform draws; the second sample is cached and returned by the
/// next call, so consecutive calls consume the underlying stream evenly.
///
/// Not suitable for cryptographic purposes.
pub struct NoiseGenerator {
    /// Underlying uniform random number generator
    rng: StdRng,

    /// Cached second sample from the Box-Muller transform
    cached: Option<f64>,
}

impl NoiseGenerator {
    /// Create a new generator from an explicit seed.
    ///
    /// The same seed always produces the same sequence of draws, which is
    /// what makes repeated syntheses of the same emitter profile
    /// bit-identical.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            cached: None,
        }
    }

    /// Next uniform draw in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Next uniform draw in `[0, max)`.
    ///
    /// Returns `0.0` when `max` is zero, so a disabled disturbance amplitude
    /// never injects anything.
    pub fn uniform_in(&mut self, max: f64) -> f64 {
        self.uniform() * max
    }

    /// Next uniform index in `[0, len)`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero; callers draw indices only into non-empty
    /// signals.
    pub fn uniform_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Next draw from a standard Gaussian (mean 0, standard deviation 1).
    ///
    /// Uses the Box-Muller transform:
    ///
    /// ```text
    /// z0 = sqrt(-2 ln u1) * cos(2π u2)
    /// z1 = sqrt(-2 ln u1) * sin(2π u2)
    /// ```
    ///
    /// where `u1`, `u2` are uniform in `(0, 1)`. `z1` is cached for the next
    /// call.
    pub fn gaussian(&mut self) -> f64 {
        if let Some(cached) = self.cached.take() {
            return cached;
        }

        // Avoid ln(0)
        let u1 = self.uniform().max(1e-12);
        let u2 = self.uniform();

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;

        self.cached = Some(r * theta.sin());
        r * theta.cos()
    }

    /// Next Gaussian draw scaled to the given standard deviation.
    pub fn gaussian_scaled(&mut self, std_dev: f64) -> f64 {
        self.gaussian() * std_dev
    }
}
