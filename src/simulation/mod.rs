// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! # Simulation Module
//!
//! Synthetic data generation for the TDOA pipeline:
//!
//! - [`geometry`] computes the straight-line propagation paths from the
//!   source to each hydrophone
//! - [`source`] synthesizes the emitted multi-tone waveform with broadband
//!   noise and impulsive disturbances
//! - [`propagation`] delays the waveform to each hydrophone and equalizes
//!   channel lengths
//!
//! Together they produce the per-hydrophone sensor signals consumed by the
//! cross-correlation estimator. All stages are deterministic given the
//! configuration and an explicit noise seed.

pub mod geometry;
pub mod propagation;
pub mod source;

pub use geometry::{propagation_paths, theoretical_tdoa};
pub use propagation::{propagate, propagation_delays};
pub use source::SourceSynthesizer;
