// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! # Evaluation Module
//!
//! Statistical accuracy characterization of the delay estimator. The
//! [`sensitivity`] harness sweeps the broadband noise level and reports a
//! root-mean-square delay error per level, with explicit accounting of
//! skipped trials.

pub mod sensitivity;

pub use sensitivity::{SensitivityAnalysis, TrialStatistics};
