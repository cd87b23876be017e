// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! # Processing Module
//!
//! Delay estimation between sensor signal pairs.
//!
//! The module uses a trait-based design: [`DelayEstimator`] defines the
//! interface, [`correlation::GccPhatEstimator`] is the default
//! implementation (phase-transform weighted cross-correlation) and
//! [`correlation::CrossCorrelationEstimator`] is the unweighted baseline.
//! [`create_delay_estimator`] instantiates the default, so application code
//! can stay implementation-agnostic.

pub mod correlation;

pub use correlation::{
    create_delay_estimator, CorrelationResult, DelayEstimator, EstimationError,
};
