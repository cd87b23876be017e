// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Hydrophone array configuration
//!
//! This module defines the geometry of the measurement scene: one acoustic
//! source and N hydrophones in 3D coordinates, plus the medium sound speed,
//! the array heading and per-channel attenuation coefficients.

use serde::{Deserialize, Serialize};

/// Geometry and medium settings for the hydrophone array.
///
/// Positions are metric 3D coordinates `[x, y, z]` with `z` negative below
/// the surface. The structure is caller-supplied configuration: constructed
/// once per run, validated, and read-only thereafter.
///
/// # TDOA pair
///
/// The delay estimate is taken between two designated hydrophones:
/// `measurement_hydrophone` relative to `reference_hydrophone` (a positive
/// delay means the measurement channel receives the signal later).
///
/// # Example
///
/// ```
/// use rust_hydroacoustic::config::ArrayConfig;
///
/// let array = ArrayConfig::default();
/// assert_eq!(array.hydrophones.len(), 4);
/// assert_eq!(array.sound_speed, 1500.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayConfig {
    /// Source position in meters
    #[serde(default = "default_source")]
    pub source: [f64; 3],

    /// Hydrophone positions in meters (at least two)
    #[serde(default = "default_hydrophones")]
    pub hydrophones: Vec<[f64; 3]>,

    /// Array heading in degrees
    #[serde(default = "default_bearing")]
    pub bearing_deg: f64,

    /// Per-channel linear attenuation coefficients; channels beyond the
    /// list length default to unity gain
    #[serde(default = "default_attenuation")]
    pub channel_attenuation: Vec<f64>,

    /// Sound speed in the medium in m/s
    #[serde(default = "default_sound_speed")]
    pub sound_speed: f64,

    /// Index of the reference hydrophone for delay estimation
    #[serde(default)]
    pub reference_hydrophone: usize,

    /// Index of the measurement hydrophone for delay estimation
    #[serde(default = "default_measurement")]
    pub measurement_hydrophone: usize,
}

fn default_source() -> [f64; 3] {
    [120.0, 80.0, -20.0]
}

fn default_hydrophones() -> Vec<[f64; 3]> {
    vec![
        [0.0, 150.0, -4.0],
        [50.0, 0.0, -4.0],
        [300.0, 50.0, -4.0],
        [50.0, 100.0, -4.0],
    ]
}

fn default_bearing() -> f64 {
    -45.0
}

fn default_attenuation() -> Vec<f64> {
    vec![0.9, 0.9]
}

fn default_sound_speed() -> f64 {
    1500.0 // Sea water at moderate depth
}

fn default_measurement() -> usize {
    1
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            hydrophones: default_hydrophones(),
            bearing_deg: default_bearing(),
            channel_attenuation: default_attenuation(),
            sound_speed: default_sound_speed(),
            reference_hydrophone: 0,
            measurement_hydrophone: default_measurement(),
        }
    }
}

impl ArrayConfig {
    /// Linear gain applied to the given channel during propagation.
    ///
    /// Channels without an explicit coefficient get unity gain.
    pub fn channel_gain(&self, channel: usize) -> f64 {
        self.channel_attenuation.get(channel).copied().unwrap_or(1.0)
    }
}
