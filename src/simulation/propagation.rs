// Copyright (c) 2026 rust-hydroacoustic contributors
// This file is part of the rust-hydroacoustic project and is licensed under the
// MIT License (see LICENSE.md for details).

//! # Propagation Model
//!
//! Turns the emitted waveform into one received waveform per hydrophone.
//! Each channel gets the source signal delayed by its one-way travel time,
//! rounded to the nearest sample, and scaled by the channel attenuation
//! coefficient. All channels are then zero-padded at the tail to a common
//! length so that the frequency-domain correlator sees equal-sized inputs.

use crate::config::ArrayConfig;
use log::debug;

/// Per-hydrophone travel time in whole samples.
///
/// `round(distance / sound_speed * sample_rate)` for each channel. With a
/// fixed sound speed the delays are monotonically consistent with the
/// distances: a farther hydrophone never gets a smaller delay.
pub fn propagation_delays(distances: &[f64], sound_speed: f64, sample_rate_hz: f64) -> Vec<usize> {
    distances
        .iter()
        .map(|d| (d / sound_speed * sample_rate_hz).round() as usize)
        .collect()
}

/// Delay the source signal to every hydrophone and equalize lengths.
///
/// Returns one waveform per hydrophone, in array index order. Every output
/// has the same length: `source.len()` plus the largest delay. Channels are
/// scaled by their configured attenuation coefficient; the delay itself is
/// realized by prepending zeros.
///
/// The configuration is validated before the pipeline runs, so the sound
/// speed is known to be positive here.
pub fn propagate(
    source: &[f64],
    distances: &[f64],
    array: &ArrayConfig,
    sample_rate_hz: f64,
) -> Vec<Vec<f64>> {
    let delays = propagation_delays(distances, array.sound_speed, sample_rate_hz);
    let max_len = source.len() + delays.iter().copied().max().unwrap_or(0);
    debug!("propagation delays (samples): {:?}", delays);

    delays
        .iter()
        .enumerate()
        .map(|(channel, &delay)| {
            let gain = array.channel_gain(channel);
            let mut received = vec![0.0f64; max_len];
            for (i, &sample) in source.iter().enumerate() {
                received[delay + i] = gain * sample;
            }
            received
        })
        .collect()
}
