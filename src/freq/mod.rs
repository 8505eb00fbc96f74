//! Grid-frequency samples and summary statistics.

pub mod stats;
pub mod synth;

use chrono::{DateTime, Utc};

/// Nominal system frequency in Hz.
pub const NOMINAL_HZ: f64 = 50.0;
/// Lower edge of the normal band in Hz.
pub const BAND_LOW_HZ: f64 = 49.9;
/// Upper edge of the normal band in Hz.
pub const BAND_HIGH_HZ: f64 = 50.1;
/// Physical floor for plausible grid frequency in Hz.
pub const FLOOR_HZ: f64 = 49.0;
/// Physical ceiling for plausible grid frequency in Hz.
pub const CEIL_HZ: f64 = 51.0;

/// One instantaneous grid-frequency measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySample {
    /// Measurement instant.
    pub timestamp: DateTime<Utc>,
    /// Grid frequency in Hz.
    pub hz: f64,
}

/// Floors a timestamp to the start of its UTC hour.
pub fn floor_to_hour(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let secs = timestamp.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(3600), 0).unwrap_or(timestamp)
}

/// Descriptive statistics over a frequency series.
///
/// All percentages are in 0–100. A zero-length series yields an all-zero
/// summary rather than dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySummary {
    /// Arithmetic mean frequency (Hz).
    pub mean_hz: f64,
    /// Sample standard deviation (Hz).
    pub std_hz: f64,
    /// Minimum observed frequency (Hz).
    pub min_hz: f64,
    /// Maximum observed frequency (Hz).
    pub max_hz: f64,
    /// Share of samples outside the 49.9–50.1 Hz band (%).
    pub pct_outside_band: f64,
    /// Share of samples below 49.9 Hz (%).
    pub pct_under: f64,
    /// Share of samples above 50.1 Hz (%).
    pub pct_over: f64,
}

impl FrequencySummary {
    /// Computes summary statistics from a frequency series.
    pub fn from_samples(samples: &[FrequencySample]) -> Self {
        if samples.is_empty() {
            return Self {
                mean_hz: 0.0,
                std_hz: 0.0,
                min_hz: 0.0,
                max_hz: 0.0,
                pct_outside_band: 0.0,
                pct_under: 0.0,
                pct_over: 0.0,
            };
        }

        let n = samples.len() as f64;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut under = 0_usize;
        let mut over = 0_usize;

        for s in samples {
            sum += s.hz;
            min = min.min(s.hz);
            max = max.max(s.hz);
            if s.hz < BAND_LOW_HZ {
                under += 1;
            } else if s.hz > BAND_HIGH_HZ {
                over += 1;
            }
        }

        let mean = sum / n;
        let var_sum: f64 = samples.iter().map(|s| (s.hz - mean).powi(2)).sum();
        let std = if samples.len() > 1 {
            (var_sum / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        Self {
            mean_hz: mean,
            std_hz: std,
            min_hz: min,
            max_hz: max,
            pct_outside_band: (under + over) as f64 / n * 100.0,
            pct_under: under as f64 / n * 100.0,
            pct_over: over as f64 / n * 100.0,
        }
    }
}
