//! Synthetic grid-frequency generation from seasonal aggregate statistics.
//!
//! The generator layers four additive components on a 50.0 Hz base: a
//! clamped zero-mean random walk (in-band wander), excursion events blended
//! in with triangular ramps, independent high-frequency noise, and a final
//! clamp to the plausible 49.0–51.0 Hz range. Event counts, durations, and
//! the under/over split come from the seasonal profile of the start month.
//!
//! Draw order is part of the contract: walk increments, event count, then
//! per-event (start, duration, direction, magnitude) tuples in event order,
//! then high-frequency noise. Reordering any of these breaks bit-for-bit
//! seed reproducibility.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal, Poisson};

use super::stats::seasonal_stats;
use super::{BAND_HIGH_HZ, BAND_LOW_HZ, CEIL_HZ, FLOOR_HZ, FrequencySample, NOMINAL_HZ};

/// Per-sample standard deviation of the random-walk increments (Hz).
const WALK_STEP_STD_HZ: f64 = 0.002;
/// Clamp applied to the re-centered walk so wander stays mostly in-band (Hz).
const WALK_CLAMP_HZ: f64 = 0.08;
/// Standard deviation of the independent high-frequency noise (Hz).
const HF_NOISE_STD_HZ: f64 = 0.005;
/// Exponential scale of excursion depth beyond the band edge (Hz).
const MAGNITUDE_SCALE_HZ: f64 = 0.03;
/// Minimum excursion depth beyond the band edge (Hz).
const MAGNITUDE_OFFSET_HZ: f64 = 0.1;
/// Cap on excursion depth (Hz).
const MAGNITUDE_CAP_HZ: f64 = 0.5;
/// Longest ramp-in/ramp-out window of an event blend, in samples.
const MAX_RAMP_SAMPLES: usize = 5;

/// Generates a frequency series from the seasonal profile of `start`'s month.
///
/// # Arguments
///
/// * `start` - First sample timestamp; its calendar month selects the
///   seasonal profile (winter = Nov–Mar, summer = Apr–Oct)
/// * `hours` - Series length in hours
/// * `resolution_seconds` - Sample spacing (must be > 0; 1 for production use)
/// * `seed` - RNG seed; `None` draws from OS entropy and is not reproducible
///
/// # Returns
///
/// `hours * 3600 / resolution_seconds` samples at fixed spacing. Identical
/// seed and parameters reproduce the series exactly.
///
/// # Panics
///
/// Panics if `resolution_seconds` is zero.
pub fn simulate_frequency(
    start: DateTime<Utc>,
    hours: u64,
    resolution_seconds: u32,
    seed: Option<u64>,
) -> Vec<FrequencySample> {
    assert!(resolution_seconds > 0, "resolution_seconds must be > 0");

    let n_samples = (hours * 3600 / resolution_seconds as u64) as usize;
    if n_samples == 0 {
        return Vec::new();
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let stats = seasonal_stats(start.month());
    let mut hz = vec![NOMINAL_HZ; n_samples];

    // Low-frequency wander: cumulative normal increments, re-centered to
    // zero mean, clamped so the drift alone rarely leaves the band.
    let walk_step = Normal::new(0.0, WALK_STEP_STD_HZ).expect("constant std dev is positive");
    let mut walk = Vec::with_capacity(n_samples);
    let mut level = 0.0;
    for _ in 0..n_samples {
        level += walk_step.sample(&mut rng);
        walk.push(level);
    }
    let walk_mean = walk.iter().sum::<f64>() / n_samples as f64;
    for (f, w) in hz.iter_mut().zip(&walk) {
        *f += (w - walk_mean).clamp(-WALK_CLAMP_HZ, WALK_CLAMP_HZ);
    }

    // Excursion events, blended sequentially so overlaps stack.
    let expected_events = stats.events_per_hour() * hours as f64;
    let event_count_dist = Poisson::new(expected_events).expect("event rate is positive");
    let n_events = event_count_dist.sample(&mut rng) as u64;

    let duration_dist =
        Exp::new(1.0 / stats.avg_event_duration_secs()).expect("mean duration is positive");
    let magnitude_dist = Exp::new(1.0 / MAGNITUDE_SCALE_HZ).expect("magnitude scale is positive");
    let under_ratio = stats.under_ratio();

    for _ in 0..n_events {
        let event_start = rng.random_range(0..n_samples);
        let duration_secs = duration_dist.sample(&mut rng) as u64;
        let duration_samples = ((duration_secs / resolution_seconds as u64) as usize).max(1);
        let event_end = (event_start + duration_samples).min(n_samples);

        let is_under = rng.random::<f64>() < under_ratio;
        let magnitude =
            (magnitude_dist.sample(&mut rng) + MAGNITUDE_OFFSET_HZ).min(MAGNITUDE_CAP_HZ);

        let target_hz = if is_under {
            (BAND_LOW_HZ - magnitude).max(FLOOR_HZ)
        } else {
            (BAND_HIGH_HZ + magnitude).min(CEIL_HZ)
        };

        blend_event(&mut hz, event_start, event_end, duration_samples, target_hz);
    }

    // Independent measurement-scale jitter on top of everything.
    let hf_noise = Normal::new(0.0, HF_NOISE_STD_HZ).expect("constant std dev is positive");
    for f in hz.iter_mut() {
        *f += hf_noise.sample(&mut rng);
        *f = f.clamp(FLOOR_HZ, CEIL_HZ);
    }

    hz.into_iter()
        .enumerate()
        .map(|(i, value)| FrequencySample {
            timestamp: start + chrono::Duration::seconds(i as i64 * resolution_seconds as i64),
            hz: value,
        })
        .collect()
}

/// Blends an event toward `target_hz` over `[event_start, event_end)` with a
/// triangular ramp: linear ramp-in, full-strength plateau, symmetric
/// ramp-out. The ramp window derives from the unclipped event duration.
fn blend_event(
    hz: &mut [f64],
    event_start: usize,
    event_end: usize,
    duration_samples: usize,
    target_hz: f64,
) {
    let span = event_end - event_start;
    let ramp = MAX_RAMP_SAMPLES.min(duration_samples / 3);

    for (pos, f) in hz[event_start..event_end].iter_mut().enumerate() {
        // `pos + ramp > span` avoids underflow when the event is clipped
        // at the series end and the span is shorter than the ramp window.
        let factor = if ramp == 0 {
            1.0
        } else if pos < ramp {
            pos as f64 / ramp as f64
        } else if pos + ramp > span {
            (span - pos) as f64 / ramp as f64
        } else {
            1.0
        };
        *f = *f * (1.0 - factor) + target_hz * factor;
    }
}

/// Simulates a full calendar year, one month at a time, so each month uses
/// its own seasonal profile.
///
/// Months are generated with a per-month seed of `seed + month` (1-based)
/// when a base seed is given, and concatenated in chronological order.
/// At 1-second resolution a year is ~31.5M samples; callers that only need
/// hourly statistics should pick a coarser resolution or shorter ranges.
pub fn simulate_frequency_for_year(
    year: i32,
    resolution_seconds: u32,
    seed: Option<u64>,
) -> Vec<FrequencySample> {
    let mut samples = Vec::new();

    for month in 1..=12_u32 {
        let start = month_start_utc(year, month);
        let next = if month == 12 {
            month_start_utc(year + 1, 1)
        } else {
            month_start_utc(year, month + 1)
        };
        let hours_in_month = (next - start).num_hours() as u64;
        let month_seed = seed.map(|s| s + month as u64);

        samples.extend(simulate_frequency(
            start,
            hours_in_month,
            resolution_seconds,
            month_seed,
        ));
    }

    samples
}

/// Midnight UTC on the first of the given month.
pub fn month_start_utc(year: i32, month: u32) -> DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date");
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is a valid time"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FrequencySummary;
    use chrono::Timelike;

    fn jan_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn series_has_expected_length_and_spacing() {
        let samples = simulate_frequency(jan_start(), 2, 1, Some(1));
        assert_eq!(samples.len(), 2 * 3600);
        assert_eq!(samples[0].timestamp, jan_start());
        let dt = samples[1].timestamp - samples[0].timestamp;
        assert_eq!(dt.num_seconds(), 1);
    }

    #[test]
    fn coarser_resolution_shortens_series() {
        let samples = simulate_frequency(jan_start(), 2, 10, Some(1));
        assert_eq!(samples.len(), 2 * 360);
        let dt = samples[1].timestamp - samples[0].timestamp;
        assert_eq!(dt.num_seconds(), 10);
    }

    #[test]
    fn zero_hours_yields_empty_series() {
        assert!(simulate_frequency(jan_start(), 0, 1, Some(1)).is_empty());
    }

    #[test]
    fn all_samples_within_plausible_range() {
        let samples = simulate_frequency(jan_start(), 6, 1, Some(7));
        for s in &samples {
            assert!((FLOOR_HZ..=CEIL_HZ).contains(&s.hz), "out of range: {}", s.hz);
        }
    }

    #[test]
    fn same_seed_reproduces_bit_for_bit() {
        let a = simulate_frequency(jan_start(), 3, 1, Some(42));
        let b = simulate_frequency(jan_start(), 3, 1, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = simulate_frequency(jan_start(), 3, 1, Some(42));
        let b = simulate_frequency(jan_start(), 3, 1, Some(43));
        assert_ne!(a, b);
    }

    #[test]
    fn mean_stays_near_nominal() {
        let samples = simulate_frequency(jan_start(), 12, 1, Some(42));
        let summary = FrequencySummary::from_samples(&samples);
        assert!(
            (summary.mean_hz - NOMINAL_HZ).abs() < 0.05,
            "mean drifted to {}",
            summary.mean_hz
        );
    }

    #[test]
    fn blend_ramps_in_and_out() {
        let mut hz = vec![50.0; 30];
        blend_event(&mut hz, 0, 30, 30, 49.5);
        // Ramp-in starts at zero strength and reaches the plateau.
        assert_eq!(hz[0], 50.0);
        assert_eq!(hz[10], 49.5);
        // Symmetric ramp-out: strength at the last sample is 1/ramp.
        assert!(hz[29] > 49.5 && hz[29] < 50.0);
    }

    #[test]
    fn blend_of_short_event_applies_full_strength() {
        let mut hz = vec![50.0; 10];
        // duration 2 samples → ramp window 0 → plateau everywhere
        blend_event(&mut hz, 4, 6, 2, 49.4);
        assert_eq!(hz[4], 49.4);
        assert_eq!(hz[5], 49.4);
        assert_eq!(hz[3], 50.0);
        assert_eq!(hz[6], 50.0);
    }

    #[test]
    fn month_partitioning_covers_calendar_months() {
        let jan = month_start_utc(2024, 1);
        let feb = month_start_utc(2024, 2);
        assert_eq!((feb - jan).num_hours(), 31 * 24);
        let dec = month_start_utc(2024, 12);
        let next_jan = month_start_utc(2025, 1);
        assert_eq!((next_jan - dec).num_hours(), 31 * 24);
        assert_eq!(jan.hour(), 0);
    }

    #[test]
    fn year_simulation_concatenates_months_in_order() {
        // Hourly resolution keeps a full leap year at 8784 samples.
        let samples = simulate_frequency_for_year(2024, 3600, Some(42));
        assert_eq!(samples.len(), 366 * 24);
        assert_eq!(samples[0].timestamp, month_start_utc(2024, 1));
        for pair in samples.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn year_simulation_is_seed_reproducible() {
        let a = simulate_frequency_for_year(2024, 3600, Some(5));
        let b = simulate_frequency_for_year(2024, 3600, Some(5));
        assert_eq!(a, b);
    }
}
