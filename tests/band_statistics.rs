//! Statistical recovery of seasonal band statistics from synthesized data.

use fcr_sim::freq::stats::{SUMMER_STATS, WINTER_STATS};
use fcr_sim::freq::synth::{month_start_utc, simulate_frequency};
use fcr_sim::freq::FrequencySummary;

/// A synthesized month should land in the same regime as its profile's
/// measured share of time outside the band. The generator is stochastic
/// and ramps shave the edges of every event, so this is a loose bracket,
/// not an equality.
#[test]
fn winter_month_recovers_profile_band_share() {
    let samples = simulate_frequency(month_start_utc(2024, 1), 720, 1, Some(42));
    let summary = FrequencySummary::from_samples(&samples);

    let expected = WINTER_STATS.pct_outside;
    assert!(
        summary.pct_outside_band > expected / 3.0 && summary.pct_outside_band < expected * 3.0,
        "winter pct outside band {:.3}% not within 3x of profile {:.3}%",
        summary.pct_outside_band,
        expected
    );
}

#[test]
fn summer_start_month_selects_summer_profile() {
    let samples = simulate_frequency(month_start_utc(2024, 6), 720, 1, Some(42));
    let summary = FrequencySummary::from_samples(&samples);

    let expected = SUMMER_STATS.pct_outside;
    assert!(
        summary.pct_outside_band > expected / 3.0 && summary.pct_outside_band < expected * 3.0,
        "summer pct outside band {:.3}% not within 3x of profile {:.3}%",
        summary.pct_outside_band,
        expected
    );
}

#[test]
fn under_and_over_excursions_both_occur() {
    let samples = simulate_frequency(month_start_utc(2024, 1), 168, 1, Some(7));
    let summary = FrequencySummary::from_samples(&samples);
    assert!(summary.pct_under > 0.0, "expected some under-frequency time");
    assert!(summary.pct_over > 0.0, "expected some over-frequency time");
    // Profiles skew toward over-frequency events; the mean should still
    // hover near nominal.
    assert!((summary.mean_hz - 50.0).abs() < 0.02);
}
