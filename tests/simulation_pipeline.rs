//! End-to-end pipeline tests: synthesizer → SOC fold → revenue → export.

mod common;

use fcr_sim::freq::synth::simulate_frequency;
use fcr_sim::io::export::write_csv;
use fcr_sim::revenue::calculate_revenue;
use fcr_sim::sim::SocSimulator;

#[test]
fn one_day_pipeline_produces_a_priced_record_per_hour() {
    let samples = simulate_frequency(common::horizon_start(), 24, 1, Some(42));
    assert_eq!(samples.len(), 24 * 3600);

    let mut simulator = SocSimulator::new(common::default_battery(), 0.5);
    let soc_records = simulator.run(samples);
    assert_eq!(soc_records.len(), 24);

    let prices = common::flat_price_table(24, 25.0);
    let result = calculate_revenue(&prices, &soc_records, &common::default_battery());
    assert_eq!(result.total_hours, 24);
    assert_eq!(result.hourly.len(), 24);
    // Every priced hour has SOC coverage in this aligned setup.
    assert!(result.hourly.iter().all(|h| h.soc_start.is_some()));
}

#[test]
fn soc_trajectory_is_continuous_across_the_whole_day() {
    let samples = simulate_frequency(common::horizon_start(), 24, 1, Some(42));
    let mut simulator = SocSimulator::new(common::default_battery(), 0.5);
    let soc_records = simulator.run(samples);

    assert_eq!(soc_records[0].soc_start, 0.5);
    for pair in soc_records.windows(2) {
        assert_eq!(
            pair[0].soc_end, pair[1].soc_start,
            "SOC must carry over between {} and {}",
            pair[0].hour, pair[1].hour
        );
    }
}

#[test]
fn full_pipeline_is_reproducible_for_a_fixed_seed() {
    let export = |seed: u64| {
        let samples = simulate_frequency(common::horizon_start(), 6, 1, Some(seed));
        let mut simulator = SocSimulator::new(common::default_battery(), 0.5);
        let soc_records = simulator.run(samples);
        let prices = common::flat_price_table(6, 25.0);
        let result = calculate_revenue(&prices, &soc_records, &common::default_battery());

        let mut buf = Vec::new();
        write_csv(&result.hourly, &mut buf).expect("export should succeed");
        buf
    };

    assert_eq!(export(42), export(42));
    assert_ne!(export(42), export(43));
}

#[test]
fn tight_soc_window_loses_revenue_to_unavailability() {
    // A battery with almost no usable energy saturates quickly; a whole
    // month of winter activity must produce at least one unavailable hour,
    // and unavailable hours must earn nothing.
    let samples = simulate_frequency(common::horizon_start(), 720, 1, Some(42));
    let tight = fcr_sim::sim::BatteryConfig::new(5.0, 0.1, 0.90, 0.45, 0.55);
    let mut simulator = SocSimulator::new(tight.clone(), 0.5);
    let soc_records = simulator.run(samples);

    let unavailable = soc_records.iter().filter(|r| !r.available).count();
    assert!(unavailable > 0, "tight window should saturate at least once");

    let prices = common::flat_price_table(720, 20.0);
    let result = calculate_revenue(&prices, &soc_records, &tight);
    assert!(result.availability_pct < 100.0);
    for hour in result.hourly.iter().filter(|h| !h.available) {
        assert_eq!(hour.revenue_eur, 0.0);
    }
}
