//! Scenario orchestration: frequency source, SOC fold, revenue aggregation.

use crate::config::ScenarioConfig;
use crate::freq::synth::{month_start_utc, simulate_frequency};
use crate::freq::{FrequencySample, FrequencySummary};
use crate::io::DataError;
use crate::io::frequency::load_frequency_data;
use crate::io::price::{PriceRecord, load_price_data};
use crate::revenue::{SimulationResult, calculate_revenue, calculate_simple_revenue};
use crate::sim::{BatteryConfig, HourlySocRecord, SocSimulator};

/// Everything a scenario run produces.
#[derive(Debug)]
pub struct RunOutput {
    /// Hourly revenue table and aggregates.
    pub result: SimulationResult,
    /// Hourly SOC records; empty in flat-availability mode.
    pub soc_records: Vec<HourlySocRecord>,
    /// Summary of the frequency series that drove the SOC fold, when one
    /// was simulated or loaded.
    pub frequency_summary: Option<FrequencySummary>,
}

/// Loads price data per the scenario and runs it end to end.
///
/// # Errors
///
/// Data-loading failures only; the configuration is expected to be
/// validated beforehand (see [`ScenarioConfig::validate`]).
pub fn run_scenario(cfg: &ScenarioConfig) -> Result<RunOutput, DataError> {
    let prices = load_price_data(&cfg.market.data_dir, cfg.market.year, &cfg.market.area)?;
    run_with_prices(cfg, &prices)
}

/// Runs a scenario against an already-loaded price table.
///
/// # Errors
///
/// [`DataError::MissingFrequencyData`] when `frequency.mode` is `"file"`
/// without a path; loader failures for an unreadable frequency file.
pub fn run_with_prices(
    cfg: &ScenarioConfig,
    prices: &[PriceRecord],
) -> Result<RunOutput, DataError> {
    let battery = BatteryConfig::new(
        cfg.battery.power_mw,
        cfg.battery.capacity_mwh,
        cfg.battery.efficiency,
        cfg.battery.soc_min,
        cfg.battery.soc_max,
    );

    match cfg.frequency.mode.as_str() {
        "flat" => Ok(RunOutput {
            result: calculate_simple_revenue(
                prices,
                battery.power_mw,
                cfg.frequency.flat_availability_pct,
            ),
            soc_records: Vec::new(),
            frequency_summary: None,
        }),
        "file" => {
            let path = cfg
                .frequency
                .data_file
                .as_deref()
                .ok_or(DataError::MissingFrequencyData)?;
            let samples = load_frequency_data(path)?;
            Ok(fold_and_aggregate(cfg, battery, prices, samples))
        }
        // "simulated" is the default once validation has run.
        _ => {
            let start_month = if cfg.frequency.season == "summer" { 6 } else { 1 };
            let start = month_start_utc(cfg.market.year, start_month);
            let samples = simulate_frequency(
                start,
                cfg.simulation.duration_hours(),
                cfg.simulation.resolution_seconds,
                cfg.frequency.seed,
            );
            Ok(fold_and_aggregate(cfg, battery, prices, samples))
        }
    }
}

fn fold_and_aggregate(
    cfg: &ScenarioConfig,
    battery: BatteryConfig,
    prices: &[PriceRecord],
    samples: Vec<FrequencySample>,
) -> RunOutput {
    let frequency_summary = FrequencySummary::from_samples(&samples);
    let mut simulator = SocSimulator::with_resolution(
        battery.clone(),
        cfg.battery.initial_soc,
        cfg.simulation.resolution_seconds,
    );
    let soc_records = simulator.run(samples);
    let result = calculate_revenue(prices, &soc_records, &battery);

    RunOutput {
        result,
        soc_records,
        frequency_summary: Some(frequency_summary),
    }
}
