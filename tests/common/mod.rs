//! Shared test fixtures for integration tests.

use chrono::{DateTime, TimeZone, Utc};

use fcr_sim::io::price::PriceRecord;
use fcr_sim::sim::BatteryConfig;

/// Midnight UTC on 2024-01-01, the start of every fixture horizon.
pub fn horizon_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Hourly price table from `horizon_start`, all hours at `price`.
pub fn flat_price_table(hours: usize, price: f64) -> Vec<PriceRecord> {
    (0..hours)
        .map(|h| PriceRecord {
            timestamp: horizon_start() + chrono::Duration::hours(h as i64),
            hour_number: (h % 24) as u32 + 1,
            price_eur_per_mw: price,
            volume_mw: 10.0,
        })
        .collect()
}

/// Default 1 MW / 2 MWh battery with a 20–80% SOC window.
pub fn default_battery() -> BatteryConfig {
    BatteryConfig::new(1.0, 2.0, 0.90, 0.20, 0.80)
}
