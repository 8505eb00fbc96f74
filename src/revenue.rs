//! Revenue aggregation: hourly prices joined with SOC availability.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::freq::floor_to_hour;
use crate::io::price::PriceRecord;
use crate::sim::{BatteryConfig, HourlySocRecord};

/// Revenue and availability for one priced hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRevenueRecord {
    /// Hour timestamp from the price table.
    pub timestamp: DateTime<Utc>,
    /// FCR-N capacity price in EUR per MW.
    pub price_eur_per_mw: f64,
    /// Whether the battery was available this hour.
    pub available: bool,
    /// Earned revenue in EUR.
    pub revenue_eur: f64,
    /// SOC at the start of the hour, when simulated.
    pub soc_start: Option<f64>,
    /// SOC at the end of the hour, when simulated.
    pub soc_end: Option<f64>,
}

/// Full simulation output: the hourly table plus aggregate scalars.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// One record per priced hour, in price-table order.
    pub hourly: Vec<HourlyRevenueRecord>,
    /// Sum of hourly revenue in EUR.
    pub total_revenue_eur: f64,
    /// Hours counted as available.
    pub available_hours: usize,
    /// Total priced hours.
    pub total_hours: usize,
    /// Share of available hours (%).
    pub availability_pct: f64,
    /// Mean price over all priced hours (EUR/MW).
    pub avg_price_eur: f64,
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- FCR-N Revenue Summary ---")?;
        writeln!(f, "Total revenue:   {:.2} EUR", self.total_revenue_eur)?;
        writeln!(
            f,
            "Available hours: {}/{} ({:.1}%)",
            self.available_hours, self.total_hours, self.availability_pct
        )?;
        write!(f, "Average price:   {:.2} EUR/MW", self.avg_price_eur)
    }
}

/// Joins the price table with simulated SOC records.
///
/// Each priced hour earns `power_mw * price` when the battery was available
/// and nothing otherwise. Hours present in the price table but absent from
/// the SOC table default to available: no frequency data means no observed
/// limit violation.
pub fn calculate_revenue(
    prices: &[PriceRecord],
    soc_records: &[HourlySocRecord],
    config: &BatteryConfig,
) -> SimulationResult {
    let by_hour: HashMap<DateTime<Utc>, &HourlySocRecord> =
        soc_records.iter().map(|r| (r.hour, r)).collect();

    let mut hourly = Vec::with_capacity(prices.len());
    let mut total_revenue = 0.0;
    let mut available_hours = 0;
    let mut price_sum = 0.0;

    for p in prices {
        let soc = by_hour.get(&floor_to_hour(p.timestamp)).copied();
        let available = soc.is_none_or(|r| r.available);
        let revenue_eur = if available {
            config.power_mw * p.price_eur_per_mw
        } else {
            0.0
        };

        total_revenue += revenue_eur;
        price_sum += p.price_eur_per_mw;
        if available {
            available_hours += 1;
        }

        hourly.push(HourlyRevenueRecord {
            timestamp: p.timestamp,
            price_eur_per_mw: p.price_eur_per_mw,
            available,
            revenue_eur,
            soc_start: soc.map(|r| r.soc_start),
            soc_end: soc.map(|r| r.soc_end),
        });
    }

    let total_hours = hourly.len();
    SimulationResult {
        total_revenue_eur: total_revenue,
        available_hours,
        total_hours,
        availability_pct: pct(available_hours as f64, total_hours),
        avg_price_eur: mean(price_sum, total_hours),
        hourly,
    }
}

/// Revenue without SOC simulation: a uniform availability factor scales
/// every hour instead of a per-hour boolean gate.
pub fn calculate_simple_revenue(
    prices: &[PriceRecord],
    power_mw: f64,
    availability_pct: f64,
) -> SimulationResult {
    let factor = availability_pct / 100.0;

    let mut total_revenue = 0.0;
    let mut price_sum = 0.0;
    let hourly: Vec<HourlyRevenueRecord> = prices
        .iter()
        .map(|p| {
            let revenue_eur = power_mw * p.price_eur_per_mw * factor;
            total_revenue += revenue_eur;
            price_sum += p.price_eur_per_mw;
            HourlyRevenueRecord {
                timestamp: p.timestamp,
                price_eur_per_mw: p.price_eur_per_mw,
                available: true,
                revenue_eur,
                soc_start: None,
                soc_end: None,
            }
        })
        .collect();

    let total_hours = hourly.len();
    SimulationResult {
        total_revenue_eur: total_revenue,
        available_hours: (total_hours as f64 * factor) as usize,
        total_hours,
        availability_pct,
        avg_price_eur: mean(price_sum, total_hours),
        hourly,
    }
}

fn pct(numerator: f64, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator / denominator as f64 * 100.0
    } else {
        0.0
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 { sum / count as f64 } else { 0.0 }
}
