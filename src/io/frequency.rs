//! Measured-frequency CSV ingestion and hourly aggregation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::freq::{FrequencySample, floor_to_hour};

use super::DataError;

/// Fallback layout for timestamps written without an offset; read as UTC.
const NAIVE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct RawFrequencyRow {
    timestamp: String,
    grid_frequency: f64,
}

/// Loads a frequency series from a two-column CSV (`timestamp`,
/// `grid_frequency`).
///
/// The loader assumes nothing about sample spacing; the SOC simulator's
/// availability tolerance is calibrated to 1-second data, so callers
/// feeding coarser files should set the simulator resolution to match.
///
/// # Errors
///
/// I/O and parse failures; an unparseable timestamp names the offending
/// value.
pub fn load_frequency_data(path: &Path) -> Result<Vec<FrequencySample>, DataError> {
    let file = File::open(path)?;
    read_frequency_samples(file, path)
}

/// Parses frequency rows from any reader.
pub fn read_frequency_samples<R: Read>(
    reader: R,
    source: &Path,
) -> Result<Vec<FrequencySample>, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut samples = Vec::new();

    for row in csv_reader.deserialize() {
        let raw: RawFrequencyRow = row?;
        let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| DataError::Malformed {
            path: source.to_path_buf(),
            message: format!("bad timestamp \"{}\"", raw.timestamp),
        })?;

        samples.push(FrequencySample {
            timestamp,
            hz: raw.grid_frequency,
        });
    }

    Ok(samples)
}

/// Accepts RFC 3339 or naive `YYYY-MM-DD HH:MM:SS` (read as UTC).
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, NAIVE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Per-hour descriptive statistics of a sub-hourly frequency series.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyFrequencyStats {
    /// Start of the hour.
    pub hour: DateTime<Utc>,
    /// Mean frequency over the hour (Hz).
    pub mean_hz: f64,
    /// Sample standard deviation over the hour (Hz).
    pub std_hz: f64,
    /// Minimum frequency (Hz).
    pub min_hz: f64,
    /// Maximum frequency (Hz).
    pub max_hz: f64,
    /// Number of samples in the hour.
    pub sample_count: usize,
}

/// Aggregates a frequency series to hourly statistics, in input order of
/// first appearance per hour. Samples are expected in timestamp order.
pub fn aggregate_to_hourly(samples: &[FrequencySample]) -> Vec<HourlyFrequencyStats> {
    let mut stats = Vec::new();
    let mut open: Option<(DateTime<Utc>, Vec<f64>)> = None;

    for sample in samples {
        let hour = floor_to_hour(sample.timestamp);
        match open.as_mut() {
            Some((open_hour, values)) if *open_hour == hour => values.push(sample.hz),
            _ => {
                if let Some((done_hour, values)) = open.take() {
                    stats.push(summarize_hour(done_hour, &values));
                }
                open = Some((hour, vec![sample.hz]));
            }
        }
    }

    if let Some((done_hour, values)) = open.take() {
        stats.push(summarize_hour(done_hour, &values));
    }
    stats
}

fn summarize_hour(hour: DateTime<Utc>, values: &[f64]) -> HourlyFrequencyStats {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if values.len() > 1 {
        let var_sum: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (var_sum / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    HourlyFrequencyStats {
        hour,
        mean_hz: mean,
        std_hz: std,
        min_hz: values.iter().copied().fold(f64::INFINITY, f64::min),
        max_hz: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        sample_count: values.len(),
    }
}
