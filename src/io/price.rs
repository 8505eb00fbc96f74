//! FCR-N capacity price ingestion from the market operator's CSV dumps.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::DataError;

/// Timestamp layout of the `Time(Local)` column: localized with offset.
const TIME_LOCAL_FORMAT: &str = "%d.%m.%Y %H:%M:%S %z";

/// File name of one year's price dump inside the data directory.
fn price_file_name(year: i32) -> String {
    format!("PrimaryReservesD-1-{year}.csv")
}

/// One hour of FCR-N market data for a single area.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    /// Delivery hour, converted to UTC.
    pub timestamp: DateTime<Utc>,
    /// 1-based hour-of-day index from the source table.
    pub hour_number: u32,
    /// Capacity price in EUR per MW.
    pub price_eur_per_mw: f64,
    /// Traded volume in MW.
    pub volume_mw: f64,
}

/// Raw CSV row as published; only rows for the selected area are kept.
#[derive(Debug, Deserialize)]
struct RawPriceRow {
    #[serde(rename = "Time(Local)")]
    time_local: String,
    #[serde(rename = "Hournumber")]
    hour_number: u32,
    #[serde(rename = "Area")]
    area: String,
    #[serde(rename = "FCR-N Price EUR/MW")]
    price_eur_per_mw: f64,
    #[serde(rename = "FCR-N Volume MW")]
    volume_mw: f64,
}

/// Loads one year of price data for a market area from `data_dir`.
///
/// # Errors
///
/// [`DataError::PriceDataNotFound`] when no file exists for the year;
/// parse and I/O failures otherwise. There is no retry path — the data is
/// static.
pub fn load_price_data(data_dir: &Path, year: i32, area: &str) -> Result<Vec<PriceRecord>, DataError> {
    let path = data_dir.join(price_file_name(year));
    if !path.exists() {
        return Err(DataError::PriceDataNotFound { year, path });
    }

    let file = File::open(&path)?;
    read_price_records(file, area, &path)
}

/// Parses price rows from any reader, keeping only `area` rows, sorted
/// ascending by timestamp.
pub fn read_price_records<R: Read>(
    reader: R,
    area: &str,
    source: &Path,
) -> Result<Vec<PriceRecord>, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize() {
        let raw: RawPriceRow = row?;
        if raw.area != area {
            continue;
        }

        let timestamp = DateTime::parse_from_str(&raw.time_local, TIME_LOCAL_FORMAT)
            .map_err(|e| DataError::Malformed {
                path: source.to_path_buf(),
                message: format!("bad timestamp \"{}\": {e}", raw.time_local),
            })?
            .with_timezone(&Utc);

        records.push(PriceRecord {
            timestamp,
            hour_number: raw.hour_number,
            price_eur_per_mw: raw.price_eur_per_mw,
            volume_mw: raw.volume_mw,
        });
    }

    records.sort_by_key(|r| r.timestamp);
    Ok(records)
}

/// Years for which a price dump is present in `data_dir`.
///
/// Scans for `PrimaryReservesD-1-<year>.csv` files; unreadable directories
/// yield an empty list rather than an error, matching how the selection UI
/// treats a missing data folder.
pub fn available_years(data_dir: &Path) -> Vec<i32> {
    let Ok(entries) = std::fs::read_dir(data_dir) else {
        return Vec::new();
    };

    let mut years: Vec<i32> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_str()?;
            let year = name
                .strip_prefix("PrimaryReservesD-1-")?
                .strip_suffix(".csv")?;
            year.parse().ok()
        })
        .collect();
    years.sort_unstable();
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Time(Local),Hournumber,Area,FCR-N Price EUR/MW,FCR-N Volume MW
02.01.2024 01:00:00 +01:00,2,NO1,21.50,12.0
01.01.2024 00:00:00 +01:00,1,NO1,18.00,10.0
01.01.2024 00:00:00 +01:00,1,SE3,44.00,8.0
01.01.2024 01:00:00 +01:00,2,NO1,19.25,11.0
";

    fn parse(area: &str) -> Vec<PriceRecord> {
        read_price_records(SAMPLE_CSV.as_bytes(), area, Path::new("test.csv"))
            .expect("sample CSV should parse")
    }

    #[test]
    fn keeps_only_selected_area() {
        let records = parse("NO1");
        assert_eq!(records.len(), 3);
        let se3 = parse("SE3");
        assert_eq!(se3.len(), 1);
        assert_eq!(se3[0].price_eur_per_mw, 44.0);
    }

    #[test]
    fn sorts_ascending_by_timestamp() {
        let records = parse("NO1");
        for pair in records.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
        assert_eq!(records[0].price_eur_per_mw, 18.00);
    }

    #[test]
    fn localized_timestamps_convert_to_utc() {
        let records = parse("NO1");
        // 01.01.2024 00:00 +01:00 is 2023-12-31T23:00Z.
        assert_eq!(
            records[0].timestamp.to_rfc3339(),
            "2023-12-31T23:00:00+00:00"
        );
    }

    #[test]
    fn malformed_timestamp_is_reported_with_source() {
        let bad = "\
Time(Local),Hournumber,Area,FCR-N Price EUR/MW,FCR-N Volume MW
not-a-date,1,NO1,18.00,10.0
";
        let err = read_price_records(bad.as_bytes(), "NO1", Path::new("broken.csv"))
            .expect_err("bad timestamp should fail");
        let text = err.to_string();
        assert!(text.contains("broken.csv"), "got: {text}");
        assert!(text.contains("not-a-date"), "got: {text}");
    }

    #[test]
    fn missing_price_file_is_a_distinct_condition() {
        let err = load_price_data(Path::new("/nonexistent-dir"), 2024, "NO1")
            .expect_err("missing file should fail");
        assert!(matches!(err, DataError::PriceDataNotFound { year: 2024, .. }));
    }

    #[test]
    fn available_years_scans_directory_names() {
        let dir = std::env::temp_dir().join("fcr-sim-price-years-test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        for year in [2025, 2024] {
            std::fs::write(dir.join(price_file_name(year)), "x").expect("write probe file");
        }
        std::fs::write(dir.join("unrelated.csv"), "x").expect("write probe file");

        assert_eq!(available_years(&dir), vec![2024, 2025]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn available_years_of_missing_dir_is_empty() {
        assert!(available_years(Path::new("/nonexistent-dir")).is_empty());
    }
}
