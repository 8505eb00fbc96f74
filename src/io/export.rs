//! CSV export for the hourly revenue table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::revenue::HourlyRevenueRecord;

/// Column header for the hourly revenue export.
const HEADER: &str = "timestamp,price_eur_per_mw,available,revenue_eur,soc_start,soc_end";

/// Exports the hourly revenue table to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[HourlyRevenueRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes the hourly revenue table as CSV to any writer.
///
/// SOC columns are empty for hours without simulated SOC data (flat
/// availability mode, or price hours with no frequency coverage). Output
/// is deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[HourlyRevenueRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in records {
        wtr.write_record(&[
            r.timestamp.to_rfc3339(),
            format!("{:.2}", r.price_eur_per_mw),
            r.available.to_string(),
            format!("{:.2}", r.revenue_eur),
            r.soc_start.map(|s| format!("{s:.4}")).unwrap_or_default(),
            r.soc_end.map(|s| format!("{s:.4}")).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
