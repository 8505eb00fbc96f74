//! Seasonal frequency-quality statistics for the Nordic synchronous area.
//!
//! Aggregates are taken over one calendar reference month of measured data
//! (Fingrid, 2024) and parameterize the synthetic generator: how many
//! excursions outside the 49.9–50.1 Hz band occur, how long they last, and
//! how they split between under- and over-frequency.

/// Hours in the reference month the aggregate counts are normalized over.
pub const REFERENCE_MONTH_HOURS: f64 = 30.0 * 24.0;

/// Deviation statistics outside the normal band over one reference month.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyStats {
    /// Human-readable profile name.
    pub name: &'static str,
    /// Total minutes spent outside the band.
    pub total_minutes_outside: f64,
    /// Share of the month spent outside the band (%).
    pub pct_outside: f64,
    /// Number of distinct excursion events.
    pub events_count: u32,
    /// Minutes below 49.9 Hz.
    pub under_minutes: f64,
    /// Minutes above 50.1 Hz.
    pub over_minutes: f64,
    /// Events that went below 49.9 Hz.
    pub under_events: u32,
    /// Events that went above 50.1 Hz.
    pub over_events: u32,
}

impl FrequencyStats {
    /// Mean excursion duration in seconds.
    pub fn avg_event_duration_secs(&self) -> f64 {
        self.total_minutes_outside * 60.0 / self.events_count as f64
    }

    /// Expected excursion events per hour.
    pub fn events_per_hour(&self) -> f64 {
        self.events_count as f64 / REFERENCE_MONTH_HOURS
    }

    /// Probability that an excursion goes below the band.
    pub fn under_ratio(&self) -> f64 {
        self.under_events as f64 / self.events_count as f64
    }
}

/// Winter reference profile (January): fewer but longer excursions.
pub const WINTER_STATS: FrequencyStats = FrequencyStats {
    name: "Winter (January)",
    total_minutes_outside: 759.0,
    pct_outside: 1.69,
    events_count: 2125,
    under_minutes: 335.0,
    over_minutes: 424.0,
    under_events: 955,
    over_events: 1170,
};

/// Summer reference profile (June): more frequent but shorter excursions.
pub const SUMMER_STATS: FrequencyStats = FrequencyStats {
    name: "Summer (June)",
    total_minutes_outside: 555.0,
    pct_outside: 1.33,
    events_count: 2129,
    under_minutes: 233.0,
    over_minutes: 322.0,
    under_events: 967,
    over_events: 1162,
};

/// Returns the seasonal profile for a calendar month (1–12).
///
/// Winter pattern covers Nov–Mar; anything else falls on the summer
/// pattern, so the lookup is total over all inputs.
pub fn seasonal_stats(month: u32) -> &'static FrequencyStats {
    match month {
        11 | 12 | 1 | 2 | 3 => &WINTER_STATS,
        _ => &SUMMER_STATS,
    }
}
