//! Second-by-second SOC evolution, folded into hourly availability records.

use chrono::{DateTime, Utc};

use crate::freq::{FrequencySample, floor_to_hour};

use super::activation::fcr_n_activation;
use super::battery::BatteryConfig;

/// An hour is unavailable once this many samples hit an SOC limit.
///
/// The threshold is calibrated to 1-second data ("less than one minute at
/// the limits") and is deliberately a fixed sample count, not a fraction of
/// the hour, so coarser input makes it stricter in wall-clock terms.
pub const AVAILABILITY_TOLERANCE_SAMPLES: u32 = 60;

/// SOC and availability aggregate for one wall-clock hour.
///
/// Records are snapshots of a single continuous energy trajectory: for
/// contiguous hours, `soc_start` equals the previous record's `soc_end`.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySocRecord {
    /// Start of the hour (timestamp floored).
    pub hour: DateTime<Utc>,
    /// SOC fraction at the start of the hour.
    pub soc_start: f64,
    /// SOC fraction at the end of the hour.
    pub soc_end: f64,
    /// Net SOC change over the hour.
    pub soc_change: f64,
    /// Samples in this hour where a limit was hit and the state clamped.
    pub unavailable_seconds: u32,
    /// Whether the battery counts as available for the whole hour.
    pub available: bool,
}

/// Steps a battery's stored energy through a frequency series and emits one
/// [`HourlySocRecord`] per encountered hour.
///
/// Owns the single mutable energy scalar for the whole horizon; hours are
/// never reset, so state carries across hour boundaries (and across gaps —
/// missing hours are simply skipped, with no interpolation).
#[derive(Debug, Clone)]
pub struct SocSimulator {
    config: BatteryConfig,
    resolution_seconds: u32,
    current_energy_mwh: f64,
}

struct OpenHour {
    hour: DateTime<Utc>,
    start_energy_mwh: f64,
    unavailable: u32,
}

impl SocSimulator {
    /// Creates a simulator for 1-second frequency data.
    ///
    /// # Panics
    ///
    /// Panics if `start_soc` is outside [0, 1].
    pub fn new(config: BatteryConfig, start_soc: f64) -> Self {
        Self::with_resolution(config, start_soc, 1)
    }

    /// Creates a simulator for data at an explicit sample spacing.
    ///
    /// The energy delta of each sample scales with `resolution_seconds`;
    /// the availability tolerance does not (see
    /// [`AVAILABILITY_TOLERANCE_SAMPLES`]).
    ///
    /// # Panics
    ///
    /// Panics if `start_soc` is outside [0, 1] or `resolution_seconds` is 0.
    pub fn with_resolution(config: BatteryConfig, start_soc: f64, resolution_seconds: u32) -> Self {
        assert!(
            (0.0..=1.0).contains(&start_soc),
            "start_soc must be in [0, 1]"
        );
        assert!(resolution_seconds > 0, "resolution_seconds must be > 0");

        let current_energy_mwh = config.capacity_mwh * start_soc;
        Self {
            config,
            resolution_seconds,
            current_energy_mwh,
        }
    }

    /// Current SOC as a fraction of capacity.
    pub fn soc(&self) -> f64 {
        self.current_energy_mwh / self.config.capacity_mwh
    }

    /// Advances the energy state by one sample; returns true if a limit was
    /// hit and the state clamped.
    ///
    /// Clamping is sticky: the next sample starts from the clamped value,
    /// not the unclamped trajectory.
    fn step(&mut self, hz: f64) -> bool {
        let power_mw = fcr_n_activation(hz, self.config.power_mw);
        let mut delta_mwh = power_mw * self.resolution_seconds as f64 / 3600.0;

        // Round-trip losses split geometrically between the two legs:
        // delivering energy to the grid drains extra from storage, stored
        // charge arrives reduced.
        let leg_efficiency = self.config.efficiency.sqrt();
        if delta_mwh > 0.0 {
            delta_mwh /= leg_efficiency;
        } else {
            delta_mwh *= leg_efficiency;
        }

        let tentative = self.current_energy_mwh - delta_mwh;
        let min_e = self.config.min_energy_mwh();
        let max_e = self.config.max_energy_mwh();
        let clamped = tentative < min_e || tentative > max_e;

        self.current_energy_mwh = tentative.clamp(min_e, max_e);
        clamped
    }

    /// Folds a frequency series in timestamp order into hourly records.
    ///
    /// Streams: samples are bucketed by their floored hour as they arrive,
    /// so the full series never needs to be grouped in memory. An empty
    /// series yields no records.
    pub fn run<I>(&mut self, samples: I) -> Vec<HourlySocRecord>
    where
        I: IntoIterator<Item = FrequencySample>,
    {
        let mut records = Vec::new();
        let mut open: Option<OpenHour> = None;

        for sample in samples {
            let hour = floor_to_hour(sample.timestamp);
            if open.as_ref().is_none_or(|o| o.hour != hour) {
                if let Some(done) = open.take() {
                    records.push(self.close_hour(done));
                }
                open = Some(OpenHour {
                    hour,
                    start_energy_mwh: self.current_energy_mwh,
                    unavailable: 0,
                });
            }

            let clamped = self.step(sample.hz);
            if clamped {
                if let Some(o) = open.as_mut() {
                    o.unavailable += 1;
                }
            }
        }

        if let Some(done) = open.take() {
            records.push(self.close_hour(done));
        }
        records
    }

    fn close_hour(&self, open: OpenHour) -> HourlySocRecord {
        let capacity = self.config.capacity_mwh;
        let soc_start = open.start_energy_mwh / capacity;
        let soc_end = self.current_energy_mwh / capacity;
        HourlySocRecord {
            hour: open.hour,
            soc_start,
            soc_end,
            soc_change: soc_end - soc_start,
            unavailable_seconds: open.unavailable,
            available: open.unavailable < AVAILABILITY_TOLERANCE_SAMPLES,
        }
    }
}
