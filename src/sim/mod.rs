//! Battery SOC simulation under the FCR-N activation curve.

pub mod activation;
pub mod battery;
pub mod soc;

pub use activation::fcr_n_activation;
pub use battery::BatteryConfig;
pub use soc::{AVAILABILITY_TOLERANCE_SAMPLES, HourlySocRecord, SocSimulator};
