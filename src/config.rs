use crate::output::DacChannel;
use crate::sensor::{Slope, TieOption, TouchChannel, VoltageSettings};
use thiserror::Error;

/// Largest raw reading seen for an unstretched belt.
pub const MAX_CAP_VAL: u16 = 1500;
/// Smallest raw reading seen at full stretch.
pub const MIN_CAP_VAL: u16 = 1200;
/// Time between sensor reads (ms).
pub const SAMPLE_INTERVAL_MS: u64 = 90;

/// Configuration for a [`StretchLoop`](crate::StretchLoop) and its
/// [`initialize`](crate::initialize) sequence.
///
/// - `max_cap`, `min_cap`: bounds of the clamp, `max_cap > min_cap`
/// - `sample_interval_ms`: cadence of sensor reads, `> 0`
/// - `touch_channel`: sensor pad to sample
/// - `dac_channel`: analog output to drive
/// - `threshold`: interrupt threshold passed when configuring the pad
/// - `filter_period_ms`: window of the sensor's internal filter
/// - `slope`, `tie_option`: charge/discharge counting mode
/// - `voltage`: excitation voltages
/// - `settle_ms`: wait after applying voltage settings
/// - `startup_sweep`: cycle the output once after setup to signal readiness
///
/// # Examples
///
/// ```
/// use stretch_dac::Config;
///
/// let config = Config {
///     max_cap: 1800,
///     min_cap: 1100,
///     ..Config::default()
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub max_cap: u16,
    pub min_cap: u16,
    pub sample_interval_ms: u64,
    pub touch_channel: TouchChannel,
    pub dac_channel: DacChannel,
    pub threshold: u16,
    pub filter_period_ms: u32,
    pub slope: Slope,
    pub tie_option: TieOption,
    pub voltage: VoltageSettings,
    pub settle_ms: u16,
    pub startup_sweep: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cap: MAX_CAP_VAL,
            min_cap: MIN_CAP_VAL,
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            touch_channel: TouchChannel::new(5),
            dac_channel: DacChannel::One,
            threshold: 0,
            filter_period_ms: 10,
            slope: Slope::S7,
            tie_option: TieOption::Low,
            voltage: VoltageSettings::default(),
            settle_ms: 10,
            startup_sweep: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_cap ({max}) must be greater than min_cap ({min})")]
    EmptyCapRange { min: u16, max: u16 },
    #[error("sample interval must be non-zero")]
    ZeroSampleInterval,
}

impl Config {
    /// Checks the documented ranges of every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cap <= self.min_cap {
            return Err(ConfigError::EmptyCapRange {
                min: self.min_cap,
                max: self.max_cap,
            });
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        Ok(())
    }
}
