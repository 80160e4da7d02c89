use crate::config::{Config, ConfigError};
use crate::interpolate::interpolate;

/// Largest value the analog output accepts.
pub const OUTPUT_MAX: u8 = u8::MAX;

/// Maps raw capacitance onto the 8-bit output range so that stretching
/// the sensor (lower capacitance) raises the output.
///
/// A reading at or above `max_cap` is the unstretched baseline and maps
/// to `0`; a reading at or below `min_cap` maps to `255`. In between the
/// inverted reading is rescaled with floor rounding.
///
/// # Examples
///
/// ```
/// use stretch_dac::StretchMap;
///
/// let map = StretchMap::new(1200, 1500).unwrap();
///
/// assert_eq!(map.output(1500), 0);
/// assert_eq!(map.output(1200), 255);
/// assert_eq!(map.output(1350), 127);
/// assert_eq!(map.output(1600), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StretchMap {
    min_cap: u16,
    max_cap: u16,
}

impl StretchMap {
    /// Returns a map over `[min_cap, max_cap]`, or an error if the range
    /// is empty.
    pub fn new(min_cap: u16, max_cap: u16) -> Result<Self, ConfigError> {
        if max_cap <= min_cap {
            return Err(ConfigError::EmptyCapRange {
                min: min_cap,
                max: max_cap,
            });
        }
        Ok(Self { min_cap, max_cap })
    }

    /// Returns a map over the bounds of `config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(config.min_cap, config.max_cap)
    }

    /// Returns the reading that maps to the largest output.
    pub fn min_cap(&self) -> u16 {
        self.min_cap
    }

    /// Returns the reading that maps to zero.
    pub fn max_cap(&self) -> u16 {
        self.max_cap
    }

    /// Saturates `raw` to `[min_cap, max_cap]`.
    pub fn clamp(&self, raw: u16) -> u16 {
        raw.clamp(self.min_cap, self.max_cap)
    }

    /// Distance of a clamped reading below the baseline, in
    /// `[0, max_cap - min_cap]`.
    pub fn invert(&self, clamped: u16) -> u16 {
        self.max_cap - clamped
    }

    /// Full transform: clamp, invert, rescale to `[0, 255]`.
    pub fn output(&self, raw: u16) -> u8 {
        let span = u32::from(self.max_cap - self.min_cap);
        let inverted = u32::from(self.invert(self.clamp(raw)));
        let scaled = interpolate(0, span, 0, u32::from(OUTPUT_MAX), inverted);

        // interpolate stays within [y0, y1]
        scaled as u8
    }
}

impl Default for StretchMap {
    fn default() -> Self {
        Self {
            min_cap: crate::config::MIN_CAP_VAL,
            max_cap: crate::config::MAX_CAP_VAL,
        }
    }
}
