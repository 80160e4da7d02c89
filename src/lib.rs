//! Drives an 8-bit analog output from a capacitive stretch sensor.
//!
//! A [`StretchLoop`] reads the sensor once per sample interval. When the
//! reading changed it is clamped to the calibrated range, inverted so that
//! stretching raises the value, rescaled to `0..=255` by [`StretchMap`] and
//! written to the output. Unchanged readings write nothing.
//!
//! Hardware is reached through small capability traits ([`TouchSensor`],
//! [`Sampler`], [`AnalogOutput`], [`Clock`], [`Diagnostics`]). Failures
//! are reported on the diagnostic stream and through `log`, and never stop
//! the loop.
//!
//! # Examples
//!
//! ```no_run
//! use stretch_dac::{initialize, Config, FilteredSampler, StretchLoop};
//! # use stretch_dac::*;
//! # struct Pad;
//! # impl TouchSensor for Pad {
//! #     type Error = ();
//! #     fn init(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn configure_channel(&mut self, _: TouchChannel, _: u16) -> Result<(), ()> {
//! #         Ok(())
//! #     }
//! #     fn start_filter(&mut self, _: u32) -> Result<(), ()> { Ok(()) }
//! #     fn read_filtered(&mut self, _: TouchChannel) -> Result<u16, ()> { Ok(1400) }
//! #     fn set_count_mode(&mut self, _: TouchChannel, _: Slope, _: TieOption) -> Result<(), ()> {
//! #         Ok(())
//! #     }
//! #     fn set_voltage(&mut self, _: VoltageSettings) -> Result<(), ()> { Ok(()) }
//! #     fn threshold(&mut self, _: TouchChannel) -> Result<u16, ()> { Ok(0) }
//! #     fn count_mode(&mut self, _: TouchChannel) -> Result<(Slope, TieOption), ()> {
//! #         Ok((Slope::S7, TieOption::Low))
//! #     }
//! #     fn voltage(&mut self) -> Result<VoltageSettings, ()> { Ok(VoltageSettings::default()) }
//! #     fn measurement_time(&mut self) -> Result<MeasTime, ()> { Ok(MeasTime::default()) }
//! # }
//! # struct Dac;
//! # impl AnalogOutput for Dac {
//! #     type Error = ();
//! #     fn enable(&mut self, _: DacChannel) {}
//! #     fn write(&mut self, _: DacChannel, _: u8) -> Result<(), ()> { Ok(()) }
//! # }
//! # struct Millis;
//! # impl Clock for Millis { fn now_ms(&mut self) -> u64 { 0 } }
//! # let (mut sensor, mut dac, mut clock, mut serial) = (Pad, Dac, Millis, String::new());
//! # let mut delay = embedded_hal_mock::delay::MockNoop::new();
//!
//! let config = Config::default();
//! initialize(&mut sensor, &mut dac, &config, &mut serial, &mut delay);
//!
//! let sampler = FilteredSampler::new(sensor, config.touch_channel);
//! let start = clock.now_ms();
//! let stretch = StretchLoop::new(sampler, dac, serial, &config, start).unwrap();
//! stretch.run(&mut clock);
//! ```

#![cfg_attr(not(test), no_std)]

mod clock;
mod config;
mod diag;
mod interpolate;
#[cfg(test)]
mod mock;
mod monitor;
mod output;
mod sensor;
mod setup;
mod stretch;

pub use clock::{Cadence, Clock};
pub use config::{Config, ConfigError, MAX_CAP_VAL, MIN_CAP_VAL, SAMPLE_INTERVAL_MS};
pub use diag::{report_meas_time, report_slope, report_threshold, report_voltage, Diagnostics};
pub use monitor::{LoopState, StretchLoop, Tick};
pub use output::{startup_sweep, AnalogOutput, DacChannel};
pub use sensor::{
    AdcSampler, Attenuation, FilteredSampler, HighVoltage, LowVoltage, MeasTime, Sampler, Slope,
    TieOption, TouchChannel, TouchSensor, VoltageSettings,
};
pub use setup::{initialize, InitReport, SetupStep};
pub use stretch::{StretchMap, OUTPUT_MAX};
