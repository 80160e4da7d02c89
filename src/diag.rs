use crate::sensor::{TouchChannel, TouchSensor};
use core::fmt;

/// Sink for human-readable status lines. Emission never fails from the
/// caller's point of view.
pub trait Diagnostics {
    /// Emits `line` followed by a line break.
    fn emit(&mut self, line: fmt::Arguments<'_>);
}

/// Any text writer (a serial port, a `String` in tests) takes one line
/// per call. Write errors are dropped.
impl<W: fmt::Write> Diagnostics for W {
    fn emit(&mut self, line: fmt::Arguments<'_>) {
        let _ = self.write_fmt(line);
        let _ = self.write_char('\n');
    }
}

/// Emits a formatted line on a [`Diagnostics`] sink.
#[macro_export]
macro_rules! emit {
    ($diag:expr, $($arg:tt)*) => {
        $crate::Diagnostics::emit($diag, format_args!($($arg)*))
    };
}

/// Emits the interrupt threshold of `channel`.
pub fn report_threshold<S, D>(sensor: &mut S, channel: TouchChannel, diag: &mut D)
where
    S: TouchSensor,
    D: Diagnostics,
{
    match sensor.threshold(channel) {
        Ok(threshold) => emit!(diag, "Threshold: Status ok, Threshold {}", threshold),
        Err(e) => emit!(diag, "Threshold: Status {:?}", e),
    }
}

/// Emits the slope and initial level of `channel`.
pub fn report_slope<S, D>(sensor: &mut S, channel: TouchChannel, diag: &mut D)
where
    S: TouchSensor,
    D: Diagnostics,
{
    match sensor.count_mode(channel) {
        Ok((slope, tie)) => emit!(
            diag,
            "Slope: Status ok, Slope {}, Init Voltage {}",
            slope as u8,
            tie as u8
        ),
        Err(e) => emit!(diag, "Slope: Status {:?}", e),
    }
}

/// Emits the excitation voltages.
pub fn report_voltage<S, D>(sensor: &mut S, diag: &mut D)
where
    S: TouchSensor,
    D: Diagnostics,
{
    match sensor.voltage() {
        Ok(v) => emit!(
            diag,
            "Voltages: Status ok, VoltH {}, VoltL {}, VoltAtten {}",
            v.high as u8,
            v.low as u8,
            v.attenuation as u8
        ),
        Err(e) => emit!(diag, "Voltages: Status {:?}", e),
    }
}

/// Emits the sleep and measurement cycle counts.
pub fn report_meas_time<S, D>(sensor: &mut S, diag: &mut D)
where
    S: TouchSensor,
    D: Diagnostics,
{
    match sensor.measurement_time() {
        Ok(t) => emit!(
            diag,
            "Get Measurement Time: Status ok, NumOfSleepCycles {}, Measurements Cycles: {}",
            t.sleep_cycles,
            t.meas_cycles
        ),
        Err(e) => emit!(diag, "Get Measurement Time: Status {:?}", e),
    }
}
