use core::fmt;
use embedded_hal::blocking::delay::DelayMs;

/// 8-bit DAC channel (ESP32: channel 1 is GPIO25, channel 2 is GPIO26).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DacChannel {
    One,
    Two,
}

/// An analog output taking 8-bit values.
pub trait AnalogOutput {
    type Error: fmt::Debug;

    /// Enables `channel`.
    fn enable(&mut self, channel: DacChannel);

    /// Sets `channel` to `value`.
    fn write(&mut self, channel: DacChannel, value: u8) -> Result<(), Self::Error>;
}

const SWEEP_HIGH: u8 = 200;
const SWEEP_LOW: u8 = 50;
const SWEEP_HOLD_MS: u16 = 120;
const SWEEP_CYCLES: usize = 4;

/// Toggles the output between two levels for about a second and leaves it
/// at zero, so a scope or meter shows the device is ready.
///
/// Write errors are ignored; the sweep is purely a visual cue.
pub fn startup_sweep<O, D>(output: &mut O, channel: DacChannel, delay: &mut D)
where
    O: AnalogOutput,
    D: DelayMs<u16>,
{
    for _ in 0..SWEEP_CYCLES {
        let _ = output.write(channel, SWEEP_HIGH);
        delay.delay_ms(SWEEP_HOLD_MS);
        let _ = output.write(channel, SWEEP_LOW);
        delay.delay_ms(SWEEP_HOLD_MS);
    }
    let _ = output.write(channel, 0);
}
