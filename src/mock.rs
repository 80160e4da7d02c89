//! Host-side fakes for the hardware capabilities.

use crate::output::{AnalogOutput, DacChannel};
use crate::sensor::{MeasTime, Slope, TieOption, TouchChannel, TouchSensor, VoltageSettings};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorFault;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputFault;

/// Which configuration calls of a [`FakeSensor`] fail.
#[derive(Clone, Copy, Debug, Default)]
pub struct Faults {
    pub init: bool,
    pub configure: bool,
    pub filter: bool,
    pub count_mode: bool,
    pub voltage: bool,
    pub getters: bool,
}

/// Touch sensor replaying a fixed sequence of filtered readings. Once the
/// sequence runs out the last successful value repeats.
#[derive(Debug, Default)]
pub struct FakeSensor {
    readings: VecDeque<Result<u16, SensorFault>>,
    last_value: u16,
    pub faults: Faults,
    pub init_calls: usize,
    pub filtered_reads: usize,
    pub last_read_channel: Option<TouchChannel>,
    pub configured: Option<(TouchChannel, u16)>,
    pub filter_period_ms: Option<u32>,
    pub mode: Option<(Slope, TieOption)>,
    pub volts: Option<VoltageSettings>,
}

impl FakeSensor {
    pub fn with_readings(readings: &[Result<u16, SensorFault>]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn step(&self, failing: bool) -> Result<(), SensorFault> {
        if failing {
            Err(SensorFault)
        } else {
            Ok(())
        }
    }
}

impl TouchSensor for FakeSensor {
    type Error = SensorFault;

    fn init(&mut self) -> Result<(), SensorFault> {
        self.init_calls += 1;
        self.step(self.faults.init)
    }

    fn configure_channel(
        &mut self,
        channel: TouchChannel,
        threshold: u16,
    ) -> Result<(), SensorFault> {
        self.step(self.faults.configure)?;
        self.configured = Some((channel, threshold));
        Ok(())
    }

    fn start_filter(&mut self, period_ms: u32) -> Result<(), SensorFault> {
        self.step(self.faults.filter)?;
        self.filter_period_ms = Some(period_ms);
        Ok(())
    }

    fn read_filtered(&mut self, channel: TouchChannel) -> Result<u16, SensorFault> {
        self.filtered_reads += 1;
        self.last_read_channel = Some(channel);
        let reading = self.readings.pop_front().unwrap_or(Ok(self.last_value));
        if let Ok(value) = reading {
            self.last_value = value;
        }
        reading
    }

    fn set_count_mode(
        &mut self,
        _channel: TouchChannel,
        slope: Slope,
        tie: TieOption,
    ) -> Result<(), SensorFault> {
        self.step(self.faults.count_mode)?;
        self.mode = Some((slope, tie));
        Ok(())
    }

    fn set_voltage(&mut self, voltage: VoltageSettings) -> Result<(), SensorFault> {
        self.step(self.faults.voltage)?;
        self.volts = Some(voltage);
        Ok(())
    }

    fn threshold(&mut self, _channel: TouchChannel) -> Result<u16, SensorFault> {
        self.step(self.faults.getters)?;
        Ok(self.configured.map_or(0, |(_, threshold)| threshold))
    }

    fn count_mode(&mut self, _channel: TouchChannel) -> Result<(Slope, TieOption), SensorFault> {
        self.step(self.faults.getters)?;
        Ok(self.mode.unwrap_or((Slope::S4, TieOption::Low)))
    }

    fn voltage(&mut self) -> Result<VoltageSettings, SensorFault> {
        self.step(self.faults.getters)?;
        Ok(self.volts.unwrap_or_default())
    }

    fn measurement_time(&mut self) -> Result<MeasTime, SensorFault> {
        self.step(self.faults.getters)?;
        Ok(MeasTime {
            sleep_cycles: 4096,
            meas_cycles: 32767,
        })
    }
}

/// Analog output that records every attempted write.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub enabled: Vec<DacChannel>,
    pub writes: Vec<(DacChannel, u8)>,
    pub fail: bool,
    last_written: Option<u8>,
}

impl RecordingOutput {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Last value the output accepted.
    pub fn level(&self) -> Option<u8> {
        self.last_written
    }
}

impl AnalogOutput for RecordingOutput {
    type Error = OutputFault;

    fn enable(&mut self, channel: DacChannel) {
        self.enabled.push(channel);
    }

    fn write(&mut self, channel: DacChannel, value: u8) -> Result<(), OutputFault> {
        self.writes.push((channel, value));
        if self.fail {
            return Err(OutputFault);
        }
        self.last_written = Some(value);
        Ok(())
    }
}
