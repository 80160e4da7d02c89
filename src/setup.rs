use crate::config::Config;
use crate::diag::{report_meas_time, report_slope, report_threshold, report_voltage, Diagnostics};
use crate::emit;
use crate::output::{startup_sweep, AnalogOutput};
use crate::sensor::TouchSensor;
use embedded_hal::blocking::delay::DelayMs;

/// A fallible step of [`initialize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SetupStep {
    Init = 0,
    ConfigureChannel = 1,
    StartFilter = 2,
    CountMode = 3,
    Voltage = 4,
}

/// Steps of [`initialize`] that reported an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    failed: u8,
}

impl InitReport {
    fn record(&mut self, step: SetupStep) {
        self.failed |= 1 << step as u8;
    }

    /// Returns `true` if `step` failed.
    pub fn failed(&self, step: SetupStep) -> bool {
        self.failed & (1 << step as u8) != 0
    }

    /// Returns `true` if every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Brings up the output and the sensor.
///
/// Every failing step is reported and skipped; the remaining steps still
/// run, leaving the driver defaults in place for whatever failed.
pub fn initialize<S, O, D, Delay>(
    sensor: &mut S,
    output: &mut O,
    config: &Config,
    diag: &mut D,
    delay: &mut Delay,
) -> InitReport
where
    S: TouchSensor,
    O: AnalogOutput,
    D: Diagnostics,
    Delay: DelayMs<u16>,
{
    let mut report = InitReport::default();
    let channel = config.touch_channel;

    output.enable(config.dac_channel);

    emit!(diag, "Touch sensor init.");
    if let Err(e) = sensor.init() {
        fail(&mut report, diag, SetupStep::Init, "Init failed", &e);
    }

    if let Err(e) = sensor.configure_channel(channel, config.threshold) {
        let step = SetupStep::ConfigureChannel;
        fail(&mut report, diag, step, "Channel config failed", &e);
    }

    if let Err(e) = sensor.start_filter(config.filter_period_ms) {
        fail(&mut report, diag, SetupStep::StartFilter, "Filter Start failed.", &e);
    }

    report_threshold(sensor, channel, diag);

    if let Err(e) = sensor.set_count_mode(channel, config.slope, config.tie_option) {
        fail(&mut report, diag, SetupStep::CountMode, "Slope setting failed", &e);
    }

    report_slope(sensor, channel, diag);

    if let Err(e) = sensor.set_voltage(config.voltage) {
        fail(&mut report, diag, SetupStep::Voltage, "Voltage setting failed", &e);
    }

    delay.delay_ms(config.settle_ms);
    report_voltage(sensor, diag);
    report_meas_time(sensor, diag);
    emit!(diag, "--------------------");

    if config.startup_sweep {
        startup_sweep(output, config.dac_channel, delay);
    }

    report
}

fn fail<D, E>(report: &mut InitReport, diag: &mut D, step: SetupStep, message: &str, error: &E)
where
    D: Diagnostics,
    E: core::fmt::Debug,
{
    log::warn!("setup step {:?} failed: {:?}", step, error);
    emit!(diag, "[ERROR] {}", message);
    report.record(step);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{FakeSensor, RecordingOutput};
    use crate::output::DacChannel;
    use crate::sensor::{Slope, TieOption, TouchChannel, VoltageSettings};
    use embedded_hal_mock::delay::MockNoop;

    fn run(
        sensor: &mut FakeSensor,
        output: &mut RecordingOutput,
        config: &Config,
    ) -> (InitReport, String) {
        let mut out = String::new();
        let report = initialize(sensor, output, config, &mut out, &mut MockNoop::new());
        (report, out)
    }

    #[test]
    fn configures_everything() {
        let mut sensor = FakeSensor::default();
        let mut output = RecordingOutput::default();
        let (report, out) = run(&mut sensor, &mut output, &Config::default());

        assert!(report.is_clean());
        assert_eq!(output.enabled, [DacChannel::One]);
        assert!(output.writes.is_empty());
        assert_eq!(sensor.init_calls, 1);
        assert_eq!(sensor.configured, Some((TouchChannel::new(5), 0)));
        assert_eq!(sensor.filter_period_ms, Some(10));
        assert_eq!(sensor.mode, Some((Slope::S7, TieOption::Low)));
        assert_eq!(sensor.volts, Some(VoltageSettings::default()));
        assert!(!out.contains("[ERROR]"));
        assert!(out.ends_with("--------------------\n"));
    }

    #[test]
    fn failures_do_not_abort() {
        let mut sensor = FakeSensor::default();
        sensor.faults.init = true;
        sensor.faults.filter = true;
        sensor.faults.voltage = true;
        let mut output = RecordingOutput::default();
        let (report, out) = run(&mut sensor, &mut output, &Config::default());

        assert!(!report.is_clean());
        assert!(report.failed(SetupStep::Init));
        assert!(report.failed(SetupStep::StartFilter));
        assert!(report.failed(SetupStep::Voltage));
        assert!(!report.failed(SetupStep::ConfigureChannel));
        assert!(!report.failed(SetupStep::CountMode));

        assert_eq!(sensor.mode, Some((Slope::S7, TieOption::Low)));
        assert!(out.contains("[ERROR] Init failed\n"));
        assert!(out.contains("[ERROR] Filter Start failed.\n"));
        assert!(out.contains("[ERROR] Voltage setting failed\n"));
        assert_eq!(out.matches("[ERROR]").count(), 3);
    }

    #[test]
    fn every_step_failing_still_completes() {
        let mut sensor = FakeSensor::default();
        sensor.faults.init = true;
        sensor.faults.configure = true;
        sensor.faults.filter = true;
        sensor.faults.count_mode = true;
        sensor.faults.voltage = true;
        let mut output = RecordingOutput::default();
        let config = Config {
            startup_sweep: true,
            ..Config::default()
        };
        let (report, out) = run(&mut sensor, &mut output, &config);

        for step in [
            SetupStep::Init,
            SetupStep::ConfigureChannel,
            SetupStep::StartFilter,
            SetupStep::CountMode,
            SetupStep::Voltage,
        ] {
            assert!(report.failed(step), "{:?} not recorded", step);
        }

        assert_eq!(sensor.init_calls, 1);
        assert!(out.contains("[ERROR] Channel config failed\n"));
        assert!(out.contains("[ERROR] Slope setting failed\n"));
        assert_eq!(out.matches("[ERROR]").count(), 5);
        assert!(out.contains("Get Measurement Time: Status ok"));
        assert_eq!(output.enabled, [DacChannel::One]);
        assert_eq!(output.level(), Some(0));
    }

    #[test]
    fn optional_sweep() {
        let mut sensor = FakeSensor::default();
        let mut output = RecordingOutput::default();
        let config = Config {
            startup_sweep: true,
            dac_channel: DacChannel::Two,
            ..Config::default()
        };
        run(&mut sensor, &mut output, &config);

        assert_eq!(output.enabled, [DacChannel::Two]);
        assert_eq!(output.writes.len(), 9);
        assert_eq!(output.level(), Some(0));
    }
}
