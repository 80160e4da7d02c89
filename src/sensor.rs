use core::fmt;
use core::marker::PhantomData;
use embedded_hal::adc::{Channel, OneShot};

/// Index of a capacitive touch pad (ESP32: `T0`..`T9`, `T5` is GPIO12).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchChannel(u8);

impl TouchChannel {
    /// Returns the pad with the given index.
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Returns the pad index.
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Charge/discharge slope of the measurement, `S1` slowest, `S7` fastest.
/// `S0` disables the pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Slope {
    S0 = 0,
    S1 = 1,
    S2 = 2,
    S3 = 3,
    S4 = 4,
    S5 = 5,
    S6 = 6,
    S7 = 7,
}

/// Initial level of the pad at the start of a measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TieOption {
    Low = 0,
    High = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum HighVoltage {
    V2_4 = 0,
    V2_5 = 1,
    V2_6 = 2,
    V2_7 = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LowVoltage {
    V0_5 = 0,
    V0_6 = 1,
    V0_7 = 2,
    V0_8 = 3,
}

/// Attenuation applied to the high reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Attenuation {
    V1_5 = 0,
    V1_0 = 1,
    V0_5 = 2,
    V0 = 3,
}

/// Excitation voltages of the touch peripheral.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoltageSettings {
    pub high: HighVoltage,
    pub low: LowVoltage,
    pub attenuation: Attenuation,
}

impl Default for VoltageSettings {
    fn default() -> Self {
        Self {
            high: HighVoltage::V2_4,
            low: LowVoltage::V0_8,
            attenuation: Attenuation::V1_5,
        }
    }
}

/// Sleep and measurement cycle counts of the touch peripheral.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeasTime {
    pub sleep_cycles: u16,
    pub meas_cycles: u16,
}

/// A capacitive touch peripheral.
///
/// Only [`read_filtered`](TouchSensor::read_filtered) is used for
/// sampling; it requires [`start_filter`](TouchSensor::start_filter) to
/// have been called. The getters have no side effects and exist for
/// reporting.
pub trait TouchSensor {
    type Error: fmt::Debug;

    /// Powers up the touch peripheral.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Enables `channel` with the given interrupt threshold.
    fn configure_channel(
        &mut self,
        channel: TouchChannel,
        threshold: u16,
    ) -> Result<(), Self::Error>;

    /// Starts the internal filter with a window of `period_ms`.
    fn start_filter(&mut self, period_ms: u32) -> Result<(), Self::Error>;

    /// Returns the latest filtered reading of `channel`.
    fn read_filtered(&mut self, channel: TouchChannel) -> Result<u16, Self::Error>;

    /// Sets the charge/discharge slope and initial level of `channel`.
    fn set_count_mode(
        &mut self,
        channel: TouchChannel,
        slope: Slope,
        tie: TieOption,
    ) -> Result<(), Self::Error>;

    /// Sets the excitation voltages.
    fn set_voltage(&mut self, voltage: VoltageSettings) -> Result<(), Self::Error>;

    /// Returns the interrupt threshold of `channel`.
    fn threshold(&mut self, channel: TouchChannel) -> Result<u16, Self::Error>;

    /// Returns the slope and initial level of `channel`.
    fn count_mode(&mut self, channel: TouchChannel) -> Result<(Slope, TieOption), Self::Error>;

    /// Returns the excitation voltages.
    fn voltage(&mut self) -> Result<VoltageSettings, Self::Error>;

    /// Returns the sleep and measurement cycle counts.
    fn measurement_time(&mut self) -> Result<MeasTime, Self::Error>;
}

/// The single sampling path of a [`StretchLoop`](crate::StretchLoop).
pub trait Sampler {
    type Error: fmt::Debug;

    /// Takes one raw reading.
    fn sample(&mut self) -> Result<u16, Self::Error>;
}

/// Samples one channel of a [`TouchSensor`] through its filtered read.
#[derive(Debug)]
pub struct FilteredSampler<S> {
    sensor: S,
    channel: TouchChannel,
}

impl<S: TouchSensor> FilteredSampler<S> {
    /// Returns a sampler reading `channel` of `sensor`.
    pub fn new(sensor: S, channel: TouchChannel) -> Self {
        Self { sensor, channel }
    }

    /// Returns the sampled channel.
    pub fn channel(&self) -> TouchChannel {
        self.channel
    }

    /// Destroys the sampler and returns the sensor.
    pub fn free(self) -> S {
        self.sensor
    }
}

impl<S: TouchSensor> Sampler for FilteredSampler<S> {
    type Error = S::Error;

    fn sample(&mut self) -> Result<u16, Self::Error> {
        self.sensor.read_filtered(self.channel)
    }
}

/// Samples an embedded-hal one-shot ADC channel, for boards that measure
/// the sensor through an external capacitance-to-voltage front end.
///
/// # Examples
///
/// ```
/// use stretch_dac::{AdcSampler, Sampler};
/// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
/// #
/// # let expectations: [Transaction<u16>; 1] = [Transaction::read(0, 1350)];
/// # let adc = Mock::new(&expectations);
/// # let pin = MockChan0 {};
///
/// let mut sampler = AdcSampler::new(adc, pin);
///
/// assert_eq!(sampler.sample(), Ok(1350));
/// ```
#[derive(Debug)]
pub struct AdcSampler<Adc, ADC, Pin> {
    adc: Adc,
    pin: Pin,
    _adc: PhantomData<ADC>,
}

impl<Adc, ADC, Pin> AdcSampler<Adc, ADC, Pin>
where
    Pin: Channel<ADC>,
{
    /// Returns a sampler reading `pin` through `adc`.
    pub fn new(adc: Adc, pin: Pin) -> Self {
        Self {
            adc,
            pin,
            _adc: PhantomData,
        }
    }

    /// Destroys the sampler and returns the ADC and the `Pin`.
    pub fn free(self) -> (Adc, Pin) {
        (self.adc, self.pin)
    }
}

impl<Adc, ADC, Pin> Sampler for AdcSampler<Adc, ADC, Pin>
where
    Pin: Channel<ADC>,
    Adc: OneShot<ADC, u16, Pin>,
    <Adc as OneShot<ADC, u16, Pin>>::Error: fmt::Debug,
{
    type Error = <Adc as OneShot<ADC, u16, Pin>>::Error;

    fn sample(&mut self) -> Result<u16, Self::Error> {
        nb::block!(self.adc.read(&mut self.pin))
    }
}
