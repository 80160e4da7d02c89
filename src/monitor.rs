use crate::clock::{Cadence, Clock};
use crate::config::{Config, ConfigError};
use crate::diag::Diagnostics;
use crate::emit;
use crate::output::{AnalogOutput, DacChannel};
use crate::sensor::Sampler;
use crate::stretch::StretchMap;

/// Outcome of one [`StretchLoop::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The sample interval has not elapsed.
    Idle,
    /// The sensor returned the previous reading; nothing was written.
    Unchanged(u16),
    /// The sensor read failed; the previous reading is kept.
    ReadFailed,
    /// A new reading was mapped and written.
    Written { raw: u16, output: u8 },
    /// A new reading was mapped but the output rejected it.
    WriteFailed { raw: u16, output: u8 },
}

/// State carried between iterations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopState {
    /// Last successful raw reading, `0` before the first one.
    pub last_sample: u16,
    cadence: Cadence,
}

impl LoopState {
    fn new(interval_ms: u64, start_ms: u64) -> Self {
        Self {
            last_sample: 0,
            cadence: Cadence::new(interval_ms, start_ms),
        }
    }

    /// Start of the current sample interval.
    pub fn last_sample_ms(&self) -> u64 {
        self.cadence.last_ms()
    }
}

/// The sampling-and-mapping loop: reads the sensor once per interval
/// and, when the reading changed, writes the mapped value to the output.
///
/// # Examples
///
/// ```
/// use stretch_dac::{Config, Sampler, StretchLoop, Tick};
/// # use stretch_dac::{AnalogOutput, DacChannel};
/// # struct Dac(u8);
/// # impl AnalogOutput for Dac {
/// #     type Error = ();
/// #     fn enable(&mut self, _: DacChannel) {}
/// #     fn write(&mut self, _: DacChannel, v: u8) -> Result<(), ()> { self.0 = v; Ok(()) }
/// # }
/// # struct Pad;
/// # impl Sampler for Pad {
/// #     type Error = ();
/// #     fn sample(&mut self) -> Result<u16, ()> { Ok(1350) }
/// # }
///
/// let mut stretch = StretchLoop::new(Pad, Dac(0), String::new(), &Config::default(), 0).unwrap();
///
/// assert_eq!(stretch.poll(50), Tick::Idle);
/// assert_eq!(stretch.poll(90), Tick::Written { raw: 1350, output: 127 });
/// assert_eq!(stretch.poll(180), Tick::Unchanged(1350));
/// ```
#[derive(Debug)]
pub struct StretchLoop<S, O, D> {
    sampler: S,
    output: O,
    diag: D,
    map: StretchMap,
    channel: DacChannel,
    state: LoopState,
}

impl<S, O, D> StretchLoop<S, O, D>
where
    S: Sampler,
    O: AnalogOutput,
    D: Diagnostics,
{
    /// Returns a loop whose first interval starts at `start_ms`, or an
    /// error if `config` is out of range.
    pub fn new(
        sampler: S,
        output: O,
        diag: D,
        config: &Config,
        start_ms: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            sampler,
            output,
            diag,
            map: StretchMap::from_config(config)?,
            channel: config.dac_channel,
            state: LoopState::new(config.sample_interval_ms, start_ms),
        })
    }

    /// Runs one iteration at time `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Tick {
        if !self.state.cadence.poll(now_ms) {
            return Tick::Idle;
        }

        let raw = match self.sampler.sample() {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("filtered read failed: {:?}", e);
                emit!(&mut self.diag, "Read filtered value error");
                return Tick::ReadFailed;
            }
        };

        if raw == self.state.last_sample {
            return Tick::Unchanged(raw);
        }
        self.state.last_sample = raw;

        let output = self.map.output(raw);
        emit!(&mut self.diag, "{},{}", raw, output);

        match self.output.write(self.channel, output) {
            Ok(()) => {
                log::trace!("wrote {} for raw {}", output, raw);
                Tick::Written { raw, output }
            }
            Err(e) => {
                log::warn!("output write of {} failed: {:?}", output, e);
                emit!(&mut self.diag, "[Error] Setting the DAC voltage failed at {}.", output);
                Tick::WriteFailed { raw, output }
            }
        }
    }

    /// Runs one iteration at the current time of `clock`.
    pub fn step<C: Clock>(&mut self, clock: &mut C) -> Tick {
        let now = clock.now_ms();
        self.poll(now)
    }

    /// Polls forever against `clock`.
    pub fn run<C: Clock>(mut self, clock: &mut C) -> ! {
        loop {
            self.step(clock);
        }
    }

    /// Returns the state carried between iterations.
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Returns the analog output.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Returns the diagnostic sink.
    pub fn diagnostics(&self) -> &D {
        &self.diag
    }

    /// Destroys the loop and returns the sampler, output and sink.
    pub fn free(self) -> (S, O, D) {
        (self.sampler, self.output, self.diag)
    }
}
