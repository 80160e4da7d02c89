/// A monotonic millisecond counter.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&mut self) -> u64;
}

/// Fixed-rate gate for sensor reads.
///
/// Boundaries stay aligned to the start time. When the gate opens it
/// moves to the latest boundary at or before the current time, so a stall
/// spanning several intervals yields a single read, not a burst.
///
/// # Examples
///
/// ```
/// use stretch_dac::Cadence;
///
/// let mut cadence = Cadence::new(90, 1000);
///
/// assert!(!cadence.poll(1089));
/// assert!(cadence.poll(1090));
/// assert!(!cadence.poll(1100));
/// assert!(cadence.poll(1180));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cadence {
    interval_ms: u64,
    last_ms: u64,
}

impl Cadence {
    /// Returns a gate whose first interval starts at `start_ms`.
    pub fn new(interval_ms: u64, start_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: start_ms,
        }
    }

    /// Start of the current interval.
    pub fn last_ms(&self) -> u64 {
        self.last_ms
    }

    /// Returns `true` if a read is due at `now_ms`, and consumes the
    /// boundary.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_ms);
        if elapsed >= self.interval_ms {
            self.last_ms += elapsed / self.interval_ms * self.interval_ms;
            true
        } else {
            false
        }
    }
}
