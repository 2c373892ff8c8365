//! Dual-edge crossing detector
//!
//! Sampled once per control cycle while the cabin is moving. Every rising
//! edge opens a settle window during which samples are ignored; the window
//! is a deadline compared against the cycle clock, never a blocking wait.

/// Settle window after each rising edge (ms)
pub const DEFAULT_SETTLE_MS: u32 = 200;

/// A confirmed pass of the cabin past one floor marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Crossing;

#[derive(Debug, Clone)]
pub struct SensorDebouncer {
    /// Settle window length (ms)
    settle_ms: u32,
    /// Level of the last trusted sample
    last_active: bool,
    /// One rising edge seen since the last crossing
    first_edge_seen: bool,
    /// End of the current settle window
    settle_until_ms: Option<u32>,
}

impl Default for SensorDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_MS)
    }
}

impl SensorDebouncer {
    pub fn new(settle_ms: u32) -> Self {
        Self {
            settle_ms,
            last_active: false,
            first_edge_seen: false,
            settle_until_ms: None,
        }
    }

    /// Forget any half-seen crossing; called when a new travel starts
    pub fn reset(&mut self) {
        self.first_edge_seen = false;
        self.settle_until_ms = None;
    }

    pub fn first_edge_seen(&self) -> bool {
        self.first_edge_seen
    }

    pub fn is_settling(&self, now_ms: u32) -> bool {
        match self.settle_until_ms {
            Some(until) => !deadline_reached(now_ms, until),
            None => false,
        }
    }

    /// Feed one sample
    ///
    /// `active` is true while the proximity target is in front of the sensor.
    /// Returns a [`Crossing`] on the second rising edge since the last one.
    pub fn sample(&mut self, active: bool, now_ms: u32) -> Option<Crossing> {
        if self.is_settling(now_ms) {
            return None;
        }
        self.settle_until_ms = None;

        let rising = active && !self.last_active;
        self.last_active = active;

        if !rising {
            return None;
        }

        self.settle_until_ms = Some(now_ms.wrapping_add(self.settle_ms));

        if self.first_edge_seen {
            self.first_edge_seen = false;
            Some(Crossing)
        } else {
            self.first_edge_seen = true;
            None
        }
    }
}

/// Wrap-safe `now >= deadline` for a free-running millisecond counter
pub(crate) fn deadline_reached(now_ms: u32, deadline_ms: u32) -> bool {
    now_ms.wrapping_sub(deadline_ms) < u32::MAX / 2
}
