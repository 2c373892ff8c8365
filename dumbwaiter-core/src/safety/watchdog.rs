//! Transit watchdog
//!
//! A healthy cabin passes a floor marker well within a few seconds. When
//! the sensor misses a magnet the counter never advances and the hoist
//! would run into the shaft end; this watchdog turns that silent stall
//! into a fault.

use crate::sensor::debouncer::deadline_reached;

/// Maximum time between travel start / last crossing and the next crossing
pub const DEFAULT_TRANSIT_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Clone)]
pub struct TransitWatchdog {
    timeout_ms: u32,
    deadline_ms: Option<u32>,
}

impl Default for TransitWatchdog {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSIT_TIMEOUT_MS)
    }
}

impl TransitWatchdog {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            deadline_ms: None,
        }
    }

    /// (Re)start the per-floor timer; call on travel start and every crossing
    pub fn feed(&mut self, now_ms: u32) {
        self.deadline_ms = Some(now_ms.wrapping_add(self.timeout_ms));
    }

    /// Stop watching (arrival, door block, fault)
    pub fn disarm(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// True once the deadline has passed; disarms itself so it fires once
    pub fn expired(&mut self, now_ms: u32) -> bool {
        match self.deadline_ms {
            Some(deadline) if deadline_reached(now_ms, deadline) => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_expires() {
        let mut watchdog = TransitWatchdog::new(1000);
        assert!(!watchdog.expired(0));
        assert!(!watchdog.expired(1_000_000));
    }

    #[test]
    fn test_expires_after_timeout() {
        let mut watchdog = TransitWatchdog::new(1000);
        watchdog.feed(500);

        assert!(!watchdog.expired(1499));
        assert!(watchdog.expired(1500));
        // Fires once
        assert!(!watchdog.expired(1501));
        assert!(!watchdog.is_armed());
    }

    #[test]
    fn test_feeding_extends_deadline() {
        let mut watchdog = TransitWatchdog::new(1000);
        watchdog.feed(0);
        watchdog.feed(900);

        assert!(!watchdog.expired(1500));
        assert!(watchdog.expired(1900));
    }

    #[test]
    fn test_disarm() {
        let mut watchdog = TransitWatchdog::new(1000);
        watchdog.feed(0);
        watchdog.disarm();
        assert!(!watchdog.expired(5000));
    }
}
