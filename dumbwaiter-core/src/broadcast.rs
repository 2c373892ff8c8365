//! Floor status broadcast
//!
//! Every crossing-driven floor update produces one status record. Sending
//! is fire-and-forget: a failed send is counted and forgotten, never retried
//! and never allowed to stall the cabin.

use dumbwaiter_protocol::{StatusRecord, DEFAULT_STATUS_ID};

use crate::floor::Floor;
use crate::traits::{BusError, StatusBus};

#[derive(Debug, Clone)]
pub struct StatusBroadcaster {
    id: u16,
    last: Option<Floor>,
    sent: u32,
    dropped: u32,
}

impl Default for StatusBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_ID)
    }
}

impl StatusBroadcaster {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            last: None,
            sent: 0,
            dropped: 0,
        }
    }

    /// Bus identifier the records are sent under
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Last floor handed out for transmission
    pub fn last(&self) -> Option<Floor> {
        self.last
    }

    pub fn sent(&self) -> u32 {
        self.sent
    }

    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Record a floor update and return the record to transmit
    pub fn announce(&mut self, floor: Floor) -> StatusRecord {
        self.last = Some(floor);
        StatusRecord::new(floor.number())
    }

    /// Account for the outcome of a send done elsewhere
    pub fn record_result(&mut self, result: Result<(), BusError>) {
        match result {
            Ok(()) => self.sent = self.sent.wrapping_add(1),
            Err(_) => self.dropped = self.dropped.wrapping_add(1),
        }
    }

    /// Send `record` on `bus`, counting the outcome
    ///
    /// The error is returned for logging only; callers carry on regardless.
    pub fn send<B: StatusBus>(&mut self, bus: &mut B, record: StatusRecord) -> Result<(), BusError> {
        let result = bus.publish(self.id, record);
        self.record_result(result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlakyBus {
        fail: bool,
        published: heapless::Vec<(u16, u8), 8>,
    }

    impl StatusBus for FlakyBus {
        fn publish(&mut self, id: u16, record: StatusRecord) -> Result<(), BusError> {
            if self.fail {
                return Err(BusError::Timeout);
            }
            let _ = self.published.push((id, record.floor));
            Ok(())
        }
    }

    fn floor(n: u8) -> Floor {
        Floor::new(n, 3).unwrap()
    }

    #[test]
    fn test_announce_tracks_last_floor() {
        let mut broadcaster = StatusBroadcaster::default();
        assert_eq!(broadcaster.last(), None);

        let record = broadcaster.announce(floor(2));
        assert_eq!(record, StatusRecord::new(2));
        assert_eq!(broadcaster.last(), Some(floor(2)));
    }

    #[test]
    fn test_send_uses_configured_id() {
        let mut bus = FlakyBus {
            fail: false,
            published: heapless::Vec::new(),
        };
        let mut broadcaster = StatusBroadcaster::new(0x123);

        let record = broadcaster.announce(floor(3));
        assert_eq!(broadcaster.send(&mut bus, record), Ok(()));
        assert_eq!(bus.published.as_slice(), &[(0x123, 3)]);
        assert_eq!(broadcaster.sent(), 1);
    }

    #[test]
    fn test_failures_are_counted_not_retried() {
        let mut bus = FlakyBus {
            fail: true,
            published: heapless::Vec::new(),
        };
        let mut broadcaster = StatusBroadcaster::default();

        let record = broadcaster.announce(floor(1));
        assert_eq!(broadcaster.send(&mut bus, record), Err(BusError::Timeout));
        assert_eq!(broadcaster.dropped(), 1);
        assert_eq!(broadcaster.sent(), 0);
        // The floor is still the last one handed out
        assert_eq!(broadcaster.last(), Some(floor(1)));
    }
}
