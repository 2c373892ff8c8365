//! Events that drive cabin state transitions

use crate::floor::Travel;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A floor request was accepted; the hoist starts in this direction
    StartTravel(Travel),
    /// The counted floor equals the destination
    Arrived,
    /// Door/lock switch reports open
    DoorOpened,
    /// Door/lock switch returned to closed
    DoorClosed,
    /// No floor crossing within the allowed transit time
    TransitTimeout,
    /// A crossing would have counted past the end of the shaft
    FloorOutOfRange,
}

impl Event {
    /// Events raised by the door interlock
    pub fn is_door_event(&self) -> bool {
        matches!(self, Event::DoorOpened | Event::DoorClosed)
    }

    /// Events that put the cabin into a fault
    pub fn is_fault_event(&self) -> bool {
        matches!(self, Event::TransitTimeout | Event::FloorOutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_events() {
        assert!(Event::DoorOpened.is_door_event());
        assert!(Event::DoorClosed.is_door_event());
        assert!(!Event::Arrived.is_door_event());
    }

    #[test]
    fn test_fault_events() {
        assert!(Event::TransitTimeout.is_fault_event());
        assert!(Event::FloorOutOfRange.is_fault_event());
        assert!(!Event::StartTravel(Travel::Up).is_fault_event());
    }
}
