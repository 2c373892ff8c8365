//! Status broadcast bus trait

use dumbwaiter_protocol::StatusRecord;

/// Errors that can occur sending a status frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// No transmit slot became free in time
    Timeout,
    /// Identifier is not a standard 11-bit id
    InvalidId,
    /// Controller reported a bus error (bus-off, no ACK)
    Bus,
    /// Outgoing queue full
    QueueFull,
}

/// Fire-and-forget broadcast of the cabin position
pub trait StatusBus {
    fn publish(&mut self, id: u16, record: StatusRecord) -> Result<(), BusError>;
}
