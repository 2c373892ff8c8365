//! Floor status broadcast record
//!
//! The controller announces the floor it has just counted on the shared
//! bus. The record is deliberately tiny so any listener on the bus (hall
//! indicators, a logger) can decode it without knowing anything else about
//! the controller.

/// Standard (11-bit) identifier used for status frames unless configured otherwise
pub const DEFAULT_STATUS_ID: u16 = 0x100;

/// Largest valid standard CAN identifier
pub const MAX_STANDARD_ID: u16 = 0x7FF;

/// Payload length of a status frame
pub const STATUS_PAYLOAD_LEN: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusError {
    /// Payload is not exactly one byte
    InvalidLength,
    /// Floor 0 is never broadcast
    InvalidFloor,
}

/// One status broadcast: "the cabin is now at `floor`"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusRecord {
    pub floor: u8,
}

impl StatusRecord {
    pub const fn new(floor: u8) -> Self {
        Self { floor }
    }

    pub fn encode(&self) -> [u8; STATUS_PAYLOAD_LEN] {
        [self.floor]
    }

    pub fn decode(payload: &[u8]) -> Result<Self, StatusError> {
        match payload {
            [0] => Err(StatusError::InvalidFloor),
            [floor] => Ok(Self { floor: *floor }),
            _ => Err(StatusError::InvalidLength),
        }
    }
}

/// Check that `id` fits in a standard 11-bit identifier
pub fn is_standard_id(id: u16) -> bool {
    id <= MAX_STANDARD_ID
}
