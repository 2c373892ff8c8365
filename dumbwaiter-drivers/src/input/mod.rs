//! Digital input drivers
//!
//! All landing and cabin inputs are plain GPIO lines. Each driver turns a
//! pin level into a logical reading and decides what a read error means:
//! the door reads as open, the sensor as inactive and a button as released.

pub mod buttons;
pub mod door;
pub mod proximity;

pub use buttons::ButtonBank;
pub use door::DoorSwitch;
pub use proximity::ProximitySensor;

/// Errors that can occur reading an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// The pin could not be read
    Pin,
}
