//! Landing door / lock switch
//!
//! The lock chain pulls the input low while every landing door is shut and
//! locked. The pin needs a pull-up: any open door breaks the chain and the
//! pull-up holds the line high, which reads as open.

use embedded_hal::digital::InputPin;

use super::InputError;

pub struct DoorSwitch<P> {
    pin: P,
    /// Input level that means "open"
    open_high: bool,
}

impl<P: InputPin> DoorSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self::with_polarity(pin, true)
    }

    pub fn with_polarity(pin: P, open_high: bool) -> Self {
        Self { pin, open_high }
    }

    pub fn read(&mut self) -> Result<bool, InputError> {
        let high = self.pin.is_high().map_err(|_| InputError::Pin)?;
        Ok(high == self.open_high)
    }

    /// Door state for the interlock; an unreadable switch counts as open
    pub fn is_open(&mut self) -> bool {
        self.read().unwrap_or(true)
    }
}
