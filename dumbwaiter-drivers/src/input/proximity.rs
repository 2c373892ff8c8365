//! Cabin floor sensor
//!
//! Inductive or reed proximity switch, output low while a floor magnet is
//! in front of it.

use embedded_hal::digital::InputPin;

use super::InputError;

pub struct ProximitySensor<P> {
    pin: P,
}

impl<P: InputPin> ProximitySensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn read(&mut self) -> Result<bool, InputError> {
        self.pin.is_low().map_err(|_| InputError::Pin)
    }

    /// Sensor level for the debouncer; an unreadable sensor counts as inactive
    pub fn is_active(&mut self) -> bool {
        self.read().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::mock::MockInput;

    #[test]
    fn test_active_low() {
        assert!(ProximitySensor::new(MockInput::low()).is_active());
        assert!(!ProximitySensor::new(MockInput::high()).is_active());
    }

    #[test]
    fn test_read_error_is_inactive() {
        let mut sensor = ProximitySensor::new(MockInput::broken());
        assert_eq!(sensor.read(), Err(InputError::Pin));
        assert!(!sensor.is_active());
    }
}
