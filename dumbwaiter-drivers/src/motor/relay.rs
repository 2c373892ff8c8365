//! Hoist motor driver with two direction relays
//!
//! One relay energises the ascend winding, the other the descend winding.
//! Both closed at once shorts the motor supply, so every update releases
//! the relay that must be off before energising the one that must be on.
//!
//! # Safety
//!
//! - Both relays are released at construction
//! - A pin error releases both relays (best effort) before reporting
//! - Relay boards with inverted inputs are handled by `active_high = false`

use dumbwaiter_core::state::MotorOutputs;
use dumbwaiter_core::traits::{HoistMotor, MotorError};
use embedded_hal::digital::OutputPin;

pub struct RelayHoist<U, D> {
    up: U,
    down: D,
    /// Relay energised by a high output
    active_high: bool,
    /// Outputs last applied successfully
    outputs: MotorOutputs,
}

impl<U: OutputPin, D: OutputPin> RelayHoist<U, D> {
    /// Create the driver and release both relays
    pub fn new(up: U, down: D, active_high: bool) -> Result<Self, MotorError> {
        let mut hoist = Self {
            up,
            down,
            active_high,
            outputs: MotorOutputs::OFF,
        };
        hoist.release_both()?;
        Ok(hoist)
    }

    /// Give the pins back
    pub fn release(self) -> (U, D) {
        (self.up, self.down)
    }

    fn drive<P: OutputPin>(pin: &mut P, energised: bool, active_high: bool) -> Result<(), MotorError> {
        let result = if energised == active_high {
            pin.set_high()
        } else {
            pin.set_low()
        };
        result.map_err(|_| MotorError::Pin)
    }

    fn release_both(&mut self) -> Result<(), MotorError> {
        let up = Self::drive(&mut self.up, false, self.active_high);
        let down = Self::drive(&mut self.down, false, self.active_high);
        up.and(down)
    }

    fn switch(&mut self, outputs: MotorOutputs) -> Result<(), MotorError> {
        // Break
        if !outputs.ascend() {
            Self::drive(&mut self.up, false, self.active_high)?;
        }
        if !outputs.descend() {
            Self::drive(&mut self.down, false, self.active_high)?;
        }
        // Make
        if outputs.ascend() {
            Self::drive(&mut self.up, true, self.active_high)?;
        }
        if outputs.descend() {
            Self::drive(&mut self.down, true, self.active_high)?;
        }
        Ok(())
    }
}

impl<U: OutputPin, D: OutputPin> HoistMotor for RelayHoist<U, D> {
    fn apply(&mut self, outputs: MotorOutputs) -> Result<(), MotorError> {
        match self.switch(outputs) {
            Ok(()) => {
                self.outputs = outputs;
                Ok(())
            }
            Err(e) => {
                let _ = self.release_both();
                self.outputs = MotorOutputs::OFF;
                Err(e)
            }
        }
    }

    fn outputs(&self) -> MotorOutputs {
        self.outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use dumbwaiter_core::state::CabinState;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    #[derive(Debug)]
    struct PinFault;

    impl Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Shared log of (pin id, level) writes, in order
    type WriteLog = RefCell<heapless::Vec<(char, bool), 32>>;

    struct MockPin<'a> {
        id: char,
        high: bool,
        broken: bool,
        log: &'a WriteLog,
    }

    impl<'a> MockPin<'a> {
        fn new(id: char, log: &'a WriteLog) -> Self {
            Self {
                id,
                high: false,
                broken: false,
                log,
            }
        }

        fn set(&mut self, high: bool) -> Result<(), PinFault> {
            if self.broken {
                return Err(PinFault);
            }
            self.high = high;
            let _ = self.log.borrow_mut().push((self.id, high));
            Ok(())
        }
    }

    impl ErrorType for MockPin<'_> {
        type Error = PinFault;
    }

    impl OutputPin for MockPin<'_> {
        fn set_high(&mut self) -> Result<(), PinFault> {
            self.set(true)
        }

        fn set_low(&mut self) -> Result<(), PinFault> {
            self.set(false)
        }
    }

    #[test]
    fn test_starts_released() {
        let log = WriteLog::default();
        let hoist = RelayHoist::new(MockPin::new('u', &log), MockPin::new('d', &log), true).unwrap();

        assert!(hoist.outputs().is_off());
        let (up, down) = hoist.release();
        assert!(!up.high);
        assert!(!down.high);
    }

    #[test]
    fn test_follows_state_outputs() {
        let log = WriteLog::default();
        let mut hoist =
            RelayHoist::new(MockPin::new('u', &log), MockPin::new('d', &log), true).unwrap();

        hoist.apply(CabinState::MovingUp.motor_outputs()).unwrap();
        assert!(hoist.up.high);
        assert!(!hoist.down.high);

        hoist.stop().unwrap();
        assert!(!hoist.up.high);
        assert!(!hoist.down.high);
        assert!(hoist.outputs().is_off());
    }

    #[test]
    fn test_break_before_make_on_reversal() {
        let log = WriteLog::default();
        let mut hoist =
            RelayHoist::new(MockPin::new('u', &log), MockPin::new('d', &log), true).unwrap();
        hoist.apply(CabinState::MovingUp.motor_outputs()).unwrap();
        log.borrow_mut().clear();

        hoist.apply(CabinState::MovingDown.motor_outputs()).unwrap();
        assert_eq!(log.borrow().as_slice(), &[('u', false), ('d', true)]);
    }

    #[test]
    fn test_active_low_board() {
        let log = WriteLog::default();
        let mut hoist =
            RelayHoist::new(MockPin::new('u', &log), MockPin::new('d', &log), false).unwrap();
        assert!(hoist.up.high);
        assert!(hoist.down.high);

        hoist.apply(CabinState::MovingDown.motor_outputs()).unwrap();
        assert!(hoist.up.high);
        assert!(!hoist.down.high);
    }

    #[test]
    fn test_pin_error_releases_and_reports() {
        let log = WriteLog::default();
        let mut hoist =
            RelayHoist::new(MockPin::new('u', &log), MockPin::new('d', &log), true).unwrap();
        hoist.down.broken = true;

        assert_eq!(
            hoist.apply(CabinState::MovingUp.motor_outputs()),
            Err(MotorError::Pin)
        );
        assert!(!hoist.up.high);
        assert!(hoist.outputs().is_off());
    }
}
