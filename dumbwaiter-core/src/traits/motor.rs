//! Hoist motor trait

use crate::state::MotorOutputs;

/// Errors that can occur when driving the hoist outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// An output pin could not be driven
    Pin,
}

/// Two-output hoist (ascend / descend)
pub trait HoistMotor {
    /// Drive both outputs to match `outputs`
    ///
    /// Implementations must never have both directions energised, not even
    /// transiently while switching.
    fn apply(&mut self, outputs: MotorOutputs) -> Result<(), MotorError>;

    /// De-energise both outputs
    fn stop(&mut self) -> Result<(), MotorError> {
        self.apply(MotorOutputs::OFF)
    }

    /// Outputs last applied
    fn outputs(&self) -> MotorOutputs;
}
