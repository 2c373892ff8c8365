//! Cabin state machine
//!
//! The cabin is always in exactly one [`CabinState`]. Motor outputs are
//! derived from the state alone, so every transition re-evaluates both
//! outputs in the same control cycle.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{CabinState, FaultKind, MotorOutputs};
