//! Floor counting and hoist control
//!
//! The motion controller is the only owner of the cabin state, the counted
//! floor and the pending destination.

pub mod controller;

pub use controller::{FloorUpdate, MotionController, RequestOutcome};
