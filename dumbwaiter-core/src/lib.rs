//! Board-agnostic control logic for the dumbwaiter hoist controller
//!
//! This crate contains all cabin logic that does not depend on specific
//! hardware implementations:
//!
//! - Floor numbering and the cabin state machine
//! - Dual-edge floor sensor debouncing
//! - Motion control and floor counting
//! - Door interlock and transit watchdog
//! - Arrival announcement sequencing
//! - Status broadcast and indicator content
//! - Configuration types and the `lift.toml` reader
//! - Hardware abstraction traits
//!
//! [`cabin::Cabin`] ties the pieces together into one non-blocking control
//! cycle.

#![no_std]
#![deny(unsafe_code)]

pub mod announce;
pub mod broadcast;
pub mod cabin;
pub mod config;
pub mod floor;
pub mod motion;
pub mod presentation;
pub mod safety;
pub mod sensor;
pub mod state;
pub mod traits;

pub use cabin::{last_pressed, Cabin, CycleEvent, CycleOutput, DispatchError, Inputs};
pub use floor::{Floor, FloorError, Travel, MAX_FLOORS};
