//! Safety gates
//!
//! The door interlock overrides every motion decision. The transit watchdog
//! stops the hoist when the floor sensor goes quiet for too long.

pub mod interlock;
pub mod watchdog;

pub use interlock::{DoorInterlock, InterlockStatus};
pub use watchdog::{TransitWatchdog, DEFAULT_TRANSIT_TIMEOUT_MS};
