//! Floor proximity sensor processing
//!
//! Each floor carries a pair of magnets. The cabin sensor sees two rising
//! edges per floor, which fold into a single crossing.

pub mod debouncer;

pub use debouncer::{Crossing, SensorDebouncer, DEFAULT_SETTLE_MS};
