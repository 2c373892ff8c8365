//! Floor indicator drivers

pub mod serial;

pub use serial::SerialPanel;
