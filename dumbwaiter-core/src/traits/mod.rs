//! Hardware abstraction traits
//!
//! These traits define the interface between the cabin logic and the
//! hardware that carries out its decisions.

pub mod audio;
pub mod bus;
pub mod indicator;
pub mod motor;

pub use audio::{AudioError, AudioPlayer};
pub use bus::{BusError, StatusBus};
pub use indicator::{FloorIndicator, PanelError};
pub use motor::{HoistMotor, MotorError};
