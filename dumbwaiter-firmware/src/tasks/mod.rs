//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod audio;
pub mod can_tx;
pub mod control;
pub mod panel;

pub use audio::audio_task;
pub use can_tx::{can_tx_task, CanTxConfig};
pub use control::{control_task, CabinIo};
pub use panel::panel_task;
