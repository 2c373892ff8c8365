//! Audio module drivers

pub mod dfplayer;

pub use dfplayer::{Command, DfPlayer, BAUD_RATE, FRAME_LEN};
