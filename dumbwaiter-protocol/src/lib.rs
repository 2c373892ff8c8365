//! Wire formats used by the dumbwaiter controller
//!
//! Two links leave the controller board:
//!
//! - **Status broadcast** on the CAN bus. One classic data frame per floor
//!   crossing, standard identifier `0x100`, one payload byte holding the
//!   floor number. Fire-and-forget; nothing is ever read back.
//! - **Indicator panel** on a UART. The panel is a dumb terminal that draws
//!   the floor digit or a banner. Frames look like:
//!
//! ```text
//! ┌───────┬──────┬────────┬─────────────┬──────┐
//! │ START │ TYPE │ LENGTH │ PAYLOAD     │ CRC8 │
//! │ 1B    │ 1B   │ 1B     │ 0–16B       │ 1B   │
//! └───────┴──────┴────────┴─────────────┴──────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod panel;
pub mod status;

pub use frame::{crc8, Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use panel::{Banner, PanelCommand};
pub use status::{StatusError, StatusRecord, DEFAULT_STATUS_ID};
