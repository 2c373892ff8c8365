//! Inter-task communication channels
//!
//! The control task never waits on I/O. Everything slow (UART writes,
//! CAN transmit) is handed to a dedicated task through these statics.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use dumbwaiter_core::announce::ClipId;
use dumbwaiter_core::presentation::DisplayView;
use dumbwaiter_protocol::StatusRecord;

/// Clips waiting for the audio task
const AUDIO_QUEUE_SIZE: usize = 4;

/// Status records waiting for the CAN task
const STATUS_QUEUE_SIZE: usize = 4;

/// Announcement clips to play, in order
pub static AUDIO_QUEUE: Channel<CriticalSectionRawMutex, ClipId, AUDIO_QUEUE_SIZE> =
    Channel::new();

/// Floor status records to broadcast
pub static STATUS_QUEUE: Channel<CriticalSectionRawMutex, StatusRecord, STATUS_QUEUE_SIZE> =
    Channel::new();

/// Latest indicator content; older views are overwritten
pub static PANEL_VIEW: Signal<CriticalSectionRawMutex, DisplayView> = Signal::new();
