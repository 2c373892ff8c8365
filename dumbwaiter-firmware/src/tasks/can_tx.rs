//! CAN status transmit task
//!
//! Broadcasts each floor status record as a classic data frame. A frame
//! that cannot be queued within the send timeout is dropped; the cabin is
//! never told.

use defmt::*;
use embassy_stm32::can::{Can, Frame};
use embassy_time::{with_timeout, Duration};

use crate::channels::STATUS_QUEUE;

#[derive(Debug, Clone, Copy)]
pub struct CanTxConfig {
    /// Standard identifier of the status frame
    pub status_id: u16,
    /// Longest wait for a free transmit mailbox
    pub send_timeout_ms: u32,
}

#[embassy_executor::task]
pub async fn can_tx_task(mut can: Can<'static>, config: CanTxConfig) {
    info!("CAN TX task started (id 0x{:03x})", config.status_id);

    let timeout = Duration::from_millis(config.send_timeout_ms as u64);
    let mut sent: u32 = 0;
    let mut dropped: u32 = 0;

    loop {
        let record = STATUS_QUEUE.receive().await;

        let frame = match Frame::new_standard(config.status_id, &record.encode()) {
            Ok(frame) => frame,
            Err(_) => {
                error!("Status id 0x{:03x} is not a standard id", config.status_id);
                dropped = dropped.wrapping_add(1);
                continue;
            }
        };

        match with_timeout(timeout, can.write(&frame)).await {
            Ok(_) => {
                sent = sent.wrapping_add(1);
                debug!("Broadcast floor {} ({} sent)", record.floor, sent);
            }
            Err(_) => {
                dropped = dropped.wrapping_add(1);
                warn!(
                    "Status frame for floor {} timed out ({} dropped)",
                    record.floor, dropped
                );
            }
        }
    }
}
