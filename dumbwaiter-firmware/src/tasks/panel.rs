//! Indicator panel transmit task
//!
//! Sends the latest view whenever the control task publishes a new one.
//! Views published faster than the link drains are coalesced.

use defmt::*;
use embassy_stm32::usart::BufferedUartTx;
use embedded_io_async::Write;

use dumbwaiter_protocol::MAX_PAYLOAD_SIZE;

use crate::channels::PANEL_VIEW;

/// Largest encoded frame
const FRAME_BUF_SIZE: usize = MAX_PAYLOAD_SIZE + 4;

#[embassy_executor::task]
pub async fn panel_task(mut tx: BufferedUartTx<'static>) {
    info!("Panel task started");

    let mut buf = [0u8; FRAME_BUF_SIZE];

    loop {
        let view = PANEL_VIEW.wait().await;
        trace!("Panel view {:?}", view);

        for command in view.to_commands() {
            let len = match command.to_frame().and_then(|frame| frame.encode(&mut buf)) {
                Ok(len) => len,
                Err(e) => {
                    warn!("Failed to encode panel command: {:?}", e);
                    continue;
                }
            };
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send panel frame: {:?}", e);
                break;
            }
        }
    }
}
