//! DFPlayer transmit task
//!
//! Sets the volume once the module has booted, then plays clips as the
//! control task queues them. Pacing between clips is decided by the
//! announcement sequencer; this task only writes.

use defmt::*;
use embassy_stm32::usart::BufferedUartTx;
use embassy_time::Timer;
use embedded_io_async::Write;

use dumbwaiter_drivers::audio::Command;

use crate::channels::AUDIO_QUEUE;

/// Time the module needs after power-up before it accepts commands
const MODULE_BOOT_MS: u64 = 1500;

#[embassy_executor::task]
pub async fn audio_task(mut tx: BufferedUartTx<'static>, volume: u8) {
    info!("Audio task started");

    Timer::after_millis(MODULE_BOOT_MS).await;
    match Command::volume(volume) {
        Ok(command) => send(&mut tx, command).await,
        Err(e) => warn!("Volume {} rejected: {:?}", volume, e),
    }

    loop {
        let clip = AUDIO_QUEUE.receive().await;
        match Command::play(clip) {
            Ok(command) => {
                debug!("Playing clip {}", clip);
                send(&mut tx, command).await;
            }
            Err(e) => warn!("Clip {} rejected: {:?}", clip, e),
        }
    }
}

async fn send(tx: &mut BufferedUartTx<'static>, command: Command) {
    if let Err(e) = tx.write_all(&command.encode()).await {
        warn!("Failed to send audio command: {:?}", e);
    }
}
