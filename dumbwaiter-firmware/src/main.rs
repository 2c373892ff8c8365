//! Dumbwaiter - Hoist Controller Firmware
//!
//! Main firmware binary for STM32F072-based dumbwaiter controllers.
//! A single control task owns the cabin state machine and the hoist
//! relays; audio, indicator panel and CAN status run as separate tasks
//! fed through channels.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::can::{self, Can};
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::peripherals::{CAN, USART3, USART4};
use embassy_stm32::usart::{self, BufferedUart, Config as UartConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use dumbwaiter_core::config::LiftConfig;
use dumbwaiter_core::Cabin;
use dumbwaiter_drivers::audio::BAUD_RATE as DFPLAYER_BAUD;
use dumbwaiter_drivers::input::{ButtonBank, DoorSwitch, ProximitySensor};
use dumbwaiter_drivers::motor::RelayHoist;

use crate::tasks::{CabinIo, CanTxConfig};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    USART3_4 => usart::BufferedInterruptHandler<USART3>, usart::BufferedInterruptHandler<USART4>;
    CEC_CAN => can::Rx0InterruptHandler<CAN>, can::Rx1InterruptHandler<CAN>,
        can::SceInterruptHandler<CAN>, can::TxInterruptHandler<CAN>;
});

/// Indicator panel link speed
const PANEL_BAUD: u32 = 115_200;

/// Status bus bitrate
const CAN_BITRATE: u32 = 125_000;

// Static cells for UART buffers (must live forever)
static AUDIO_TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static AUDIO_RX_BUF: StaticCell<[u8; 32]> = StaticCell::new();
static PANEL_TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static PANEL_RX_BUF: StaticCell<[u8; 32]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dumbwaiter firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    let cabin = match Cabin::new(&config) {
        Ok(cabin) => cabin,
        Err(e) => {
            error!("Configuration rejected ({:?}), using defaults", e);
            unwrap!(Cabin::new(&LiftConfig::default()))
        }
    };

    // Call buttons, floors 1-3 (active-low with pull-ups)
    let buttons = ButtonBank::new([
        Input::new(p.PC0, Pull::Up),
        Input::new(p.PC1, Pull::Up),
        Input::new(p.PC2, Pull::Up),
    ]);
    // Door/lock chain shorts to ground when shut; the pull-up makes an
    // open chain read high (open)
    let door = DoorSwitch::new(Input::new(p.PB0, Pull::Up));
    let sensor = ProximitySensor::new(Input::new(p.PB1, Pull::Up));

    // Relays come up released whatever the board polarity
    let released = if config.motor.active_high {
        Level::Low
    } else {
        Level::High
    };
    let hoist = unwrap!(RelayHoist::new(
        Output::new(p.PB4, released, Speed::Low),
        Output::new(p.PB5, released, Speed::Low),
        config.motor.active_high,
    ));
    info!("Cabin I/O initialized");

    // DFPlayer on USART3 (PB10 TX, PB11 RX)
    let mut audio_config = UartConfig::default();
    audio_config.baudrate = DFPLAYER_BAUD;
    let audio_uart = unwrap!(BufferedUart::new(
        p.USART3,
        p.PB11,
        p.PB10,
        AUDIO_TX_BUF.init([0u8; 64]),
        AUDIO_RX_BUF.init([0u8; 32]),
        Irqs,
        audio_config,
    ));
    let (audio_tx, _audio_rx) = audio_uart.split();

    // Indicator panel on USART4 (PA0 TX, PA1 RX)
    let mut panel_config = UartConfig::default();
    panel_config.baudrate = PANEL_BAUD;
    let panel_uart = unwrap!(BufferedUart::new(
        p.USART4,
        p.PA1,
        p.PA0,
        PANEL_TX_BUF.init([0u8; 128]),
        PANEL_RX_BUF.init([0u8; 32]),
        Irqs,
        panel_config,
    ));
    let (panel_tx, _panel_rx) = panel_uart.split();
    info!("UARTs initialized");

    // Status bus (PB8 RX, PB9 TX)
    let mut can = Can::new(p.CAN, p.PB8, p.PB9, Irqs);
    can.modify_config().set_bitrate(CAN_BITRATE);
    can.enable().await;
    info!("CAN enabled at {} bit/s", CAN_BITRATE);

    let can_config = CanTxConfig {
        status_id: config.bus.status_id,
        send_timeout_ms: config.bus.send_timeout_ms,
    };
    let io = CabinIo {
        buttons,
        door,
        sensor,
        hoist,
    };

    info!("Spawning tasks...");

    spawner
        .spawn(tasks::audio_task(audio_tx, config.audio.volume))
        .unwrap();
    spawner.spawn(tasks::panel_task(panel_tx)).unwrap();
    spawner.spawn(tasks::can_tx_task(can, can_config)).unwrap();
    spawner.spawn(tasks::control_task(cabin, io)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
