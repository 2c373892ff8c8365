//! Control cycle task
//!
//! Runs the cabin control cycle every 5 ms:
//! - Samples buttons, door switch and floor sensor
//! - Steps the cabin with the uptime clock
//! - Drives the hoist relays directly
//! - Queues clips, status records and indicator views for the I/O tasks
//!
//! Nothing in here awaits anything but the ticker, so the door interlock is
//! re-evaluated every cycle even while an announcement plays.

use defmt::*;
use embassy_stm32::gpio::{Input, Output};
use embassy_time::{Duration, Instant, Ticker};

use dumbwaiter_core::state::CabinState;
use dumbwaiter_core::traits::{BusError, HoistMotor};
use dumbwaiter_core::{Cabin, CycleEvent, Inputs};
use dumbwaiter_drivers::input::{ButtonBank, DoorSwitch, ProximitySensor};
use dumbwaiter_drivers::motor::RelayHoist;

use crate::channels::{AUDIO_QUEUE, PANEL_VIEW, STATUS_QUEUE};

/// Control cycle period
pub const CYCLE_MS: u64 = 5;

/// Number of call buttons wired on the board
pub const BUTTON_COUNT: usize = 3;

/// Pins owned by the control task
pub struct CabinIo {
    pub buttons: ButtonBank<Input<'static>, BUTTON_COUNT>,
    pub door: DoorSwitch<Input<'static>>,
    pub sensor: ProximitySensor<Input<'static>>,
    pub hoist: RelayHoist<Output<'static>, Output<'static>>,
}

#[embassy_executor::task]
pub async fn control_task(mut cabin: Cabin, mut io: CabinIo) {
    info!(
        "Control task started at floor {}",
        cabin.current_floor().number()
    );

    let mut ticker = Ticker::every(Duration::from_millis(CYCLE_MS));
    let mut last_state = cabin.state();

    loop {
        ticker.next().await;

        let now_ms = Instant::now().as_millis() as u32;
        let inputs = Inputs {
            pressed: io.buttons.requested(cabin.floor_count()),
            door_open: io.door.is_open(),
            sensor_active: io.sensor.is_active(),
        };

        let out = cabin.step(&inputs, now_ms);

        if let Err(e) = io.hoist.apply(out.motor) {
            error!("Hoist output failed: {:?}", e);
        }

        for event in out.events.iter() {
            log_event(event);
        }

        if let Some(clip) = out.clip {
            if AUDIO_QUEUE.try_send(clip).is_err() {
                warn!("Audio queue full, clip {} dropped", clip);
            }
        }

        if let Some(record) = out.broadcast {
            if STATUS_QUEUE.try_send(record).is_err() {
                warn!("Status queue full, floor {} not broadcast", record.floor);
                cabin
                    .broadcaster_mut()
                    .record_result(Err(BusError::QueueFull));
            }
        }

        if let Some(view) = out.view {
            PANEL_VIEW.signal(view);
        }

        let state = cabin.state();
        if state != last_state {
            info!("Cabin {:?} -> {:?}", last_state, state);
            if let CabinState::Fault(kind) = state {
                error!("Cabin stopped on fault {:?}; cycle the door to reset", kind);
            }
            last_state = state;
        }
    }
}

fn log_event(event: &CycleEvent) {
    match *event {
        CycleEvent::TravelStarted { to, travel } => {
            info!("Travel {:?} to floor {}", travel, to.number());
        }
        CycleEvent::FloorReached { floor, arrived } => {
            if arrived {
                info!("Arrived at floor {}", floor.number());
            } else {
                debug!("Passing floor {}", floor.number());
            }
        }
        CycleEvent::DoorOpened => info!("Door opened, hoist locked out"),
        CycleEvent::DoorClosed => info!("Door closed"),
        CycleEvent::Fault(kind) => warn!("Fault: {:?}", kind),
    }
}
