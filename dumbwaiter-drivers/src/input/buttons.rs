//! Landing call buttons
//!
//! One active-low button per floor, wired to a pull-up input.

use dumbwaiter_core::{last_pressed, Floor};
use embedded_hal::digital::InputPin;

use super::InputError;

pub struct ButtonBank<P, const N: usize> {
    pins: [P; N],
}

impl<P: InputPin, const N: usize> ButtonBank<P, N> {
    /// `pins[i]` is the button of floor `i + 1`
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Read one button
    pub fn is_pressed(&mut self, index: usize) -> Result<bool, InputError> {
        let pin = self.pins.get_mut(index).ok_or(InputError::Pin)?;
        pin.is_low().map_err(|_| InputError::Pin)
    }

    /// Read every button; unreadable buttons count as released
    pub fn scan(&mut self) -> [bool; N] {
        let mut pressed = [false; N];
        for (state, pin) in pressed.iter_mut().zip(self.pins.iter_mut()) {
            *state = pin.is_low().unwrap_or(false);
        }
        pressed
    }

    /// The requested floor, last pressed button winning
    pub fn requested(&mut self, floor_count: u8) -> Option<Floor> {
        last_pressed(&self.scan(), floor_count)
    }
}
