//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in dumbwaiter-core, on top of `embedded-hal` pins and `embedded-io`
//! serial ports:
//!
//! - Hoist motor (two relays, break-before-make)
//! - Call buttons, door/lock switch, cabin proximity sensor
//! - DFPlayer Mini voice module
//! - Serial floor indicator panel

#![no_std]
#![deny(unsafe_code)]

pub mod audio;
pub mod indicator;
pub mod input;
pub mod motor;
