//! Motor driver implementations
//!
//! The hoist is a reversible AC motor switched by two relays, one per
//! direction.

pub mod relay;

pub use relay::RelayHoist;
