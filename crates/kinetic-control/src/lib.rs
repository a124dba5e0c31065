#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for serial-command H-bridge motor control."]
#![doc = ""]
#![doc = "This crate provides the command-byte classification table, hardware"]
#![doc = "output traits, and the H-bridge driver that maps commands to"]
#![doc = "direction-line and duty-cycle outputs."]

pub mod command;
pub mod driver;
pub mod error;
pub mod hardware;

pub use command::{COMMAND_TABLE, Command, SpeedPreset};
pub use driver::{DriveState, HBridge};
pub use error::DriverError;
