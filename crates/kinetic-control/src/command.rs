//! Command bytes and the fixed byte-to-action table.
//!
//! The host sends one ASCII byte per command, with no framing and no
//! terminator. Five bytes are meaningful; every other byte value is line
//! noise and classifies to nothing.

#![warn(missing_docs)]

use core::fmt;

use crate::hardware::pwm::MAX_DUTY;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four fixed drive levels.
///
/// The duty values were chosen for the target motor and driver stage; the
/// lowest preset is already above the stall threshold, so the driver never
/// needs to clamp or reject a preset.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedPreset {
    /// Minimum-effective torque level, just above motor friction.
    MinTorque,
    /// Fixed mid-low level.
    MidLow,
    /// Fixed mid-high level.
    MidHigh,
    /// Full-scale drive.
    Max,
}

impl SpeedPreset {
    /// The 8-bit duty value this preset applies.
    ///
    /// # Returns
    ///
    /// The duty-cycle value in `0..=255`.
    pub const fn duty(self) -> u8 {
        match self {
            SpeedPreset::MinTorque => 75,
            SpeedPreset::MidLow => 135,
            SpeedPreset::MidHigh => 195,
            SpeedPreset::Max => MAX_DUTY,
        }
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedPreset::MinTorque => write!(f, "min-torque ({})", self.duty()),
            SpeedPreset::MidLow => write!(f, "mid-low ({})", self.duty()),
            SpeedPreset::MidHigh => write!(f, "mid-high ({})", self.duty()),
            SpeedPreset::Max => write!(f, "max ({})", self.duty()),
        }
    }
}

/// An action requested over the serial link.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Emergency stop: both direction lines low, duty zero.
    Stop,
    /// Drive forward at the given preset level.
    Drive(SpeedPreset),
}

/// The complete byte-to-command mapping.
///
/// This is the single source of truth for which bytes the controller
/// understands; [`Command::from_byte`] is a lookup into this table, so the
/// supported command set can be inspected and tested independently of the
/// dispatch path.
pub const COMMAND_TABLE: [(u8, Command); 5] = [
    (b'0', Command::Stop),
    (b'1', Command::Drive(SpeedPreset::MinTorque)),
    (b'2', Command::Drive(SpeedPreset::MidLow)),
    (b'3', Command::Drive(SpeedPreset::MidHigh)),
    (b'4', Command::Drive(SpeedPreset::Max)),
];

impl Command {
    /// Classify a received byte.
    ///
    /// # Arguments
    ///
    /// * `byte`: The raw byte taken from the serial link.
    ///
    /// # Returns
    ///
    /// The matching command, or `None` for any byte outside the table.
    /// An unrecognized byte is a defined no-op, not an error.
    pub fn from_byte(byte: u8) -> Option<Command> {
        COMMAND_TABLE
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|(_, cmd)| *cmd)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Stop => write!(f, "stop"),
            Command::Drive(preset) => write!(f, "drive {}", preset),
        }
    }
}
