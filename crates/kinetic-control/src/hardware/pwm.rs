//! Duty-cycle (PWM) output abstraction.

#![warn(missing_docs)]

use core::fmt;

/// Full-scale duty value: the output is held high for the whole period.
pub const MAX_DUTY: u8 = u8::MAX;

/// Errors that can occur when driving a duty-cycle output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PwmError {
    /// Error for a failed duty-cycle write.
    /// This variant is returned when the backend could not apply the
    /// requested duty value.
    WriteFailed(&'static str),
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PwmError::WriteFailed(msg) => write!(f, "Duty-cycle write failed: {}", msg),
        }
    }
}

impl core::error::Error for PwmError {}

/// A proportional output line with an 8-bit duty range.
///
/// `0` holds the line low, [`MAX_DUTY`] holds it high for the whole period.
/// The trait performs no clamping or validation; callers pass duty values
/// that are already meaningful for their load.
pub trait PwmOutput {
    /// Backend-specific error type.
    type Error;

    /// Apply a duty value in `0..=MAX_DUTY`.
    fn set_duty_cycle(&mut self, duty: u8) -> Result<(), Self::Error>;
}
