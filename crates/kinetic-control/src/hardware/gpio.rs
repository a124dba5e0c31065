//! Digital output line abstraction.

#![warn(missing_docs)]

use core::fmt;

/// Errors that can occur when driving a digital output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpioError {
    /// Error for a failed level write.
    /// This variant is returned when the backend could not latch the
    /// requested output level.
    WriteFailed(&'static str),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpioError::WriteFailed(msg) => write!(f, "Digital output write failed: {}", msg),
        }
    }
}

impl core::error::Error for GpioError {}

/// A single push-pull digital output line.
///
/// Implementations must leave the line at exactly the requested level when
/// the call returns `Ok`; there is no read-back, the driver tracks the
/// commanded level itself.
pub trait DigitalOutput {
    /// Backend-specific error type.
    type Error;

    /// Drive the line high.
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Drive the line low.
    fn set_low(&mut self) -> Result<(), Self::Error>;
}
