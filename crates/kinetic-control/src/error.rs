//! This module defines the error types used by the `kinetic-control` crate.

#![warn(missing_docs)]

use core::convert::Infallible;

use crate::hardware::gpio::GpioError;
use crate::hardware::pwm::PwmError;

/// Error type for H-bridge driver operations.
///
/// This enum wraps the errors of the underlying direction-line and
/// duty-cycle backends so driver operations can surface either through a
/// single type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// A direction line could not be driven to the requested level.
    Gpio(GpioError),
    /// The duty-cycle output could not be set.
    Pwm(PwmError),
}

impl From<GpioError> for DriverError {
    fn from(err: GpioError) -> Self {
        DriverError::Gpio(err)
    }
}

impl From<PwmError> for DriverError {
    fn from(err: PwmError) -> Self {
        DriverError::Pwm(err)
    }
}

impl From<Infallible> for DriverError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DriverError::Gpio(err) => write!(f, "Direction line error: {}", err),
            DriverError::Pwm(err) => write!(f, "Duty-cycle output error: {}", err),
        }
    }
}

impl core::error::Error for DriverError {}
