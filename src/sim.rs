//! Bench backend: in-memory output lines standing in for real pins.
//!
//! The host process has no GPIO of its own, so the driver runs against
//! these. Every level change is logged, which makes the bench a readable
//! trace of exactly what a wired-up driver stage would have seen.

use std::convert::Infallible;

use tracing::debug;

use kinetic_control::hardware::pwm::MAX_DUTY;
use kinetic_control::hardware::{DigitalOutput, PwmOutput};
use kinetic_control::{DriverError, HBridge};

/// A digital output that records its level and logs transitions.
pub struct BenchPin {
    label: &'static str,
    high: bool,
}

impl BenchPin {
    pub fn new(label: &'static str) -> Self {
        // Level is unknown until the driver forces it; report it as high so
        // the startup stop shows up in the logs as a real transition.
        BenchPin { label, high: true }
    }

    #[cfg(test)]
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl DigitalOutput for BenchPin {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            debug!(pin = self.label, "line high");
        }
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.high {
            debug!(pin = self.label, "line low");
        }
        self.high = false;
        Ok(())
    }
}

/// A duty-cycle output that records its value and logs changes.
pub struct BenchPwm {
    label: &'static str,
    duty: u8,
}

impl BenchPwm {
    pub fn new(label: &'static str) -> Self {
        // Start at full scale so the startup stop registers as a change.
        BenchPwm {
            label,
            duty: MAX_DUTY,
        }
    }

    #[cfg(test)]
    pub fn duty(&self) -> u8 {
        self.duty
    }
}

impl PwmOutput for BenchPwm {
    type Error = Infallible;

    fn set_duty_cycle(&mut self, duty: u8) -> Result<(), Self::Error> {
        if self.duty != duty {
            debug!(pin = self.label, duty, "duty cycle set");
        }
        self.duty = duty;
        Ok(())
    }
}

/// Build the H-bridge driver over the bench backend.
///
/// Construction forces the stop posture, so the returned driver already
/// satisfies the startup safety invariant.
pub fn bench_bridge() -> Result<HBridge<BenchPin, BenchPin, BenchPwm>, DriverError> {
    HBridge::new(
        BenchPin::new("IN1"),
        BenchPin::new("IN2"),
        BenchPwm::new("ENA"),
    )
}
