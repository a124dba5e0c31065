//! Hardware output abstractions.
//!
//! The driver in this crate never touches pins directly; it goes through the
//! traits defined here so that any GPIO/PWM backend (real pins, a logging
//! bench backend, or in-memory test doubles) can sit behind it.

pub mod gpio;
pub mod pwm;

pub use gpio::{DigitalOutput, GpioError};
pub use pwm::{PwmError, PwmOutput};
