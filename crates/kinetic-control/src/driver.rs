//! H-bridge driver: maps commands onto two direction lines and one
//! duty-cycle output.
//!
//! The driver keeps an explicit [`DriveState`] snapshot of what it last
//! commanded, so the output state can be asserted on without hardware. Only
//! one rotational direction is wired up: driving always puts IN1 high and
//! IN2 low, stopping puts both low (coast/brake posture, not reverse).

#![warn(missing_docs)]

use core::fmt;

use crate::command::{Command, SpeedPreset};
use crate::error::DriverError;
use crate::hardware::gpio::DigitalOutput;
use crate::hardware::pwm::PwmOutput;

/// Snapshot of the three output lines.
///
/// `true` means the line is driven high. This mirrors the live pin levels
/// exactly; the driver updates it only after the backend write succeeds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveState {
    /// Direction line A level.
    pub in1: bool,
    /// Direction line B level.
    pub in2: bool,
    /// Duty-cycle output value (`0..=255`).
    pub duty: u8,
}

impl DriveState {
    /// The de-energized posture: both direction lines low, duty zero.
    pub const STOPPED: DriveState = DriveState {
        in1: false,
        in2: false,
        duty: 0,
    };

    /// Whether this state is the stop posture.
    pub const fn is_stopped(&self) -> bool {
        !self.in1 && !self.in2 && self.duty == 0
    }
}

impl Default for DriveState {
    fn default() -> Self {
        DriveState::STOPPED
    }
}

impl fmt::Display for DriveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(in1: {}, in2: {}, duty: {})",
            self.in1 as u8, self.in2 as u8, self.duty
        )
    }
}

/// Single-direction H-bridge driver.
///
/// Generic over the two direction lines and the duty-cycle output so it can
/// run against real pins, a logging bench backend, or in-memory test
/// doubles.
pub struct HBridge<A, B, P>
where
    A: DigitalOutput,
    B: DigitalOutput,
    P: PwmOutput,
{
    in1: A,
    in2: B,
    pwm: P,
    state: DriveState,
}

impl<A, B, P> HBridge<A, B, P>
where
    A: DigitalOutput,
    B: DigitalOutput,
    P: PwmOutput,
    A::Error: Into<DriverError>,
    B::Error: Into<DriverError>,
    P::Error: Into<DriverError>,
{
    /// Take ownership of the three output lines and force the stop posture.
    ///
    /// The motor must never hold an indeterminate or energized state before
    /// the first command, so construction is not complete until the stop
    /// writes have succeeded.
    ///
    /// # Errors
    ///
    /// Returns the backend error if any of the initial stop writes fail.
    pub fn new(in1: A, in2: B, pwm: P) -> Result<Self, DriverError> {
        let mut bridge = Self {
            in1,
            in2,
            pwm,
            state: DriveState::STOPPED,
        };
        bridge.stop()?;
        Ok(bridge)
    }

    /// Drive forward at the given preset level.
    ///
    /// Sets the fixed forward direction configuration (IN1 high, IN2 low)
    /// and applies the preset's duty value. The duty is applied as-is; the
    /// presets are chosen to already be effective, so no clamping happens
    /// here.
    ///
    /// # Errors
    ///
    /// Returns the backend error if a line write fails. The tracked state
    /// keeps the levels that were successfully applied before the failure.
    pub fn drive(&mut self, preset: SpeedPreset) -> Result<(), DriverError> {
        self.in1.set_high().map_err(Into::into)?;
        self.state.in1 = true;
        self.in2.set_low().map_err(Into::into)?;
        self.state.in2 = false;
        self.pwm.set_duty_cycle(preset.duty()).map_err(Into::into)?;
        self.state.duty = preset.duty();
        Ok(())
    }

    /// Force the stop posture: both direction lines low, duty zero.
    ///
    /// Used at startup and for the explicit stop command.
    ///
    /// # Errors
    ///
    /// Returns the backend error if a line write fails.
    pub fn stop(&mut self) -> Result<(), DriverError> {
        self.in1.set_low().map_err(Into::into)?;
        self.state.in1 = false;
        self.in2.set_low().map_err(Into::into)?;
        self.state.in2 = false;
        self.pwm.set_duty_cycle(0).map_err(Into::into)?;
        self.state.duty = 0;
        Ok(())
    }

    /// Apply a classified command.
    ///
    /// # Arguments
    ///
    /// * `command`: The command to realize on the output lines.
    ///
    /// # Errors
    ///
    /// Returns the backend error if a line write fails.
    pub fn execute(&mut self, command: Command) -> Result<(), DriverError> {
        match command {
            Command::Stop => self.stop(),
            Command::Drive(preset) => self.drive(preset),
        }
    }

    /// Classify a raw byte and apply it if it is a recognized command.
    ///
    /// # Arguments
    ///
    /// * `byte`: The raw byte taken from the serial link.
    ///
    /// # Returns
    ///
    /// The command that was applied, or `None` if the byte was unrecognized
    /// and the output state was left untouched.
    ///
    /// # Errors
    ///
    /// Returns the backend error if a line write fails.
    pub fn apply_byte(&mut self, byte: u8) -> Result<Option<Command>, DriverError> {
        match Command::from_byte(byte) {
            Some(command) => {
                self.execute(command)?;
                Ok(Some(command))
            }
            None => Ok(None),
        }
    }

    /// The last state the driver successfully commanded.
    pub const fn state(&self) -> DriveState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Records the last level it was driven to.
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            // Deliberately start high so tests can see the startup stop
            // actually drive the line low.
            MockPin { high: true }
        }
    }

    impl DigitalOutput for MockPin {
        type Error = Infallible;

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }
    }

    /// Records the last duty value it was given.
    struct MockPwm {
        duty: u8,
    }

    impl MockPwm {
        fn new() -> Self {
            MockPwm { duty: 0xAA }
        }
    }

    impl PwmOutput for MockPwm {
        type Error = Infallible;

        fn set_duty_cycle(&mut self, duty: u8) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    fn bridge() -> HBridge<MockPin, MockPin, MockPwm> {
        HBridge::new(MockPin::new(), MockPin::new(), MockPwm::new()).unwrap()
    }

    #[test]
    fn test_startup_forces_stop_state() {
        // Pins start high / nonzero; construction must drive them to the
        // stop posture before anything else.
        let bridge = bridge();
        assert_eq!(bridge.state(), DriveState::STOPPED);
        assert!(!bridge.in1.high);
        assert!(!bridge.in2.high);
        assert_eq!(bridge.pwm.duty, 0);
    }

    #[test]
    fn test_drive_sets_forward_configuration_and_preset_duty() {
        let mut bridge = bridge();
        for (preset, duty) in [
            (SpeedPreset::MinTorque, 75),
            (SpeedPreset::MidLow, 135),
            (SpeedPreset::MidHigh, 195),
            (SpeedPreset::Max, 255),
        ] {
            bridge.drive(preset).unwrap();
            assert_eq!(
                bridge.state(),
                DriveState {
                    in1: true,
                    in2: false,
                    duty
                }
            );
            assert!(bridge.in1.high);
            assert!(!bridge.in2.high);
            assert_eq!(bridge.pwm.duty, duty);
        }
    }

    #[test]
    fn test_stop_overrides_any_prior_state() {
        let mut bridge = bridge();
        bridge.drive(SpeedPreset::Max).unwrap();
        bridge.stop().unwrap();
        assert_eq!(bridge.state(), DriveState::STOPPED);
        assert!(bridge.state().is_stopped());
        assert_eq!(bridge.pwm.duty, 0);
    }

    #[test]
    fn test_unrecognized_byte_leaves_state_unchanged() {
        let mut bridge = bridge();
        bridge.drive(SpeedPreset::MidHigh).unwrap();
        let before = bridge.state();
        for byte in [b'z', b'5', b'/', 0x00, 0xFF, b' ', b'\n'] {
            assert_eq!(bridge.apply_byte(byte).unwrap(), None, "byte {:#04x}", byte);
            assert_eq!(bridge.state(), before);
        }
    }

    #[test]
    fn test_max_then_stop_ends_stopped() {
        // '4' then '0': the final state is the stop posture, not the
        // speed-4 preset.
        let mut bridge = bridge();
        assert_eq!(
            bridge.apply_byte(b'4').unwrap(),
            Some(Command::Drive(SpeedPreset::Max))
        );
        assert_eq!(bridge.apply_byte(b'0').unwrap(), Some(Command::Stop));
        assert_eq!(bridge.state(), DriveState::STOPPED);
    }

    #[test]
    fn test_noise_then_command_applies_only_the_command() {
        // 'z' produces no change, '2' then sets the mid-low preset.
        let mut bridge = bridge();
        assert_eq!(bridge.apply_byte(b'z').unwrap(), None);
        assert_eq!(bridge.state(), DriveState::STOPPED);
        assert_eq!(
            bridge.apply_byte(b'2').unwrap(),
            Some(Command::Drive(SpeedPreset::MidLow))
        );
        assert_eq!(
            bridge.state(),
            DriveState {
                in1: true,
                in2: false,
                duty: 135
            }
        );
    }

    #[test]
    fn test_repeated_command_is_idempotent() {
        // '1', '1', '1' ends in the same state as a single '1'.
        let mut single = bridge();
        single.apply_byte(b'1').unwrap();
        let expected = single.state();

        let mut repeated = bridge();
        for _ in 0..3 {
            repeated.apply_byte(b'1').unwrap();
        }
        assert_eq!(repeated.state(), expected);
    }

    #[test]
    fn test_state_reflects_most_recent_command() {
        let mut bridge = bridge();
        for (byte, duty) in [(b'1', 75), (b'3', 195), (b'2', 135), (b'4', 255)] {
            bridge.apply_byte(byte).unwrap();
            assert_eq!(bridge.state().duty, duty);
            assert!(bridge.state().in1);
            assert!(!bridge.state().in2);
        }
    }
}
