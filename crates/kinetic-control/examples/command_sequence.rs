use core::convert::Infallible;

use kinetic_control::hardware::{DigitalOutput, PwmOutput};
use kinetic_control::*;

/// In-memory direction line for running the driver without hardware.
struct RecordedPin {
    high: bool,
}

impl DigitalOutput for RecordedPin {
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

/// In-memory duty-cycle output.
struct RecordedPwm {
    duty: u8,
}

impl PwmOutput for RecordedPwm {
    type Error = Infallible;

    fn set_duty_cycle(&mut self, duty: u8) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

fn main() {
    println!("Supported command bytes:");
    for (byte, command) in COMMAND_TABLE {
        println!("  '{}' -> {}", byte as char, command);
    }

    let bridge_result = HBridge::new(
        RecordedPin { high: true },
        RecordedPin { high: true },
        RecordedPwm { duty: 0xFF },
    );

    match bridge_result {
        Ok(mut bridge) => {
            println!("\nStartup state: {}", bridge.state());

            let received = b"1z4 0\n2";
            println!("Feeding byte sequence {:?}...\n", received);

            for &byte in received {
                match bridge.apply_byte(byte) {
                    Ok(Some(command)) => {
                        println!("'{}': applied {:<20} state: {}", byte as char, command, bridge.state());
                    }
                    Ok(None) => {
                        println!("{:#04x}: ignored {:>21} state: {}", byte, "", bridge.state());
                    }
                    Err(e) => {
                        eprintln!("Failed to apply byte {:#04x}: {:?}", byte, e);
                        break; // Stop loop on error
                    }
                }
            }

            println!("\nFinal state: {}", bridge.state());
        }
        Err(e) => {
            eprintln!("Failed to initialize the H-bridge driver: {:?}", e);
        }
    }
}
