mod blackboard; // brings `blackboard.rs` in as `crate::blackboard`
mod bus; // brings `bus.rs` in as `crate::bus`
mod config; // brings `config.rs` in as `crate::config`
mod serial; // brings `serial.rs` in as `crate::serial`
mod sim; // brings `sim.rs` in as `crate::sim`

use std::io::ErrorKind;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};
use tracing_subscriber::{self, EnvFilter};

use kinetic_control::Command;

use blackboard::{Blackboard, record_applied, record_ignored, snapshot};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Kinetic motor controller starting...");

    let settings = config::load_settings().context("configuration is invalid")?;
    let port = serial::open(&settings.serial.port, settings.serial.baud)?;

    let bb: Blackboard = Arc::default();
    let (command_tx, command_rx) = bus::bounded::<Command>(16);

    let status_interval = Duration::from_millis(settings.status.interval_ms);

    tokio::try_join!(
        reader_task(port, bb.clone(), command_tx),
        actuation_task(bb.clone(), command_rx),
        status_task(bb, status_interval),
    )?;

    Ok(())
}

/// Read one byte at a time from the serial link and classify it.
///
/// Recognized commands go onto the command queue in arrival order. The send
/// waits when the queue is full, so a burst backs up into the OS serial
/// receive buffer rather than losing commands here. Unrecognized bytes are
/// counted and logged but never answered or applied.
async fn reader_task<R>(
    mut source: R,
    bb: Blackboard,
    commands: bus::Sender<Command>,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    info!("Reader task started.");
    loop {
        let byte = match source.read_u8().await {
            Ok(byte) => byte,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                info!("Serial input closed.");
                return Ok(());
            }
            Err(e) => return Err(e).context("serial read failed"),
        };
        match Command::from_byte(byte) {
            Some(command) => {
                debug!(byte, %command, "Command byte received");
                commands.send(command).await;
            }
            None => {
                // Defined no-op: line noise is dropped, never reported back.
                debug!(byte, "Ignoring unrecognized byte");
                record_ignored(&bb);
            }
        }
    }
}

/// Apply commands to the H-bridge, one at a time, in arrival order.
///
/// The driver is constructed here, which forces the stop posture before the
/// first command can be applied. Each actuation completes before the next
/// command is taken from the queue.
async fn actuation_task(
    bb: Blackboard,
    mut command_rx: bus::Receiver<Command>,
) -> anyhow::Result<()> {
    let mut bridge = sim::bench_bridge()?;
    info!(state = %bridge.state(), "Actuation task started, motor forced to stop state.");

    while let Some(command) = command_rx.recv().await {
        bridge.execute(command)?;
        record_applied(&bb, command, bridge.state());
        info!(%command, state = %bridge.state(), "Command applied");
    }

    info!("Command queue closed, actuation task finishing.");
    Ok(())
}

/// Periodic report of the shared state snapshot.
async fn status_task(bb: Blackboard, interval: Duration) -> anyhow::Result<()> {
    info!("Status task started.");
    let mut tick = tokio::time::interval(interval);
    loop {
        tick.tick().await;
        let state = snapshot(&bb);
        let last_cmd_age = Instant::now() - state.last_cmd_ts;
        info!(
            drive = %state.drive,
            applied = state.commands_applied,
            ignored = state.bytes_ignored,
            ?last_cmd_age,
            "Status"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_control::SpeedPreset;

    /// Run the reader and actuation tasks concurrently over an in-memory
    /// byte stream and return the final shared state.
    ///
    /// The reader owns the only queue sender, so the queue closes when the
    /// input is exhausted and the actuation task finishes on its own.
    async fn run_bytes(input: &'static [u8]) -> blackboard::State {
        let bb: Blackboard = Arc::default();
        let (command_tx, command_rx) = bus::bounded::<Command>(16);

        let (reader, actuation) = tokio::join!(
            reader_task(input, bb.clone(), command_tx),
            actuation_task(bb.clone(), command_rx),
        );
        reader.unwrap();
        actuation.unwrap();

        snapshot(&bb)
    }

    #[tokio::test]
    async fn test_max_then_stop_ends_stopped() {
        let state = run_bytes(b"40").await;
        assert!(state.drive.is_stopped());
        assert_eq!(state.last_command, Some(Command::Stop));
        assert_eq!(state.commands_applied, 2);
        assert_eq!(state.bytes_ignored, 0);
    }

    #[tokio::test]
    async fn test_noise_is_dropped_and_commands_still_apply() {
        let state = run_bytes(b"z2").await;
        assert_eq!(
            state.last_command,
            Some(Command::Drive(SpeedPreset::MidLow))
        );
        assert_eq!(state.drive.duty, 135);
        assert!(state.drive.in1);
        assert!(!state.drive.in2);
        assert_eq!(state.bytes_ignored, 1);
    }

    #[tokio::test]
    async fn test_empty_input_leaves_motor_stopped() {
        let state = run_bytes(b"").await;
        assert!(state.drive.is_stopped());
        assert_eq!(state.last_command, None);
        assert_eq!(state.commands_applied, 0);
    }

    #[tokio::test]
    async fn test_burst_applies_every_command_in_order() {
        // More valid bytes than the queue holds: backpressure must absorb
        // the burst, every command applies, and the last one wins.
        let state = run_bytes(b"1111111111111111111140").await;
        assert_eq!(state.commands_applied, 22);
        assert_eq!(state.last_command, Some(Command::Stop));
        assert!(state.drive.is_stopped());
    }
}
