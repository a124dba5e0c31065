//! Serial link setup.
//!
//! One ASCII byte per command, no framing, no terminator, and nothing is
//! ever written back. Bytes arriving faster than the tasks service them sit
//! in the OS/driver receive buffer, not in this code.

use anyhow::Context;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::info;

/// Open the configured port for reading command bytes.
pub fn open(port: &str, baud: u32) -> anyhow::Result<SerialStream> {
    info!(port, baud, "Opening serial port");
    tokio_serial::new(port, baud)
        .open_native_async()
        .with_context(|| format!("failed to open serial port {}", port))
}
