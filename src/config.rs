use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Serial link parameters. The protocol itself is fixed (one ASCII byte per
/// command, no framing, no response); only where to listen is configurable.
#[derive(Debug, Clone, Deserialize)]
pub struct SerialSettings {
    /// Device path of the serial port, e.g. `/dev/ttyUSB0`.
    pub port: String,
    /// Baud rate of the link.
    #[serde(default = "default_baud")]
    pub baud: u32,
}

fn default_baud() -> u32 {
    9600
}

/// Periodic status report settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSettings {
    /// Interval between status log lines, in milliseconds.
    #[serde(default = "default_status_interval_ms")]
    pub interval_ms: u64,
}

fn default_status_interval_ms() -> u64 {
    1000
}

impl Default for StatusSettings {
    fn default() -> Self {
        StatusSettings {
            interval_ms: default_status_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub serial: SerialSettings,
    #[serde(default)]
    pub status: StatusSettings,
}

pub fn load_settings() -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", DEFAULT_CONFIG_PATH);

    let settings = Config::builder()
        .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(true))
        .build()
        .and_then(Config::try_deserialize);

    match settings {
        Ok(settings) => {
            info!("Successfully loaded configuration: {:?}", settings);
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}
