//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use usb_tutorial_hw::{BLINKY_PID, DISPLAY_PID, LOGGER_PID, VENDOR_ID};

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// USB vendor ID shared by the devices
    #[serde(default = "default_vendor_id")]
    pub vendor_id: u16,

    /// Per-transfer timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Blinky configuration
    #[serde(default)]
    pub blinky: BlinkyConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Blinky device configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlinkyConfig {
    #[serde(default = "default_blinky_pid")]
    pub product_id: u16,

    /// Toggle interval in milliseconds
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl Default for BlinkyConfig {
    fn default() -> Self {
        Self {
            product_id: default_blinky_pid(),
            interval: default_interval(),
        }
    }
}

/// Display device configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_display_pid")]
    pub product_id: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            product_id: default_display_pid(),
        }
    }
}

/// Logger device configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default = "default_logger_pid")]
    pub product_id: u16,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            product_id: default_logger_pid(),
        }
    }
}

// Default value functions
fn default_vendor_id() -> u16 {
    VENDOR_ID
}

fn default_timeout() -> u64 {
    2000
}

fn default_blinky_pid() -> u16 {
    BLINKY_PID
}

fn default_interval() -> u64 {
    600
}

fn default_display_pid() -> u16 {
    DISPLAY_PID
}

fn default_logger_pid() -> u16 {
    LOGGER_PID
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        Self::parse(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the devices cannot work with.
    ///
    /// A zero timeout means "wait forever" to libusb, and a zero blink
    /// interval is not a valid timer period.
    fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            anyhow::bail!("timeout must be greater than 0 ms");
        }
        if self.blinky.interval == 0 {
            anyhow::bail!("blinky.interval must be greater than 0 ms");
        }
        Ok(())
    }

    /// Returns the per-transfer timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendor_id: default_vendor_id(),
            timeout: default_timeout(),
            blinky: BlinkyConfig::default(),
            display: DisplayConfig::default(),
            logger: LoggerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.vendor_id, 0xCAFE);
        assert_eq!(config.blinky.product_id, 0xCAFE);
        assert_eq!(config.display.product_id, 0xCEAF);
        assert_eq!(config.logger.product_id, 0xBABE);
        assert_eq!(config.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
            timeout = 500

            [blinky]
            interval = 250

            [display]

            [logger]
            product_id = 0xBEEF
            "#,
        )
        .unwrap();
        assert_eq!(config.timeout, 500);
        assert_eq!(config.blinky.interval, 250);
        assert_eq!(config.blinky.product_id, 0xCAFE);
        assert_eq!(config.logger.product_id, 0xBEEF);
        assert_eq!(config.display.product_id, 0xCEAF);
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("usbtut-config-{}.toml", std::process::id()));
        let mut config = Config::default();
        config.display.product_id = 0x1234;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::parse("timeout = 0").unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_zero_blink_interval_rejected() {
        let err = Config::parse("[blinky]\ninterval = 0").unwrap_err();
        assert!(err.to_string().contains("blinky.interval"));
    }

    #[test]
    fn test_load_validates() {
        let path = std::env::temp_dir().join(format!("usbtut-zero-{}.toml", std::process::id()));
        std::fs::write(&path, "timeout = 0\n").unwrap();
        let result = Config::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/usbtut.toml").is_err());
    }
}
