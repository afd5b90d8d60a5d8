//! The tutorial device family.

use crate::{BLINKY_PID, DISPLAY_PID, LOGGER_PID};

/// One of the tutorial devices, identified by product ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// LED toggled by vendor control request.
    Blinky,
    /// 128x160 TFT fed over bulk OUT.
    Display,
    /// ADC sampler streaming over bulk IN.
    Logger,
}

impl DeviceKind {
    /// Returns the default product ID.
    pub fn product_id(&self) -> u16 {
        match self {
            DeviceKind::Blinky => BLINKY_PID,
            DeviceKind::Display => DISPLAY_PID,
            DeviceKind::Logger => LOGGER_PID,
        }
    }

    /// Identifies a device by its default product ID.
    pub fn from_product_id(pid: u16) -> Option<Self> {
        [DeviceKind::Blinky, DeviceKind::Display, DeviceKind::Logger]
            .into_iter()
            .find(|kind| kind.product_id() == pid)
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceKind::Blinky => write!(f, "blinky"),
            DeviceKind::Display => write!(f, "display"),
            DeviceKind::Logger => write!(f, "logger"),
        }
    }
}
