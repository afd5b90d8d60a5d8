//! USB Tutorial Hardware Library
//!
//! Host-side drivers for the tutorial devices: an LED that blinks on a
//! vendor control request, a 128x160 TFT display fed RGB565 frames over a
//! bulk endpoint, and a voltage logger streaming ADC samples back.

pub mod display;
pub mod error;
pub mod image_source;
pub mod kind;
pub mod led;
pub mod logger;
pub mod pixel;
pub mod transport;

pub use display::{DisplayDevice, Framebuffer};
pub use error::{Error, Result};
pub use image_source::{load_image, ImageSource};
pub use kind::DeviceKind;
pub use led::LedDevice;
pub use logger::{LoggerDevice, Sample};
pub use pixel::{convert_image, convert_pixel, rgb888_to_rgb565, Pixel};
pub use transport::{list_devices, DeviceInfo, DeviceTransport, UsbTransport};

/// Display dimensions
pub const DISPLAY_WIDTH: u16 = 128;
pub const DISPLAY_HEIGHT: u16 = 160;

/// USB vendor ID shared by all tutorial devices
pub const VENDOR_ID: u16 = 0xCAFE;

/// USB product IDs
pub const BLINKY_PID: u16 = 0xCAFE;
pub const DISPLAY_PID: u16 = 0xCEAF;
pub const LOGGER_PID: u16 = 0xBABE;
