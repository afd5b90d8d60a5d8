//! Error types for the USB tutorial hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when interacting with the hardware.
#[derive(Error, Debug)]
pub enum Error {
    /// No attached device matches the requested VID:PID.
    #[error("USB device not found (VID:PID {vid:04X}:{pid:04X})")]
    DeviceNotFound { vid: u16, pid: u16 },

    /// libusb error.
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    /// A transfer moved fewer bytes than requested.
    #[error("Short transfer on endpoint {endpoint:#04X}: {transferred} of {expected} bytes")]
    ShortTransfer {
        endpoint: u8,
        expected: usize,
        transferred: usize,
    },

    /// Framebuffer size mismatch.
    #[error("Framebuffer size mismatch: expected {expected}, got {actual}")]
    FramebufferSize { expected: usize, actual: usize },

    /// Image dimensions do not match the framebuffer.
    #[error("Image size mismatch: expected {expected:?}, got {actual:?}")]
    ImageSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Image decoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Logger packet with a dangling half sample.
    #[error("Malformed logger packet: {0} bytes")]
    MalformedPacket(usize),
}

impl Error {
    /// Returns true if this error is a transfer timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Usb(rusb::Error::Timeout))
    }
}
