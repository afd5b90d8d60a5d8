//! USB transport abstraction.
//!
//! Drivers talk to a [`DeviceTransport`] rather than to libusb directly so
//! they can be exercised against a recording mock.

mod usb;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use usb::{list_devices, DeviceInfo, UsbTransport};

use crate::Result;

/// The transfers the tutorial devices need.
///
/// Timeouts are a property of the transport. Each call returns the number
/// of bytes actually transferred.
pub trait DeviceTransport {
    /// Issues a control transfer with an OUT data stage (possibly empty).
    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize>;

    /// Writes to a bulk OUT endpoint.
    fn write_bulk(&self, endpoint: u8, data: &[u8]) -> Result<usize>;

    /// Reads from a bulk IN endpoint.
    fn read_bulk(&self, endpoint: u8, buf: &mut [u8]) -> Result<usize>;
}
