//! libusb-backed transport.

use super::DeviceTransport;
use crate::{Error, Result};
use rusb::{DeviceHandle, GlobalContext, UsbContext};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration selected after opening, like `set_configuration()` does.
const CONFIGURATION: u8 = 1;

/// Interface carrying the vendor endpoints.
const INTERFACE: u8 = 0;

/// An opened and claimed tutorial device.
pub struct UsbTransport {
    handle: DeviceHandle<GlobalContext>,
    timeout: Duration,
}

impl UsbTransport {
    /// Opens the first device matching VID:PID and claims its interface.
    pub fn open(vid: u16, pid: u16, timeout: Duration) -> Result<Self> {
        let handle = rusb::open_device_with_vid_pid(vid, pid)
            .ok_or(Error::DeviceNotFound { vid, pid })?;

        match handle.set_auto_detach_kernel_driver(true) {
            Ok(()) => {}
            Err(rusb::Error::NotSupported) => {
                debug!("Kernel driver auto-detach not supported on this platform")
            }
            Err(e) => warn!("Failed to enable kernel driver auto-detach: {}", e),
        }

        let active = handle.active_configuration()?;
        if active != CONFIGURATION {
            debug!("Switching configuration {} -> {}", active, CONFIGURATION);
            handle.set_active_configuration(CONFIGURATION)?;
        }
        handle.claim_interface(INTERFACE)?;

        info!(
            "USB device opened (VID:{:04X} PID:{:04X}, interface={})",
            vid, pid, INTERFACE
        );

        Ok(Self { handle, timeout })
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(INTERFACE) {
            debug!("Failed to release interface {}: {}", INTERFACE, e);
        }
    }
}

impl DeviceTransport for UsbTransport {
    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize> {
        let n = self
            .handle
            .write_control(request_type, request, value, index, data, self.timeout)?;
        debug!(
            "Control OUT type={:#04X} req={:#04X} value={} index={} ({} bytes)",
            request_type, request, value, index, n
        );
        Ok(n)
    }

    fn write_bulk(&self, endpoint: u8, data: &[u8]) -> Result<usize> {
        let n = self.handle.write_bulk(endpoint, data, self.timeout)?;
        debug!("Bulk OUT ep={:#04X}: {} of {} bytes", endpoint, n, data.len());
        Ok(n)
    }

    fn read_bulk(&self, endpoint: u8, buf: &mut [u8]) -> Result<usize> {
        let n = self.handle.read_bulk(endpoint, buf, self.timeout)?;
        debug!("Bulk IN ep={:#04X}: {} bytes", endpoint, n);
        Ok(n)
    }
}

/// An attached USB device as seen during enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub bus: u8,
    pub address: u8,
    pub vendor_id: u16,
    pub product_id: u16,
}

/// Lists attached devices with the given vendor ID.
pub fn list_devices(vid: u16) -> Result<Vec<DeviceInfo>> {
    let mut found = Vec::new();
    for device in GlobalContext::default().devices()?.iter() {
        let descriptor = match device.device_descriptor() {
            Ok(d) => d,
            Err(e) => {
                debug!(
                    "Skipping device {:03}:{:03}: {}",
                    device.bus_number(),
                    device.address(),
                    e
                );
                continue;
            }
        };
        if descriptor.vendor_id() != vid {
            continue;
        }
        found.push(DeviceInfo {
            bus: device.bus_number(),
            address: device.address(),
            vendor_id: descriptor.vendor_id(),
            product_id: descriptor.product_id(),
        });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DISPLAY_PID, VENDOR_ID};

    // Hardware tests are skipped by default
    #[test]
    #[ignore]
    fn test_device_open() {
        let transport = UsbTransport::open(VENDOR_ID, DISPLAY_PID, Duration::from_secs(2));
        assert!(transport.is_ok());
    }

    #[test]
    #[ignore]
    fn test_list_devices() {
        let devices = list_devices(VENDOR_ID).unwrap();
        assert!(devices.iter().all(|d| d.vendor_id == VENDOR_ID));
    }
}
