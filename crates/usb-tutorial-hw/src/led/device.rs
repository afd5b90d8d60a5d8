//! LED control via vendor control transfers.

use crate::transport::{DeviceTransport, UsbTransport};
use crate::Result;
use rusb::{Direction, Recipient, RequestType};
use std::time::Duration;
use tracing::{debug, info};

/// Vendor request code understood by the blinky firmware.
pub const LED_REQUEST: u8 = 0x33;

/// `wIndex` the firmware checks before acting on the request.
pub const LED_INDEX: u16 = 1;

/// LED device controller.
pub struct LedDevice<T = UsbTransport> {
    transport: T,
    on: bool,
}

impl LedDevice<UsbTransport> {
    /// Opens the blinky device by VID:PID.
    pub fn open(vid: u16, pid: u16, timeout: Duration) -> Result<Self> {
        Ok(Self::new(UsbTransport::open(vid, pid, timeout)?))
    }
}

impl<T: DeviceTransport> LedDevice<T> {
    /// Wraps an opened transport. The LED is assumed to be off.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            on: false,
        }
    }

    /// `0x41`: host-to-device, vendor, interface recipient.
    fn request_type() -> u8 {
        rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Interface)
    }

    /// Switches the LED on or off.
    pub fn set_led(&mut self, on: bool) -> Result<()> {
        self.transport
            .write_control(Self::request_type(), LED_REQUEST, on as u16, LED_INDEX, &[])?;
        self.on = on;
        debug!("LED {}", if on { "on" } else { "off" });
        Ok(())
    }

    /// Flips the LED and returns the new state.
    pub fn toggle(&mut self) -> Result<bool> {
        let on = !self.on;
        self.set_led(on)?;
        Ok(on)
    }

    /// Returns the last state written to the device.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Turns the LED off.
    pub fn off(&mut self) -> Result<()> {
        self.set_led(false)?;
        info!("LED turned off");
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::{MockTransport, Transfer};

    fn control(value: u16) -> Transfer {
        Transfer::Control {
            request_type: 0x41,
            request: 0x33,
            value,
            index: 1,
            data: vec![],
        }
    }

    #[test]
    fn test_request_type() {
        assert_eq!(LedDevice::<MockTransport>::request_type(), 0x41);
    }

    #[test]
    fn test_set_led() {
        let mut led = LedDevice::new(MockTransport::new());
        led.set_led(true).unwrap();
        assert!(led.is_on());
        led.set_led(false).unwrap();
        assert!(!led.is_on());
        assert_eq!(led.transport().transfers(), vec![control(1), control(0)]);
    }

    #[test]
    fn test_toggle_alternates() {
        let mut led = LedDevice::new(MockTransport::new());
        assert!(led.toggle().unwrap());
        assert!(!led.toggle().unwrap());
        assert!(led.toggle().unwrap());
        led.off().unwrap();
        assert_eq!(
            led.transport().transfers(),
            vec![control(1), control(0), control(1), control(0)]
        );
    }
}
