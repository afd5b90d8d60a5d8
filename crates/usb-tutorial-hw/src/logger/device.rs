//! Logger communication via bulk IN transfers.

use super::packet::{decode_samples, Sample, PACKET_SIZE};
use crate::transport::{DeviceTransport, UsbTransport};
use crate::Result;
use std::time::Duration;
use tracing::debug;

/// Bulk IN endpoint for sample packets.
pub const DATA_EP: u8 = 0x81;

/// Logger device controller.
pub struct LoggerDevice<T = UsbTransport> {
    transport: T,
}

impl LoggerDevice<UsbTransport> {
    /// Opens the logger device by VID:PID.
    pub fn open(vid: u16, pid: u16, timeout: Duration) -> Result<Self> {
        Ok(Self::new(UsbTransport::open(vid, pid, timeout)?))
    }
}

impl<T: DeviceTransport> LoggerDevice<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Blocks until the next packet arrives and decodes it.
    pub fn read_samples(&self) -> Result<Vec<Sample>> {
        let mut buf = [0u8; PACKET_SIZE];
        let n = self.transport.read_bulk(DATA_EP, &mut buf)?;
        let samples = decode_samples(&buf[..n])?;
        debug!("Received {} samples", samples.len());
        Ok(samples)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::{MockTransport, Transfer};
    use crate::Error;

    #[test]
    fn test_read_samples() {
        let transport = MockTransport::new();
        let packet: Vec<u8> = (0..10u16).flat_map(|v| (v * 400).to_le_bytes()).collect();
        transport.push_response(&packet);

        let logger = LoggerDevice::new(transport);
        let samples = logger.read_samples().unwrap();
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[9], Sample(3600));
        assert_eq!(
            logger.transport().transfers(),
            vec![Transfer::BulkIn {
                endpoint: 0x81,
                len: 20
            }]
        );
    }

    #[test]
    fn test_timeout_propagates() {
        let transport = MockTransport::new();
        transport.push_error(Error::Usb(rusb::Error::Timeout));
        let logger = LoggerDevice::new(transport);

        let err = logger.read_samples().unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_malformed_packet() {
        let transport = MockTransport::new();
        transport.push_response(&[1, 2, 3, 4, 5]);
        let logger = LoggerDevice::new(transport);

        let err = logger.read_samples().unwrap_err();
        assert!(matches!(err, Error::MalformedPacket(5)));
        assert!(!err.is_timeout());
    }
}
