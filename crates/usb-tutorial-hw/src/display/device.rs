//! Display communication via bulk transfers.

use super::framebuffer::{Framebuffer, FRAME_SIZE};
use crate::image_source::ImageSource;
use crate::pixel::convert_image;
use crate::transport::{DeviceTransport, UsbTransport};
use crate::{Error, Result, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use std::time::Duration;
use tracing::{debug, info};

/// Bulk OUT endpoint for pixel data.
pub const DATA_EP: u8 = 0x01;

/// Display device controller.
pub struct DisplayDevice<T = UsbTransport> {
    transport: T,
}

impl DisplayDevice<UsbTransport> {
    /// Opens the display device by VID:PID.
    pub fn open(vid: u16, pid: u16, timeout: Duration) -> Result<Self> {
        Ok(Self::new(UsbTransport::open(vid, pid, timeout)?))
    }
}

impl<T: DeviceTransport> DisplayDevice<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Sends a full frame.
    pub fn draw(&self, framebuffer: &Framebuffer) -> Result<()> {
        self.draw_bytes(&framebuffer.to_bytes())
    }

    /// Converts an image source and sends it as a frame.
    ///
    /// The source must be exactly display-sized, both in its declared
    /// dimensions and in the number of pixels it yields.
    pub fn draw_image<S: ImageSource>(&self, source: &S) -> Result<()> {
        let expected = (DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32);
        let actual = source.dimensions();
        if actual != expected {
            return Err(Error::ImageSize { expected, actual });
        }
        self.draw_bytes(&convert_image(source.pixels()))
    }

    /// Sends pre-packed big-endian RGB565 data.
    pub fn draw_bytes(&self, data: &[u8]) -> Result<()> {
        if data.len() != FRAME_SIZE {
            return Err(Error::FramebufferSize {
                expected: FRAME_SIZE,
                actual: data.len(),
            });
        }

        let written = self.transport.write_bulk(DATA_EP, data)?;
        if written != data.len() {
            return Err(Error::ShortTransfer {
                endpoint: DATA_EP,
                expected: data.len(),
                transferred: written,
            });
        }

        debug!("Frame sent ({} bytes)", written);
        Ok(())
    }

    /// Clears the display to a solid color.
    pub fn clear(&self, color: u16) -> Result<()> {
        let mut fb = Framebuffer::new();
        fb.clear(color);
        self.draw(&fb)?;
        info!("Display cleared to {:#06X}", color);
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
