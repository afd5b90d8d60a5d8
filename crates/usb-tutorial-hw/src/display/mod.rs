//! TFT display module.
//!
//! Provides full-frame updates of the 128x160 RGB565 display over a bulk
//! endpoint. The firmware consumes the stream row by row and wraps to the
//! top after the last row, so every write must be exactly one frame.

mod device;

pub mod framebuffer;

pub use device::{DisplayDevice, DATA_EP};
pub use framebuffer::{parse_hex_color, Framebuffer, FRAME_SIZE, PIXEL_COUNT};
