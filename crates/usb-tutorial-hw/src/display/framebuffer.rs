//! RGB565 framebuffer for the TFT display.

use crate::pixel::rgb888_to_rgb565;
use crate::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Total pixel count for the display.
pub const PIXEL_COUNT: usize = DISPLAY_WIDTH as usize * DISPLAY_HEIGHT as usize;

/// Size of one packed frame in bytes.
pub const FRAME_SIZE: usize = PIXEL_COUNT * 2;

/// RGB565 framebuffer for the 128x160 display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    /// Pixel data in RGB565 format.
    data: Vec<u16>,
    width: u16,
    height: u16,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Creates a new framebuffer initialized to black.
    pub fn new() -> Self {
        Self::with_dimensions(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    /// Creates a framebuffer with custom dimensions.
    pub fn with_dimensions(width: u16, height: u16) -> Self {
        Self {
            data: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Clears the framebuffer to a solid color.
    pub fn clear(&mut self, color: u16) {
        self.data.fill(color);
    }

    /// Packs the framebuffer into big-endian bytes, row by row.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 2);
        for &pixel in &self.data {
            bytes.extend_from_slice(&pixel.to_be_bytes());
        }
        bytes
    }
}

/// Parses a hex color string to RGB565.
pub fn parse_hex_color(hex: &str) -> Option<u16> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(rgb888_to_rgb565(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some(0xF800));
        assert_eq!(parse_hex_color("00FF00"), Some(0x07E0));
        assert_eq!(parse_hex_color("#000000"), Some(0x0000));
        assert_eq!(parse_hex_color("#FFFFFF"), Some(0xFFFF));
        assert_eq!(parse_hex_color("invalid"), None);
        assert_eq!(parse_hex_color("#ÿÿÿ"), None);
    }

    #[test]
    fn test_framebuffer_ops() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.width(), 128);
        assert_eq!(fb.height(), 160);
        assert!(fb.to_bytes().iter().all(|&b| b == 0));

        fb.clear(0xFFFF);
        assert!(fb.to_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_to_bytes_layout() {
        let mut fb = Framebuffer::with_dimensions(2, 1);
        fb.clear(0x07E0);
        assert_eq!(fb.to_bytes(), vec![0x07, 0xE0, 0x07, 0xE0]);
        assert_eq!(Framebuffer::new().to_bytes().len(), FRAME_SIZE);
    }
}
