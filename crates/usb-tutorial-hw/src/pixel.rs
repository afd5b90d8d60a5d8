//! RGB888 to RGB565 pixel packing.
//!
//! The display expects each pixel as a big-endian RGB565 word: 5 bits red
//! in the high bits, 6 bits green, 5 bits blue in the low bits.

/// An 8-bit RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    /// Creates a pixel from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the pixel as an RGB565 value.
    #[inline]
    pub fn to_rgb565(self) -> u16 {
        rgb888_to_rgb565(self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<image::Rgb<u8>> for Pixel {
    fn from(rgb: image::Rgb<u8>) -> Self {
        Self::from(rgb.0)
    }
}

/// Packs three channel values into RGB565.
///
/// Only the low 8 bits of each channel are considered. Wider values are
/// masked rather than rejected, so this never fails.
#[inline]
pub fn convert_pixel(r: u32, g: u32, b: u32) -> u16 {
    let red = (r & 0xF8) << 8;
    let green = (g & 0xFC) << 3;
    let blue = (b & 0xFF) >> 3;
    (red | green | blue) as u16
}

/// Converts RGB888 to RGB565.
#[inline]
pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    convert_pixel(r.into(), g.into(), b.into())
}

/// Packs a sequence of pixels into big-endian RGB565 bytes.
///
/// The output holds exactly two bytes per input pixel, in input order.
/// The pixel count is not checked against any display size.
pub fn convert_image<I>(pixels: I) -> Vec<u8>
where
    I: IntoIterator<Item = Pixel>,
{
    let pixels = pixels.into_iter();
    let mut data = Vec::with_capacity(pixels.size_hint().0 * 2);
    for pixel in pixels {
        data.extend_from_slice(&pixel.to_rgb565().to_be_bytes());
    }
    data
}
