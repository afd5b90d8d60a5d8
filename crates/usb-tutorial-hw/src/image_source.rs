//! Image sources for the display.

use crate::pixel::Pixel;
use crate::Result;
use image::imageops::FilterType;
use image::RgbImage;
use std::path::Path;
use tracing::debug;

/// Anything that yields a row-major sequence of RGB pixels of known size.
pub trait ImageSource {
    /// Returns (width, height) in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Returns the pixels in row-major order.
    fn pixels(&self) -> impl Iterator<Item = Pixel> + '_;
}

impl ImageSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        RgbImage::pixels(self).map(|&rgb| Pixel::from(rgb))
    }
}

/// Loads an image file and converts it to RGB8.
///
/// With `fit`, the image is scaled to exactly the given size, ignoring
/// aspect ratio. Otherwise it is returned at its native size.
pub fn load_image<P: AsRef<Path>>(path: P, fit: Option<(u32, u32)>) -> Result<RgbImage> {
    let image = image::open(path.as_ref())?;
    debug!(
        "Loaded {} ({}x{})",
        path.as_ref().display(),
        image.width(),
        image.height()
    );

    let image = match fit {
        Some((width, height)) if (image.width(), image.height()) != (width, height) => {
            debug!("Scaling image to {}x{}", width, height);
            image.resize_exact(width, height, FilterType::Triangle)
        }
        _ => image,
    };

    Ok(image.to_rgb8())
}
