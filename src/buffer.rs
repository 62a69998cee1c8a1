use crate::pixel::Pixel;
use image::{Rgb, RgbImage};

/// A mutable W×H grid of [`Pixel`]s stored row-major.
///
/// Channels are signed and unbounded while the image is being filtered;
/// they are only squeezed into 8 bits by [`PixelBuffer::to_rgb_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

/// How many channels fell outside [0, 255] when encoding to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelRange {
    pub out_of_range: usize,
}

impl ChannelRange {
    pub fn is_clean(&self) -> bool {
        self.out_of_range == 0
    }
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width as usize * height as usize],
        }
    }

    /// Build a buffer from row-major pixels. Returns `None` if the pixel count
    /// does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} buffer",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// # Panics
    /// If `(x, y)` is outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    /// # Panics
    /// If `(x, y)` is outside the buffer.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let i = self.index(x, y);
        self.pixels[i] = pixel;
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Encode into 8-bit RGB, saturating out-of-range channels.
    pub fn to_rgb_image(&self) -> (RgbImage, ChannelRange) {
        let mut range = ChannelRange::default();
        let image = RgbImage::from_fn(self.width, self.height, |x, y| {
            let p = self.get(x, y);
            range.out_of_range += p.out_of_range_channels();
            Rgb([p.r, p.g, p.b].map(|c| c.clamp(0, 255) as u8))
        });
        (image, range)
    }
}

impl From<&RgbImage> for PixelBuffer {
    fn from(image: &RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.pixels().map(|p| Pixel::from(*p)).collect(),
        }
    }
}
