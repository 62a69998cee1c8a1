//! Per-pixel color functions.
//!
//! Every function is pure and maps one [`Pixel`] to another. None of them
//! clamp: sepia can exceed 255 and the temperature shifts can leave
//! [0, 255] in either direction. Fractional results are truncated toward
//! zero.

/// An RGB triple with signed channels, so out-of-range results survive
/// until the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Pixel {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Number of channels that do not fit an 8-bit sample.
    pub fn out_of_range_channels(&self) -> usize {
        [self.r, self.g, self.b]
            .iter()
            .filter(|c| !(0..=255).contains(*c))
            .count()
    }

    /// True when every channel fits an 8-bit sample.
    pub fn in_range(&self) -> bool {
        self.out_of_range_channels() == 0
    }
}

impl From<image::Rgb<u8>> for Pixel {
    fn from(rgb: image::Rgb<u8>) -> Self {
        let [r, g, b] = rgb.0;
        Self::new(r as i32, g as i32, b as i32)
    }
}

pub type PixelFn = fn(Pixel) -> Pixel;

pub const TEMPERATURE_SHIFT: i32 = 15;

// Coefficients in thousandths; integer division truncates the exact sum.
const LUMA: [i32; 3] = [299, 587, 114];
const SEPIA: [[i32; 3]; 3] = [[393, 769, 189], [349, 686, 168], [272, 534, 131]];

// Summed in i64; results beyond i32 saturate.
fn weighted(weights: &[i32; 3], p: Pixel) -> i32 {
    let sum = weights[0] as i64 * p.r as i64
        + weights[1] as i64 * p.g as i64
        + weights[2] as i64 * p.b as i64;
    (sum / 1000).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// NTSC luma written to all three channels.
pub fn grayscale(p: Pixel) -> Pixel {
    let luma = weighted(&LUMA, p);
    Pixel::new(luma, luma, luma)
}

pub fn sepia(p: Pixel) -> Pixel {
    Pixel::new(
        weighted(&SEPIA[0], p),
        weighted(&SEPIA[1], p),
        weighted(&SEPIA[2], p),
    )
}

/// Raise red and lower blue by [`TEMPERATURE_SHIFT`].
pub fn warmer(p: Pixel) -> Pixel {
    Pixel::new(
        p.r.saturating_add(TEMPERATURE_SHIFT),
        p.g,
        p.b.saturating_sub(TEMPERATURE_SHIFT),
    )
}

/// Lower red and raise blue by [`TEMPERATURE_SHIFT`].
pub fn cooler(p: Pixel) -> Pixel {
    Pixel::new(
        p.r.saturating_sub(TEMPERATURE_SHIFT),
        p.g,
        p.b.saturating_add(TEMPERATURE_SHIFT),
    )
}
