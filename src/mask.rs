use image::{imageops::FilterType, DynamicImage, GrayImage, Luma, Rgb};
use imageproc::map::map_colors;
use tracing::instrument;

const SELECTED: Luma<u8> = Luma([255]);
const BACKGROUND: Luma<u8> = Luma([0]);

/// Inclusive per-channel RGB bounds selecting the text color of a screenshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub lower: Rgb<u8>,
    pub upper: Rgb<u8>,
}

impl ColorRange {
    /// Orange caption text, sampled between RGB(150, 94, 79) and RGB(199, 130, 106)
    /// and widened a little on every side.
    pub const ORANGE: ColorRange = ColorRange::new([150, 90, 70], [255, 180, 140]);

    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self {
            lower: Rgb(lower),
            upper: Rgb(upper),
        }
    }

    pub fn contains(&self, pixel: &Rgb<u8>) -> bool {
        pixel
            .0
            .iter()
            .zip(self.lower.0.iter().zip(self.upper.0.iter()))
            .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }
}

impl Default for ColorRange {
    fn default() -> Self {
        Self::ORANGE
    }
}

/// Builds a white-on-black mask of every pixel whose color falls inside `range`.
///
/// The source is converted to RGB8 first, so alpha and palette images are handled
/// the same way as plain RGB screenshots.
#[instrument(level = "debug", skip(image))]
pub fn color_mask(image: &DynamicImage, range: &ColorRange) -> GrayImage {
    let rgb = image.to_rgb8();
    map_colors(&rgb, |pixel| {
        if range.contains(&pixel) {
            SELECTED
        } else {
            BACKGROUND
        }
    })
}

/// Number of selected pixels in a mask.
pub fn coverage(mask: &GrayImage) -> usize {
    mask.pixels().filter(|it| **it == SELECTED).count()
}

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 8.0;

/// Brings a mask scale factor into `MIN_SCALE..=MAX_SCALE`. Non-finite or
/// non-positive factors mean no scaling.
pub fn clamp_scale(factor: f32) -> f32 {
    if !factor.is_finite() || factor <= 0.0 {
        1.0
    } else {
        factor.clamp(MIN_SCALE, MAX_SCALE)
    }
}

pub(crate) fn scale_mask(mask: GrayImage, factor: f32) -> GrayImage {
    let factor = clamp_scale(factor);
    if (factor - 1.0).abs() < f32::EPSILON {
        return mask;
    }
    let width = ((mask.width() as f32 * factor) as u32).max(1);
    let height = ((mask.height() as f32 * factor) as u32).max(1);
    log::debug!(
        "Scaling mask from (w: {}, h: {}) to (w: {width}, h: {height}).",
        mask.width(),
        mask.height()
    );
    image::imageops::resize(&mask, width, height, FilterType::Lanczos3)
}
