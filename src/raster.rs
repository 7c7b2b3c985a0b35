//! Host pixel intake and puzzle configuration.
//!
//! The host decodes images however it likes and hands over either an
//! [`RgbaImage`] or a raw RGBA8 buffer. [`prepare`] optionally rescales the
//! image to the canvas before it is sliced.

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::error::PuzzleError;
use crate::geometry::{Size, fit_inside};
use crate::level::Level;

/// Default share of the canvas the fitted image may occupy.
pub const DEFAULT_FIT_SCALE: f32 = 0.95;

/// How the source image is sized before slicing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FitMode {
    /// Slice the image at its native size.
    Native,
    /// Rescale to fit within `scale × canvas`, preserving aspect ratio.
    /// Upscales or downscales as needed.
    Fit { scale: f32 },
}

impl Default for FitMode {
    fn default() -> Self {
        Self::Fit {
            scale: DEFAULT_FIT_SCALE,
        }
    }
}

/// Puzzle setup chosen by the host.
///
/// # Example
///
/// ```
/// use zenpuzzle::{FitMode, Level, PuzzleConfig};
///
/// let config = PuzzleConfig::for_level(Level::new(2)).fit(FitMode::Native);
/// assert_eq!(config.divisions, 4);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PuzzleConfig {
    /// Pieces per row and per column.
    pub divisions: u32,
    pub fit: FitMode,
}

impl PuzzleConfig {
    /// N×N puzzle, image fitted to 95% of the canvas.
    pub fn new(divisions: u32) -> Self {
        Self {
            divisions,
            fit: FitMode::default(),
        }
    }

    /// Configuration for a game level.
    pub fn for_level(level: Level) -> Self {
        Self::new(level.divisions())
    }

    /// Set how the image is sized before slicing.
    pub fn fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }
}

/// Wrap a raw RGBA8 buffer (row-major, 4 bytes per pixel).
pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<RgbaImage, PuzzleError> {
    if width == 0 || height == 0 {
        return Err(PuzzleError::InvalidArgument("image has a zero dimension"));
    }
    RgbaImage::from_raw(width, height, pixels)
        .ok_or(PuzzleError::InvalidArgument("pixel buffer length does not match dimensions"))
}

/// Apply the configured [`FitMode`] for a canvas.
pub fn prepare(image: RgbaImage, fit: FitMode, canvas: Size) -> RgbaImage {
    match fit {
        FitMode::Native => image,
        FitMode::Fit { scale } => {
            let source = Size::new(image.width(), image.height());
            let target = fit_inside(source, canvas, scale);
            if target == source {
                return image;
            }
            log::debug!(
                "scaling source {}x{} to {}x{} for canvas {}x{}",
                source.width,
                source.height,
                target.width,
                target.height,
                canvas.width,
                canvas.height
            );
            imageops::resize(&image, target.width, target.height, FilterType::Triangle)
        }
    }
}
