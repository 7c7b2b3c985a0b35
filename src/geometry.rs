//! Canvas geometry shared by the builder, the scatter layout and the session.
//!
//! Integer [`Size`]/[`Rect`] describe pixel regions of the source image;
//! float [`Point`] describes piece positions on the canvas, which move
//! continuously under the pointer.
//!
//! # Example
//!
//! ```
//! use zenpuzzle::{Point, Size};
//! use zenpuzzle::geometry::clamp_into;
//!
//! let p = clamp_into(Point::new(-20.0, 850.0), Size::new(120, 120), Size::new(900, 900));
//! assert_eq!(p, Point::new(0.0, 780.0));
//! ```

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either axis is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Dimensions of the rect.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Position on the canvas, in (fractional) pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Clamp a top-left position so a box of `size` stays inside `canvas`.
///
/// When the box is larger than the canvas on an axis, the position pins to 0.
pub fn clamp_into(pos: Point, size: Size, canvas: Size) -> Point {
    Point {
        x: clamp_axis(pos.x, size.width, canvas.width),
        y: clamp_axis(pos.y, size.height, canvas.height),
    }
}

fn clamp_axis(v: f32, extent: u32, canvas: u32) -> f32 {
    let max = canvas as f32 - extent as f32;
    v.min(max).max(0.0)
}

/// Top-left offset that centers `content` on `canvas`.
///
/// Both halves are floored before subtracting so the result is pixel
/// aligned. Negative when the content overflows the canvas.
pub fn center_offset(canvas: Size, content: Size) -> (i64, i64) {
    (
        (canvas.width / 2) as i64 - (content.width / 2) as i64,
        (canvas.height / 2) as i64 - (content.height / 2) as i64,
    )
}

/// Largest size with the aspect ratio of `source` that fits inside
/// `scale × target`.
///
/// Dimensions are rounded, never below 1. Upscales as well as downscales.
pub fn fit_inside(source: Size, target: Size, scale: f32) -> Size {
    if source.is_empty() || target.is_empty() {
        return source;
    }
    let ratio_w = target.width as f64 / source.width as f64;
    let ratio_h = target.height as f64 / source.height as f64;
    let factor = ratio_w.min(ratio_h) * scale as f64;
    let w = (source.width as f64 * factor).round() as u32;
    let h = (source.height as f64 * factor).round() as u32;
    Size::new(w.max(1), h.max(1))
}
