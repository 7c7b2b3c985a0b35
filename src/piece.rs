//! A single movable puzzle piece.

use image::RgbaImage;

use crate::geometry::{Point, Rect, Size};

/// Distance (per axis, exclusive) within which a piece counts as placed.
pub const PLACED_TOLERANCE: f32 = 5.0;

/// Cell of the source grid a piece was cut from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    /// Column, `0..divisions`.
    pub x: u32,
    /// Row, `0..divisions`.
    pub y: u32,
}

impl GridPos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One sub-rectangle of the source image.
///
/// Grid cell, pixels and size are fixed at build time. Only the current
/// and correct positions change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    grid: GridPos,
    image: RgbaImage,
    pub(crate) position: Point,
    pub(crate) correct: Point,
}

impl Piece {
    pub(crate) fn new(grid: GridPos, image: RgbaImage, correct: Point) -> Self {
        Self {
            grid,
            image,
            position: Point::default(),
            correct,
        }
    }

    /// Source grid cell.
    pub fn grid(&self) -> GridPos {
        self.grid
    }

    /// Pixels owned by this piece.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Piece dimensions in canvas pixels.
    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    /// Region of the (possibly rescaled) source image this piece was cut from.
    pub fn source_rect(&self) -> Rect {
        let size = self.size();
        Rect::new(
            self.grid.x * size.width,
            self.grid.y * size.height,
            size.width,
            size.height,
        )
    }

    /// Current top-left corner on the canvas.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Top-left corner the piece belongs at.
    pub fn correct_position(&self) -> Point {
        self.correct
    }

    /// Whether the piece sits within [`PLACED_TOLERANCE`] of its correct
    /// position on both axes. Recomputed on every call.
    pub fn is_placed(&self) -> bool {
        (self.position.x - self.correct.x).abs() < PLACED_TOLERANCE
            && (self.position.y - self.correct.y).abs() < PLACED_TOLERANCE
    }

    /// Inclusive bounding-box hit test.
    pub fn contains(&self, p: Point) -> bool {
        let size = self.size();
        p.x >= self.position.x
            && p.x <= self.position.x + size.width as f32
            && p.y >= self.position.y
            && p.y <= self.position.y + size.height as f32
    }

    /// Within the snap band: strictly less than `fraction` of the piece
    /// extent away from the correct position on both axes.
    pub(crate) fn within_snap(&self, fraction: f32) -> bool {
        let size = self.size();
        (self.position.x - self.correct.x).abs() < size.width as f32 * fraction
            && (self.position.y - self.correct.y).abs() < size.height as f32 * fraction
    }

    pub(crate) fn snap(&mut self) {
        self.position = self.correct;
    }
}
