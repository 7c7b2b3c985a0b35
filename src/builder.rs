//! Slicing a source image into an N×N grid of pieces.
//!
//! Piece size is the floor-divided image size; right and bottom remainder
//! pixels are dropped. The assembled puzzle is centered on the canvas, so
//! every piece's correct position is `center_offset + grid * piece_size`.
//!
//! # Example
//!
//! ```
//! use zenpuzzle::{GridPos, Point, Size, build};
//! use image::RgbaImage;
//!
//! let grid = build(&RgbaImage::new(360, 360), 3, Size::new(900, 900)).unwrap();
//! assert_eq!(grid.piece_size(), Size::new(120, 120));
//!
//! let center = grid.pieces().iter().find(|p| p.grid() == GridPos::new(1, 1)).unwrap();
//! assert_eq!(center.correct_position(), Point::new(390.0, 390.0));
//! ```

use image::RgbaImage;
use image::imageops;

use crate::error::PuzzleError;
use crate::geometry::{Point, Size, center_offset};
use crate::piece::{GridPos, Piece};

/// Builder output: the pieces in row-major order plus the geometry they
/// were cut and laid out with.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceGrid {
    pieces: Vec<Piece>,
    divisions: u32,
    image: Size,
    piece: Size,
    canvas: Size,
}

impl PieceGrid {
    /// Pieces, row-major by grid cell until handed to a session.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Take ownership of the pieces.
    pub fn into_pieces(self) -> Vec<Piece> {
        self.pieces
    }

    /// Pieces per row and per column.
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Full size of the sliced image, remainder pixels included.
    pub fn image_size(&self) -> Size {
        self.image
    }

    /// Size shared by every piece.
    pub fn piece_size(&self) -> Size {
        self.piece
    }

    /// Canvas the correct positions were computed for.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Recompute correct positions for a new canvas size.
    ///
    /// Current positions are left alone.
    pub fn realign(&mut self, canvas: Size) -> Result<(), PuzzleError> {
        if canvas.is_empty() {
            return Err(PuzzleError::NotReady);
        }
        realign_pieces(&mut self.pieces, self.image, canvas);
        self.canvas = canvas;
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (Vec<Piece>, GridGeometry) {
        (
            self.pieces,
            GridGeometry {
                divisions: self.divisions,
                image: self.image,
                piece: self.piece,
            },
        )
    }
}

/// Geometry a session keeps after taking the pieces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct GridGeometry {
    pub divisions: u32,
    pub image: Size,
    pub piece: Size,
}

/// Slice `image` into `divisions × divisions` pieces, centered on `canvas`.
///
/// Fails with [`PuzzleError::InvalidArgument`] for zero divisions, an empty
/// image or an image too small to give every piece at least one pixel, and
/// with [`PuzzleError::NotReady`] while the canvas size is unknown (zero).
pub fn build(image: &RgbaImage, divisions: u32, canvas: Size) -> Result<PieceGrid, PuzzleError> {
    if divisions == 0 {
        return Err(PuzzleError::InvalidArgument("divisions must be at least 1"));
    }
    let image_size = Size::new(image.width(), image.height());
    if image_size.is_empty() {
        return Err(PuzzleError::InvalidArgument("image has a zero dimension"));
    }
    let piece = Size::new(image_size.width / divisions, image_size.height / divisions);
    if piece.is_empty() {
        return Err(PuzzleError::InvalidArgument(
            "image is smaller than the division count",
        ));
    }
    if canvas.is_empty() {
        return Err(PuzzleError::NotReady);
    }

    let (ox, oy) = center_offset(canvas, image_size);
    let mut pieces = Vec::with_capacity((divisions * divisions) as usize);
    for gy in 0..divisions {
        for gx in 0..divisions {
            let pixels = imageops::crop_imm(
                image,
                gx * piece.width,
                gy * piece.height,
                piece.width,
                piece.height,
            )
            .to_image();
            let grid = GridPos::new(gx, gy);
            pieces.push(Piece::new(grid, pixels, correct_position(grid, piece, ox, oy)));
        }
    }

    log::debug!(
        "built {}x{} grid: image {}x{}, piece {}x{}, canvas {}x{}, origin ({ox}, {oy})",
        divisions,
        divisions,
        image_size.width,
        image_size.height,
        piece.width,
        piece.height,
        canvas.width,
        canvas.height
    );

    Ok(PieceGrid {
        pieces,
        divisions,
        image: image_size,
        piece,
        canvas,
    })
}

/// Recompute correct positions of already-built pieces for `canvas`.
pub(crate) fn realign_pieces(pieces: &mut [Piece], image: Size, canvas: Size) {
    let (ox, oy) = center_offset(canvas, image);
    for p in pieces {
        p.correct = correct_position(p.grid(), p.size(), ox, oy);
    }
}

fn correct_position(grid: GridPos, piece: Size, ox: i64, oy: i64) -> Point {
    Point::new(
        (ox + grid.x as i64 * piece.width as i64) as f32,
        (oy + grid.y as i64 * piece.height as i64) as f32,
    )
}
