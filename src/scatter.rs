//! Shuffling pieces and laying them out before play starts.
//!
//! ```text
//!     Edge distribution (g = ⌈N²/4⌉ pieces per side)
//!
//!     ┌──────────────────────────┐
//!     │   0 →   1 →   2 →        │   top:    left to right
//!     │ 11                    3  │   right:  top to bottom
//!     │ ↑       ┌─────┐       ↓  │
//!     │ 10      │goal │       4  │
//!     │ ↑       └─────┘       ↓  │
//!     │  9                    5  │   bottom: right to left
//!     │        ← 8  ← 7  ← 6     │   left:   bottom to top
//!     └──────────────────────────┘
//! ```
//!
//! When the canvas leaves less than [`MIN_MARGIN`] pixels of margin per gap
//! on either axis, pieces fall back to a dense grid starting at the origin.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::geometry::{Point, Size, clamp_into};
use crate::piece::Piece;

/// Smallest per-gap margin (pixels) that still allows edge distribution.
pub const MIN_MARGIN: f32 = 10.0;

/// Which layout [`scatter`] used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScatterMode {
    /// Pieces around the four canvas edges.
    Edges,
    /// Row-major grid from the origin, piece size as stride.
    Grid,
}

/// Shuffle `pieces` and assign each an initial position on `canvas`.
///
/// The shuffle also sets the initial z-order. All pieces are expected to
/// share one size; the first piece's size is used as the stride.
pub fn scatter<R: Rng + ?Sized>(
    pieces: &mut [Piece],
    divisions: u32,
    canvas: Size,
    rng: &mut R,
) -> ScatterMode {
    pieces.shuffle(rng);

    let Some(piece) = pieces.first().map(Piece::size) else {
        return ScatterMode::Grid;
    };
    let (h_margin, v_margin) = margins(canvas, piece, divisions);
    log::debug!(
        "scattering {} pieces with margins h={h_margin} v={v_margin}",
        pieces.len()
    );

    if h_margin < MIN_MARGIN || v_margin < MIN_MARGIN {
        dense_grid(pieces, divisions, canvas, piece);
        ScatterMode::Grid
    } else {
        around_edges(pieces, canvas, piece, h_margin, v_margin);
        ScatterMode::Edges
    }
}

/// Free space per gap when `divisions` pieces are lined up on each axis.
pub fn margins(canvas: Size, piece: Size, divisions: u32) -> (f32, f32) {
    let n = divisions as f32;
    let gaps = n + 1.0;
    (
        (canvas.width as f32 - piece.width as f32 * n) / gaps,
        (canvas.height as f32 - piece.height as f32 * n) / gaps,
    )
}

/// Pieces on each side in the edge distribution. Never leaves a fifth side.
pub fn side_capacity(count: usize) -> usize {
    count.div_ceil(4).max(1)
}

fn dense_grid(pieces: &mut [Piece], divisions: u32, canvas: Size, piece: Size) {
    let n = divisions.max(1) as usize;
    for (i, p) in pieces.iter_mut().enumerate() {
        let row = (i / n) as f32;
        let col = (i % n) as f32;
        let pos = Point::new(col * piece.width as f32, row * piece.height as f32);
        p.position = clamp_into(pos, piece, canvas);
    }
}

fn around_edges(pieces: &mut [Piece], canvas: Size, piece: Size, h_margin: f32, v_margin: f32) {
    let per_side = side_capacity(pieces.len());
    let w = canvas.width as f32;
    let h = canvas.height as f32;
    let pw = piece.width as f32;
    let ph = piece.height as f32;
    let step_x = w / (per_side + 1) as f32;
    let step_y = h / (per_side + 1) as f32;

    for (i, p) in pieces.iter_mut().enumerate() {
        let slot = (i % per_side + 1) as f32;
        let pos = match i / per_side {
            0 => Point::new(slot * step_x - pw / 2.0, v_margin),
            1 => Point::new(w - pw - h_margin, slot * step_y - ph / 2.0),
            2 => Point::new(w - slot * step_x - pw / 2.0, h - ph - v_margin),
            _ => Point::new(h_margin, h - slot * step_y - ph / 2.0),
        };
        p.position = clamp_into(pos, piece, canvas);
    }
}
