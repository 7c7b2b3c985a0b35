//! Grid puzzle engine: image slicing, scatter layout, drag, snap and completion.
//!
//! The host hands over a decoded RGBA image and the size of its drawing
//! surface; the engine owns everything between that handoff and the
//! "puzzle completed" notification. No rendering, no I/O.
//!
//! # Modules
//!
//! - [`geometry`] — Sizes, rects, float points, canvas clamping, fit-to-canvas
//! - [`raster`] — Raw host pixel buffers and fit-to-canvas rescaling
//! - [`builder`] — Slicing an image into an N×N [`PieceGrid`]
//! - [`scatter`] — Shuffle and initial placement of pieces around the canvas
//! - [`session`] — Drag/snap interaction loop, z-order, completion
//! - [`level`] — Level progression and difficulty
//! - `svg` — SVG outline dump of a session frame (feature `svg`)
//!
//! # Example
//!
//! ```
//! use zenpuzzle::{FitMode, PuzzleConfig, Session, Size};
//! use image::RgbaImage;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut session = Session::with_rng(Box::new(StdRng::seed_from_u64(7)));
//! session.set_canvas(Size::new(900, 900)).unwrap();
//! session
//!     .load(RgbaImage::new(360, 360), PuzzleConfig::new(3).fit(FitMode::Native))
//!     .unwrap();
//!
//! assert_eq!(session.pieces().len(), 9);
//! assert!(!session.is_complete());
//! ```

#![forbid(unsafe_code)]

pub mod builder;
pub mod geometry;
pub mod level;
pub mod piece;
pub mod raster;
pub mod scatter;
pub mod session;
#[cfg(feature = "svg")]
pub mod svg;

mod error;

pub use builder::{PieceGrid, build};
pub use error::PuzzleError;
pub use geometry::{Point, Rect, Size};
pub use level::{Advance, LEVEL_COUNT, Level};
pub use piece::{GridPos, PLACED_TOLERANCE, Piece};
pub use raster::{FitMode, PuzzleConfig};
pub use scatter::{ScatterMode, scatter};
pub use session::{
    CompletionSink, FramePiece, Loaded, PuzzleState, Release, SNAP_FRACTION, Session,
};
