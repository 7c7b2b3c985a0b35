//! Live puzzle: z-ordered pieces, pointer-driven drag, snap and completion.
//!
//! ```text
//!     Empty ──start/load──▶ Ready ◀──pointer_up── Dragging
//!                             │  ──pointer_down──▶   │
//!                             │                      ▼
//!                             └◀──── drag on ── Completed (all placed)
//! ```
//!
//! The piece vector doubles as the z-order: index 0 is drawn first, the
//! last piece is on top. Hit-testing walks the other way. The selection is
//! an index into that vector and never owns a piece.
//!
//! A session stays interactive after completion. Locking input or moving
//! on to the next level is up to the host.

use core::fmt;

use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::builder::{GridGeometry, PieceGrid, build, realign_pieces};
use crate::error::PuzzleError;
use crate::geometry::{Point, Size, center_offset, clamp_into};
use crate::piece::{GridPos, Piece};
use crate::raster::{FitMode, PuzzleConfig, prepare};
use crate::scatter::{ScatterMode, scatter};

/// Release within this fraction of the piece extent snaps it into place.
pub const SNAP_FRACTION: f32 = 0.25;

/// Drop-shadow offset for resting pieces, in pixels.
const SHADOW_OFFSET: f32 = 3.0;
/// Drop-shadow offset for the piece under the pointer.
const SELECTED_SHADOW_OFFSET: f32 = 5.0;

/// Receives the "puzzle completed" notification.
///
/// Implemented for every `FnMut()`, so a closure works as a sink.
pub trait CompletionSink {
    fn on_completed(&mut self);
}

impl<F: FnMut()> CompletionSink for F {
    fn on_completed(&mut self) {
        self()
    }
}

/// Observable session state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PuzzleState {
    /// No pieces yet (nothing loaded, or waiting for the canvas size).
    Empty,
    /// Pieces exist, none selected.
    Ready,
    /// One piece follows the pointer.
    Dragging,
    /// Every piece is placed and no piece is selected.
    Completed,
}

/// Outcome of [`Session::load`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Loaded {
    /// Pieces were built and scattered.
    Started,
    /// The canvas size is unknown; the image is kept until
    /// [`Session::set_canvas`] supplies it.
    Deferred,
}

/// Outcome of [`Session::pointer_up`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Release {
    /// No piece was being dragged.
    Idle,
    /// The piece stays where it was dropped.
    Dropped,
    /// The piece snapped to its correct position.
    Snapped,
    /// Every piece is placed after the release; the sink has been notified.
    /// Returned again when a placed piece of a finished puzzle is put back.
    Completed,
}

/// One piece as the host should draw it this frame.
#[derive(Copy, Clone, Debug)]
pub struct FramePiece<'a> {
    pub grid: GridPos,
    /// Top-left corner on the canvas.
    pub position: Point,
    pub size: Size,
    pub image: &'a RgbaImage,
    /// Within tolerance of its correct position.
    pub placed: bool,
    /// Currently under the pointer.
    pub selected: bool,
    /// Suggested drop-shadow offset (both axes).
    pub shadow_offset: f32,
}

impl<'a> FramePiece<'a> {
    fn new(piece: &'a Piece, selected: bool) -> Self {
        Self {
            grid: piece.grid(),
            position: piece.position(),
            size: piece.size(),
            image: piece.image(),
            placed: piece.is_placed(),
            selected,
            shadow_offset: if selected {
                SELECTED_SHADOW_OFFSET
            } else {
                SHADOW_OFFSET
            },
        }
    }
}

/// A puzzle being played.
pub struct Session {
    canvas: Size,
    geometry: Option<GridGeometry>,
    pieces: Vec<Piece>,
    selected: Option<usize>,
    /// Every piece was placed at the last release. Drives
    /// [`PuzzleState::Completed`]; each release that sets it notifies the sink.
    completed: bool,
    pending: Option<(RgbaImage, PuzzleConfig)>,
    rng: Box<dyn RngCore>,
    sink: Option<Box<dyn CompletionSink>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("canvas", &self.canvas)
            .field("geometry", &self.geometry)
            .field("pieces", &self.pieces.len())
            .field("selected", &self.selected)
            .field("completed", &self.completed)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Empty session shuffling with system entropy.
    pub fn new() -> Self {
        Self::with_rng(Box::new(StdRng::from_entropy()))
    }

    /// Empty session shuffling with `rng`. Pass a seeded generator for
    /// reproducible layouts.
    pub fn with_rng(rng: Box<dyn RngCore>) -> Self {
        Self {
            canvas: Size::default(),
            geometry: None,
            pieces: Vec::new(),
            selected: None,
            completed: false,
            pending: None,
            rng,
            sink: None,
        }
    }

    /// Register the completion sink, replacing any previous one.
    pub fn set_completion_sink(&mut self, sink: impl CompletionSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Canvas size, once known.
    pub fn canvas(&self) -> Option<Size> {
        (!self.canvas.is_empty()).then_some(self.canvas)
    }

    /// Pieces in z-order, bottom first.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Piece under the pointer, if a drag is in progress.
    pub fn selected(&self) -> Option<&Piece> {
        self.selected.and_then(|i| self.pieces.get(i))
    }

    /// Division count of the current puzzle.
    pub fn divisions(&self) -> Option<u32> {
        self.geometry.map(|g| g.divisions)
    }

    /// Canvas region the assembled puzzle occupies: top-left of piece (0, 0)
    /// and the combined extent of all pieces.
    pub fn target_area(&self) -> Option<(Point, Size)> {
        let g = self.geometry?;
        let (ox, oy) = center_offset(self.canvas, g.image);
        Some((
            Point::new(ox as f32, oy as f32),
            Size::new(g.piece.width * g.divisions, g.piece.height * g.divisions),
        ))
    }

    pub fn state(&self) -> PuzzleState {
        if self.pieces.is_empty() {
            PuzzleState::Empty
        } else if self.selected.is_some() {
            PuzzleState::Dragging
        } else if self.completed {
            PuzzleState::Completed
        } else {
            PuzzleState::Ready
        }
    }

    /// Whether every piece is placed. Recomputed on every call.
    pub fn is_complete(&self) -> bool {
        !self.pieces.is_empty() && self.pieces.iter().all(Piece::is_placed)
    }

    /// Hand over a new image. Replaces the current puzzle once accepted.
    ///
    /// Argument errors are reported immediately, even when the build itself
    /// has to wait for the canvas size. A rejected image leaves the current
    /// puzzle untouched.
    pub fn load(&mut self, image: RgbaImage, config: PuzzleConfig) -> Result<Loaded, PuzzleError> {
        validate(&image, config)?;
        if self.canvas.is_empty() {
            log::debug!("canvas size unknown, deferring puzzle build");
            self.clear();
            self.pending = Some((image, config));
            return Ok(Loaded::Deferred);
        }
        let grid = self.build_grid(image, config)?;
        self.start(grid);
        Ok(Loaded::Started)
    }

    /// Record the canvas size.
    ///
    /// Builds a deferred image. Otherwise recomputes correct positions for
    /// the new size and pulls pieces back inside the canvas.
    pub fn set_canvas(&mut self, canvas: Size) -> Result<(), PuzzleError> {
        if canvas.is_empty() {
            return Err(PuzzleError::NotReady);
        }
        log::debug!("canvas size {}x{}", canvas.width, canvas.height);
        self.canvas = canvas;

        if let Some((image, config)) = self.pending.take() {
            let grid = self.build_grid(image, config)?;
            self.start(grid);
            return Ok(());
        }
        if let Some(g) = self.geometry {
            realign_pieces(&mut self.pieces, g.image, canvas);
            for p in &mut self.pieces {
                p.position = clamp_into(p.position, p.size(), canvas);
            }
        }
        Ok(())
    }

    /// Take ownership of freshly built pieces and scatter them.
    ///
    /// Any drag in progress is dropped without snapping.
    pub fn start(&mut self, grid: PieceGrid) -> ScatterMode {
        self.clear();
        self.canvas = grid.canvas();
        let (pieces, geometry) = grid.into_parts();
        self.pieces = pieces;
        self.geometry = Some(geometry);
        self.shuffle()
    }

    /// Re-shuffle the current pieces.
    ///
    /// Any drag in progress is dropped without snapping.
    pub fn reset(&mut self) -> Result<ScatterMode, PuzzleError> {
        if self.geometry.is_none() {
            return Err(PuzzleError::NotReady);
        }
        self.selected = None;
        self.completed = false;
        Ok(self.shuffle())
    }

    /// Topmost piece containing `p`.
    pub fn piece_at(&self, p: Point) -> Option<&Piece> {
        self.index_at(p).map(|i| &self.pieces[i])
    }

    /// Pick up the topmost piece under `p` and bring it to the front.
    ///
    /// Returns whether a piece was picked up.
    pub fn pointer_down(&mut self, p: Point) -> bool {
        let Some(i) = self.index_at(p) else {
            log::trace!("pointer down at ({}, {}) hit nothing", p.x, p.y);
            return false;
        };
        let piece = self.pieces.remove(i);
        log::trace!(
            "picked piece ({}, {}) at ({}, {})",
            piece.grid().x,
            piece.grid().y,
            p.x,
            p.y
        );
        self.pieces.push(piece);
        self.selected = Some(self.pieces.len() - 1);
        true
    }

    /// Center the selected piece on `p`, kept inside the canvas.
    pub fn pointer_move(&mut self, p: Point) {
        let canvas = self.canvas;
        let Some(piece) = self.selected.and_then(|i| self.pieces.get_mut(i)) else {
            return;
        };
        let size = piece.size();
        let top_left = Point::new(p.x - size.width as f32 / 2.0, p.y - size.height as f32 / 2.0);
        piece.position = clamp_into(top_left, size, canvas);
    }

    /// Drop the selected piece, snapping it when close enough, and check
    /// for completion.
    pub fn pointer_up(&mut self, p: Point) -> Release {
        let Some(i) = self.selected.take() else {
            return Release::Idle;
        };
        let Some(piece) = self.pieces.get_mut(i) else {
            return Release::Idle;
        };

        let snapped = piece.within_snap(SNAP_FRACTION);
        if snapped {
            piece.snap();
        }
        log::trace!(
            "released piece ({}, {}) at ({}, {}), snapped: {snapped}",
            piece.grid().x,
            piece.grid().y,
            p.x,
            p.y
        );

        self.completed = self.is_complete();
        if self.completed {
            log::info!("puzzle completed ({} pieces)", self.pieces.len());
            if let Some(sink) = self.sink.as_mut() {
                sink.on_completed();
            }
            return Release::Completed;
        }

        if snapped {
            Release::Snapped
        } else {
            Release::Dropped
        }
    }

    /// Pieces in draw order. The selected piece always comes last.
    pub fn frame(&self) -> impl Iterator<Item = FramePiece<'_>> + '_ {
        let selected = self.selected;
        self.pieces
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != selected)
            .chain(selected.and_then(|i| self.pieces.get(i).map(|p| (i, p))))
            .map(move |(i, p)| FramePiece::new(p, Some(i) == selected))
    }

    fn index_at(&self, p: Point) -> Option<usize> {
        self.pieces.iter().rposition(|piece| piece.contains(p))
    }

    fn build_grid(&self, image: RgbaImage, config: PuzzleConfig) -> Result<PieceGrid, PuzzleError> {
        let image = prepare(image, config.fit, self.canvas);
        build(&image, config.divisions, self.canvas)
    }

    fn shuffle(&mut self) -> ScatterMode {
        let Some(g) = self.geometry else {
            return ScatterMode::Grid;
        };
        let mode = scatter(&mut self.pieces, g.divisions, self.canvas, &mut *self.rng);
        log::debug!("scattered {} pieces ({mode:?})", self.pieces.len());
        mode
    }

    fn clear(&mut self) {
        self.pieces.clear();
        self.geometry = None;
        self.selected = None;
        self.completed = false;
        self.pending = None;
    }
}

/// Reject inputs that can never produce a grid, before any state changes.
fn validate(image: &RgbaImage, config: PuzzleConfig) -> Result<(), PuzzleError> {
    if config.divisions == 0 {
        return Err(PuzzleError::InvalidArgument("divisions must be at least 1"));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(PuzzleError::InvalidArgument("image has a zero dimension"));
    }
    if config.fit == FitMode::Native
        && (image.width() < config.divisions || image.height() < config.divisions)
    {
        return Err(PuzzleError::InvalidArgument(
            "image is smaller than the division count",
        ));
    }
    Ok(())
}
