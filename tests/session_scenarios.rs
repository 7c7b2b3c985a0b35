//! End-to-end drag/snap/complete scenarios through the public API.

use std::cell::Cell;
use std::rc::Rc;

use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use zenpuzzle::*;

// ---- Helpers ----

fn seeded(seed: u64) -> Session {
    Session::with_rng(Box::new(StdRng::seed_from_u64(seed)))
}

/// 3×3 puzzle of 120 px pieces on a 900×900 canvas.
fn nine_piece(seed: u64) -> (Session, Rc<Cell<u32>>) {
    let mut session = seeded(seed);
    session.set_canvas(Size::new(900, 900)).unwrap();
    let loaded = session
        .load(
            RgbaImage::new(360, 360),
            PuzzleConfig::new(3).fit(FitMode::Native),
        )
        .unwrap();
    assert_eq!(loaded, Loaded::Started);

    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    session.set_completion_sink(move || counter.set(counter.get() + 1));
    (session, fired)
}

fn piece(session: &Session, grid: GridPos) -> &Piece {
    session
        .pieces()
        .iter()
        .find(|p| p.grid() == grid)
        .expect("piece exists")
}

/// A point inside `grid`'s piece where that piece is the topmost hit.
fn grab_point(session: &Session, grid: GridPos) -> Point {
    let p = piece(session, grid);
    let pos = p.position();
    let size = p.size();
    for iy in 1..8 {
        for ix in 1..8 {
            let candidate = Point::new(
                pos.x + size.width as f32 * ix as f32 / 8.0,
                pos.y + size.height as f32 * iy as f32 / 8.0,
            );
            if session.piece_at(candidate).map(Piece::grid) == Some(grid) {
                return candidate;
            }
        }
    }
    panic!("piece {grid:?} is fully covered");
}

/// Drag `grid` so its top-left lands at `target`, then release.
fn drag_to(session: &mut Session, grid: GridPos, target: Point) -> Release {
    let start = grab_point(session, grid);
    assert!(session.pointer_down(start));
    assert_eq!(session.state(), PuzzleState::Dragging);
    let size = piece(session, grid).size();
    let center = Point::new(
        target.x + size.width as f32 / 2.0,
        target.y + size.height as f32 / 2.0,
    );
    session.pointer_move(center);
    session.pointer_up(center)
}

fn all_cells(n: u32) -> impl Iterator<Item = GridPos> {
    (0..n).flat_map(move |y| (0..n).map(move |x| GridPos::new(x, y)))
}

// ---- Scenarios ----

#[test]
fn single_snap_does_not_complete() {
    let (mut session, fired) = nine_piece(1);
    let center = GridPos::new(1, 1);
    assert_eq!(piece(&session, center).size(), Size::new(120, 120));
    let correct = piece(&session, center).correct_position();
    assert_eq!(correct, Point::new(390.0, 390.0));

    let release = drag_to(
        &mut session,
        center,
        Point::new(correct.x + 10.0, correct.y + 10.0),
    );

    assert_eq!(release, Release::Snapped);
    let p = piece(&session, center);
    assert_eq!(p.position(), correct);
    assert!(p.is_placed());
    assert_eq!(fired.get(), 0);
    assert_eq!(session.state(), PuzzleState::Ready);
    assert_eq!(session.pieces().iter().filter(|p| p.is_placed()).count(), 1);
}

#[test]
fn snapping_every_piece_completes_once() {
    let (mut session, fired) = nine_piece(2);
    let cells: Vec<GridPos> = all_cells(3).collect();

    for (i, &grid) in cells.iter().enumerate() {
        let correct = piece(&session, grid).correct_position();
        let release = drag_to(
            &mut session,
            grid,
            Point::new(correct.x - 12.0, correct.y + 7.0),
        );
        if i + 1 < cells.len() {
            assert_eq!(release, Release::Snapped, "piece {grid:?}");
            assert_eq!(fired.get(), 0);
        } else {
            assert_eq!(release, Release::Completed);
        }
    }

    assert_eq!(fired.get(), 1);
    assert!(session.is_complete());
    assert_eq!(session.state(), PuzzleState::Completed);
}

#[test]
fn every_completing_release_notifies() {
    let (mut session, fired) = nine_piece(3);
    for grid in all_cells(3) {
        let correct = piece(&session, grid).correct_position();
        drag_to(&mut session, grid, correct);
    }
    assert_eq!(fired.get(), 1);

    // Picking up a placed piece and putting it back completes the puzzle again.
    let corner = GridPos::new(0, 0);
    let correct = piece(&session, corner).correct_position();
    let start = grab_point(&session, corner);
    session.pointer_down(start);
    assert_eq!(session.state(), PuzzleState::Dragging);
    assert_eq!(session.pointer_up(start), Release::Completed);
    assert_eq!(fired.get(), 2);
    assert_eq!(session.state(), PuzzleState::Completed);

    // Pull it out, then put it back.
    assert_eq!(
        drag_to(&mut session, corner, Point::new(20.0, 20.0)),
        Release::Dropped
    );
    assert_eq!(session.state(), PuzzleState::Ready);
    assert_eq!(fired.get(), 2);
    assert_eq!(drag_to(&mut session, corner, correct), Release::Completed);
    assert_eq!(fired.get(), 3);
}

#[test]
fn snap_tolerance_boundary() {
    let grid = GridPos::new(2, 0);
    for (offset, snaps) in [(29.5, true), (30.0, false), (30.5, false), (-29.5, true)] {
        let (mut session, _) = nine_piece(4);
        let correct = piece(&session, grid).correct_position();
        let release = drag_to(
            &mut session,
            grid,
            Point::new(correct.x + offset, correct.y),
        );
        let p = piece(&session, grid);
        if snaps {
            assert_eq!(release, Release::Snapped, "offset {offset}");
            assert_eq!(p.position(), correct);
        } else {
            assert_eq!(release, Release::Dropped, "offset {offset}");
            assert_eq!(p.position(), Point::new(correct.x + offset, correct.y));
            assert!(!p.is_placed());
        }
    }
}

#[test]
fn reset_twice_is_ready_and_unplaced() {
    let (mut session, _) = nine_piece(5);
    let grid = GridPos::new(0, 2);
    let correct = piece(&session, grid).correct_position();
    drag_to(&mut session, grid, correct);

    // Leave a drag in progress.
    let start = grab_point(&session, GridPos::new(1, 0));
    session.pointer_down(start);

    for _ in 0..2 {
        assert_eq!(session.reset(), Ok(ScatterMode::Edges));
        assert_eq!(session.state(), PuzzleState::Ready);
        assert!(session.selected().is_none());
        assert!(session.pieces().iter().all(|p| !p.is_placed()));
    }
}

#[test]
fn reset_mid_drag_applies_no_snap() {
    let (mut session, fired) = nine_piece(6);
    let grid = GridPos::new(1, 2);
    let correct = piece(&session, grid).correct_position();
    let start = grab_point(&session, grid);
    session.pointer_down(start);
    session.pointer_move(Point::new(correct.x + 61.0, correct.y + 61.0));

    session.reset().unwrap();
    assert_eq!(session.pointer_up(Point::new(0.0, 0.0)), Release::Idle);
    assert!(!piece(&session, grid).is_placed());
    assert_eq!(fired.get(), 0);
}

#[test]
fn dense_grid_fallback() {
    let mut session = seeded(7);
    session.set_canvas(Size::new(200, 200)).unwrap();
    session
        .load(
            RgbaImage::new(200, 200),
            PuzzleConfig::new(5).fit(FitMode::Native),
        )
        .unwrap();
    let pieces = session.pieces();
    assert_eq!(pieces.len(), 25);
    assert_eq!(pieces[0].size(), Size::new(40, 40));
    assert_eq!(pieces[0].position(), Point::new(0.0, 0.0));
    assert_eq!(pieces[5].position(), Point::new(0.0, 40.0));
}

#[test]
fn deferred_until_canvas_known() {
    let mut session = seeded(8);
    let loaded = session
        .load(
            RgbaImage::new(360, 360),
            PuzzleConfig::new(3).fit(FitMode::Native),
        )
        .unwrap();
    assert_eq!(loaded, Loaded::Deferred);
    assert_eq!(session.state(), PuzzleState::Empty);
    assert_eq!(session.reset(), Err(PuzzleError::NotReady));

    session.set_canvas(Size::new(900, 900)).unwrap();
    assert_eq!(session.state(), PuzzleState::Ready);
    assert_eq!(session.pieces().len(), 9);
    assert_eq!(session.divisions(), Some(3));
}

#[test]
fn canvas_resize_recomputes_targets() {
    let (mut session, _) = nine_piece(9);
    session.set_canvas(Size::new(1200, 600)).unwrap();
    // origin: 600 - 180 = 420, 300 - 180 = 120
    let p = piece(&session, GridPos::new(2, 1));
    assert_eq!(p.correct_position(), Point::new(660.0, 240.0));
    for p in session.pieces() {
        let pos = p.position();
        assert!(pos.x <= 1080.0 && pos.y <= 480.0, "{pos:?}");
    }
}

#[test]
fn start_with_builder_output() {
    let grid = build(&RgbaImage::new(360, 360), 3, Size::new(900, 900)).unwrap();
    let mut session = seeded(10);
    assert_eq!(session.start(grid), ScatterMode::Edges);
    assert_eq!(session.canvas(), Some(Size::new(900, 900)));
    assert_eq!(session.state(), PuzzleState::Ready);
}

#[test]
fn one_piece_puzzle_completes_on_first_snap() {
    let mut session = seeded(11);
    session.set_canvas(Size::new(300, 300)).unwrap();
    session
        .load(
            RgbaImage::new(100, 100),
            PuzzleConfig::new(1).fit(FitMode::Native),
        )
        .unwrap();
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    session.set_completion_sink(move || counter.set(counter.get() + 1));

    let correct = session.pieces()[0].correct_position();
    assert_eq!(
        drag_to(&mut session, GridPos::new(0, 0), correct),
        Release::Completed
    );
    assert_eq!(fired.get(), 1);
}

#[test]
fn level_config_drives_division_count() {
    let mut level = Level::FIRST;
    for expected in [3, 4, 5] {
        let mut session = seeded(12);
        session.set_canvas(Size::new(1000, 1000)).unwrap();
        session
            .load(RgbaImage::new(500, 500), PuzzleConfig::for_level(level))
            .unwrap();
        assert_eq!(session.divisions(), Some(expected));
        assert_eq!(session.pieces().len(), (expected * expected) as usize);
        level = level.next().level;
    }
    assert_eq!(level, Level::FIRST);
}
