//! SVG outline dump of a session frame.
//!
//! Draws the canvas, the target area of the assembled puzzle and every
//! piece as a labelled rectangle in draw order. Pixel data is not embedded;
//! the output is for debugging layouts and reviewing visual test output.
//!
//! # Example
//!
//! ```
//! use zenpuzzle::{FitMode, PuzzleConfig, Session, Size, svg::render_frame_svg};
//! use image::RgbaImage;
//!
//! let mut session = Session::new();
//! session.set_canvas(Size::new(900, 900)).unwrap();
//! session
//!     .load(RgbaImage::new(360, 360), PuzzleConfig::new(3).fit(FitMode::Native))
//!     .unwrap();
//!
//! let svg = render_frame_svg(&session);
//! assert!(svg.starts_with("<svg"));
//! ```

use crate::session::{FramePiece, Session};

/// Longest side of the rendered document, in SVG units.
const MAX_SIDE: f64 = 600.0;
/// Margin around the canvas box.
const MARGIN: f64 = 20.0;
/// Height of the caption line above the canvas.
const LABEL_H: f64 = 22.0;

/// Render the current frame of `session` as a complete SVG document.
pub fn render_frame_svg(session: &Session) -> String {
    let Some(canvas) = session.canvas() else {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    };

    let cw = canvas.width as f64;
    let ch = canvas.height as f64;
    let scale = (MAX_SIDE / cw).min(MAX_SIDE / ch);
    let total_w = cw * scale + 2.0 * MARGIN;
    let total_h = ch * scale + 2.0 * MARGIN + LABEL_H;
    let ox = MARGIN;
    let oy = MARGIN + LABEL_H;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .grid { font-size: 10px; fill: #fff; }
  .canvas { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .target { fill: none; stroke: #999; stroke-width: 1; stroke-dasharray: 4,2; }
  .piece { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; }
  .placed { fill: #6ba3d6; stroke: #3aa655; stroke-width: 2; }
  .selected { fill: #8fbbe3; stroke: #e0a020; stroke-width: 3; }
  .shadow { fill: #000; fill-opacity: 0.3; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .canvas { fill: #2d2d2d; stroke: #555; }
    .piece { fill: #3a72a4; stroke: #5a9fd4; }
    .placed { fill: #3a72a4; }
  }
</style>
"##,
    );

    let placed = session.pieces().iter().filter(|p| p.is_placed()).count();
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label">Canvas  {}×{}  placed {}/{}</text>"#,
        MARGIN,
        MARGIN + 12.0,
        canvas.width,
        canvas.height,
        placed,
        session.pieces().len()
    ));
    svg.push('\n');

    svg.push_str(&rect(ox, oy, cw * scale, ch * scale, "canvas"));

    if let Some((origin, size)) = session.target_area() {
        svg.push_str(&rect(
            ox + origin.x as f64 * scale,
            oy + origin.y as f64 * scale,
            size.width as f64 * scale,
            size.height as f64 * scale,
            "target",
        ));
    }

    for piece in session.frame() {
        render_piece(&mut svg, &piece, ox, oy, scale);
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_piece(svg: &mut String, piece: &FramePiece<'_>, ox: f64, oy: f64, scale: f64) {
    let x = ox + piece.position.x as f64 * scale;
    let y = oy + piece.position.y as f64 * scale;
    let w = piece.size.width as f64 * scale;
    let h = piece.size.height as f64 * scale;
    let shadow = piece.shadow_offset as f64 * scale;

    svg.push_str(&rect(x + shadow, y + shadow, w, h, "shadow"));
    let class = if piece.selected {
        "selected"
    } else if piece.placed {
        "placed"
    } else {
        "piece"
    };
    svg.push_str(&rect(x, y, w, h, class));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" class="grid" text-anchor="middle">{},{}</text>"#,
        x + w / 2.0,
        y + h / 2.0 + 4.0,
        piece.grid.x,
        piece.grid.y
    ));
    svg.push('\n');
}

fn rect(x: f64, y: f64, w: f64, h: f64, class: &str) -> String {
    format!(
        r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="{class}"/>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::raster::{FitMode, PuzzleConfig};
    use image::RgbaImage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> Session {
        let mut s = Session::with_rng(Box::new(StdRng::seed_from_u64(5)));
        s.set_canvas(Size::new(900, 900)).unwrap();
        s.load(
            RgbaImage::new(360, 360),
            PuzzleConfig::new(3).fit(FitMode::Native),
        )
        .unwrap();
        s
    }

    #[test]
    fn svg_without_canvas_is_stub() {
        let svg = render_frame_svg(&Session::new());
        assert!(svg.contains(r#"width="1""#));
    }

    #[test]
    fn svg_lists_every_piece() {
        let svg = render_frame_svg(&session());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("900×900"));
        assert!(svg.contains("placed 0/9"));
        assert_eq!(svg.matches(r#"class="shadow""#).count(), 9);
        assert_eq!(svg.matches(r#"class="piece""#).count(), 9);
        assert!(svg.contains(r#"class="target""#));
    }

    #[test]
    fn svg_marks_selected_piece() {
        let mut s = session();
        let p = s.pieces()[0].position();
        s.pointer_down(Point::new(p.x + 1.0, p.y + 1.0));
        let svg = render_frame_svg(&s);
        assert_eq!(svg.matches(r#"class="selected""#).count(), 1);
        assert_eq!(svg.matches(r#"class="piece""#).count(), 8);
    }
}
