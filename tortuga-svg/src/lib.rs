//! SVG renderer for turtle drawings.
//!
//! Converts recorded [`LineSegment`]s into an SVG [`Document`] using the
//! `svg` crate.
//!
//! Key design points:
//! - Turtle coordinates have Y pointing **up**; SVG has Y pointing
//!   **down**. All Y coordinates are negated at render time so that no
//!   global transform or `viewBox` trick is needed.
//! - The `viewBox` derives from the segment bounding box plus a margin,
//!   so drawings are framed without the caller doing any math.
//! - Coordinates are written with a configurable precision and trailing
//!   zeros trimmed, keeping documents small and diffable.

use svg::Document;
use svg::node::element::Line;

use tortuga_graphics::types::{segments_bbox, LineSegment, Scalar};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Extra margin around the bounding box, in user units. Default: 10.
    pub margin: Scalar,
    /// Number of decimal places for coordinates. Default: 4.
    pub precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 10.0,
            precision: 4,
        }
    }
}

/// Render segments to an SVG [`Document`] with default options.
#[must_use]
pub fn render(segments: &[LineSegment]) -> Document {
    render_with_options(segments, &RenderOptions::default())
}

/// Render segments to an SVG string with default options.
#[must_use]
pub fn render_to_string(segments: &[LineSegment]) -> String {
    render(segments).to_string()
}

/// Render segments to an SVG [`Document`] with custom options.
#[must_use]
pub fn render_with_options(segments: &[LineSegment], opts: &RenderOptions) -> Document {
    let mut bb = segments_bbox(segments);
    if bb.is_empty() {
        // An empty drawing still frames the origin.
        bb.include(0.0, 0.0);
    }

    // The Y flip mirrors the box: the top of the viewBox is -max_y.
    let view_box = format!(
        "{} {} {} {}",
        fmt_scalar(bb.min_x - opts.margin, opts.precision),
        fmt_scalar(-bb.max_y - opts.margin, opts.precision),
        fmt_scalar(bb.width() + 2.0 * opts.margin, opts.precision),
        fmt_scalar(bb.height() + 2.0 * opts.margin, opts.precision),
    );

    let mut doc = Document::new().set("viewBox", view_box);
    for seg in segments {
        doc = doc.add(render_segment(seg, opts));
    }
    doc
}

// ---------------------------------------------------------------------------
// Segment rendering
// ---------------------------------------------------------------------------

/// One `<line>` element per segment, Y negated.
fn render_segment(seg: &LineSegment, opts: &RenderOptions) -> Line {
    Line::new()
        .set("x1", fmt_scalar(seg.x1, opts.precision))
        .set("y1", fmt_scalar(-seg.y1, opts.precision))
        .set("x2", fmt_scalar(seg.x2, opts.precision))
        .set("y2", fmt_scalar(-seg.y2, opts.precision))
        .set("stroke", seg.color.as_str())
        .set("stroke-width", fmt_scalar(seg.size, opts.precision))
        .set("stroke-linecap", "round")
}

/// Format a scalar with the given precision, trimming trailing zeros.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_owned()
    } else if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: Scalar, y1: Scalar, x2: Scalar, y2: Scalar) -> LineSegment {
        LineSegment {
            x1,
            y1,
            x2,
            y2,
            color: "black".into(),
            size: 1.0,
        }
    }

    #[test]
    fn fmt_scalar_trims() {
        assert_eq!(fmt_scalar(1.0, 4), "1");
        assert_eq!(fmt_scalar(1.5, 4), "1.5");
        assert_eq!(fmt_scalar(0.123_456, 4), "0.1235");
        assert_eq!(fmt_scalar(-0.000_01, 4), "0");
        assert_eq!(fmt_scalar(-2.0, 4), "-2");
    }

    #[test]
    fn renders_an_svg_root() {
        let doc = render_to_string(&[seg(0.0, 0.0, 10.0, 10.0)]);
        assert!(doc.contains("<svg"), "missing svg root: {doc}");
        assert!(doc.contains("<line"), "missing line element: {doc}");
    }

    #[test]
    fn y_axis_is_inverted() {
        // A segment up to (0, 100) renders down to y = -100.
        let doc = render_to_string(&[seg(0.0, 0.0, 0.0, 100.0)]);
        assert!(doc.contains("y2=\"-100\""), "expected y flip: {doc}");
    }

    #[test]
    fn stroke_attributes_come_from_the_segment() {
        let mut s = seg(0.0, 0.0, 1.0, 1.0);
        s.color = "tomato".into();
        s.size = 2.5;
        let doc = render_to_string(&[s]);
        assert!(doc.contains("stroke=\"tomato\""), "missing color: {doc}");
        assert!(doc.contains("stroke-width=\"2.5\""), "missing width: {doc}");
    }

    #[test]
    fn view_box_covers_the_drawing_with_margin() {
        let doc = render_with_options(
            &[seg(0.0, 0.0, 100.0, 50.0)],
            &RenderOptions {
                margin: 10.0,
                precision: 4,
            },
        )
        .to_string();
        assert!(
            doc.contains("viewBox=\"-10 -60 120 70\""),
            "unexpected viewBox: {doc}"
        );
    }

    #[test]
    fn empty_drawing_still_renders() {
        let doc = render_to_string(&[]);
        assert!(doc.contains("<svg"), "missing svg root: {doc}");
        assert!(doc.contains("viewBox"), "missing viewBox: {doc}");
    }
}
