//! Shared geometric types.
//!
//! The turtle works in mathematical coordinates: +X points right, +Y points
//! **up**, and the origin is wherever the turtle started. Consumers that
//! target a Y-down format (SVG) are responsible for the axis flip.

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// The numeric type used throughout the crate.
pub type Scalar = f64;

/// Tolerance for geometric comparisons in tests and bounding-box math.
pub const EPSILON: Scalar = 1e-9;

// ---------------------------------------------------------------------------
// Line segments
// ---------------------------------------------------------------------------

/// A recorded pen stroke.
///
/// Segments are append-only: the turtle only ever adds to the sequence,
/// except for `clearscreen`, which empties it.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    /// Start point.
    pub x1: Scalar,
    /// Start point.
    pub y1: Scalar,
    /// End point.
    pub x2: Scalar,
    /// End point.
    pub y2: Scalar,
    /// Pen color at the time of the stroke (a CSS/SVG color keyword or code).
    pub color: String,
    /// Pen width at the time of the stroke.
    pub size: Scalar,
}

impl LineSegment {
    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> Scalar {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

// ---------------------------------------------------------------------------
// Bounding box
// ---------------------------------------------------------------------------

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: Scalar,
    pub min_y: Scalar,
    pub max_x: Scalar,
    pub max_y: Scalar,
}

impl BoundingBox {
    /// An empty box: `include` of any point makes it that point.
    pub const EMPTY: Self = Self {
        min_x: Scalar::INFINITY,
        min_y: Scalar::INFINITY,
        max_x: Scalar::NEG_INFINITY,
        max_y: Scalar::NEG_INFINITY,
    };

    /// Whether no point has been included yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    /// Grow the box to include a point.
    pub fn include(&mut self, x: Scalar, y: Scalar) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Width of the box (0 when empty).
    #[must_use]
    pub fn width(&self) -> Scalar {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Height of the box (0 when empty).
    #[must_use]
    pub fn height(&self) -> Scalar {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }
}

/// Bounding box of a sequence of segments (endpoints only).
#[must_use]
pub fn segments_bbox(segments: &[LineSegment]) -> BoundingBox {
    let mut bb = BoundingBox::EMPTY;
    for seg in segments {
        bb.include(seg.x1, seg.y1);
        bb.include(seg.x2, seg.y2);
    }
    bb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
