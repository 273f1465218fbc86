//! The turtle state machine and line-segment recorder.
//!
//! The turtle tracks a position, a heading (degrees clockwise from +Y,
//! always normalized to [0, 360)), pen state, and the ordered list of
//! segments drawn so far. Movement with the pen down records exactly one
//! segment; with the pen up it records none.

use crate::math::{cos_deg, normalize_heading, sin_deg};
use crate::types::{LineSegment, Scalar};

/// Default pen color for a fresh turtle.
pub const DEFAULT_COLOR: &str = "black";

/// The turtle.
#[derive(Debug, Clone)]
pub struct Turtle {
    /// Current position.
    pub x: Scalar,
    /// Current position.
    pub y: Scalar,
    /// Heading in degrees, clockwise from +Y, in [0, 360).
    pub heading: Scalar,
    /// Whether movement draws.
    pub pen_down: bool,
    /// Current pen color.
    pub pen_color: String,
    /// Current pen width.
    pub pen_size: Scalar,
    /// Whether the turtle itself should be shown by a renderer.
    pub visible: bool,
    /// Recorded segments, in draw order.
    pub lines: Vec<LineSegment>,
}

impl Turtle {
    /// A turtle at the origin, facing north, pen down.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            pen_down: true,
            pen_color: DEFAULT_COLOR.into(),
            pen_size: 1.0,
            visible: true,
            lines: Vec::new(),
        }
    }

    /// Advance `dist` units along the current heading.
    pub fn forward(&mut self, dist: Scalar) {
        let nx = self.x + dist * sin_deg(self.heading);
        let ny = self.y + dist * cos_deg(self.heading);
        self.move_to(nx, ny);
    }

    /// Move backward without changing the heading.
    pub fn back(&mut self, dist: Scalar) {
        self.forward(-dist);
    }

    /// Rotate clockwise.
    pub fn right(&mut self, deg: Scalar) {
        self.heading = normalize_heading(self.heading + deg);
    }

    /// Rotate counter-clockwise.
    pub fn left(&mut self, deg: Scalar) {
        self.right(-deg);
    }

    /// Face an absolute heading.
    pub fn set_heading(&mut self, deg: Scalar) {
        self.heading = normalize_heading(deg);
    }

    /// Move to an absolute position, drawing if the pen is down.
    pub fn move_to(&mut self, x: Scalar, y: Scalar) {
        if self.pen_down {
            self.lines.push(LineSegment {
                x1: self.x,
                y1: self.y,
                x2: x,
                y2: y,
                color: self.pen_color.clone(),
                size: self.pen_size,
            });
        }
        self.x = x;
        self.y = y;
    }

    /// Return to the origin and face north. Draws the homing move if the
    /// pen is down.
    pub fn home(&mut self) {
        self.move_to(0.0, 0.0);
        self.heading = 0.0;
    }

    /// Draw a full circle of the given radius as 36 equal chords with a
    /// 10-degree right turn after each. Closes back on the start point
    /// with the starting heading restored.
    pub fn circle(&mut self, radius: Scalar) {
        let chord = std::f64::consts::TAU * radius / 36.0;
        for _ in 0..36 {
            self.forward(chord);
            self.right(10.0);
        }
    }

    /// Draw an arc subtending `angle` degrees of the given radius.
    ///
    /// Uses `max(1, round(|angle| / 10))` equal chords with a turn of
    /// `angle / steps` after each; a negative angle curves to the left.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "steps is >= 1 and bounded by |angle| / 10"
    )]
    pub fn arc(&mut self, angle: Scalar, radius: Scalar) {
        let steps = (angle.abs() / 10.0).round().max(1.0);
        let turn = angle / steps;
        let chord = std::f64::consts::TAU * radius * angle.abs() / 360.0 / steps;
        for _ in 0..steps as u64 {
            self.forward(chord);
            self.right(turn);
        }
    }

    /// Erase all recorded segments and return to the initial pose.
    ///
    /// The pen state (up/down, color, size) is preserved, and no segment
    /// is recorded for the implied move to the origin.
    pub fn clear_screen(&mut self) {
        self.lines.clear();
        self.x = 0.0;
        self.y = 0.0;
        self.heading = 0.0;
    }
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "exact float comparisons are intentional in tests"
)]
mod tests {
    use super::*;
    use crate::types::EPSILON;

    fn assert_close(a: Scalar, b: Scalar) {
        assert!((a - b).abs() < 1e-6, "expected {b}, got {a}");
    }

    #[test]
    fn forward_north() {
        let mut t = Turtle::new();
        t.forward(100.0);
        assert_close(t.x, 0.0);
        assert_close(t.y, 100.0);
        assert_eq!(t.lines.len(), 1);
    }

    #[test]
    fn square_closes() {
        let mut t = Turtle::new();
        for _ in 0..4 {
            t.forward(100.0);
            t.right(90.0);
        }
        assert_close(t.x, 0.0);
        assert_close(t.y, 0.0);
        assert_eq!(t.heading, 0.0);
        assert_eq!(t.lines.len(), 4);
    }

    #[test]
    fn pen_up_records_nothing() {
        let mut t = Turtle::new();
        t.pen_down = false;
        t.forward(100.0);
        t.move_to(5.0, 5.0);
        t.home();
        assert!(t.lines.is_empty());
    }

    #[test]
    fn back_is_negative_forward() {
        let mut t = Turtle::new();
        t.back(50.0);
        assert_close(t.y, -50.0);
        assert_eq!(t.heading, 0.0);
    }

    #[test]
    fn heading_stays_normalized() {
        let mut t = Turtle::new();
        t.left(90.0);
        assert_eq!(t.heading, 270.0);
        t.right(450.0);
        assert_eq!(t.heading, 0.0);
        t.set_heading(-30.0);
        assert_eq!(t.heading, 330.0);
    }

    #[test]
    fn home_draws_when_pen_down() {
        let mut t = Turtle::new();
        t.move_to(30.0, 40.0);
        t.right(45.0);
        t.home();
        assert_eq!((t.x, t.y, t.heading), (0.0, 0.0, 0.0));
        assert_eq!(t.lines.len(), 2);
        let last = t.lines.last().unwrap();
        assert_eq!((last.x2, last.y2), (0.0, 0.0));
    }

    #[test]
    fn circle_chord_count_and_closure() {
        let mut t = Turtle::new();
        t.circle(50.0);
        assert_eq!(t.lines.len(), 36);
        assert_close(t.x, 0.0);
        assert_close(t.y, 0.0);
        assert!(t.heading.abs() < 1e-6 || (360.0 - t.heading) < 1e-6);
    }

    #[test]
    fn arc_step_count() {
        let mut t = Turtle::new();
        t.arc(90.0, 50.0);
        assert_eq!(t.lines.len(), 9);

        let mut t = Turtle::new();
        t.arc(5.0, 50.0);
        assert_eq!(t.lines.len(), 1);

        let mut t = Turtle::new();
        t.arc(-45.0, 50.0);
        assert_eq!(t.lines.len(), 5, "negative arcs use |angle|");
    }

    #[test]
    fn arc_turns_by_angle() {
        let mut t = Turtle::new();
        t.arc(90.0, 50.0);
        assert!((t.heading - 90.0).abs() < EPSILON);
    }

    #[test]
    fn clear_screen_resets_pose_and_keeps_pen() {
        let mut t = Turtle::new();
        t.pen_color = "red".into();
        t.pen_down = false;
        t.move_to(10.0, 10.0);
        t.right(90.0);
        t.clear_screen();
        assert_eq!((t.x, t.y, t.heading), (0.0, 0.0, 0.0));
        assert!(t.lines.is_empty());
        assert!(!t.pen_down);
        assert_eq!(t.pen_color, "red");

        // A second clear is a no-op.
        t.clear_screen();
        assert!(t.lines.is_empty());
        assert_eq!((t.x, t.y, t.heading), (0.0, 0.0, 0.0));
    }

    #[test]
    fn segments_carry_pen_attributes() {
        let mut t = Turtle::new();
        t.pen_color = "blue".into();
        t.pen_size = 3.0;
        t.forward(10.0);
        assert_eq!(t.lines[0].color, "blue");
        assert_eq!(t.lines[0].size, 3.0);
    }
}
