//! The pen abstraction every renderer backend implements.
//!
//! A [`Pen`] is a stateful drawing cursor: it has a position, a heading, a
//! stroke color and width, and an up/down state. The scene renderer in
//! [`draw`](crate::draw) drives a pen through a fixed sequence of calls per
//! shape; what those calls produce (SVG paths, raster strokes, plotter
//! moves) is entirely the backend's concern.
//!
//! [`RecordingPen`] is the capturing backend used by the renderer tests and
//! handy when debugging a recipe: it stores every call as a [`PenOp`].

use crate::geometry::Bounds;

/// A stateful drawing cursor.
///
/// Conventions follow the scene coordinate system described in
/// [`geometry`](crate::geometry): headings are degrees counterclockwise from
/// east, and a positive arc radius curves to the left of the current
/// heading.
pub trait Pen {
    /// Set the world-coordinate region the drawing surface maps.
    fn set_world(&mut self, bounds: Bounds);

    /// Fill the whole surface with a background color.
    fn set_background(&mut self, color: &str);

    /// Lift the pen; subsequent strokes draw nothing until it is lowered.
    fn pen_up(&mut self);

    /// Lower the pen.
    fn pen_down(&mut self);

    /// Reposition the pen to absolute coordinates without drawing.
    fn move_to(&mut self, x: f64, y: f64);

    /// Point the pen at an absolute heading in degrees.
    fn set_heading(&mut self, degrees: f64);

    /// Set the stroke color for subsequent segments.
    fn set_color(&mut self, color: &str);

    /// Set the stroke width for subsequent segments.
    fn set_width(&mut self, width: f64);

    /// Stroke a straight segment of the given length along the current
    /// heading. Moves the pen either way; draws only while the pen is down.
    fn forward(&mut self, distance: f64);

    /// Turn the heading counterclockwise by `degrees`.
    fn left(&mut self, degrees: f64);

    /// Turn the heading clockwise by `degrees`.
    fn right(&mut self, degrees: f64) {
        self.left(-degrees);
    }

    /// Stroke a circular arc of `extent` degrees.
    ///
    /// The arc's center sits perpendicular to the current heading at
    /// distance `radius`: to the left for a positive radius, to the right
    /// for a negative one. The pen ends at the arc's far end with its
    /// heading turned by `extent` in the arc's direction.
    fn arc(&mut self, radius: f64, extent: f64);

    /// Stroke a full circle; equivalent to a 360 degree [`arc`](Pen::arc).
    fn circle(&mut self, radius: f64) {
        self.arc(radius, 360.0);
    }

    /// Start collecting a closed path to fill with `color`.
    fn begin_fill(&mut self, color: &str);

    /// Close and fill the path collected since [`begin_fill`](Pen::begin_fill).
    fn end_fill(&mut self);
}

/// One recorded pen call.
#[derive(Debug, Clone, PartialEq)]
pub enum PenOp {
    SetWorld(Bounds),
    SetBackground(String),
    PenUp,
    PenDown,
    MoveTo(f64, f64),
    SetHeading(f64),
    SetColor(String),
    SetWidth(f64),
    Forward(f64),
    Left(f64),
    Arc { radius: f64, extent: f64 },
    BeginFill(String),
    EndFill,
}

/// A pen that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingPen {
    ops: Vec<PenOp>,
}

impl RecordingPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls recorded so far, in order.
    pub fn ops(&self) -> &[PenOp] {
        &self.ops
    }

    /// Consumes the pen and returns the recorded calls.
    pub fn into_ops(self) -> Vec<PenOp> {
        self.ops
    }
}

impl Pen for RecordingPen {
    fn set_world(&mut self, bounds: Bounds) {
        self.ops.push(PenOp::SetWorld(bounds));
    }

    fn set_background(&mut self, color: &str) {
        self.ops.push(PenOp::SetBackground(color.to_string()));
    }

    fn pen_up(&mut self) {
        self.ops.push(PenOp::PenUp);
    }

    fn pen_down(&mut self) {
        self.ops.push(PenOp::PenDown);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(PenOp::MoveTo(x, y));
    }

    fn set_heading(&mut self, degrees: f64) {
        self.ops.push(PenOp::SetHeading(degrees));
    }

    fn set_color(&mut self, color: &str) {
        self.ops.push(PenOp::SetColor(color.to_string()));
    }

    fn set_width(&mut self, width: f64) {
        self.ops.push(PenOp::SetWidth(width));
    }

    fn forward(&mut self, distance: f64) {
        self.ops.push(PenOp::Forward(distance));
    }

    fn left(&mut self, degrees: f64) {
        self.ops.push(PenOp::Left(degrees));
    }

    fn arc(&mut self, radius: f64, extent: f64) {
        self.ops.push(PenOp::Arc { radius, extent });
    }

    fn begin_fill(&mut self, color: &str) {
        self.ops.push(PenOp::BeginFill(color.to_string()));
    }

    fn end_fill(&mut self) {
        self.ops.push(PenOp::EndFill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_pen_keeps_call_order() {
        let mut pen = RecordingPen::new();
        pen.move_to(1.0, 2.0);
        pen.set_heading(90.0);
        pen.forward(10.0);

        assert_eq!(
            pen.ops(),
            [
                PenOp::MoveTo(1.0, 2.0),
                PenOp::SetHeading(90.0),
                PenOp::Forward(10.0),
            ]
        );
    }

    #[test]
    fn test_right_is_negative_left() {
        let mut pen = RecordingPen::new();
        pen.right(45.0);

        assert_eq!(pen.ops(), [PenOp::Left(-45.0)]);
    }

    #[test]
    fn test_circle_is_full_arc() {
        let mut pen = RecordingPen::new();
        pen.circle(12.0);

        assert_eq!(
            pen.ops(),
            [PenOp::Arc {
                radius: 12.0,
                extent: 360.0
            }]
        );
    }
}
