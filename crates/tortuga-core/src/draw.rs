//! Pen-driven rendering of a scene tree.
//!
//! [`render`] walks the tree depth-first in document order. Every node gets
//! the same treatment: a `prepare` step that resets the pen to the node's
//! absolute position, heading, and stroke style (nothing is inherited from
//! the parent's pen state), followed by the variant's geometry recipe.
//! When a fill color is set, the recipe's stroke sequence is bracketed by
//! [`Pen::begin_fill`]/[`Pen::end_fill`].
//!
//! Geometry fields are validated here: a shape whose required field was
//! never assigned in the document is a [`DrawError`], and nothing further
//! is drawn.

use log::{debug, trace};
use thiserror::Error;

use crate::{
    pen::Pen,
    scene::{Canvas, ShapeKind, ShapeNode},
};

/// Rendering failure: the tree cannot be drawn as parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DrawError {
    /// A geometry or position field required by the shape's recipe was
    /// never set in the document.
    #[error("cannot draw {shape}: required attribute `{attribute}` was never set")]
    MissingAttribute {
        shape: &'static str,
        attribute: &'static str,
    },
}

/// Render a whole scene onto the given pen.
///
/// Sets the world coordinate region from the canvas bounds, applies the
/// background color if one is set, then draws every shape pre-order.
pub fn render(canvas: &Canvas, pen: &mut dyn Pen) -> Result<(), DrawError> {
    debug!(shapes = canvas.children().len(); "rendering scene");
    pen.set_world(canvas.bounds());
    if let Some(color) = canvas.background_color() {
        pen.set_background(color);
    }
    for child in canvas.children() {
        draw_node(child, pen)?;
    }
    debug!("scene rendered");
    Ok(())
}

fn draw_node(node: &ShapeNode, pen: &mut dyn Pen) -> Result<(), DrawError> {
    trace!(shape = node.kind_name(); "drawing shape");
    let (x, y) = prepare(node, pen)?;
    draw_geometry(node, x, y, pen)?;
    for child in node.children() {
        draw_node(child, pen)?;
    }
    Ok(())
}

/// Reset the pen for one node: lift, move to the absolute position, set
/// heading and stroke style, lower. Positions are canvas coordinates, not
/// offsets from the parent.
fn prepare(node: &ShapeNode, pen: &mut dyn Pen) -> Result<(f64, f64), DrawError> {
    let shape = node.kind_name();
    let style = node.style();
    let x = require(shape, "x_pos", style.x_pos())? as f64;
    let y = require(shape, "y_pos", style.y_pos())? as f64;

    pen.pen_up();
    pen.move_to(x, y);
    pen.set_heading(style.angle() as f64);
    pen.set_color(style.border_color());
    pen.set_width(style.border_width() as f64);
    pen.pen_down();
    Ok((x, y))
}

fn require<T>(
    shape: &'static str,
    attribute: &'static str,
    value: Option<T>,
) -> Result<T, DrawError> {
    value.ok_or(DrawError::MissingAttribute { shape, attribute })
}

fn with_fill<F>(pen: &mut dyn Pen, fill: Option<&str>, stroke: F)
where
    F: FnOnce(&mut dyn Pen),
{
    match fill {
        Some(color) => {
            pen.begin_fill(color);
            stroke(pen);
            pen.end_fill();
        }
        None => stroke(pen),
    }
}

fn draw_geometry(node: &ShapeNode, x: f64, y: f64, pen: &mut dyn Pen) -> Result<(), DrawError> {
    let shape = node.kind_name();
    let fill = node.style().fill_color();

    match node.kind() {
        ShapeKind::Line { length } => {
            let length = require(shape, "length", *length)? as f64;
            pen.forward(length);
        }
        ShapeKind::Rectangle { width, height } => {
            let width = require(shape, "width", *width)? as f64;
            let height = require(shape, "height", *height)? as f64;
            with_fill(pen, fill, |pen| {
                for _ in 0..2 {
                    pen.forward(width);
                    pen.left(90.0);
                    pen.forward(height);
                    pen.left(90.0);
                }
            });
        }
        ShapeKind::Circle { radius } => {
            let radius = require(shape, "radius", *radius)? as f64;
            // The stroke starts on the circle's edge, not its center: shift
            // right by the radius so the arc orbits the node position.
            pen.pen_up();
            pen.move_to(x + radius, y);
            pen.pen_down();
            with_fill(pen, fill, |pen| pen.circle(radius));
        }
        ShapeKind::Triangle { length, height } => {
            let length = require(shape, "length", *length)? as f64;
            let height = require(shape, "height", *height)? as f64;
            // Isosceles: base angle from the height over half the base.
            let alpha = (height / (length / 2.0)).atan().to_degrees();
            let side = (length / 2.0).hypot(height);
            with_fill(pen, fill, |pen| {
                pen.forward(length);
                pen.left(180.0 - alpha);
                pen.forward(side);
                pen.left(2.0 * alpha);
                pen.forward(side);
            });
        }
        ShapeKind::Parallelogram {
            length,
            side_length,
            lower_right_angle,
        } => {
            let length = require(shape, "length", *length)? as f64;
            let side_length = require(shape, "side_length", *side_length)? as f64;
            let angle = require(shape, "lower_right_angle", *lower_right_angle)? as f64;
            with_fill(pen, fill, |pen| {
                for _ in 0..2 {
                    pen.forward(length);
                    pen.left(angle);
                    pen.forward(side_length);
                    pen.left(180.0 - angle);
                }
            });
        }
        ShapeKind::Balloon {
            radius,
            thread_length,
            thread_angle,
        } => {
            let radius = require(shape, "radius", *radius)? as f64;
            let thread_length = require(shape, "thread_length", *thread_length)? as f64;
            let thread_angle = require(shape, "thread_angle", *thread_angle)? as f64;
            // Thread first, from the node position; the body starts where
            // the thread ends.
            pen.set_heading(thread_angle);
            pen.forward(thread_length);
            with_fill(pen, fill, |pen| pen.circle(radius));
        }
        ShapeKind::RoseAndHeart {
            radius,
            petal_color,
            leaf_color,
            heart_color,
        } => {
            let radius = require(shape, "radius", *radius)? as f64;
            let petal = require(shape, "petal_color", petal_color.as_deref())?;
            let leaf = require(shape, "leaf_color", leaf_color.as_deref())?;
            let heart = require(shape, "heart_color", heart_color.as_deref())?;
            draw_rose_and_heart(x, y, radius, petal, leaf, heart, pen);
        }
    }
    Ok(())
}

/// Fixed compound recipe: a filled heart at the node position, two leaves
/// on the stem, a four-petal bloom above. The variant's own colors drive
/// the fills; the common `fill_color` does not apply here.
fn draw_rose_and_heart(
    x: f64,
    y: f64,
    radius: f64,
    petal: &str,
    leaf: &str,
    heart: &str,
    pen: &mut dyn Pen,
) {
    pen.begin_fill(heart);
    pen.left(140.0);
    pen.forward(2.0 * radius);
    pen.arc(-radius, 200.0);
    pen.left(120.0);
    pen.arc(-radius, 200.0);
    pen.forward(2.0 * radius);
    pen.end_fill();

    for start in [150.0, 30.0] {
        pen.pen_up();
        pen.move_to(x, y + 2.0 * radius);
        pen.set_heading(start);
        pen.pen_down();
        pen.begin_fill(leaf);
        pen.arc(radius, 60.0);
        pen.left(120.0);
        pen.arc(radius, 60.0);
        pen.end_fill();
    }

    pen.pen_up();
    pen.move_to(x, y + 3.0 * radius);
    pen.set_heading(0.0);
    pen.pen_down();
    for _ in 0..4 {
        pen.begin_fill(petal);
        pen.arc(radius, 60.0);
        pen.left(120.0);
        pen.arc(radius, 60.0);
        pen.left(120.0);
        pen.end_fill();
        pen.left(90.0);
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use crate::pen::{PenOp, RecordingPen};
    use crate::scene::Element as _;

    use super::*;

    fn shape(tag: &str, attrs: &[(&str, &str)]) -> ShapeNode {
        let mut node = ShapeNode::for_tag(tag).expect(tag);
        for (name, value) in attrs {
            node.set_attribute(name, value).expect(name);
        }
        node
    }

    fn draw(node: &ShapeNode) -> Vec<PenOp> {
        let mut pen = RecordingPen::new();
        draw_node(node, &mut pen).expect("drawable");
        pen.into_ops()
    }

    #[test]
    fn test_prepare_resets_absolute_state() {
        let node = shape(
            "line",
            &[
                ("x_pos", "30"),
                ("y_pos", "40"),
                ("angle", "45"),
                ("border_color", "blue"),
                ("border_width", "3"),
                ("length", "10"),
            ],
        );

        let ops = draw(&node);
        assert_eq!(
            ops[..6],
            [
                PenOp::PenUp,
                PenOp::MoveTo(30.0, 40.0),
                PenOp::SetHeading(45.0),
                PenOp::SetColor("blue".to_string()),
                PenOp::SetWidth(3.0),
                PenOp::PenDown,
            ]
        );
        assert_eq!(ops[6..], [PenOp::Forward(10.0)]);
    }

    #[test]
    fn test_filled_rectangle_recipe() {
        let node = shape(
            "rectangle",
            &[
                ("x_pos", "0"),
                ("y_pos", "0"),
                ("width", "100"),
                ("height", "50"),
                ("fill_color", "green"),
            ],
        );

        let ops = draw(&node);
        assert_eq!(
            ops,
            [
                PenOp::PenUp,
                PenOp::MoveTo(0.0, 0.0),
                PenOp::SetHeading(0.0),
                PenOp::SetColor("black".to_string()),
                PenOp::SetWidth(1.0),
                PenOp::PenDown,
                PenOp::BeginFill("green".to_string()),
                PenOp::Forward(100.0),
                PenOp::Left(90.0),
                PenOp::Forward(50.0),
                PenOp::Left(90.0),
                PenOp::Forward(100.0),
                PenOp::Left(90.0),
                PenOp::Forward(50.0),
                PenOp::Left(90.0),
                PenOp::EndFill,
            ]
        );
    }

    #[test]
    fn test_unfilled_rectangle_has_no_fill_bracket() {
        let node = shape(
            "rectangle",
            &[
                ("x_pos", "0"),
                ("y_pos", "0"),
                ("width", "10"),
                ("height", "10"),
            ],
        );

        let ops = draw(&node);
        assert!(!ops.contains(&PenOp::BeginFill("green".to_string())));
        assert!(!ops.contains(&PenOp::EndFill));
    }

    #[test]
    fn test_circle_stroke_starts_on_edge() {
        let node = shape(
            "circle",
            &[("x_pos", "10"), ("y_pos", "10"), ("radius", "5")],
        );

        let ops = draw(&node);
        assert_eq!(
            ops[6..],
            [
                PenOp::PenUp,
                PenOp::MoveTo(15.0, 10.0),
                PenOp::PenDown,
                PenOp::Arc {
                    radius: 5.0,
                    extent: 360.0
                },
            ]
        );
    }

    #[test]
    fn test_triangle_turn_angles() {
        let node = shape(
            "triangle",
            &[
                ("x_pos", "0"),
                ("y_pos", "0"),
                ("length", "1000"),
                ("height", "866"),
            ],
        );

        let alpha = (866.0f64 / 500.0).atan().to_degrees();
        let side = 500.0f64.hypot(866.0);

        let turns: Vec<f64> = draw(&node)
            .iter()
            .filter_map(|op| match op {
                PenOp::Left(deg) => Some(*deg),
                _ => None,
            })
            .collect();
        assert_eq!(turns.len(), 2);
        assert_approx_eq!(f64, turns[0], 180.0 - alpha);
        assert_approx_eq!(f64, turns[1], 2.0 * alpha);

        let strokes: Vec<f64> = draw(&node)
            .iter()
            .filter_map(|op| match op {
                PenOp::Forward(d) => Some(*d),
                _ => None,
            })
            .collect();
        assert_eq!(strokes.len(), 3);
        assert_approx_eq!(f64, strokes[0], 1000.0);
        assert_approx_eq!(f64, strokes[1], side);
        assert_approx_eq!(f64, strokes[2], side);
    }

    #[test]
    fn test_parallelogram_two_pass_recipe() {
        let node = shape(
            "parallelogram",
            &[
                ("x_pos", "0"),
                ("y_pos", "0"),
                ("length", "40"),
                ("side_length", "20"),
                ("lower_right_angle", "60"),
            ],
        );

        let ops = draw(&node);
        let pass = [
            PenOp::Forward(40.0),
            PenOp::Left(60.0),
            PenOp::Forward(20.0),
            PenOp::Left(120.0),
        ];
        assert_eq!(ops[6..10], pass);
        assert_eq!(ops[10..14], pass);
    }

    #[test]
    fn test_balloon_thread_then_body() {
        let node = shape(
            "balloon",
            &[
                ("x_pos", "100"),
                ("y_pos", "100"),
                ("radius", "20"),
                ("thread_length", "60"),
                ("thread_angle", "80"),
            ],
        );

        let ops = draw(&node);
        assert_eq!(
            ops[6..],
            [
                PenOp::SetHeading(80.0),
                PenOp::Forward(60.0),
                PenOp::Arc {
                    radius: 20.0,
                    extent: 360.0
                },
            ]
        );
    }

    #[test]
    fn test_rose_and_heart_fill_sequence() {
        let node = shape(
            "rose_and_heart",
            &[
                ("x_pos", "0"),
                ("y_pos", "0"),
                ("radius", "10"),
                ("petal_color", "crimson"),
                ("leaf_color", "green"),
                ("heart_color", "deeppink"),
            ],
        );

        let fills: Vec<String> = draw(&node)
            .iter()
            .filter_map(|op| match op {
                PenOp::BeginFill(color) => Some(color.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            ["deeppink", "green", "green", "crimson", "crimson", "crimson", "crimson"]
        );
    }

    #[test]
    fn test_missing_geometry_field_is_fatal() {
        let node = shape("circle", &[("x_pos", "0"), ("y_pos", "0")]);

        let mut pen = RecordingPen::new();
        let err = draw_node(&node, &mut pen).unwrap_err();
        assert_eq!(
            err,
            DrawError::MissingAttribute {
                shape: "circle",
                attribute: "radius",
            }
        );
    }

    #[test]
    fn test_missing_position_is_fatal() {
        let node = shape("line", &[("length", "10")]);

        let mut pen = RecordingPen::new();
        let err = draw_node(&node, &mut pen).unwrap_err();
        assert_eq!(
            err,
            DrawError::MissingAttribute {
                shape: "line",
                attribute: "x_pos",
            }
        );
    }

    #[test]
    fn test_children_drawn_after_parent_in_order() {
        let mut parent = shape(
            "rectangle",
            &[
                ("x_pos", "0"),
                ("y_pos", "0"),
                ("width", "10"),
                ("height", "10"),
            ],
        );
        parent.append_child(shape(
            "circle",
            &[("x_pos", "1"), ("y_pos", "1"), ("radius", "2")],
        ));
        parent.append_child(shape("line", &[("x_pos", "2"), ("y_pos", "2"), ("length", "3")]));

        let ops = draw(&parent);
        let moves: Vec<(f64, f64)> = ops
            .iter()
            .filter_map(|op| match op {
                PenOp::MoveTo(x, y) => Some((*x, *y)),
                _ => None,
            })
            .collect();
        // Parent prepare, child circle prepare + edge move, child line prepare.
        assert_eq!(moves, [(0.0, 0.0), (1.0, 1.0), (3.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn test_render_sets_world_and_background() {
        let mut canvas = Canvas::new();
        canvas.set_attribute("llx", "-10").unwrap();
        canvas.set_attribute("background_color", "ivory").unwrap();
        canvas.append_child(shape(
            "line",
            &[("x_pos", "0"), ("y_pos", "0"), ("length", "5")],
        ));

        let mut pen = RecordingPen::new();
        render(&canvas, &mut pen).unwrap();

        assert_eq!(pen.ops()[0], PenOp::SetWorld(canvas.bounds()));
        assert_eq!(pen.ops()[1], PenOp::SetBackground("ivory".to_string()));
    }

    #[test]
    fn test_render_without_background_skips_it() {
        let canvas = Canvas::new();
        let mut pen = RecordingPen::new();
        render(&canvas, &mut pen).unwrap();

        assert_eq!(pen.ops(), [PenOp::SetWorld(canvas.bounds())]);
    }
}
