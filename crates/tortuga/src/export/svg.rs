//! SVG pen backend.
//!
//! [`SvgPen`] turns pen movement into SVG path elements, entirely in
//! memory. The canvas world region (Y up, origin at the lower-left) is
//! mapped onto the SVG viewport (Y down, origin at the top-left) by
//! flipping the Y-axis, scaling, and padding with a margin.
//!
//! Strokes accumulate into one path element until the pen lifts, moves, or
//! changes color or width. Between `begin_fill` and `end_fill` segments
//! collect into a single closed path carrying both the fill color and the
//! current stroke style, which matches how a turtle outlines the shapes it
//! fills.

use std::fmt::Write as _;

use svg::Document;
use svg::node::element::{Path, Rectangle};

use tortuga_core::geometry::{Bounds, Point};
use tortuga_core::pen::Pen;

use crate::config::ExportConfig;

struct FillState {
    color: String,
    data: Option<String>,
}

/// A [`Pen`] that draws into an in-memory SVG document.
pub struct SvgPen {
    scale: f64,
    margin: f64,
    world: Bounds,
    position: Point,
    heading: f64,
    down: bool,
    color: String,
    width: f64,
    background: Option<String>,
    stroke: Option<String>,
    fill: Option<FillState>,
    elements: Vec<Path>,
}

impl SvgPen {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            scale: config.scale(),
            margin: config.margin(),
            world: Bounds::default(),
            position: Point::default(),
            heading: 0.0,
            down: true,
            color: "black".to_string(),
            width: 1.0,
            background: None,
            stroke: None,
            fill: None,
            elements: Vec::new(),
        }
    }

    /// Map a world-coordinate point into the viewport.
    fn to_view(&self, p: Point) -> (f64, f64) {
        (
            self.margin + (p.x() - self.world.min_x()) * self.scale,
            self.margin + (self.world.max_y() - p.y()) * self.scale,
        )
    }

    /// Append one segment to the active path data, starting a fresh
    /// subpath at the current position if none is open. Call before
    /// updating the position.
    fn push_segment(&mut self, segment: &str) {
        let (sx, sy) = self.to_view(self.position);
        let slot = match &mut self.fill {
            Some(fill) => &mut fill.data,
            None => &mut self.stroke,
        };
        let data = slot.get_or_insert_with(|| format!("M {sx} {sy}"));
        data.push_str(segment);
    }

    /// Emit the open stroke path, if any, with the current stroke style.
    fn flush_stroke(&mut self) {
        if let Some(data) = self.stroke.take() {
            let path = Path::new()
                .set("fill", "none")
                .set("stroke", self.color.clone())
                .set("stroke-width", self.width * self.scale)
                .set("d", data);
            self.elements.push(path);
        }
    }

    fn flush_fill(&mut self) {
        if let Some(fill) = self.fill.take() {
            if let Some(mut data) = fill.data {
                data.push_str(" Z");
                let path = Path::new()
                    .set("fill", fill.color)
                    .set("stroke", self.color.clone())
                    .set("stroke-width", self.width * self.scale)
                    .set("d", data);
                self.elements.push(path);
            }
        }
    }

    /// Finalize the drawing and return the assembled document.
    pub fn finish(mut self) -> Document {
        self.flush_fill();
        self.flush_stroke();

        let width = self.world.width() * self.scale + 2.0 * self.margin;
        let height = self.world.height() * self.scale + 2.0 * self.margin;
        let mut document = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(color) = &self.background {
            document = document.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", color.clone()),
            );
        }
        for path in self.elements {
            document = document.add(path);
        }
        document
    }
}

impl Pen for SvgPen {
    fn set_world(&mut self, bounds: Bounds) {
        self.flush_stroke();
        self.world = bounds;
    }

    fn set_background(&mut self, color: &str) {
        self.background = Some(color.to_string());
    }

    fn pen_up(&mut self) {
        self.flush_stroke();
        self.down = false;
    }

    fn pen_down(&mut self) {
        self.down = true;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let target = Point::new(x, y);
        let (vx, vy) = self.to_view(target);
        self.position = target;
        if let Some(fill) = &mut self.fill {
            if let Some(data) = &mut fill.data {
                let _ = write!(data, " M {vx} {vy}");
            }
        } else {
            // Repositioning breaks the subpath.
            self.flush_stroke();
        }
    }

    fn set_heading(&mut self, degrees: f64) {
        self.heading = degrees;
    }

    fn set_color(&mut self, color: &str) {
        if self.color != color {
            self.flush_stroke();
            self.color = color.to_string();
        }
    }

    fn set_width(&mut self, width: f64) {
        if self.width != width {
            self.flush_stroke();
            self.width = width;
        }
    }

    fn forward(&mut self, distance: f64) {
        let end = self.position.advance(self.heading, distance);
        if self.down {
            let (ex, ey) = self.to_view(end);
            self.push_segment(&format!(" L {ex} {ey}"));
        }
        self.position = end;
    }

    fn left(&mut self, degrees: f64) {
        self.heading += degrees;
    }

    fn arc(&mut self, radius: f64, extent: f64) {
        // A full turn has coincident endpoints, which SVG arc segments
        // cannot express; split it into two half arcs.
        if extent.abs() >= 360.0 {
            self.arc(radius, extent / 2.0);
            self.arc(radius, extent / 2.0);
            return;
        }

        // The center sits perpendicular to the heading: to the left for a
        // positive radius, to the right for a negative one. The signed
        // rotation delta follows the same convention.
        let center = self.position.advance(self.heading + 90.0, radius);
        let delta = if radius < 0.0 { -extent } else { extent };
        let end = self.position.rotate_around(center, delta);

        if self.down {
            let (ex, ey) = self.to_view(end);
            let rx = radius.abs() * self.scale;
            let large_arc = i32::from(delta.abs() > 180.0);
            // World counterclockwise appears clockwise once Y flips, which
            // is the SVG positive-angle direction.
            let sweep = i32::from(delta > 0.0);
            self.push_segment(&format!(" A {rx} {rx} 0 {large_arc} {sweep} {ex} {ey}"));
        }
        self.position = end;
        self.heading += delta;
    }

    fn begin_fill(&mut self, color: &str) {
        self.flush_stroke();
        self.fill = Some(FillState {
            color: color.to_string(),
            data: None,
        });
    }

    fn end_fill(&mut self) {
        self.flush_fill();
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn pen() -> SvgPen {
        let mut pen = SvgPen::new(&ExportConfig::default());
        pen.margin = 0.0;
        pen.set_world(Bounds::new(0.0, 0.0, 100.0, 100.0));
        pen
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_world_transform_flips_y() {
        let pen = pen();

        let origin = pen.to_view(Point::new(0.0, 0.0));
        assert_approx_eq!(f64, origin.0, 0.0);
        assert_approx_eq!(f64, origin.1, 100.0);

        let top_right = pen.to_view(Point::new(100.0, 100.0));
        assert_approx_eq!(f64, top_right.0, 100.0);
        assert_approx_eq!(f64, top_right.1, 0.0);
    }

    #[test]
    fn test_margin_and_scale_offset_the_viewport() {
        let mut pen = SvgPen::new(&ExportConfig::default());
        pen.scale = 2.0;
        pen.margin = 5.0;
        pen.set_world(Bounds::new(0.0, 0.0, 100.0, 100.0));

        let view = pen.to_view(Point::new(10.0, 10.0));
        assert_approx_eq!(f64, view.0, 25.0);
        assert_approx_eq!(f64, view.1, 185.0);
    }

    #[test]
    fn test_document_dimensions_include_margin() {
        let mut pen = SvgPen::new(&ExportConfig::default());
        pen.set_world(Bounds::new(0.0, 0.0, 200.0, 100.0));

        let rendered = pen.finish().to_string();
        assert!(rendered.contains("width=\"220\""), "{rendered}");
        assert!(rendered.contains("height=\"120\""), "{rendered}");
    }

    #[test]
    fn test_background_rect_comes_first() {
        let mut pen = pen();
        pen.set_background("ivory");
        pen.forward(10.0);

        let rendered = pen.finish().to_string();
        let rect_at = rendered.find("<rect").expect("background rect");
        let path_at = rendered.find("<path").expect("stroke path");
        assert!(rendered.contains("fill=\"ivory\""));
        assert!(rect_at < path_at);
    }

    #[test]
    fn test_strokes_with_same_style_share_one_path() {
        let mut pen = pen();
        pen.forward(10.0);
        pen.left(90.0);
        pen.forward(10.0);

        let rendered = pen.finish().to_string();
        assert_eq!(count(&rendered, "<path"), 1);
        assert!(rendered.contains("fill=\"none\""));
        assert!(rendered.contains("stroke=\"black\""));
    }

    #[test]
    fn test_line_segment_data_flips_y() {
        let mut pen = pen();
        pen.move_to(0.0, 0.0);
        pen.forward(10.0);

        let rendered = pen.finish().to_string();
        // East in world coordinates stays horizontal at the flipped height.
        assert!(rendered.contains("M 0 100 L 10 100"), "{rendered}");
    }

    #[test]
    fn test_color_change_starts_a_new_path() {
        let mut pen = pen();
        pen.forward(10.0);
        pen.set_color("red");
        pen.forward(10.0);

        let rendered = pen.finish().to_string();
        assert_eq!(count(&rendered, "<path"), 2);
        assert!(rendered.contains("stroke=\"red\""));
    }

    #[test]
    fn test_pen_up_draws_nothing() {
        let mut pen = pen();
        pen.pen_up();
        pen.forward(50.0);

        let rendered = pen.finish().to_string();
        assert_eq!(count(&rendered, "<path"), 0);
    }

    #[test]
    fn test_fill_produces_closed_filled_path() {
        let mut pen = pen();
        pen.begin_fill("green");
        for _ in 0..2 {
            pen.forward(20.0);
            pen.left(90.0);
            pen.forward(10.0);
            pen.left(90.0);
        }
        pen.end_fill();

        let rendered = pen.finish().to_string();
        assert_eq!(count(&rendered, "<path"), 1);
        assert!(rendered.contains("fill=\"green\""));
        assert!(rendered.contains("Z"), "{rendered}");
    }

    #[test]
    fn test_full_circle_splits_into_two_arcs() {
        let mut pen = pen();
        pen.circle(10.0);
        let end = pen.position;

        let rendered = pen.finish().to_string();
        assert_eq!(count(&rendered, " A "), 2);
        // The pen ends where it started.
        assert_approx_eq!(f64, end.x(), 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, end.y(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_arc_moves_pen_and_heading() {
        let mut pen = pen();
        pen.move_to(50.0, 50.0);
        pen.set_heading(0.0);
        // Quarter turn to the left around (50, 60).
        pen.arc(10.0, 90.0);

        assert_approx_eq!(f64, pen.position.x(), 60.0, epsilon = 1e-9);
        assert_approx_eq!(f64, pen.position.y(), 60.0, epsilon = 1e-9);
        assert_approx_eq!(f64, pen.heading, 90.0);
    }

    #[test]
    fn test_negative_radius_curves_right() {
        let mut pen = pen();
        pen.move_to(50.0, 50.0);
        pen.set_heading(0.0);
        // Quarter turn to the right around (50, 40).
        pen.arc(-10.0, 90.0);

        assert_approx_eq!(f64, pen.position.x(), 60.0, epsilon = 1e-9);
        assert_approx_eq!(f64, pen.position.y(), 40.0, epsilon = 1e-9);
        assert_approx_eq!(f64, pen.heading, -90.0);
    }
}
