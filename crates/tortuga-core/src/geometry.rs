//! Geometric primitives for scene coordinates and pen movement.
//!
//! Tortuga scenes use a mathematical coordinate system: the origin is at the
//! canvas lower-left corner, the X-axis increases rightward and the Y-axis
//! increases upward. Headings are measured in degrees counterclockwise from
//! the positive X-axis, so heading `0` points east and heading `90` points
//! north. Renderer backends that target a Y-down surface (such as SVG) flip
//! the axis when mapping to their viewport.

/// A 2D point in scene coordinate space.
///
/// The scene model stores positions as integers; pen movement happens in
/// `f64` because headings and arcs produce fractional coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the point reached by travelling `distance` along `heading`.
    ///
    /// `heading` is in degrees counterclockwise from the positive X-axis.
    pub fn advance(self, heading: f64, distance: f64) -> Self {
        let radians = heading.to_radians();
        Self {
            x: self.x + distance * radians.cos(),
            y: self.y + distance * radians.sin(),
        }
    }

    /// Rotates this point around `center` by `degrees` (counterclockwise
    /// positive).
    pub fn rotate_around(self, center: Point, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        let (sin, cos) = radians.sin_cos();
        let rel = self.sub_point(center);
        Self {
            x: center.x + rel.x * cos - rel.y * sin,
            y: center.y + rel.x * sin + rel.y * cos,
        }
    }
}

/// The rectangular world region a canvas maps onto the drawing surface.
///
/// Stored as lower-left and upper-right corners, matching the canvas
/// attributes `lower_left_x`/`lower_left_y`/`upper_right_x`/`upper_right_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from lower-left and upper-right corner coordinates
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }
}

impl Default for Bounds {
    /// The default canvas region, `(0, 0)` to `(1000, 1000)`.
    fn default() -> Self {
        Self::new(0.0, 0.0, 1000.0, 1000.0)
    }
}
