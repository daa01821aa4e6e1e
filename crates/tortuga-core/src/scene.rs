//! The scene model: a typed tree of drawable shapes.
//!
//! A TML document describes one [`Canvas`] holding an ordered tree of
//! [`ShapeNode`]s. Every node pairs the shared styling attributes
//! ([`Style`]) with one [`ShapeKind`] variant carrying that shape's
//! geometry fields. The variant set is closed: the parser asks
//! [`ShapeNode::for_tag`] whether a tag names a shape, and treats every
//! other tag as an attribute assignment on the enclosing element.
//!
//! Geometry fields stay `None` until the document assigns them; the
//! renderer refuses to draw a shape whose required fields were never set.
//! Attribute values arrive as raw text and are converted here, at
//! assignment time.

use std::fmt::Write as _;

use thiserror::Error;

use crate::geometry::Bounds;

/// Attribute assignment failure on a [`Canvas`] or [`ShapeNode`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttributeError {
    /// The name is neither a geometry attribute of the variant nor a common
    /// styling attribute.
    #[error("unrecognized attribute `{name}`")]
    Unknown { name: String },

    /// The value could not be converted to the attribute's declared type.
    #[error("invalid value `{value}` for attribute `{name}`")]
    Invalid { name: String, value: String },
}

/// The polymorphic seam between the tree builder and the model.
///
/// Both [`Canvas`] and [`ShapeNode`] accept attribute assignments and child
/// shapes; the builder descends through the document without caring which
/// one it is filling.
pub trait Element {
    /// Assign an attribute by tag name.
    ///
    /// The name is trimmed and matched case-insensitively. Assigning the
    /// same attribute twice overwrites the earlier value.
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), AttributeError>;

    /// Append a child shape, transferring ownership to this element.
    fn append_child(&mut self, child: ShapeNode);
}

fn parse_int(name: &str, value: &str) -> Result<i32, AttributeError> {
    value.trim().parse().map_err(|_| AttributeError::Invalid {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Styling attributes shared by every shape variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub(crate) x_pos: Option<i32>,
    pub(crate) y_pos: Option<i32>,
    pub(crate) angle: i32,
    pub(crate) border_color: String,
    pub(crate) border_width: i32,
    pub(crate) fill_color: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            x_pos: None,
            y_pos: None,
            angle: 0,
            border_color: "black".to_string(),
            border_width: 1,
            fill_color: None,
        }
    }
}

impl Style {
    /// Absolute x position in canvas coordinates, if set.
    pub fn x_pos(&self) -> Option<i32> {
        self.x_pos
    }

    /// Absolute y position in canvas coordinates, if set.
    pub fn y_pos(&self) -> Option<i32> {
        self.y_pos
    }

    /// Heading in degrees; defaults to 0.
    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Stroke color; defaults to `"black"`.
    pub fn border_color(&self) -> &str {
        &self.border_color
    }

    /// Stroke width; defaults to 1.
    pub fn border_width(&self) -> i32 {
        self.border_width
    }

    /// Fill color; `None` leaves the shape unfilled.
    pub fn fill_color(&self) -> Option<&str> {
        self.fill_color.as_deref()
    }

    /// Try the common attribute set; `Ok(false)` means the name is not a
    /// common attribute.
    fn set_common(&mut self, name: &str, value: &str) -> Result<bool, AttributeError> {
        match name {
            "x_pos" => self.x_pos = Some(parse_int(name, value)?),
            "y_pos" => self.y_pos = Some(parse_int(name, value)?),
            "angle" => self.angle = parse_int(name, value)?,
            "border_color" => self.border_color = value.to_string(),
            "border_width" => self.border_width = parse_int(name, value)?,
            "fill_color" => self.fill_color = Some(value.to_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// The closed set of drawable shape variants with their geometry fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    Line {
        length: Option<i32>,
    },
    Rectangle {
        width: Option<i32>,
        height: Option<i32>,
    },
    Circle {
        radius: Option<i32>,
    },
    Triangle {
        length: Option<i32>,
        height: Option<i32>,
    },
    Parallelogram {
        length: Option<i32>,
        side_length: Option<i32>,
        lower_right_angle: Option<i32>,
    },
    Balloon {
        radius: Option<i32>,
        thread_length: Option<i32>,
        thread_angle: Option<i32>,
    },
    RoseAndHeart {
        radius: Option<i32>,
        petal_color: Option<String>,
        leaf_color: Option<String>,
        heart_color: Option<String>,
    },
}

/// One drawable node: styling, geometry, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeNode {
    style: Style,
    kind: ShapeKind,
    children: Vec<ShapeNode>,
}

impl ShapeNode {
    /// Resolve a tag name to a fresh shape node.
    ///
    /// Lookup is case-insensitive and ignores surrounding whitespace.
    /// Returns `None` for any name outside the closed variant set; the
    /// caller treats such a tag as an attribute instead.
    pub fn for_tag(tag: &str) -> Option<Self> {
        let kind = match tag.trim().to_ascii_lowercase().as_str() {
            "line" => ShapeKind::Line { length: None },
            "rectangle" => ShapeKind::Rectangle {
                width: None,
                height: None,
            },
            "circle" => ShapeKind::Circle { radius: None },
            "triangle" => ShapeKind::Triangle {
                length: None,
                height: None,
            },
            "parallelogram" => ShapeKind::Parallelogram {
                length: None,
                side_length: None,
                lower_right_angle: None,
            },
            "balloon" => ShapeKind::Balloon {
                radius: None,
                thread_length: None,
                thread_angle: None,
            },
            "rose_and_heart" => ShapeKind::RoseAndHeart {
                radius: None,
                petal_color: None,
                leaf_color: None,
                heart_color: None,
            },
            _ => return None,
        };
        Some(Self {
            style: Style::default(),
            kind,
            children: Vec::new(),
        })
    }

    /// The tag name this node serializes to.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Line { .. } => "line",
            ShapeKind::Rectangle { .. } => "rectangle",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Triangle { .. } => "triangle",
            ShapeKind::Parallelogram { .. } => "parallelogram",
            ShapeKind::Balloon { .. } => "balloon",
            ShapeKind::RoseAndHeart { .. } => "rose_and_heart",
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Children in document order.
    pub fn children(&self) -> &[ShapeNode] {
        &self.children
    }

    /// Try the variant's geometry attributes; `Ok(false)` means the name
    /// belongs to no geometry field of this variant.
    fn set_geometry_attribute(&mut self, name: &str, value: &str) -> Result<bool, AttributeError> {
        if let ShapeKind::RoseAndHeart {
            petal_color,
            leaf_color,
            heart_color,
            ..
        } = &mut self.kind
        {
            let slot = match name {
                "petal_color" => Some(petal_color),
                "leaf_color" => Some(leaf_color),
                "heart_color" => Some(heart_color),
                _ => None,
            };
            if let Some(slot) = slot {
                *slot = Some(value.to_string());
                return Ok(true);
            }
        }

        let slot = match (&mut self.kind, name) {
            (ShapeKind::Line { length }, "length") => length,
            (ShapeKind::Rectangle { width, .. }, "width") => width,
            (ShapeKind::Rectangle { height, .. }, "height") => height,
            (ShapeKind::Circle { radius }, "radius") => radius,
            (ShapeKind::Triangle { length, .. }, "length") => length,
            (ShapeKind::Triangle { height, .. }, "height") => height,
            (ShapeKind::Parallelogram { length, .. }, "length") => length,
            (ShapeKind::Parallelogram { side_length, .. }, "side_length") => side_length,
            (ShapeKind::Parallelogram { lower_right_angle, .. }, "lower_right_angle") => {
                lower_right_angle
            }
            (ShapeKind::Balloon { radius, .. }, "radius") => radius,
            (ShapeKind::Balloon { thread_length, .. }, "thread_length") => thread_length,
            (ShapeKind::Balloon { thread_angle, .. }, "thread_angle") => thread_angle,
            (ShapeKind::RoseAndHeart { radius, .. }, "radius") => radius,
            _ => return Ok(false),
        };
        *slot = Some(parse_int(name, value)?);
        Ok(true)
    }

    /// Serialize this subtree back to TML.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let tag = self.kind_name();
        let _ = write!(out, "<{tag}>");
        self.write_geometry(out);
        self.style.write_markup(out);
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{tag}>");
    }

    fn write_geometry(&self, out: &mut String) {
        match &self.kind {
            ShapeKind::Line { length } => {
                write_int_attr(out, "length", *length);
            }
            ShapeKind::Rectangle { width, height } => {
                write_int_attr(out, "width", *width);
                write_int_attr(out, "height", *height);
            }
            ShapeKind::Circle { radius } => {
                write_int_attr(out, "radius", *radius);
            }
            ShapeKind::Triangle { length, height } => {
                write_int_attr(out, "length", *length);
                write_int_attr(out, "height", *height);
            }
            ShapeKind::Parallelogram {
                length,
                side_length,
                lower_right_angle,
            } => {
                write_int_attr(out, "length", *length);
                write_int_attr(out, "side_length", *side_length);
                write_int_attr(out, "lower_right_angle", *lower_right_angle);
            }
            ShapeKind::Balloon {
                radius,
                thread_length,
                thread_angle,
            } => {
                write_int_attr(out, "radius", *radius);
                write_int_attr(out, "thread_length", *thread_length);
                write_int_attr(out, "thread_angle", *thread_angle);
            }
            ShapeKind::RoseAndHeart {
                radius,
                petal_color,
                leaf_color,
                heart_color,
            } => {
                write_int_attr(out, "radius", *radius);
                write_str_attr(out, "petal_color", petal_color.as_deref());
                write_str_attr(out, "leaf_color", leaf_color.as_deref());
                write_str_attr(out, "heart_color", heart_color.as_deref());
            }
        }
    }
}

impl Element for ShapeNode {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), AttributeError> {
        let name = name.trim().to_ascii_lowercase();
        // Variant geometry shadows nothing in the common set, but is tried
        // first so each variant's recognized names stay self-contained.
        if self.set_geometry_attribute(&name, value)? {
            return Ok(());
        }
        if self.style.set_common(&name, value)? {
            return Ok(());
        }
        Err(AttributeError::Unknown { name })
    }

    fn append_child(&mut self, child: ShapeNode) {
        self.children.push(child);
    }
}

impl Style {
    fn write_markup(&self, out: &mut String) {
        write_int_attr(out, "x_pos", self.x_pos);
        write_int_attr(out, "y_pos", self.y_pos);
        if self.angle != 0 {
            write_int_attr(out, "angle", Some(self.angle));
        }
        if self.border_color != "black" {
            write_str_attr(out, "border_color", Some(&self.border_color));
        }
        if self.border_width != 1 {
            write_int_attr(out, "border_width", Some(self.border_width));
        }
        write_str_attr(out, "fill_color", self.fill_color.as_deref());
    }
}

fn write_int_attr(out: &mut String, name: &str, value: Option<i32>) {
    if let Some(value) = value {
        let _ = write!(out, "<{name}>{value}</{name}>");
    }
}

fn write_str_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = write!(out, "<{name}>{value}</{name}>");
    }
}

/// The tree root: coordinate-system bounds, optional background, children.
///
/// The canvas has no position, heading, or border of its own; it defines
/// the world region the drawing surface maps and owns the top-level
/// shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    lower_left_x: i32,
    lower_left_y: i32,
    upper_right_x: i32,
    upper_right_y: i32,
    background_color: Option<String>,
    children: Vec<ShapeNode>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            lower_left_x: 0,
            lower_left_y: 0,
            upper_right_x: 1000,
            upper_right_y: 1000,
            background_color: None,
            children: Vec::new(),
        }
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `tag` names the document root shape.
    pub fn is_root_tag(tag: &str) -> bool {
        tag.trim().eq_ignore_ascii_case("image")
    }

    /// The world-coordinate region this canvas maps.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.lower_left_x as f64,
            self.lower_left_y as f64,
            self.upper_right_x as f64,
            self.upper_right_y as f64,
        )
    }

    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    /// Top-level shapes in document order.
    pub fn children(&self) -> &[ShapeNode] {
        &self.children
    }

    /// Serialize the whole scene back to TML.
    pub fn to_markup(&self) -> String {
        let mut out = String::from("<image>");
        let default = Self::default();
        if self.lower_left_x != default.lower_left_x {
            write_int_attr(&mut out, "lower_left_x", Some(self.lower_left_x));
        }
        if self.lower_left_y != default.lower_left_y {
            write_int_attr(&mut out, "lower_left_y", Some(self.lower_left_y));
        }
        if self.upper_right_x != default.upper_right_x {
            write_int_attr(&mut out, "upper_right_x", Some(self.upper_right_x));
        }
        if self.upper_right_y != default.upper_right_y {
            write_int_attr(&mut out, "upper_right_y", Some(self.upper_right_y));
        }
        write_str_attr(&mut out, "background_color", self.background_color.as_deref());
        for child in &self.children {
            child.write_markup(&mut out);
        }
        out.push_str("</image>");
        out
    }
}

impl Element for Canvas {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), AttributeError> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "llx" | "lower_left_x" => self.lower_left_x = parse_int(&name, value)?,
            "lly" | "lower_left_y" => self.lower_left_y = parse_int(&name, value)?,
            "urx" | "upper_right_x" => self.upper_right_x = parse_int(&name, value)?,
            "ury" | "upper_right_y" => self.upper_right_y = parse_int(&name, value)?,
            "background_color" => self.background_color = Some(value.to_string()),
            _ => return Err(AttributeError::Unknown { name }),
        }
        Ok(())
    }

    fn append_child(&mut self, child: ShapeNode) {
        self.children.push(child);
    }
}
