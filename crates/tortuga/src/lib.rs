//! Tortuga - a markup language for describing and rendering turtle-drawn
//! scenes.
//!
//! A TML document is a tree of nested tags describing geometric shapes on a
//! canvas. This crate combines the parser and the scene model with an SVG
//! backend behind a small builder API.

pub mod config;
pub mod export;

mod error;

pub use tortuga_core::{draw, geometry, pen, scene};
pub use tortuga_parser::ParseError;

pub use error::TortugaError;

use log::{debug, info, trace};

use pen::Pen as _;
use scene::Canvas;

use config::AppConfig;
use export::svg::SvgPen;

/// Builder for parsing and rendering Tortuga scenes.
///
/// # Examples
///
/// ```
/// use tortuga::{SceneBuilder, config::AppConfig};
///
/// let source = "<image><circle><x_pos>10</x_pos><y_pos>10</y_pos>\
///               <radius>5</radius></circle></image>";
///
/// let builder = SceneBuilder::new(AppConfig::default());
///
/// // Parse source to the scene tree
/// let canvas = builder.parse(source).expect("Failed to parse");
///
/// // Render the tree to SVG
/// let svg = builder.render_svg(&canvas).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse TML source into a [`Canvas`] tree.
    ///
    /// # Errors
    ///
    /// Returns `TortugaError::Parse` for any malformed document; partial
    /// trees are never returned.
    pub fn parse(&self, source: &str) -> Result<Canvas, TortugaError> {
        info!("Parsing scene");

        let canvas = tortuga_parser::parse(source)
            .map_err(|err| TortugaError::new_parse_error(err, source))?;

        debug!("Scene parsed successfully");
        trace!(canvas:?; "Parsed scene");

        Ok(canvas)
    }

    /// Render a parsed scene to an SVG string.
    ///
    /// The whole document is assembled in memory; nothing touches the
    /// filesystem.
    ///
    /// # Errors
    ///
    /// Returns `TortugaError::Draw` when a shape is missing a required
    /// geometry or position attribute.
    pub fn render_svg(&self, canvas: &Canvas) -> Result<String, TortugaError> {
        info!(shapes = canvas.children().len(); "Rendering scene");

        let mut pen = SvgPen::new(self.config.export());
        if canvas.background_color().is_none() {
            if let Some(color) = self.config.style().background_color() {
                pen.set_background(color);
            }
        }
        draw::render(canvas, &mut pen)?;
        let svg_string = pen.finish().to_string();

        info!("SVG rendered successfully");
        Ok(svg_string)
    }
}
