//! Parser for the Tortuga markup language (TML).
//!
//! A TML document is a tree of nested `<name>content</name>` pairs: no
//! attributes inside the brackets, no self-closing form, exactly one
//! top-level tag, and that tag must name the canvas (`<image>`). Tags that
//! resolve in the shape registry become child nodes; every other tag
//! assigns an attribute of the enclosing element.
//!
//! Pair matching tolerates same-named nesting — `<line><line>…</line>…
//! </line>` resolves correctly — via the level-counting scan in
//! [`TagSpan::locate`]. Parsing is a single recursive descent over byte
//! offsets into the immutable source; substrings are only copied when an
//! attribute value is extracted.
//!
//! All errors are fatal. A malformed document yields a [`ParseError`] and
//! no partial tree.
//!
//! # Example
//!
//! ```
//! let source = "<image><circle><x_pos>10</x_pos><y_pos>10</y_pos>\
//!               <radius>5</radius></circle></image>";
//! let canvas = tortuga_parser::parse(source).expect("valid document");
//! assert_eq!(canvas.children().len(), 1);
//! ```

mod builder;
mod error;
mod scanner;
mod span;


pub use error::ParseError;
pub use scanner::TagScanner;
pub use span::TagSpan;

use log::debug;

use tortuga_core::scene::Canvas;

/// Parse a complete TML document into its [`Canvas`] tree.
///
/// # Errors
///
/// Returns a [`ParseError`] when the document is malformed, uses an
/// unknown attribute, carries a value of the wrong type, lacks a root
/// `<image>` tag, or continues past it.
pub fn parse(source: &str) -> Result<Canvas, ParseError> {
    debug!(len = source.len(); "parsing scene document");

    let root = TagSpan::locate(source, 0, source.len())?
        .ok_or(ParseError::MissingRootShape { found: None })?;
    if !Canvas::is_root_tag(root.name()) {
        return Err(ParseError::MissingRootShape {
            found: Some(root.name().to_string()),
        });
    }

    let mut canvas = Canvas::new();
    let content = root.content_range();
    builder::build(source, &mut canvas, content.start, content.end)?;

    if let Some(extra) = TagSpan::locate(source, root.closing_end(), source.len())? {
        return Err(ParseError::TrailingContent {
            offset: extra.opening_start(),
        });
    }

    debug!(shapes = canvas.children().len(); "scene document parsed");
    Ok(canvas)
}
