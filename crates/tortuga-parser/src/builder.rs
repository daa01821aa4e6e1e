//! Recursive descent from tag spans to the typed shape tree.
//!
//! For every sibling span the registry decides the interpretation: a
//! recognized shape name becomes a child node (built depth-first from the
//! span's content range, then handed to the parent), anything else is an
//! attribute assignment on the element currently being filled. Attribute
//! spans are descended into as well; for well-formed documents that
//! descent finds nothing and costs nothing.

use log::trace;

use tortuga_core::scene::{AttributeError, Element, ShapeNode};

use crate::{error::ParseError, scanner::TagScanner, span::TagSpan};

/// Fill `parent` from the sibling tags of `text[start..end]`.
pub(crate) fn build(
    text: &str,
    parent: &mut dyn Element,
    start: usize,
    end: usize,
) -> Result<(), ParseError> {
    for item in TagScanner::new(text, start, end) {
        let span = item?;
        let content = span.content_range();

        match ShapeNode::for_tag(span.name()) {
            Some(mut child) => {
                trace!(tag = span.name(), offset = span.opening_start(); "entering shape");
                build(text, &mut child, content.start, content.end)?;
                parent.append_child(child);
            }
            None => {
                let value = &text[content.clone()];
                parent
                    .set_attribute(span.name(), value)
                    .map_err(|err| attribute_error(err, &span))?;
                build(text, parent, content.start, content.end)?;
            }
        }
    }
    Ok(())
}

fn attribute_error(err: AttributeError, span: &TagSpan<'_>) -> ParseError {
    match err {
        AttributeError::Unknown { name } => ParseError::UnknownAttribute {
            name,
            offset: span.opening_start(),
        },
        AttributeError::Invalid { name, value } => ParseError::TypeConversion {
            attribute: name,
            value,
            offset: span.opening_start(),
        },
    }
}
