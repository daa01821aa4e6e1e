//! Sibling iteration over a text range.
//!
//! [`TagScanner`] yields the consecutive top-level tag pairs of one range:
//! each located span's `closing_end` becomes the next search start, so
//! nested pairs are never yielded here — descending into a span's content
//! range is the tree builder's job.

use crate::{error::ParseError, span::TagSpan};

/// Lazy iterator over the sibling [`TagSpan`]s of `text[start..end]`.
///
/// One pass only: the scanner is finite, non-restartable, and fused after
/// yielding an error. Re-scanning requires a fresh scanner over the
/// original bounds.
#[derive(Debug)]
pub struct TagScanner<'src> {
    text: &'src str,
    cursor: usize,
    end: usize,
}

impl<'src> TagScanner<'src> {
    pub fn new(text: &'src str, start: usize, end: usize) -> Self {
        Self {
            text,
            cursor: start,
            end,
        }
    }
}

impl<'src> Iterator for TagScanner<'src> {
    type Item = Result<TagSpan<'src>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.end {
            return None;
        }
        match TagSpan::locate(self.text, self.cursor, self.end) {
            Ok(Some(span)) => {
                self.cursor = span.closing_end();
                Some(Ok(span))
            }
            Ok(None) => {
                self.cursor = self.end;
                None
            }
            Err(err) => {
                self.cursor = self.end;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_siblings_in_order() {
        let text = "<x_pos>1</x_pos> <y_pos>2</y_pos><radius>3</radius>";
        let names: Vec<_> = TagScanner::new(text, 0, text.len())
            .map(|item| item.unwrap().name().to_string())
            .collect();

        assert_eq!(names, ["x_pos", "y_pos", "radius"]);
    }

    #[test]
    fn test_skips_nested_pairs() {
        let text = "<rectangle><width>3</width></rectangle><line></line>";
        let names: Vec<_> = TagScanner::new(text, 0, text.len())
            .map(|item| item.unwrap().name().to_string())
            .collect();

        assert_eq!(names, ["rectangle", "line"]);
    }

    #[test]
    fn test_empty_range_yields_nothing() {
        let text = "<a>1</a>";
        assert_eq!(TagScanner::new(text, 3, 3).count(), 0);
    }

    #[test]
    fn test_tagless_range_yields_nothing() {
        let text = "just some text";
        assert_eq!(TagScanner::new(text, 0, text.len()).count(), 0);
    }

    #[test]
    fn test_fused_after_error() {
        let text = "<a>1</a><b>never closed";
        let mut scanner = TagScanner::new(text, 0, text.len());

        assert!(scanner.next().unwrap().is_ok());
        assert!(scanner.next().unwrap().is_err());
        assert!(scanner.next().is_none());
    }
}
