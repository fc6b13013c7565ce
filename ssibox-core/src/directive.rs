//! Parsed include directives.

use std::ops::Range;

/// One `[[include-url:"…"]]` occurrence in a source text.
///
/// Directives are produced in the order they appear and are never modified
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    raw: String,
    target: String,
    span: Range<usize>,
}

impl Directive {
    /// Creates a directive from its full matched text, its unquoted target
    /// and the byte range it occupies in the source.
    pub fn new(raw: impl Into<String>, target: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            raw: raw.into(),
            target: target.into(),
            span,
        }
    }

    /// The full matched text, e.g. `[[include-url:"/nav"]]`.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The URL text between the quotes, still entity-encoded.
    /// Empty when the quoting was degenerate.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Byte range of [`raw`](Self::raw) within the source text.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}
