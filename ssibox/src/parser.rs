//! Directive scanning.
//!
//! A directive is `[[include-url:` followed by zero or more quoted segments
//! and `]]`. Segments use either double or single quotes and may not span
//! lines. The first segment is the target; anything after it is ignored,
//! and a directive without segments has an empty target.

use std::sync::LazyLock;

use regex::Regex;
use ssibox_core::Directive;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[\[include-url:((?:"[^"\n]*"|'[^'\n]*')*?)\]\]"#)
        .expect("directive pattern is valid")
});

/// Finds every directive in `text`, in order of appearance.
///
/// ```
/// use ssibox::parser::parse;
///
/// let directives = parse(r#"a [[include-url:"/nav"]] b [[include-url:'x.html']]"#);
/// assert_eq!(directives.len(), 2);
/// assert_eq!(directives[0].target(), "/nav");
/// assert_eq!(directives[1].raw(), "[[include-url:'x.html']]");
/// ```
pub fn parse(text: &str) -> Vec<Directive> {
    DIRECTIVE
        .captures_iter(text)
        .filter_map(|captures| {
            let full = captures.get(0)?;
            let segments = captures.get(1).map_or("", |segments| segments.as_str());
            Some(Directive::new(
                full.as_str(),
                first_segment(segments),
                full.range(),
            ))
        })
        .collect()
}

/// Contents of the first quoted segment, without its quotes.
fn first_segment(segments: &str) -> &str {
    let Some(quote) = segments.chars().next() else {
        return "";
    };
    let inner = &segments[quote.len_utf8()..];
    inner.find(quote).map_or("", |end| &inner[..end])
}
