//! Common helpers for building formatted text in integration tests.
//!
//! Markup parsing is not part of the library, so tests describe the parser's
//! output directly: the plain text plus spans located by the text they cover.

use varsender_lib::{FormattedText, Span, SpanKind, utf16_len};

/// Returns a span of `kind` over the first occurrence of `needle` in `text`.
///
/// ## Panics
///
/// Panics if `needle` does not occur in `text`.
pub fn span_over(text: &str, needle: &str, kind: SpanKind) -> Span {
    let byte_offset = text
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in {text:?}"));
    Span::new(utf16_len(&text[..byte_offset]), utf16_len(needle), kind)
}

/// Shorthand for a bold span over `needle`.
pub fn bold(text: &str, needle: &str) -> Span {
    span_over(text, needle, SpanKind::other("bold"))
}

/// Returns the text covered by each span, in span order.
///
/// ## Panics
///
/// Panics if a span lies outside the text.
pub fn covered(text: &FormattedText) -> Vec<String> {
    text.spans()
        .iter()
        .map(|span| {
            text.span_text(span)
                .unwrap_or_else(|| panic!("span {span:?} outside {:?}", text.text()))
        })
        .collect()
}
