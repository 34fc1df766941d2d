//! Hashtag detection and removal.
//!
//! Templates stored as chat messages are tagged with hashtags so they can be
//! looked up later. Before such a template is sent, the tags are stripped
//! from the text and their spans are discarded.

use tracing::debug;

use crate::text::{FormattedText, Span};
use crate::transform::substitute::substitute_units;
use crate::units;

/// Characters that can never appear inside a hashtag.
const HASHTAG_BREAKS: [char; 4] = [' ', '\r', '\n', '\t'];

/// Returns `true` if `s` looks like a hashtag: it starts with `#` and has no
/// whitespace.
///
/// ## Examples
///
/// ```
/// use varsender_lib::is_hashtag;
///
/// assert!(is_hashtag("#welcome"));
/// assert!(!is_hashtag("welcome"));
/// assert!(!is_hashtag("#two words"));
/// ```
pub fn is_hashtag(s: &str) -> bool {
    s.starts_with('#') && !s.contains(HASHTAG_BREAKS)
}

/// Removes every hashtag span and blanks the text it covered.
///
/// Each distinct hashtag text becomes a rule replacing that text with the
/// empty string, applied in first-discovery order. Rules match by content,
/// so the same literal text elsewhere in the message is blanked too, even
/// when no hashtag span marks it.
///
/// ## Examples
///
/// ```
/// use varsender_lib::{FormattedText, Span, SpanKind, cleanup_hashtags};
///
/// let text = FormattedText::new(
///     "#intro Hello *there*",
///     vec![
///         Span::new(0, 6, SpanKind::Hashtag),
///         Span::new(13, 7, SpanKind::other("bold")),
///     ],
/// );
/// let cleaned = cleanup_hashtags(&text);
///
/// assert_eq!(cleaned.text(), " Hello *there*");
/// assert_eq!(cleaned.spans(), &[Span::new(7, 7, SpanKind::other("bold"))]);
/// ```
pub fn cleanup_hashtags(text: &FormattedText) -> FormattedText {
    let encoded = units::encode(text.text());

    let mut tags: Vec<String> = Vec::new();
    for span in text.spans().iter().filter(|span| span.kind().is_hashtag()) {
        let start = span.offset().min(encoded.len());
        let end = span.end().min(encoded.len());
        let tag = units::decode(&encoded[start..end]);
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    let spans: Vec<Span> = text
        .spans()
        .iter()
        .filter(|span| !span.kind().is_hashtag())
        .cloned()
        .collect();

    if spans.len() == text.spans().len() {
        return text.clone();
    }

    debug!(?tags, "removing hashtags");

    let (encoded, spans) = tags
        .iter()
        .fold((encoded, spans), |(encoded, spans), tag| {
            substitute_units(&encoded, spans, tag, "")
        });

    FormattedText::new(units::decode(&encoded), spans)
}

impl FormattedText {
    /// Applies [`cleanup_hashtags`] to this value.
    pub fn cleanup_hashtags(&self) -> FormattedText {
        cleanup_hashtags(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::SpanKind;

    fn hashtag_at(text: &str, tag: &str) -> Span {
        let byte_offset = text.find(tag).expect("tag not in text");
        Span::new(
            units::utf16_len(&text[..byte_offset]),
            units::utf16_len(tag),
            SpanKind::Hashtag,
        )
    }

    #[test]
    fn test_is_hashtag() {
        assert!(is_hashtag("#"));
        assert!(is_hashtag("#встреча"));
        assert!(!is_hashtag(""));
        assert!(!is_hashtag(" #tag"));
        assert!(!is_hashtag("#tag\n"));
        assert!(!is_hashtag("#a\tb"));
    }

    #[test]
    fn test_no_hashtags_is_identity() {
        let text = FormattedText::new("plain #text", vec![Span::new(0, 5, SpanKind::other("bold"))]);
        assert_eq!(cleanup_hashtags(&text), text);
    }

    #[test]
    fn test_cleanup_removes_spans_and_text() {
        let raw = "#header\nHi!\nJoin the #middle call!#footer";
        let text = FormattedText::new(
            raw,
            vec![
                Span::new(17, 3, SpanKind::other("bold")),
                hashtag_at(raw, "#header"),
                hashtag_at(raw, "#middle"),
                hashtag_at(raw, "#footer"),
            ],
        );

        let cleaned = cleanup_hashtags(&text);

        assert_eq!(cleaned.text(), "\nHi!\nJoin the  call!");
        assert_eq!(cleaned.spans().len(), 1);
        assert_eq!(
            cleaned.span_text(&cleaned.spans()[0]).as_deref(),
            Some("the")
        );
    }

    #[test]
    fn test_duplicate_hashtags_share_one_rule() {
        let text = FormattedText::new(
            "#a x #a",
            vec![
                Span::new(0, 2, SpanKind::Hashtag),
                Span::new(5, 2, SpanKind::Hashtag),
            ],
        );
        let cleaned = cleanup_hashtags(&text);
        assert_eq!(cleaned.text(), " x ");
        assert!(cleaned.spans().is_empty());
    }

    #[test]
    fn test_unmarked_occurrences_are_blanked_too() {
        // only the first "#tag" is a hashtag span; the second is plain text
        let text = FormattedText::new(
            "#tag keep #TAG",
            vec![
                Span::new(0, 4, SpanKind::Hashtag),
                Span::new(5, 4, SpanKind::other("italic")),
            ],
        );
        let cleaned = cleanup_hashtags(&text);
        assert_eq!(cleaned.text(), " keep ");
        assert_eq!(cleaned.span_text(&cleaned.spans()[0]).as_deref(), Some("keep"));
    }

    #[test]
    fn test_zero_length_hashtag_span_is_only_dropped() {
        let text = FormattedText::new("text", vec![Span::new(2, 0, SpanKind::Hashtag)]);
        let cleaned = cleanup_hashtags(&text);
        assert_eq!(cleaned, FormattedText::plain("text"));
    }

    #[test]
    fn test_out_of_range_hashtag_is_dropped() {
        let text = FormattedText::new(
            "keep #tag",
            vec![
                Span::new(usize::MAX, 4, SpanKind::Hashtag),
                Span::new(0, 4, SpanKind::other("bold")),
            ],
        );
        let cleaned = cleanup_hashtags(&text);
        assert_eq!(cleaned.text(), "keep #tag");
        assert_eq!(cleaned.spans(), &[Span::new(0, 4, SpanKind::other("bold"))]);
    }

    #[test]
    fn test_hashtag_crossing_the_end_is_clamped() {
        let text = FormattedText::new("a #tag", vec![Span::new(2, 40, SpanKind::Hashtag)]);
        assert_eq!(cleanup_hashtags(&text), FormattedText::plain("a "));
    }

    #[test]
    fn test_style_span_past_the_end_survives_cleanup() {
        let text = FormattedText::new(
            "#x hi",
            vec![
                Span::new(0, 2, SpanKind::Hashtag),
                Span::new(10, 3, SpanKind::other("bold")),
            ],
        );
        let cleaned = cleanup_hashtags(&text);
        assert_eq!(cleaned.text(), " hi");
        assert_eq!(cleaned.spans(), &[Span::new(8, 3, SpanKind::other("bold"))]);
    }

    #[test]
    fn test_link_spans_are_not_rewritten() {
        let text = FormattedText::new(
            "#tag link",
            vec![
                Span::new(0, 4, SpanKind::Hashtag),
                Span::new(5, 4, SpanKind::text_url("https://example.com/#tag")),
            ],
        );
        let cleaned = cleanup_hashtags(&text);
        assert_eq!(
            cleaned.spans(),
            &[Span::new(1, 4, SpanKind::text_url("https://example.com/#tag"))]
        );
    }
}
