//! Whitespace trimming with span clipping.

use tracing::debug;

use crate::text::{FormattedText, Span};
use crate::units;

/// Strips leading and trailing whitespace (space, CR, LF, tab) from the text.
///
/// Spans are shifted by the number of removed leading code units. A span
/// lying entirely in the removed prefix or suffix is dropped; a span crossing
/// either edge is clipped to the trimmed text. Surviving spans keep their
/// relative order. Trimming is idempotent.
///
/// ## Examples
///
/// ```
/// use varsender_lib::{FormattedText, Span, SpanKind, trim};
///
/// let text = FormattedText::new(
///     "\n begin middle end \n",
///     vec![
///         Span::new(0, 7, SpanKind::other("bold")),
///         Span::new(19, 1, SpanKind::other("italic")),
///     ],
/// );
/// let trimmed = trim(&text);
///
/// assert_eq!(trimmed.text(), "begin middle end");
/// assert_eq!(trimmed.spans().len(), 1);
/// assert_eq!(trimmed.span_text(&trimmed.spans()[0]).as_deref(), Some("begin"));
/// ```
pub fn trim(text: &FormattedText) -> FormattedText {
    let encoded = units::encode(text.text());

    let start = encoded
        .iter()
        .position(|unit| !units::WHITESPACE.contains(unit))
        .unwrap_or(encoded.len());
    let end = encoded
        .iter()
        .rposition(|unit| !units::WHITESPACE.contains(unit))
        .map_or(start, |last| last + 1);

    let final_len = end - start;
    let spans: Vec<Span> = text
        .spans()
        .iter()
        .filter_map(|span| clip(span, start, final_len))
        .collect();

    if spans.len() != text.spans().len() {
        debug!(
            dropped = text.spans().len() - spans.len(),
            "dropped spans outside trimmed text"
        );
    }

    FormattedText::new(units::decode(&encoded[start..end]), spans)
}

impl FormattedText {
    /// Applies [`trim`] to this value.
    pub fn trim(&self) -> FormattedText {
        trim(self)
    }
}

/// Shifts `span` left by `lead` units and clips it to `0..final_len`.
fn clip(span: &Span, lead: usize, final_len: usize) -> Option<Span> {
    let end = span.end();
    if end <= lead {
        return None;
    }

    let start = span.offset().max(lead) - lead;
    if start >= final_len {
        return None;
    }
    let end = (end - lead).min(final_len);

    Some(span.with_range(start, end - start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::SpanKind;
    use proptest::prelude::*;

    fn bold(offset: usize, length: usize) -> Span {
        Span::new(offset, length, SpanKind::other("bold"))
    }

    fn covered(text: &FormattedText) -> Vec<String> {
        text.spans()
            .iter()
            .map(|s| text.span_text(s).expect("span out of range"))
            .collect()
    }

    #[test]
    fn test_trim_without_whitespace_is_identity() {
        let text = FormattedText::new("hello", vec![bold(1, 3)]);
        assert_eq!(trim(&text), text);
    }

    #[test]
    fn test_trim_empty_and_blank() {
        assert_eq!(trim(&FormattedText::plain("")), FormattedText::plain(""));

        let blank = FormattedText::new(" \r\n\t ", vec![bold(1, 2)]);
        let trimmed = trim(&blank);
        assert_eq!(trimmed.text(), "");
        assert!(trimmed.spans().is_empty());
    }

    #[test]
    fn test_trim_clips_spans_crossing_edges() {
        // "\nbegin Привет! end\n" with "\nbegin" bold and " end\n" italic
        let text = FormattedText::new(
            "\nbegin Привет! end\n",
            vec![bold(0, 6), bold(7, 7), Span::new(14, 5, SpanKind::other("italic"))],
        );
        let trimmed = trim(&text);

        assert_eq!(trimmed.text(), "begin Привет! end");
        assert_eq!(covered(&trimmed), vec!["begin", "Привет!", " end"]);
    }

    #[test]
    fn test_trim_drops_spans_in_removed_regions() {
        let text = FormattedText::new(
            "\n\nword\n\n",
            vec![bold(0, 1), bold(0, 2), bold(2, 4), bold(6, 2), bold(7, 1)],
        );
        let trimmed = trim(&text);

        assert_eq!(trimmed.text(), "word");
        assert_eq!(covered(&trimmed), vec!["word"]);
    }

    #[test]
    fn test_trim_keeps_zero_length_span_inside_text() {
        let text = FormattedText::new(" ab ", vec![bold(2, 0)]);
        let trimmed = trim(&text);
        assert_eq!(trimmed.spans(), &[bold(1, 0)]);
    }

    #[test]
    fn test_trim_does_not_strip_other_whitespace() {
        let text = FormattedText::plain("\u{00A0}word\u{2003}");
        assert_eq!(trim(&text).text(), "\u{00A0}word\u{2003}");
    }

    #[test]
    fn test_trim_clamps_out_of_range_spans() {
        let text = FormattedText::new(" ab ", vec![bold(1, 40)]);
        let trimmed = trim(&text);
        assert_eq!(trimmed.spans(), &[bold(0, 2)]);
    }

    #[test]
    fn test_trim_drops_spans_far_past_the_end() {
        let text = FormattedText::new("hello", vec![bold(usize::MAX, 5)]);
        assert!(trim(&text).spans().is_empty());

        let padded = FormattedText::new(" hello ", vec![bold(usize::MAX - 1, 5), bold(1, usize::MAX)]);
        let trimmed = trim(&padded);
        assert_eq!(trimmed.text(), "hello");
        assert_eq!(trimmed.spans(), &[bold(0, 5)]);
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_trim_logs_dropped_spans() {
        let trimmed = trim(&FormattedText::new("  ab  ", vec![bold(0, 1), bold(2, 2)]));
        assert_eq!(trimmed.spans(), &[bold(0, 2)]);
        assert!(logs_contain("dropped spans outside trimmed text"));
    }

    proptest! {
        #[test]
        fn trim_is_idempotent(
            text in "[ \n\ta-cП]{0,16}",
            ranges in prop::collection::vec((0usize..16, 0usize..16), 0..5)
        ) {
            let len = crate::units::utf16_len(&text);
            let spans = ranges
                .into_iter()
                .filter(|(offset, length)| offset + length <= len)
                .map(|(offset, length)| bold(offset, length))
                .collect();
            let once = trim(&FormattedText::new(text, spans));
            let twice = trim(&once);

            prop_assert!(once.spans_in_bounds());
            prop_assert_eq!(twice, once);
        }
    }
}
