//! Case-insensitive find/replace that keeps span ranges consistent.
//!
//! This is the primitive the hashtag cleanup and placeholder interpolation
//! transforms are built on. Every occurrence of the key is replaced in a
//! single left-to-right pass and each span is remapped against the text as
//! substituted so far.

use tracing::trace;

use crate::text::{FormattedText, Span};
use crate::units;

/// Replaces every case-insensitive occurrence of `key` in `text` with `value`.
///
/// Spans are remapped per occurrence:
///
/// - a span entirely after the match shifts by the length difference,
/// - a span entirely inside the match collapses to zero width at the
///   insertion point,
/// - a span straddling an edge of the match clips to the matching edge of the
///   inserted value.
///
/// Spans are never dropped or reordered. Empty `text` or empty `key` return
/// the input unchanged.
///
/// ## Examples
///
/// ```
/// use varsender_lib::{Span, SpanKind, substitute};
///
/// let spans = vec![Span::new(3, 7, SpanKind::other("bold"))];
/// let (text, spans) = substitute("my perfect $xy text", &spans, "$XY", "1234");
///
/// assert_eq!(text, "my perfect 1234 text");
/// assert_eq!((spans[0].offset(), spans[0].length()), (3, 7));
/// ```
pub fn substitute(text: &str, spans: &[Span], key: &str, value: &str) -> (String, Vec<Span>) {
    if text.is_empty() || key.is_empty() {
        return (text.to_string(), spans.to_vec());
    }

    let (units, spans) = substitute_units(&units::encode(text), spans.to_vec(), key, value);
    (units::decode(&units), spans)
}

impl FormattedText {
    /// Applies [`substitute`] to this value.
    pub fn substitute(&self, key: &str, value: &str) -> FormattedText {
        let (text, spans) = substitute(self.text(), self.spans(), key, value);
        FormattedText::new(text, spans)
    }
}

/// Code-unit level substitution, used to chain several rules without
/// re-encoding the text between them.
pub(crate) fn substitute_units(
    text: &[u16],
    mut spans: Vec<Span>,
    key: &str,
    value: &str,
) -> (Vec<u16>, Vec<Span>) {
    if text.is_empty() || key.is_empty() {
        return (text.to_vec(), spans);
    }

    let key_units = units::encode(key);
    let value_units = units::encode(value);
    let folded_text = units::fold_all(text);
    let folded_key = units::fold_all(&key_units);

    let mut result = Vec::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(found) = units::find_folded(&folded_text, &folded_key, cursor) {
        result.extend_from_slice(&text[cursor..found]);
        let match_start = result.len();
        result.extend_from_slice(&value_units);

        for span in &mut spans {
            *span = remap(span, match_start, key_units.len(), value_units.len());
        }

        trace!(found, match_start, "substituted occurrence");
        cursor = found + key_units.len();
    }

    result.extend_from_slice(&text[cursor..]);
    (result, spans)
}

/// Remaps one span after the key at `match_start` was replaced.
///
/// Coordinates before `match_start` are final, coordinates at or after the
/// end of the match are still those of the unsubstituted remainder.
fn remap(span: &Span, match_start: usize, key_len: usize, value_len: usize) -> Span {
    let match_end = match_start + key_len;
    let insert_end = match_start + value_len;
    let shift = |pos: usize| (pos - key_len).saturating_add(value_len);

    // Spans after the match only move; their length is kept even when the
    // offset saturates.
    if span.offset() >= match_end {
        return span.with_range(shift(span.offset()), span.length());
    }

    let left = span.offset().min(insert_end);
    let right = span.end();
    let right = if right >= match_end {
        shift(right)
    } else if right > match_start {
        right.min(insert_end).max(match_start)
    } else {
        right
    };

    span.with_range(left, right.saturating_sub(left))
}
