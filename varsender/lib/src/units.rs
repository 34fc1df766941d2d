//! UTF-16 code-unit helpers.
//!
//! Span offsets are counted in UTF-16 code units, the convention used by the
//! Telegram message-entity protocol. Every transform encodes the text once,
//! works on the code units, and decodes the result.

/// Code units stripped by [`trim`](crate::transform::trim).
pub(crate) const WHITESPACE: [u16; 4] = [b' ' as u16, b'\r' as u16, b'\n' as u16, b'\t' as u16];

/// Encodes `text` as UTF-16 code units.
pub(crate) fn encode(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decodes UTF-16 code units back into a `String`.
///
/// Transforms only ever cut the encoding at boundaries of valid substrings,
/// so no replacement characters are produced for well-formed input.
pub(crate) fn decode(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Ordinal case folding of a single code unit.
///
/// BMP characters fold to their simple uppercase mapping when that mapping is
/// a single BMP character. Surrogates and characters whose uppercase form
/// expands (e.g. `ß`) are returned unchanged, which keeps folding
/// length-preserving.
pub(crate) fn fold(unit: u16) -> u16 {
    let Some(c) = char::from_u32(u32::from(unit)) else {
        return unit;
    };
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u16::try_from(u32::from(u)).unwrap_or(unit),
        _ => unit,
    }
}

/// Folds every code unit of `units`.
pub(crate) fn fold_all(units: &[u16]) -> Vec<u16> {
    units.iter().copied().map(fold).collect()
}

/// Finds `needle` in `haystack` at or after `from`.
///
/// Both slices must already be folded with [`fold_all`].
pub(crate) fn find_folded(haystack: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() || haystack.len() - from < needle.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}

/// Case-insensitive substring test on Rust strings.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let haystack = fold_all(&encode(haystack));
    let needle = fold_all(&encode(needle));
    find_folded(&haystack, &needle, 0).is_some()
}
