//! Formatted text: plain text paired with an ordered list of spans.
//!
//! This is the value type flowing through every transform. Both
//! [`FormattedText`] and [`Span`] are immutable values; transforms build new
//! instances instead of mutating their input.
//!
//! ## Offsets
//!
//! Span offsets and lengths are UTF-16 code units, matching the entity
//! offsets of the Telegram messaging protocol. A single non-BMP character
//! such as an emoji occupies two units.
//!
//! ## Examples
//!
//! ```
//! use varsender_lib::{FormattedText, Span, SpanKind};
//!
//! let text = FormattedText::new(
//!     "Hello \u{1F600} world",
//!     vec![Span::new(9, 5, SpanKind::other("bold"))],
//! );
//!
//! assert_eq!(text.span_text(&text.spans()[0]).as_deref(), Some("world"));
//! ```

use serde::{Deserialize, Serialize};

use crate::units;

/// The semantic or stylistic tag carried by a [`Span`].
///
/// The engine only inspects [`SpanKind::Hashtag`] and [`SpanKind::TextUrl`];
/// every other kind passes through untouched apart from its range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpanKind {
    /// A `#tag` used as metadata or as a stored-template key.
    Hashtag,
    /// A link whose visible text differs from its target.
    TextUrl {
        /// The link target.
        url: String,
    },
    /// Any other style (bold, italic, code, ...), identified by name only.
    Other {
        /// Style name as produced by the markup parser.
        name: String,
    },
}

impl SpanKind {
    /// Creates a [`SpanKind::TextUrl`].
    pub fn text_url(url: impl Into<String>) -> Self {
        SpanKind::TextUrl { url: url.into() }
    }

    /// Creates a pass-through [`SpanKind::Other`].
    pub fn other(name: impl Into<String>) -> Self {
        SpanKind::Other { name: name.into() }
    }

    /// Returns `true` for [`SpanKind::Hashtag`].
    pub fn is_hashtag(&self) -> bool {
        matches!(self, SpanKind::Hashtag)
    }
}

/// An annotation over the half-open range `offset..offset + length`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    offset: usize,
    length: usize,
    kind: SpanKind,
}

impl Span {
    /// Creates a span covering `length` code units starting at `offset`.
    pub fn new(offset: usize, length: usize, kind: SpanKind) -> Self {
        Span {
            offset,
            length,
            kind,
        }
    }

    /// Start of the span in UTF-16 code units.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the span in UTF-16 code units.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Exclusive end of the span, saturating at `usize::MAX`.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// The span's tag.
    pub fn kind(&self) -> &SpanKind {
        &self.kind
    }

    /// Returns a copy of this span moved to a new range.
    pub fn with_range(&self, offset: usize, length: usize) -> Self {
        Span {
            offset,
            length,
            kind: self.kind.clone(),
        }
    }

    /// Returns a copy of this span with a different tag.
    pub fn with_kind(&self, kind: SpanKind) -> Self {
        Span {
            offset: self.offset,
            length: self.length,
            kind,
        }
    }
}

/// Text plus the spans annotating it.
///
/// Span order is insertion order, not offset order, and every transform
/// preserves the relative order of surviving spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedText {
    text: String,
    #[serde(default)]
    spans: Vec<Span>,
}

impl FormattedText {
    /// Creates formatted text from its parts.
    pub fn new(text: impl Into<String>, spans: Vec<Span>) -> Self {
        FormattedText {
            text: text.into(),
            spans,
        }
    }

    /// Creates formatted text without any spans.
    pub fn plain(text: impl Into<String>) -> Self {
        FormattedText::new(text, Vec::new())
    }

    /// The plain text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The spans, in insertion order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Length of the text in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        units::utf16_len(&self.text)
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the text covered by `span`, or `None` if the span does not fit
    /// inside the text.
    pub fn span_text(&self, span: &Span) -> Option<String> {
        let encoded = units::encode(&self.text);
        encoded
            .get(span.offset()..span.end())
            .map(units::decode)
    }

    /// Returns `true` if every span lies within the text.
    pub fn spans_in_bounds(&self) -> bool {
        let len = self.len_utf16();
        self.spans.iter().all(|span| span.end() <= len)
    }
}
