//! Varsender Library - templated, scheduled chat messages from spreadsheet rows
//!
//! The heart of this crate is a rich-text transform engine: plain text paired
//! with style and semantic spans is trimmed, stripped of hashtags and
//! interpolated while every span's range stays consistent with the edited
//! text.
//!
//! ## Modules
//!
//! - [`text`] - The [`FormattedText`] / [`Span`] value types
//! - [`transform`] - Substitution, trimming, hashtag cleanup, interpolation
//! - [`variables`] - Ordered variable mapping used by interpolation
//! - [`letter`] - Letters read from sheet rows and their text pipeline
//!
//! Span offsets are UTF-16 code units, see [`text`].

pub mod letter;
pub mod text;
pub mod transform;
mod units;
pub mod variables;

pub use letter::{
    ComposeError, Letter, PreparedLetter, SheetError, TemplateSource, compose_letter,
    prepare_letters, read_letters,
};
pub use text::{FormattedText, Span, SpanKind};
pub use transform::{
    cleanup_hashtags, interpolate, is_hashtag, placeholder, rewrite_link_targets, substitute,
    trim,
};
pub use units::utf16_len;
pub use variables::Variables;
