//! Span-preserving transforms over [`FormattedText`](crate::FormattedText).
//!
//! Every transform is a pure function: it takes a value, returns a new one,
//! and keeps each surviving span's range consistent with the new text.
//!
//! ## Modules
//!
//! - [`substitute()`] - Case-insensitive find/replace with span remapping
//! - [`trim()`] - Whitespace trimming with span clipping
//! - [`cleanup_hashtags()`] - Removes hashtag spans and the text they cover
//! - [`interpolate()`] - `{{name}}` placeholders plus link-target rewriting
//!
//! ## Examples
//!
//! ```
//! use varsender_lib::{FormattedText, Span, SpanKind, Variables};
//!
//! let template = FormattedText::new(
//!     "#greeting\n  Hello, {{name}}!  ",
//!     vec![Span::new(0, 9, SpanKind::Hashtag)],
//! );
//! let vars = Variables::from([("name", "Ivan")]);
//!
//! let letter = template.cleanup_hashtags().trim().interpolate(&vars);
//! assert_eq!(letter.text(), "Hello, Ivan!");
//! ```

pub mod hashtag;
pub mod interpolate;
pub mod substitute;
pub mod trim;

// Re-export core functions for convenient access
pub use hashtag::{cleanup_hashtags, is_hashtag};
pub use interpolate::{interpolate, placeholder, rewrite_link_targets};
pub use substitute::substitute;
pub use trim::trim;
