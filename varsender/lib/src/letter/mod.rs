//! Letters: scheduled messages described by spreadsheet rows.
//!
//! A sheet row names a recipient, a send time and a template; every other
//! column supplies a template variable. This module turns such rows into
//! [`Letter`]s and composes their final text through the transforms in
//! [`crate::transform`].
//!
//! ## Examples
//!
//! ```
//! use std::convert::Infallible;
//!
//! use varsender_lib::{FormattedText, TemplateSource, compose_letter, read_letters};
//!
//! struct PlainText;
//!
//! impl TemplateSource for PlainText {
//!     type Error = Infallible;
//!
//!     fn parse_markup(&self, raw: &str) -> Result<FormattedText, Infallible> {
//!         Ok(FormattedText::plain(raw))
//!     }
//!
//!     fn lookup_by_hashtag(&self, _tag: &str) -> Result<Option<FormattedText>, Infallible> {
//!         Ok(None)
//!     }
//! }
//!
//! let rows = vec![
//!     vec!["to", "sendtime", "template", "name"],
//!     vec!["@ivan", "2026-10-17 14:00", "Hello, {{Name}}!", "Ivan"],
//! ];
//! let letters = read_letters(&rows).unwrap();
//! let text = compose_letter(&PlainText, &letters[0]).unwrap();
//!
//! assert_eq!(text.text(), "Hello, Ivan!");
//! ```

pub mod compose;
pub mod sheet;
pub mod types;

pub use compose::{TemplateSource, compose_letter, prepare_letters};
pub use sheet::read_letters;
pub use types::{ComposeError, Letter, PreparedLetter, SheetError};
