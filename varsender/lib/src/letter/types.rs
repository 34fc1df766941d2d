//! Core types for the letter module.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::FormattedText;
use crate::variables::Variables;

/// Formats accepted for a letter's send time, tried in order.
const SEND_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

/// One outgoing message described by a sheet row.
///
/// ## Examples
///
/// ```
/// use varsender_lib::{Letter, Variables};
///
/// let letter = Letter::new("@ivan", "17.10.2026 14:00", "#invite")
///     .with_variable("name", "Ivan");
///
/// assert_eq!(letter.variables().get("name"), Some("Ivan"));
/// assert!(letter.scheduled_at().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    to: String,
    send_time: String,
    template: String,
    #[serde(default)]
    variables: Variables,
}

impl Letter {
    /// Creates a letter without variables.
    pub fn new(
        to: impl Into<String>,
        send_time: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Letter {
            to: to.into(),
            send_time: send_time.into(),
            template: template.into(),
            variables: Variables::new(),
        }
    }

    /// Adds or replaces a variable.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name, value);
        self
    }

    /// Recipient as written in the sheet (title, `@username` or `t.me` link).
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Send time as written in the sheet.
    pub fn send_time(&self) -> &str {
        &self.send_time
    }

    /// Raw template cell: either markup or a `#hashtag` of a stored template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Variables available to the template.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Parses the send time, or `None` if no known format matches.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        let raw = self.send_time.trim();
        SEND_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    }
}

/// A letter whose text is ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedLetter {
    to: String,
    send_time: String,
    scheduled_at: Option<NaiveDateTime>,
    text: FormattedText,
}

impl PreparedLetter {
    /// Pairs `letter`'s addressing with its composed `text`.
    pub fn new(letter: &Letter, text: FormattedText) -> Self {
        PreparedLetter {
            to: letter.to().to_string(),
            send_time: letter.send_time().to_string(),
            scheduled_at: letter.scheduled_at(),
            text,
        }
    }

    /// Recipient as written in the sheet.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Send time as written in the sheet.
    pub fn send_time(&self) -> &str {
        &self.send_time
    }

    /// Parsed send time, if the cell matched a known format.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        self.scheduled_at
    }

    /// Final message text.
    pub fn text(&self) -> &FormattedText {
        &self.text
    }

    /// Consumes the letter, returning its text.
    pub fn into_text(self) -> FormattedText {
        self.text
    }
}

/// Errors that can occur while reading letters from a sheet.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SheetError {
    /// The header row lacks a required column.
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Errors that can occur while composing a letter's text.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// No stored template carries the requested hashtag.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// The template source failed.
    #[error("Template source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(send_time: &str) -> Option<NaiveDateTime> {
        Letter::new("@user", send_time, "hi").scheduled_at()
    }

    #[test]
    fn test_scheduled_at_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 17)
            .and_then(|d| d.and_hms_opt(14, 0, 0));

        assert_eq!(at("2026-10-17 14:00"), expected);
        assert_eq!(at("2026-10-17T14:00:00"), expected);
        assert_eq!(at("17.10.2026 14:00"), expected);
        assert_eq!(at(" 17/10/2026 14:00 "), expected);
    }

    #[test]
    fn test_scheduled_at_rejects_garbage() {
        assert_eq!(at(""), None);
        assert_eq!(at("tomorrow"), None);
        assert_eq!(at("2026-13-40 14:00"), None);
    }

    #[test]
    fn test_with_variable_replaces_value() {
        let letter = Letter::new("@user", "", "hi")
            .with_variable("a", "1")
            .with_variable("a", "2");
        assert_eq!(letter.variables().len(), 1);
        assert_eq!(letter.variables().get("a"), Some("2"));
    }

    #[test]
    fn test_prepared_letter_keeps_addressing() {
        let letter = Letter::new("@user", "tomorrow", "hi");
        let prepared = PreparedLetter::new(&letter, FormattedText::plain("hi"));

        assert_eq!(prepared.to(), "@user");
        assert_eq!(prepared.send_time(), "tomorrow");
        assert_eq!(prepared.scheduled_at(), None);
        assert_eq!(prepared.into_text(), FormattedText::plain("hi"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SheetError::MissingColumn("sendtime").to_string(),
            "Missing required column: sendtime"
        );
        assert_eq!(
            ComposeError::TemplateNotFound("#invite".into()).to_string(),
            "Template not found: #invite"
        );
    }
}
