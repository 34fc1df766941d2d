//! Building a letter's final text from its template.
//!
//! Markup parsing and stored-template lookup live outside this crate; they
//! are injected through [`TemplateSource`].

use tracing::{debug, info, warn};

use super::types::{ComposeError, Letter, PreparedLetter};
use crate::text::FormattedText;
use crate::transform::{cleanup_hashtags, interpolate, is_hashtag, trim};

/// Capabilities the letter pipeline needs from the messaging layer.
pub trait TemplateSource {
    /// Error raised by the source.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Parses raw template markup into formatted text.
    fn parse_markup(&self, raw: &str) -> Result<FormattedText, Self::Error>;

    /// Fetches a template previously stored under `tag` (always `#`-prefixed).
    fn lookup_by_hashtag(&self, tag: &str) -> Result<Option<FormattedText>, Self::Error>;
}

/// Composes the text of a single letter.
///
/// A template cell holding a hashtag is resolved through the source's stored
/// templates, anything else is parsed as markup. The template is then cleaned
/// of hashtags, trimmed and interpolated with the letter's variables.
///
/// ## Errors
///
/// Returns `ComposeError::TemplateNotFound` if a hashtag has no stored
/// template and `ComposeError::Source` if the source itself fails.
pub fn compose_letter<S: TemplateSource>(
    source: &S,
    letter: &Letter,
) -> Result<FormattedText, ComposeError> {
    let raw = letter.template();

    let template = if is_hashtag(raw) {
        source
            .lookup_by_hashtag(raw)
            .map_err(|e| ComposeError::Source(Box::new(e)))?
            .ok_or_else(|| ComposeError::TemplateNotFound(raw.to_string()))?
    } else {
        source
            .parse_markup(raw)
            .map_err(|e| ComposeError::Source(Box::new(e)))?
    };

    debug!(to = letter.to(), template = raw, "composing letter");

    let message = cleanup_hashtags(&template);
    let message = trim(&message);
    Ok(interpolate(&message, letter.variables()))
}

/// Composes every letter, collecting failures instead of stopping at the
/// first one.
///
/// Returns the prepared letters and, for each failure, the index of the
/// letter together with its error.
pub fn prepare_letters<S: TemplateSource>(
    source: &S,
    letters: &[Letter],
) -> (Vec<PreparedLetter>, Vec<(usize, ComposeError)>) {
    let mut prepared = Vec::with_capacity(letters.len());
    let mut failures = Vec::new();

    for (index, letter) in letters.iter().enumerate() {
        match compose_letter(source, letter) {
            Ok(text) => prepared.push(PreparedLetter::new(letter, text)),
            Err(e) => {
                warn!(to = letter.to(), error = %e, "failed to prepare letter");
                failures.push((index, e));
            }
        }
    }

    info!(
        prepared = prepared.len(),
        failed = failures.len(),
        "prepared letters"
    );
    (prepared, failures)
}
