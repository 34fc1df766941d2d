//! `{{name}}` placeholder interpolation.
//!
//! Placeholders in the text are replaced through the span-aware
//! [`substitute`](super::substitute) primitive. Link targets are handled
//! separately: a link whose URL mentions a variable name has its whole URL
//! replaced by that variable's value.

use tracing::debug;

use crate::text::{FormattedText, Span, SpanKind};
use crate::transform::substitute::substitute_units;
use crate::units;
use crate::variables::Variables;

/// Builds the placeholder token for a variable name.
pub fn placeholder(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Replaces every `{{name}}` placeholder with its value, then rewrites link
/// targets.
///
/// Entries are applied in the mapping's iteration order, each one once
/// against the text produced by the previous entries. Placeholder names
/// match case-insensitively and entries with an empty name are skipped.
/// Values are inserted verbatim and never rescanned by the rule that
/// inserted them.
///
/// ## Examples
///
/// ```
/// use varsender_lib::{FormattedText, Span, SpanKind, Variables, interpolate};
///
/// let template = FormattedText::new(
///     "Hi {{Name}}, see the link",
///     vec![Span::new(21, 4, SpanKind::text_url("https://host.com/{{url}}"))],
/// );
/// let vars = Variables::from([("name", "Ivan"), ("url", "https://t.me/user")]);
///
/// let letter = interpolate(&template, &vars);
///
/// assert_eq!(letter.text(), "Hi Ivan, see the link");
/// assert_eq!(
///     letter.spans(),
///     &[Span::new(17, 4, SpanKind::text_url("https://t.me/user"))]
/// );
/// ```
pub fn interpolate(text: &FormattedText, variables: &Variables) -> FormattedText {
    let encoded = units::encode(text.text());

    let (encoded, spans) = variables
        .iter()
        .filter(|(name, _)| !name.is_empty())
        .fold((encoded, text.spans().to_vec()), |(encoded, spans), (name, value)| {
            substitute_units(&encoded, spans, &placeholder(name), value)
        });

    debug!(variables = variables.len(), "interpolated placeholders");

    let spans = rewrite_link_targets(spans, variables);
    FormattedText::new(units::decode(&encoded), spans)
}

impl FormattedText {
    /// Applies [`interpolate`] to this value.
    pub fn interpolate(&self, variables: &Variables) -> FormattedText {
        interpolate(self, variables)
    }
}

/// Replaces the URL of each link span that mentions a variable name.
///
/// The first variable (in mapping order) with a non-empty name occurring
/// case-insensitively in the URL wins; its value becomes the whole new URL.
/// Links without a match, empty URLs and all other spans are unchanged.
pub fn rewrite_link_targets(spans: Vec<Span>, variables: &Variables) -> Vec<Span> {
    spans
        .into_iter()
        .map(|span| match span.kind() {
            SpanKind::TextUrl { url } if !url.is_empty() => {
                match link_target_for(url, variables) {
                    Some(target) => {
                        debug!(%url, %target, "rewrote link target");
                        span.with_kind(SpanKind::text_url(target))
                    }
                    None => span,
                }
            }
            _ => span,
        })
        .collect()
}

fn link_target_for<'a>(url: &str, variables: &'a Variables) -> Option<&'a str> {
    variables
        .iter()
        .filter(|(name, _)| !name.is_empty())
        .find(|(name, _)| units::contains_ignore_case(url, name))
        .map(|(_, value)| value)
}
