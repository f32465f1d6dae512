//! Fragment formatting.

use serde::Serialize;
use std::fmt;

use super::options::ResultFormat;

/// Formatted extraction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormattedResult {
    /// Fragments joined into a single string
    Joined(String),
    /// Fragments passed through unchanged
    Fragments(Vec<String>),
}

impl FormattedResult {
    /// The joined string, if this result was joined.
    pub fn as_joined(&self) -> Option<&str> {
        match self {
            FormattedResult::Joined(s) => Some(s.as_str()),
            FormattedResult::Fragments(_) => None,
        }
    }

    /// Collapse into a single string.
    ///
    /// Passed-through fragments are put one per line.
    pub fn into_string(self) -> String {
        match self {
            FormattedResult::Joined(s) => s,
            FormattedResult::Fragments(fragments) => fragments.join("\n"),
        }
    }
}

impl fmt::Display for FormattedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattedResult::Joined(s) => f.write_str(s),
            FormattedResult::Fragments(fragments) => {
                for (i, fragment) in fragments.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    f.write_str(fragment)?;
                }
                Ok(())
            }
        }
    }
}

/// Format fragments according to `format`.
///
/// `SepString` joins with `separator` and wraps the joined string with it at
/// both ends, so an empty sequence yields the separator twice.
///
/// # Example
///
/// ```
/// use boldx::render::{format_fragments, ResultFormat, DEFAULT_SEPARATOR};
///
/// let out = format_fragments(
///     vec!["A".to_string(), "B".to_string()],
///     ResultFormat::SepString,
///     DEFAULT_SEPARATOR,
/// );
/// assert_eq!(out.to_string(), "\n\rA\n\rB\n\r");
/// ```
pub fn format_fragments(
    fragments: Vec<String>,
    format: ResultFormat,
    separator: &str,
) -> FormattedResult {
    match format {
        ResultFormat::SepString => {
            let mut out = String::from(separator);
            out.push_str(&fragments.join(separator));
            out.push_str(separator);
            FormattedResult::Joined(out)
        }
        ResultFormat::PassThrough => FormattedResult::Fragments(fragments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DEFAULT_SEPARATOR;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sep_string_join_and_wrap() {
        let out = format_fragments(strings(&["A", "B"]), ResultFormat::SepString, DEFAULT_SEPARATOR);
        assert_eq!(out, FormattedResult::Joined("\n\rA\n\rB\n\r".to_string()));
    }

    #[test]
    fn test_sep_string_empty() {
        let out = format_fragments(Vec::new(), ResultFormat::SepString, DEFAULT_SEPARATOR);
        assert_eq!(out.as_joined(), Some("\n\r\n\r"));
    }

    #[test]
    fn test_sep_string_single() {
        let out = format_fragments(strings(&["only"]), ResultFormat::SepString, DEFAULT_SEPARATOR);
        assert_eq!(out.into_string(), "\n\ronly\n\r");
    }

    #[test]
    fn test_custom_separator() {
        let out = format_fragments(strings(&["A", "B", "C"]), ResultFormat::SepString, "|");
        assert_eq!(out.to_string(), "|A|B|C|");
    }

    #[test]
    fn test_pass_through() {
        let out = format_fragments(strings(&["A", "", "B"]), ResultFormat::PassThrough, "|");
        assert_eq!(out, FormattedResult::Fragments(strings(&["A", "", "B"])));
        assert_eq!(out.as_joined(), None);
        assert_eq!(out.to_string(), "A\n\nB");
    }

    #[test]
    fn test_serialize() {
        let joined = FormattedResult::Joined("x".to_string());
        assert_eq!(serde_json::to_string(&joined).unwrap(), "\"x\"");

        let fragments = FormattedResult::Fragments(strings(&["a", "b"]));
        assert_eq!(serde_json::to_string(&fragments).unwrap(), "[\"a\",\"b\"]");
    }
}
