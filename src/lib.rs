//! # boldx
//!
//! Extract bold text runs from Word (.docx) documents.
//!
//! A `.docx` file is a ZIP package; its body lives in `word/document.xml`.
//! boldx fetches that part, walks it for runs whose run properties switch
//! bold on, and returns the text of each such run in document order.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Fragments wrapped and joined with "\n\r"
//! let text = boldx::parse("report.docx")?;
//! print!("{}", text);
//!
//! // Raw fragments
//! for fragment in boldx::bold_fragments("report.docx")? {
//!     println!("{}", fragment);
//! }
//! # Ok::<(), boldx::Error>(())
//! ```
//!
//! ## Lower-level APIs
//!
//! ```no_run
//! use boldx::render::{ExtractOptions, ResultFormat};
//! use boldx::Document;
//!
//! let doc = Document::open_docx("report.docx")?;
//! let options = ExtractOptions::default()
//!     .with_format(ResultFormat::SepString)
//!     .with_separator("; ");
//! println!("{}", doc.extract(&options)?);
//!
//! let bytes = boldx::container::fetch_entry("report.docx", "word/styles.xml")?;
//! # Ok::<(), boldx::Error>(())
//! ```

pub mod container;
pub mod docx;
pub mod error;
pub mod extract;
pub mod loader;
pub mod parser;
pub mod render;

// Re-exports
pub use container::{fetch_entry, Container};
pub use docx::DocxBold;
pub use error::{Error, Result};
pub use loader::{load_body, XmlContent, DOCUMENT_XML};
pub use parser::{Document, ParserVariant};
pub use render::{ExtractOptions, FormattedResult, ResultFormat};

use std::path::Path;

/// Extract bold text from a `.docx` and format it with the default scheme.
///
/// Fragments are joined with `"\n\r"` and the result is wrapped with it at
/// both ends.
///
/// # Example
///
/// ```no_run
/// let text = boldx::parse("report.docx")?;
/// assert!(text.starts_with("\n\r"));
/// # Ok::<(), boldx::Error>(())
/// ```
pub fn parse(path: impl AsRef<Path>) -> Result<String> {
    parse_with_options(path, &ExtractOptions::default()).map(FormattedResult::into_string)
}

/// Extract bold text from a `.docx` with explicit options.
pub fn parse_with_options(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<FormattedResult> {
    Document::open_docx(path)?.extract(options)
}

/// Extract the bold fragments of a `.docx` without formatting.
pub fn bold_fragments(path: impl AsRef<Path>) -> Result<Vec<String>> {
    Document::open_docx(path)?.extract_fragments()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_missing_file() {
        let result = parse("no/such/dir/report.docx");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_document_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document<DocxBold>>();
    }
}
