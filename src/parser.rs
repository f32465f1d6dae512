//! Document validation and extraction orchestration.
//!
//! A [`Document`] is only constructed for a path that exists and carries the
//! extension its [`ParserVariant`] expects. Extraction then loads the
//! variant's body part, runs the variant's extraction rule and formats the
//! fragments.

use crate::docx::DocxBold;
use crate::error::{Error, Result};
use crate::loader::{load_entry, XmlContent};
use crate::render::{format_fragments, ExtractOptions, FormattedResult};
use std::path::{Path, PathBuf};

/// Capabilities of a document type the extraction pipeline can handle.
pub trait ParserVariant {
    /// File extension, without the dot, matched case-sensitively.
    fn expected_extension(&self) -> &str;

    /// Inner package entry holding the content to scan.
    fn body_entry(&self) -> &str;

    /// Pull fragments out of the loaded body, in document order.
    fn extract_fragments(&self, xml: &XmlContent) -> Vec<String>;
}

/// A validated input document.
#[derive(Debug, Clone)]
pub struct Document<V = DocxBold> {
    path: PathBuf,
    variant: V,
}

impl Document<DocxBold> {
    /// Open a `.docx` for bold text extraction.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use boldx::Document;
    ///
    /// let doc = Document::open_docx("report.docx")?;
    /// for fragment in doc.extract_fragments()? {
    ///     println!("{}", fragment);
    /// }
    /// # Ok::<(), boldx::Error>(())
    /// ```
    pub fn open_docx(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, DocxBold)
    }
}

impl<V: ParserVariant> Document<V> {
    /// Validate `path` for `variant`.
    ///
    /// Fails with [`Error::FileNotFound`] if the path does not exist, and
    /// otherwise with [`Error::InvalidExtension`] if the extension does not
    /// match. The package itself is not touched.
    pub fn open(path: impl AsRef<Path>, variant: V) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let expected = variant.expected_extension();
        if !has_extension(path, expected) {
            return Err(Error::InvalidExtension {
                path: path.to_path_buf(),
                expected: expected.to_string(),
            });
        }

        tracing::debug!("Opened {} as .{}", path.display(), expected);
        Ok(Self {
            path: path.to_path_buf(),
            variant,
        })
    }

    /// Path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parser variant in use.
    pub fn variant(&self) -> &V {
        &self.variant
    }

    /// Load the body part. The package is read anew on every call.
    pub fn load(&self) -> Result<XmlContent> {
        load_entry(&self.path, self.variant.body_entry())
    }

    /// Extract the fragments in document order.
    pub fn extract_fragments(&self) -> Result<Vec<String>> {
        let xml = self.load()?;
        Ok(self.variant.extract_fragments(&xml))
    }

    /// Extract and format the fragments.
    pub fn extract(&self, options: &ExtractOptions) -> Result<FormattedResult> {
        let fragments = self.extract_fragments()?;
        Ok(format_fragments(
            fragments,
            options.format,
            &options.separator,
        ))
    }
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(expected)
}
