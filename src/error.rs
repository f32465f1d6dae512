//! Error types for the boldx library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for boldx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting bold text from a document.
///
/// Every variant is terminal for the current call: nothing is retried and
/// no partial result is produced.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist.
    #[error("Can't open file {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input path does not carry the extension the parser expects.
    #[error("Incorrect file extension, .{expected} expected")]
    InvalidExtension {
        /// Offending path
        path: PathBuf,
        /// Extension the parser variant requires (without the dot)
        expected: String,
    },

    /// The container could not be opened or read as a ZIP archive.
    #[error("Unable to open archive file {}: {reason}", .path.display())]
    ContainerOpen {
        /// Container path, or `<memory>` for in-memory archives
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// The requested inner entry is absent from the container.
    #[error("Unable to locate sought-for file {0} in archive")]
    EntryNotFound(String),

    /// The entry content is not well-formed XML.
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// I/O error outside of archive access.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build a [`Error::ContainerOpen`] from any displayable cause.
    pub(crate) fn container_open(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::ContainerOpen {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedXml(err.to_string())
    }
}
