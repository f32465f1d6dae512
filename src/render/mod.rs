//! Output rendering for extracted fragments.
//!
//! # Example
//!
//! ```
//! use boldx::render::{format_fragments, ExtractOptions, ResultFormat};
//!
//! let options = ExtractOptions::default().with_separator(", ");
//! let out = format_fragments(
//!     vec!["Title".to_string()],
//!     options.format,
//!     &options.separator,
//! );
//! assert_eq!(out.to_string(), ", Title, ");
//!
//! let raw = format_fragments(vec!["Title".to_string()], ResultFormat::PassThrough, "");
//! assert_eq!(raw.to_string(), "Title");
//! ```

mod format;
mod options;

pub use format::{format_fragments, FormattedResult};
pub use options::{ExtractOptions, ResultFormat, DEFAULT_SEPARATOR};
