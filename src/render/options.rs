//! Extraction options configuration.

use serde::Serialize;

/// Default fragment separator: a line-break pair.
pub const DEFAULT_SEPARATOR: &str = "\n\r";

/// How extracted fragments are turned into output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultFormat {
    /// Join fragments with the separator and wrap the result with it
    #[default]
    SepString,
    /// Hand the fragment sequence back unchanged
    PassThrough,
}

impl ResultFormat {
    /// Resolve a scheme name.
    ///
    /// `"sep_string"` selects [`ResultFormat::SepString`]; any other name
    /// falls through to [`ResultFormat::PassThrough`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "sep_string" => ResultFormat::SepString,
            _ => ResultFormat::PassThrough,
        }
    }

    /// Scheme name as accepted by [`ResultFormat::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            ResultFormat::SepString => "sep_string",
            ResultFormat::PassThrough => "pass_through",
        }
    }
}

/// Options for extracting and formatting bold text.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Output scheme
    pub format: ResultFormat,

    /// Separator used by [`ResultFormat::SepString`]
    pub separator: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            format: ResultFormat::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output scheme.
    pub fn with_format(mut self, format: ResultFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}
