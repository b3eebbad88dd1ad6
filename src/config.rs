//! Run configuration for publication-list generation
//!
//! A [`Config`] is built either in code (see [`Config::new`]) or loaded from
//! a JSON file:
//!
//! ```json
//! {
//!   "source_path": "literature.bib",
//!   "output_path": "publications.html",
//!   "keywords": ["muc.dai"],
//!   "format": "html"
//! }
//! ```
//!
//! Only `source_path` is required.

use crate::filter::KeywordFilter;
use crate::render::OutputFormat;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inputs of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Bibliography file to read
    pub source_path: PathBuf,
    /// Where to write the document; defaults to the format's file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Tags to select records by; `None` includes every record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
    /// Keep records with non-classic entry types such as `@online`
    #[serde(default)]
    pub include_nonstandard_types: bool,
    /// Also write the clipboard script next to the output
    #[serde(default)]
    pub emit_script: bool,
}

impl Config {
    /// Default configuration for `source_path`
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            output_path: None,
            keywords: None,
            format: OutputFormat::default(),
            include_nonstandard_types: false,
            emit_script: false,
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Parse a configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Set the output path
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Restrict the document to records carrying any of `keywords`
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Set the output format
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// The effective output path
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_file_name()))
    }

    /// The keyword filter this configuration asks for
    #[must_use]
    pub fn filter(&self) -> KeywordFilter {
        KeywordFilter::from_option(self.keywords.clone())
    }
}
