//! Raw BibTeX serialization of single records
//!
//! Records are written back as `@type{key,\nname = {value},\n...\n}` in
//! field order. This is a structural re-serialization: comments, quoting
//! style and whitespace of the original source are not reproduced.

use crate::Entry;
use std::fmt::{self, Write};

/// Configuration for writing records
#[derive(Debug, Clone, Default)]
pub struct WriterConfig {
    /// Field names left out of the output (exact match)
    pub exclude: Vec<String>,
}

impl WriterConfig {
    /// Configuration excluding the given fields
    pub fn excluding<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: fields.into_iter().map(Into::into).collect(),
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}

/// BibTeX record writer
#[derive(Debug)]
pub struct Writer<W: Write> {
    writer: W,
    config: WriterConfig,
}

impl<W: Write> Writer<W> {
    /// Create a new writer with default configuration
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            config: WriterConfig::default(),
        }
    }

    /// Create a new writer with custom configuration
    pub const fn with_config(writer: W, config: WriterConfig) -> Self {
        Self { writer, config }
    }

    /// Write a single entry, without a trailing newline
    pub fn write_entry(&mut self, entry: &Entry) -> fmt::Result {
        write!(self.writer, "@{}{{{}", entry.ty, entry.key)?;

        for field in entry.fields() {
            if self.config.is_excluded(&field.name) {
                continue;
            }
            write!(self.writer, ",\n{} = {{{}}}", field.name, field.value)?;
        }

        write!(self.writer, "\n}}")
    }

    /// Recover the underlying sink
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Serialize one entry to a string, leaving out `config.exclude`
#[must_use]
pub fn to_string(entry: &Entry, config: &WriterConfig) -> String {
    let mut writer = Writer::with_config(String::new(), config.clone());
    // Writing into a String cannot fail
    let _ = writer.write_entry(entry);
    writer.into_inner()
}
