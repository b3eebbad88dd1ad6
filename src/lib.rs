//! # bibtex-publist
//!
//! Turn a BibTeX bibliography into a static publication list.
//!
//! ## Features
//!
//! - Zero-copy BibTeX parsing with source locations in error messages
//! - `@string` macro expansion and LaTeX-to-Unicode decoding
//! - APA-like citations with DOI links, newest publications first
//! - Keyword selection of records
//! - HTML pages with copy-to-clipboard buttons, or Markdown
//!
//! ## Example
//!
//! ```
//! use bibtex_publist::{render_document, Database, KeywordFilter, OutputFormat};
//!
//! let input = r#"
//!     @article{einstein1905,
//!         author = "Albert Einstein",
//!         title = "Zur Elektrodynamik bewegter K{\"o}rper",
//!         journal = "Annalen der Physik",
//!         year = 1905,
//!         keywords = {physics}
//!     }
//! "#;
//!
//! let db = Database::parse(input)?;
//! let entry = &db.entries()[0];
//! assert_eq!(entry.get("title"), Some("Zur Elektrodynamik bewegter Körper"));
//!
//! let html = render_document(
//!     db.entries(),
//!     &KeywordFilter::any_of(["physics"]),
//!     OutputFormat::Html,
//! )?;
//! assert!(html.contains("Einstein, A."));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    missing_debug_implementations
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod citation;
pub mod config;
pub mod error;
pub mod filter;
pub mod latex;
pub mod model;
pub mod names;
pub mod parser;
pub mod render;
pub mod sort;
pub mod writer;

mod database;
mod document;

pub use config::Config;
pub use database::{Database, DatabaseStats, ParseOptions};
pub use document::{
    generate_publication_list, render_document, write_script, Report, ASSEMBLER_EXCLUDED,
    CLIPBOARD_SCRIPT,
};
pub use error::{Error, Result};
pub use filter::KeywordFilter;
pub use model::{Entry, EntryType, Field, Value};
pub use render::OutputFormat;

/// Re-export of the commonly used types
pub mod prelude {
    pub use crate::{
        Config, Database, Entry, EntryType, Error, KeywordFilter, OutputFormat, Result, Value,
    };
}

/// Parse a BibTeX database from a string
pub fn parse(input: &str) -> Result<Database<'_>> {
    Database::parse(input)
}

/// Parse a BibTeX database from a file
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Database<'static>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::SourceRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content).map(Database::into_owned)
}
