//! Structured citation data and its rendering
//!
//! A [`Citation`] holds everything a formatted reference shows, already
//! cleaned up; [`Citation::render`] lays it out using a [`Markup`]
//! implementation, so the clause order and separator rules live in one place
//! regardless of the output format.

use crate::names::format_authors;
use crate::Entry;
use std::fmt::{self, Write};

/// Resolver prefix for DOI links
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// Where a work appeared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Venue<'e> {
    /// Journal name
    Journal(&'e str),
    /// Proceedings or collection title, with `--` collapsed
    BookTitle(String),
}

impl Venue<'_> {
    /// The venue name as displayed
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Journal(name) => *name,
            Self::BookTitle(name) => name.as_str(),
        }
    }
}

/// The displayable parts of one bibliography record
///
/// Absent and empty fields are both `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation<'e> {
    /// Authors formatted as `"Last, F. M., Other, A."`
    pub authors: String,
    /// Publication year text
    pub year: Option<&'e str>,
    /// Title without enclosing braces, `--` collapsed to `-`
    pub title: String,
    /// Title link target: the DOI resolver URL, else the `url` field
    pub link: Option<String>,
    /// Journal, or booktitle when there is no journal
    pub venue: Option<Venue<'e>>,
    /// Volume
    pub volume: Option<&'e str>,
    /// Issue number
    pub number: Option<&'e str>,
    /// Page range, only kept when there is a venue
    pub pages: Option<String>,
    /// Publisher
    pub publisher: Option<&'e str>,
    /// Bare DOI
    pub doi: Option<&'e str>,
}

impl<'e> Citation<'e> {
    /// Extract the citation parts of `entry`
    #[must_use]
    pub fn from_entry(entry: &'e Entry<'_>) -> Self {
        let doi = entry.non_empty("doi");
        let link = doi
            .map(|doi| format!("{DOI_RESOLVER}{doi}"))
            .or_else(|| entry.non_empty("url").map(str::to_string));

        let venue = entry.non_empty("journal").map(Venue::Journal).or_else(|| {
            entry
                .non_empty("booktitle")
                .map(|b| Venue::BookTitle(collapse_dashes(b)))
        });

        let pages = entry
            .non_empty("pages")
            .filter(|_| venue.is_some())
            .map(collapse_dashes);

        Self {
            authors: format_authors(entry.get_or_empty("author")),
            year: entry.non_empty("year"),
            title: clean_title(entry.get_or_empty("title")),
            link,
            venue,
            volume: entry.non_empty("volume"),
            number: entry.non_empty("number"),
            pages,
            publisher: entry.non_empty("publisher"),
            doi,
        }
    }

    /// Lay the citation out with `markup`
    #[must_use]
    pub fn render<M: Markup + ?Sized>(&self, markup: &M) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(markup, &mut out);
        out
    }

    /// Write the citation to `out` using `markup`
    pub fn write_to<M: Markup + ?Sized>(&self, markup: &M, out: &mut dyn Write) -> fmt::Result {
        markup.authors(out, &self.authors)?;
        markup.year(out, self.year.unwrap_or("n.d."))?;
        markup.line_break(out)?;
        markup.title(out, &self.title, self.link.as_deref())?;
        markup.line_break(out)?;

        if let Some(venue) = &self.venue {
            out.write_char(' ')?;
            markup.emphasis(out, venue.name())?;
        }
        if let Some(volume) = self.volume {
            out.write_str(", ")?;
            markup.emphasis(out, volume)?;
        }
        if let Some(number) = self.number {
            write!(out, "({number})")?;
        }
        if let Some(pages) = &self.pages {
            write!(out, ", {pages}")?;
        }
        if let Some(publisher) = self.publisher {
            if self.venue.is_some() || self.volume.is_some() {
                out.write_str(", ")?;
            }
            out.write_str(publisher)?;
        }
        if let Some(doi) = self.doi {
            markup.line_break(out)?;
            write!(out, "{DOI_RESOLVER}{doi}")?;
        }

        Ok(())
    }
}

/// Output-specific pieces of a citation
pub trait Markup {
    /// Write the formatted author list
    fn authors(&self, out: &mut dyn Write, authors: &str) -> fmt::Result;
    /// Write the year, including its leading space and parentheses
    fn year(&self, out: &mut dyn Write, year: &str) -> fmt::Result;
    /// Write a line break
    fn line_break(&self, out: &mut dyn Write) -> fmt::Result;
    /// Write the title, linked when a target is known
    fn title(&self, out: &mut dyn Write, title: &str, link: Option<&str>) -> fmt::Result;
    /// Write emphasized text
    fn emphasis(&self, out: &mut dyn Write, text: &str) -> fmt::Result;
}

/// Strip enclosing braces from a title and collapse `--` to `-`
#[must_use]
pub fn clean_title(title: &str) -> String {
    collapse_dashes(title.trim_matches(['{', '}']))
}

/// Replace each BibTeX `--` with a single `-`
#[must_use]
pub fn collapse_dashes(text: &str) -> String {
    text.replace("--", "-")
}
