//! Output formats for the publication list
//!
//! Each format supplies the [`Markup`] used inside citations plus the
//! document shell and the per-record fragment. Field text is inserted
//! verbatim; BibTeX sources that contain markup-significant characters are
//! passed through as the author wrote them.

use crate::citation::Markup;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Relative name of the script providing `copyToClipboard`
pub const SCRIPT: &str = "script.js";

/// Document-level layout on top of citation markup
pub trait DocumentFormat: Markup {
    /// Text before the first fragment
    fn header(&self) -> &'static str;
    /// Text after the last fragment
    fn footer(&self) -> &'static str;
    /// Write one record: its citation, a copy control and the raw record
    fn fragment(&self, out: &mut dyn Write, id: &str, citation: &str, raw: &str) -> fmt::Result;
}

/// Selectable output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone HTML page with copy-to-clipboard buttons
    #[default]
    Html,
    /// Markdown list with fenced BibTeX blocks
    Markdown,
}

impl OutputFormat {
    /// The layout implementing this format
    #[must_use]
    pub fn layout(self) -> &'static dyn DocumentFormat {
        match self {
            Self::Html => &Html,
            Self::Markdown => &Markdown,
        }
    }

    /// Output file name used when none is configured
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Html => "publication_list.html",
            Self::Markdown => "publication_list.md",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// The HTML publication page
#[derive(Debug, Clone, Copy)]
pub struct Html;

const HTML_HEADER: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Publication List</title>
    <link rel="stylesheet" href="style.css">
    <script type="text/javascript" src="script.js"></script>
</head>
<body>
    <h1>Publication List</h1>
"#;

const HTML_FOOTER: &str = "\n</body>\n</html>\n";

impl Markup for Html {
    fn authors(&self, out: &mut dyn Write, authors: &str) -> fmt::Result {
        write!(out, r#"<span class="entry-authors">{authors}</span>"#)
    }

    fn year(&self, out: &mut dyn Write, year: &str) -> fmt::Result {
        write!(out, r#"<span class="entry-year"> ({year})</span>"#)
    }

    fn line_break(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("<br>")
    }

    fn title(&self, out: &mut dyn Write, title: &str, link: Option<&str>) -> fmt::Result {
        match link {
            Some(href) => write!(
                out,
                r#"<span class="entry-title"><a href="{href}">{title}</a></span>"#
            ),
            None => write!(out, r#"<span class="entry-title">{title}</span>"#),
        }
    }

    fn emphasis(&self, out: &mut dyn Write, text: &str) -> fmt::Result {
        write!(out, "<em>{text}</em>")
    }
}

impl DocumentFormat for Html {
    fn header(&self) -> &'static str {
        HTML_HEADER
    }

    fn footer(&self) -> &'static str {
        HTML_FOOTER
    }

    fn fragment(&self, out: &mut dyn Write, id: &str, citation: &str, raw: &str) -> fmt::Result {
        write!(
            out,
            r#"
    <div class="publications">
        <p class="entry">{citation}</p>
        <button class="copy-button" onclick="copyToClipboard('{id}')">Copy BibTeX</button>
        <pre id="{id}">{raw}</pre>
    </div>
"#
        )
    }
}

/// A Markdown publication list, e.g. for a README
#[derive(Debug, Clone, Copy)]
pub struct Markdown;

impl Markup for Markdown {
    fn authors(&self, out: &mut dyn Write, authors: &str) -> fmt::Result {
        out.write_str(authors)
    }

    fn year(&self, out: &mut dyn Write, year: &str) -> fmt::Result {
        write!(out, " ({year})")
    }

    fn line_break(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("\\\n")
    }

    fn title(&self, out: &mut dyn Write, title: &str, link: Option<&str>) -> fmt::Result {
        match link {
            Some(href) => write!(out, "**[{title}]({href})**"),
            None => write!(out, "**{title}**"),
        }
    }

    fn emphasis(&self, out: &mut dyn Write, text: &str) -> fmt::Result {
        write!(out, "*{text}*")
    }
}

impl DocumentFormat for Markdown {
    fn header(&self) -> &'static str {
        "# Publication List\n"
    }

    fn footer(&self) -> &'static str {
        ""
    }

    fn fragment(&self, out: &mut dyn Write, id: &str, citation: &str, raw: &str) -> fmt::Result {
        write!(
            out,
            "\n<a id=\"{id}\"></a>\n{citation}\n\n```bibtex\n{raw}\n```\n"
        )
    }
}
