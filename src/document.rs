//! Publication-list assembly: sort, filter, render, write

use crate::citation::Citation;
use crate::config::Config;
use crate::database::ParseOptions;
use crate::filter::KeywordFilter;
use crate::render::{DocumentFormat, OutputFormat, SCRIPT};
use crate::sort::sort_entries;
use crate::writer::{self, WriterConfig};
use crate::{Entry, Error, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fields left out of the raw record shown next to each citation
pub const ASSEMBLER_EXCLUDED: [&str; 2] = ["file", "keywords"];

/// Clipboard helper referenced by the HTML shell
pub const CLIPBOARD_SCRIPT: &str = r"function copyToClipboard(id) {
  const bibtexCode = document.getElementById(id).textContent;
  navigator.clipboard.writeText(bibtexCode).then(() => {
      alert('BibTeX copied to clipboard!');
  });
}
";

/// Outcome of [`generate_publication_list`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Where the document was written
    pub output_path: PathBuf,
    /// Records parsed from the source
    pub total: usize,
    /// Records that passed the keyword filter
    pub included: usize,
    /// Records dropped for having a non-standard entry type
    pub skipped_types: usize,
    /// Where the clipboard script was written, if requested
    pub script_path: Option<PathBuf>,
}

/// Render `entries` as a complete document
///
/// Entries are sorted newest first, then filtered; each survivor becomes
/// one fragment holding its citation and its raw record. Fails before
/// rendering anything if any entry has a non-integer year.
pub fn render_document(
    entries: &[Entry<'_>],
    filter: &KeywordFilter,
    format: OutputFormat,
) -> Result<String> {
    assemble(entries, filter, format).map(|(document, _)| document)
}

fn assemble(
    entries: &[Entry<'_>],
    filter: &KeywordFilter,
    format: OutputFormat,
) -> Result<(String, usize)> {
    let selected: Vec<&Entry<'_>> = sort_entries(entries)?
        .into_iter()
        .filter(|entry| {
            let keep = filter.matches(entry);
            if !keep {
                debug!(key = %entry.key, "filtered out");
            }
            keep
        })
        .collect();

    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_document(&mut out, format.layout(), &selected);
    Ok((out, selected.len()))
}

fn write_document(
    out: &mut dyn fmt::Write,
    layout: &dyn DocumentFormat,
    entries: &[&Entry<'_>],
) -> fmt::Result {
    let raw_config = WriterConfig::excluding(ASSEMBLER_EXCLUDED);

    out.write_str(layout.header())?;
    for entry in entries {
        let citation = Citation::from_entry(entry).render(layout);
        let raw = writer::to_string(entry, &raw_config);
        layout.fragment(out, entry.key(), &citation, &raw)?;
    }
    out.write_str(layout.footer())
}

/// Read, render and write the publication list described by `config`
///
/// Nothing is written unless reading, parsing and rendering all succeed.
pub fn generate_publication_list(config: &Config) -> Result<Report> {
    let source = &config.source_path;
    let content = fs::read_to_string(source).map_err(|e| Error::SourceRead {
        path: source.clone(),
        source: e,
    })?;

    let db = ParseOptions::new()
        .keep_nonstandard_types(config.include_nonstandard_types)
        .parse(&content)?;
    let stats = db.stats();
    debug!(
        source = %source.display(),
        entries = stats.total_entries,
        skipped = stats.skipped_entries,
        "loaded bibliography"
    );

    let (document, included) = assemble(db.entries(), &config.filter(), config.format)?;

    let output_path = config.output_path();
    write_file(&output_path, &document)?;
    info!(
        path = %output_path.display(),
        included,
        total = stats.total_entries,
        format = %config.format,
        "wrote publication list"
    );

    let script_path = if config.emit_script {
        Some(write_script(sibling_dir(&output_path))?)
    } else {
        None
    };

    Ok(Report {
        output_path,
        total: stats.total_entries,
        included,
        skipped_types: stats.skipped_entries,
        script_path,
    })
}

/// Write the clipboard script into `dir`, returning its path
pub fn write_script(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = dir.as_ref().join(SCRIPT);
    write_file(&path, CLIPBOARD_SCRIPT)?;
    debug!(path = %path.display(), "wrote clipboard script");
    Ok(path)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn sibling_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryType;
    use pretty_assertions::assert_eq;

    fn entry<'a>(key: &'a str, author: &'a str, year: &'a str, keywords: &'a str) -> Entry<'a> {
        Entry::new(EntryType::Article, key)
            .with_field("author", author)
            .with_field("title", "T")
            .with_field("year", year)
            .with_field("keywords", keywords)
            .with_field("file", "paper.pdf")
    }

    fn sample() -> Vec<Entry<'static>> {
        vec![
            entry("zed", "Zed, Zoe", "2020", "nlp"),
            entry("alice", "Alice Cooper", "2019", "vision"),
            entry("adams", "Adams, Amy", "2020", "nlp,vision"),
        ]
    }

    fn fragment_order(document: &str, keys: &[&str]) -> Vec<usize> {
        keys.iter()
            .map(|key| document.find(&format!("<pre id=\"{key}\">")).unwrap())
            .collect()
    }

    #[test]
    fn test_fragments_follow_sort_order() {
        let document = render_document(&sample(), &KeywordFilter::all(), OutputFormat::Html).unwrap();
        let positions = fragment_order(&document, &["adams", "zed", "alice"]);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_filter_drops_fragments() {
        let document =
            render_document(&sample(), &KeywordFilter::any_of(["vision"]), OutputFormat::Html)
                .unwrap();
        assert!(document.contains("<pre id=\"adams\">"));
        assert!(document.contains("<pre id=\"alice\">"));
        assert!(!document.contains("<pre id=\"zed\">"));
    }

    #[test]
    fn test_raw_record_excludes_file_and_keywords() {
        let entries = vec![entry("k", "A B", "2000", "x")];
        let document = render_document(&entries, &KeywordFilter::all(), OutputFormat::Html).unwrap();
        assert!(document.contains("<pre id=\"k\">@article{k,\nauthor = {A B},\ntitle = {T},\nyear = {2000}\n}</pre>"));
        assert!(!document.contains("paper.pdf"));
    }

    #[test]
    fn test_empty_input_is_just_the_shell() {
        let document = render_document(&[], &KeywordFilter::all(), OutputFormat::Html).unwrap();
        let layout = OutputFormat::Html.layout();
        assert_eq!(document, format!("{}{}", layout.header(), layout.footer()));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let entries = sample();
        let filter = KeywordFilter::any_of(["nlp"]);
        for format in [OutputFormat::Html, OutputFormat::Markdown] {
            let first = render_document(&entries, &filter, format).unwrap();
            let second = render_document(&entries, &filter, format).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_invalid_year_fails_even_when_filtered_out() {
        let entries = vec![
            entry("ok", "A B", "2000", "keep"),
            entry("bad", "C D", "forthcoming", "drop"),
        ];
        let err =
            render_document(&entries, &KeywordFilter::any_of(["keep"]), OutputFormat::Html)
                .unwrap_err();
        assert!(matches!(err, Error::InvalidYear { .. }));
    }

    #[test]
    fn test_bare_numbers_render_as_written() {
        let db = crate::Database::parse(
            "@article{k, title = {T}, journal = {J}, volume = 02, number = 007, year = 2020}",
        )
        .unwrap();
        let document =
            render_document(db.entries(), &KeywordFilter::all(), OutputFormat::Html).unwrap();

        assert!(document.contains(" <em>J</em>, <em>02</em>(007)</p>"));
        assert!(document.contains("volume = {02},\nnumber = {007},\nyear = {2020}\n}</pre>"));
    }

    #[test]
    fn test_year_too_small_to_negate_is_rejected() {
        let entries = vec![entry("k", "A B", "-9223372036854775808", "x")];
        let err = render_document(&entries, &KeywordFilter::all(), OutputFormat::Html).unwrap_err();
        assert!(matches!(err, Error::InvalidYear { .. }));
    }

    #[test]
    fn test_markdown_document() {
        let entries = vec![entry("k", "Jane Doe", "2001", "x")];
        let document =
            render_document(&entries, &KeywordFilter::all(), OutputFormat::Markdown).unwrap();
        assert!(document.starts_with("# Publication List\n"));
        assert!(document.contains("```bibtex\n@article{k,"));
        assert!(document.contains("Doe, J. (2001)"));
    }

    #[test]
    fn test_generate_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("refs.bib");
        fs::write(
            &source,
            "@article{a, author = {Doe, Jane}, title = {One}, year = 2001, keywords = {x}}\n\
             @online{web, title = {Site}, year = 2002}\n\
             @book{b, author = {Roe, Rick}, title = {Two}, year = 1999, keywords = {y}}\n",
        )
        .unwrap();
        let output = dir.path().join("out.html");

        let config = Config::new(&source).with_output(&output).with_keywords(["x"]);
        let report = generate_publication_list(&config).unwrap();

        assert_eq!(
            report,
            Report {
                output_path: output.clone(),
                total: 2,
                included: 1,
                skipped_types: 1,
                script_path: None,
            }
        );
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("<pre id=\"a\">"));
        assert!(!written.contains("<pre id=\"b\">"));
    }

    #[test]
    fn test_generate_emits_script_next_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("refs.bib");
        fs::write(&source, "@misc{m, title = {M}}").unwrap();

        let mut config = Config::new(&source).with_output(dir.path().join("list.html"));
        config.emit_script = true;
        let report = generate_publication_list(&config).unwrap();

        let script = report.script_path.unwrap();
        assert_eq!(script, dir.path().join("script.js"));
        assert_eq!(fs::read_to_string(script).unwrap(), CLIPBOARD_SCRIPT);
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("absent.bib"));
        let err = generate_publication_list(&config).unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
    }

    #[test]
    fn test_failed_render_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("refs.bib");
        fs::write(&source, "@article{a, year = {soon}}").unwrap();
        let output = dir.path().join("out.html");

        let err = generate_publication_list(&Config::new(&source).with_output(&output)).unwrap_err();
        assert!(err.is_parse_error());
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("refs.bib");
        fs::write(&source, "@misc{m, title = {M}}").unwrap();
        let output = dir.path().join("missing-dir").join("out.html");

        let err = generate_publication_list(&Config::new(&source).with_output(&output)).unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
    }

    #[test]
    fn test_sibling_dir() {
        assert_eq!(sibling_dir(Path::new("out.html")), Path::new("."));
        assert_eq!(sibling_dir(Path::new("site/out.html")), Path::new("site"));
    }
}
