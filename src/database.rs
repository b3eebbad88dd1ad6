//! BibTeX database representation

use crate::parser::{value::normalize_whitespace, ParsedItem};
use crate::{latex, Entry, Error, Result, Value};
use ahash::{AHashMap, AHashSet};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Month macros every BibTeX style predefines
const MONTHS: [(&str, &str); 12] = [
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

/// Parser configuration with builder pattern
#[derive(Debug, Default)]
pub struct ParseOptions {
    keep_nonstandard_types: bool,
}

impl ParseOptions {
    /// Create new parse options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep entries whose type is not a classic BibTeX type (`@online`,
    /// `@dataset`, ...). They are dropped by default.
    #[must_use]
    pub const fn keep_nonstandard_types(mut self, keep: bool) -> Self {
        self.keep_nonstandard_types = keep;
        self
    }

    /// Parse a single input string
    pub fn parse<'a>(&self, input: &'a str) -> Result<Database<'a>> {
        Database::parse_with(input, self)
    }
}

/// A parsed BibTeX database
///
/// Entries are fully expanded: macros are resolved, LaTeX is decoded and
/// whitespace is collapsed, so every field value is plain text.
#[derive(Debug, Clone, Default)]
pub struct Database<'a> {
    /// Bibliography entries, in source order
    entries: Vec<Entry<'a>>,
    /// String definitions, including the predefined months
    strings: AHashMap<Cow<'a, str>, Value<'a>>,
    /// Expanded preambles
    preambles: Vec<Cow<'a, str>>,
    /// Comments and free text between items
    comments: Vec<Cow<'a, str>>,
    /// Number of entries dropped for having a non-standard type
    skipped: usize,
}

impl<'a> Database<'a> {
    /// Create a new database holding only the predefined month macros
    #[must_use]
    pub fn new() -> Self {
        let strings = MONTHS
            .iter()
            .map(|(name, full)| (Cow::Borrowed(*name), Value::Literal(Cow::Borrowed(*full))))
            .collect();
        Self {
            strings,
            ..Self::default()
        }
    }

    /// Parse a BibTeX database from a string with default options
    pub fn parse(input: &'a str) -> Result<Self> {
        Self::parse_with(input, &ParseOptions::default())
    }

    /// Create a parser with options
    #[must_use]
    pub fn parser() -> ParseOptions {
        ParseOptions::new()
    }

    fn parse_with(input: &'a str, options: &ParseOptions) -> Result<Self> {
        let items = crate::parser::parse_bibtex(input)?;
        let mut db = Self::new();

        // First pass: collect string definitions, later ones win
        for item in &items {
            if let ParsedItem::String(name, value) = item {
                db.strings
                    .insert(Cow::Owned(name.to_ascii_lowercase()), value.clone());
            }
        }

        let mut seen_keys = AHashSet::new();

        for item in items {
            match item {
                ParsedItem::Entry(entry) => {
                    if !options.keep_nonstandard_types && !entry.ty.is_standard() {
                        debug!(key = %entry.key, ty = %entry.ty, "skipping non-standard entry type");
                        db.skipped += 1;
                        continue;
                    }
                    if !seen_keys.insert(entry.key.clone()) {
                        warn!(key = %entry.key, "duplicate citation key");
                    }
                    let entry = db.expand_entry(entry)?;
                    db.entries.push(entry);
                }
                ParsedItem::Preamble(value) => {
                    let text = db.expand_value(value, &mut Vec::new())?;
                    db.preambles.push(text);
                }
                ParsedItem::Comment(text) => db.comments.push(Cow::Borrowed(text)),
                ParsedItem::String(_, _) => {}
            }
        }

        let stats = db.stats();
        debug!(
            entries = stats.total_entries,
            strings = stats.total_strings,
            preambles = stats.total_preambles,
            comments = stats.total_comments,
            skipped = stats.skipped_entries,
            "parsed bibliography"
        );

        Ok(db)
    }

    /// Resolve every field of `entry` to decoded plain text
    fn expand_entry(&self, mut entry: Entry<'a>) -> Result<Entry<'a>> {
        for field in &mut entry.fields {
            if field.name.chars().any(|c| c.is_ascii_uppercase()) {
                field.name = Cow::Owned(field.name.to_ascii_lowercase());
            }

            let raw = self.expand_value(std::mem::take(&mut field.value), &mut Vec::new())?;
            field.value = Value::Literal(decode(raw));
        }
        entry.fields.shrink_to_fit();
        Ok(entry)
    }

    /// Expand variables and concatenations into a single string
    ///
    /// `stack` holds the macro names currently being expanded.
    fn expand_value(&self, value: Value<'a>, stack: &mut Vec<String>) -> Result<Cow<'a, str>> {
        match value {
            Value::Literal(s) => Ok(s),
            Value::Number(digits) => Ok(digits),
            Value::Variable(name) => {
                let lower = name.to_ascii_lowercase();
                if stack.contains(&lower) {
                    return Err(Error::CircularReference(name.into_owned()));
                }
                let definition = self
                    .strings
                    .get(lower.as_str())
                    .ok_or_else(|| Error::UndefinedVariable(name.to_string()))?
                    .clone();

                stack.push(lower);
                let expanded = self.expand_value(definition, stack);
                stack.pop();
                expanded
            }
            Value::Concat(parts) => {
                let mut combined = String::new();
                for part in *parts {
                    combined.push_str(&self.expand_value(part, stack)?);
                }
                Ok(Cow::Owned(combined))
            }
        }
    }

    /// Get all entries
    #[must_use]
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    /// Consume the database, keeping only its entries
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry<'a>> {
        self.entries
    }

    /// Get all string definitions
    #[must_use]
    pub const fn strings(&self) -> &AHashMap<Cow<'a, str>, Value<'a>> {
        &self.strings
    }

    /// Get all preambles
    #[must_use]
    pub fn preambles(&self) -> &[Cow<'a, str>] {
        &self.preambles
    }

    /// Get all comments
    #[must_use]
    pub fn comments(&self) -> &[Cow<'a, str>] {
        &self.comments
    }

    /// Find an entry by citation key
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&Entry<'a>> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Convert to owned version (no borrowed data)
    #[must_use]
    pub fn into_owned(self) -> Database<'static> {
        Database {
            entries: self.entries.into_iter().map(Entry::into_owned).collect(),
            strings: self
                .strings
                .into_iter()
                .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned()))
                .collect(),
            preambles: owned(self.preambles),
            comments: owned(self.comments),
            skipped: self.skipped,
        }
    }

    /// Get statistics about the database
    #[must_use]
    pub fn stats(&self) -> DatabaseStats {
        let mut type_counts = AHashMap::new();
        for entry in &self.entries {
            *type_counts.entry(entry.ty.to_string()).or_insert(0) += 1;
        }

        DatabaseStats {
            total_entries: self.entries.len(),
            total_strings: self.strings.len(),
            total_preambles: self.preambles.len(),
            total_comments: self.comments.len(),
            skipped_entries: self.skipped,
            entries_by_type: type_counts,
        }
    }
}

/// Statistics about a database
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Total number of string definitions, predefined months included
    pub total_strings: usize,
    /// Total number of preambles
    pub total_preambles: usize,
    /// Total number of comments
    pub total_comments: usize,
    /// Entries dropped for having a non-standard type
    pub skipped_entries: usize,
    /// Entry counts by type
    pub entries_by_type: AHashMap<String, usize>,
}

/// Collapse whitespace, then convert LaTeX to Unicode
fn decode(raw: Cow<'_, str>) -> Cow<'_, str> {
    let collapsed = match raw {
        Cow::Borrowed(s) => normalize_whitespace(s),
        Cow::Owned(s) => Cow::Owned(normalize_whitespace(&s).into_owned()),
    };
    match collapsed {
        Cow::Borrowed(s) => latex::to_unicode(s),
        Cow::Owned(s) => Cow::Owned(latex::to_unicode(&s).into_owned()),
    }
}

fn owned(items: Vec<Cow<'_, str>>) -> Vec<Cow<'static, str>> {
    items
        .into_iter()
        .map(|c| Cow::Owned(c.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryType;

    #[test]
    fn test_macro_expansion() {
        let input = r#"
            @string{group = "Munich Center for Machine Learning"}

            @techreport{report2023,
                author = "Doe, Jane",
                institution = group,
                year = 2023
            }
        "#;

        let db = Database::parse(input).unwrap();
        assert_eq!(db.entries().len(), 1);

        let entry = &db.entries()[0];
        assert_eq!(
            entry.get("institution"),
            Some("Munich Center for Machine Learning")
        );
        assert_eq!(entry.get("year"), Some("2023"));
    }

    #[test]
    fn test_zero_copy_preservation() {
        let input = r#"@article{test, title = "This is borrowed"}"#;

        let db = Database::parse(input).unwrap();
        let entry = &db.entries()[0];

        match &entry.fields[0].value {
            Value::Literal(cow) => assert!(matches!(cow, Cow::Borrowed(_))),
            other => panic!("Expected literal, got {other:?}"),
        }
    }

    #[test]
    fn test_concatenation_and_months() {
        let input = r#"
            @string{first = "Hello"}
            @string{second = "World"}

            @article{test,
                title = first # ", " # second,
                month = jan,
                note = "Due " # dec # " 24"
            }
        "#;

        let db = Database::parse(input).unwrap();
        let entry = &db.entries()[0];

        assert_eq!(entry.get("title"), Some("Hello, World"));
        assert_eq!(entry.get("month"), Some("January"));
        assert_eq!(entry.get("note"), Some("Due December 24"));
    }

    #[test]
    fn test_bare_numbers_keep_their_text() {
        let input = "@article{k, volume = 02, number = 007, pages = +5, year = 2020}";
        let db = Database::parse(input).unwrap();
        let entry = &db.entries()[0];

        assert_eq!(entry.get("volume"), Some("02"));
        assert_eq!(entry.get("number"), Some("007"));
        assert_eq!(entry.get("pages"), Some("+5"));
        assert_eq!(entry.get("year"), Some("2020"));
    }

    #[test]
    fn test_month_macro_can_be_overridden() {
        let input = r#"
            @string{jan = "Jan."}
            @misc{m, month = jan}
        "#;

        let db = Database::parse(input).unwrap();
        assert_eq!(db.entries()[0].get("month"), Some("Jan."));
    }

    #[test]
    fn test_undefined_variable() {
        let input = "@article{test, journal = nowhere}";
        let err = Database::parse(input).unwrap_err();
        assert!(matches!(err, Error::UndefinedVariable(ref name) if name == "nowhere"));
    }

    #[test]
    fn test_circular_reference() {
        let input = r#"
            @string{a = b}
            @string{b = "x" # a}
            @misc{loop, note = a}
        "#;
        let err = Database::parse(input).unwrap_err();
        assert!(matches!(err, Error::CircularReference(_)));
    }

    #[test]
    fn test_field_names_are_lowercased() {
        let input = r#"@ARTICLE{k, Title = {T}, YEAR = 2001}"#;
        let db = Database::parse(input).unwrap();
        let entry = &db.entries()[0];

        assert_eq!(entry.ty, EntryType::Article);
        assert_eq!(entry.fields[0].name, "title");
        assert_eq!(entry.fields[1].name, "year");
    }

    #[test]
    fn test_values_are_decoded_and_collapsed() {
        let input = "@article{k, author = {M{\\\"u}ller,\n      J{\\'o}zef}}";
        let db = Database::parse(input).unwrap();
        assert_eq!(db.entries()[0].get("author"), Some("Müller, Józef"));
    }

    #[test]
    fn test_nonstandard_types_are_skipped_by_default() {
        let input = r#"
            @online{web, title = "Site"}
            @article{paper, title = "Paper"}
        "#;

        let db = Database::parse(input).unwrap();
        assert_eq!(db.entries().len(), 1);
        assert_eq!(db.stats().skipped_entries, 1);
        assert!(db.find_by_key("web").is_none());

        let db = Database::parser()
            .keep_nonstandard_types(true)
            .parse(input)
            .unwrap();
        assert_eq!(db.entries().len(), 2);
        assert_eq!(db.entries()[0].entry_type().to_string(), "online");
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let input = r#"
            @misc{same, title = "One"}
            @misc{same, title = "Two"}
        "#;

        let db = Database::parse(input).unwrap();
        assert_eq!(db.entries().len(), 2);
        assert_eq!(db.find_by_key("same").and_then(|e| e.get("title")), Some("One"));
    }

    #[test]
    fn test_database_stats() {
        let input = r#"
            @string{acl = "ACL"}
            @preamble{"Group bibliography"}
            @comment{Exported from the reference manager}
            @article{a1, title = "Sparse Attention"}
            @article{a2, title = "Dense Retrieval"}
            @book{b1, title = "Programming"}
        "#;

        let db = Database::parse(input).unwrap();
        let stats = db.stats();

        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_strings, 13);
        assert_eq!(stats.total_preambles, 1);
        assert_eq!(stats.total_comments, 1);
        assert_eq!(stats.entries_by_type.get("article"), Some(&2));
        assert_eq!(stats.entries_by_type.get("book"), Some(&1));
        assert_eq!(db.preambles()[0], "Group bibliography");
    }

    #[test]
    fn test_into_owned_keeps_content() {
        let owned = {
            let input = String::from(r#"@book{k, title = {Owned}}"#);
            Database::parse(&input).unwrap().into_owned()
        };
        assert_eq!(owned.entries()[0].get("title"), Some("Owned"));
    }
}
