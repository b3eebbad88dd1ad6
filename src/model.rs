//! Data models for bibliography records

use std::borrow::Cow;
use std::fmt;

/// A bibliography record (article, book, etc.)
///
/// Entries coming out of [`crate::Database`] are fully expanded: every field
/// value is a [`Value::Literal`] holding LaTeX-decoded, NFC-normalized text,
/// and field names are lowercase. Fields keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<'a> {
    /// Entry type (article, book, inproceedings, etc.)
    pub ty: EntryType<'a>,
    /// Citation key
    pub key: Cow<'a, str>,
    /// Fields (author, title, year, etc.)
    pub fields: Vec<Field<'a>>,
}

impl<'a> Entry<'a> {
    /// Create a new entry without fields
    #[must_use]
    pub const fn new(ty: EntryType<'a>, key: &'a str) -> Self {
        Self {
            ty,
            key: Cow::Borrowed(key),
            fields: Vec::new(),
        }
    }

    /// Builder-style field addition, mostly useful in tests
    #[must_use]
    pub fn with_field(mut self, name: &'a str, value: &'a str) -> Self {
        self.fields
            .push(Field::new(name, Value::Literal(Cow::Borrowed(value))));
        self
    }

    /// Get the entry type
    #[must_use]
    pub const fn entry_type(&self) -> &EntryType<'a> {
        &self.ty
    }

    /// Get the citation key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get a text field value by name (case-insensitive)
    ///
    /// Returns `None` when the field is absent or has not been expanded to
    /// text yet.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .and_then(|f| f.value.as_str())
    }

    /// Get a text field value, or the empty string when absent
    #[must_use]
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Get a text field value only when it is present and non-empty
    #[must_use]
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Get all fields
    #[must_use]
    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    /// Add a field
    pub fn add_field(&mut self, field: Field<'a>) {
        self.fields.push(field);
    }

    /// Convert to owned version
    #[must_use]
    pub fn into_owned(self) -> Entry<'static> {
        Entry {
            ty: self.ty.into_owned(),
            key: Cow::Owned(self.key.into_owned()),
            fields: self.fields.into_iter().map(Field::into_owned).collect(),
        }
    }
}

/// BibTeX entry type
///
/// Parsing is case-insensitive and unknown types are kept, lowercased, as
/// [`EntryType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryType<'a> {
    /// Article from a journal
    Article,
    /// Book with publisher
    Book,
    /// Printed work without a named publisher
    Booklet,
    /// Conference paper (older spelling of inproceedings)
    Conference,
    /// Part of a book
    InBook,
    /// Part of a book with its own title
    InCollection,
    /// Article in conference proceedings
    InProceedings,
    /// Conference proceedings
    Proceedings,
    /// Technical documentation
    Manual,
    /// Master's thesis
    MastersThesis,
    /// `PhD` thesis
    PhdThesis,
    /// Technical report
    TechReport,
    /// Unpublished work
    Unpublished,
    /// Miscellaneous
    Misc,
    /// Any other entry type
    Custom(Cow<'a, str>),
}

impl<'a> EntryType<'a> {
    /// Parse from string (case-insensitive)
    #[must_use]
    pub fn parse(s: &'a str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            "booklet" => Self::Booklet,
            "conference" => Self::Conference,
            "inbook" => Self::InBook,
            "incollection" => Self::InCollection,
            "inproceedings" => Self::InProceedings,
            "proceedings" => Self::Proceedings,
            "manual" => Self::Manual,
            "mastersthesis" => Self::MastersThesis,
            "phdthesis" => Self::PhdThesis,
            "techreport" => Self::TechReport,
            "unpublished" => Self::Unpublished,
            "misc" => Self::Misc,
            lower if lower == s => Self::Custom(Cow::Borrowed(s)),
            lower => Self::Custom(Cow::Owned(lower.to_string())),
        }
    }

    /// Whether this is one of the classic BibTeX entry types
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Convert to owned version
    #[must_use]
    pub fn into_owned(self) -> EntryType<'static> {
        match self {
            Self::Custom(s) => EntryType::Custom(Cow::Owned(s.into_owned())),
            Self::Article => EntryType::Article,
            Self::Book => EntryType::Book,
            Self::Booklet => EntryType::Booklet,
            Self::Conference => EntryType::Conference,
            Self::Manual => EntryType::Manual,
            Self::InBook => EntryType::InBook,
            Self::InCollection => EntryType::InCollection,
            Self::InProceedings => EntryType::InProceedings,
            Self::Proceedings => EntryType::Proceedings,
            Self::MastersThesis => EntryType::MastersThesis,
            Self::PhdThesis => EntryType::PhdThesis,
            Self::TechReport => EntryType::TechReport,
            Self::Unpublished => EntryType::Unpublished,
            Self::Misc => EntryType::Misc,
        }
    }
}

impl fmt::Display for EntryType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Article => write!(f, "article"),
            Self::Book => write!(f, "book"),
            Self::Booklet => write!(f, "booklet"),
            Self::Conference => write!(f, "conference"),
            Self::Manual => write!(f, "manual"),
            Self::InBook => write!(f, "inbook"),
            Self::InCollection => write!(f, "incollection"),
            Self::InProceedings => write!(f, "inproceedings"),
            Self::Proceedings => write!(f, "proceedings"),
            Self::MastersThesis => write!(f, "mastersthesis"),
            Self::PhdThesis => write!(f, "phdthesis"),
            Self::TechReport => write!(f, "techreport"),
            Self::Unpublished => write!(f, "unpublished"),
            Self::Misc => write!(f, "misc"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// A field in a BibTeX entry
#[derive(Debug, Clone, PartialEq)]
pub struct Field<'a> {
    /// Field name
    pub name: Cow<'a, str>,
    /// Field value
    pub value: Value<'a>,
}

impl<'a> Field<'a> {
    /// Create a new field
    #[must_use]
    pub const fn new(name: &'a str, value: Value<'a>) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value,
        }
    }

    /// Convert to owned version
    #[must_use]
    pub fn into_owned(self) -> Field<'static> {
        Field {
            name: Cow::Owned(self.name.into_owned()),
            value: self.value.into_owned(),
        }
    }
}

/// A value in a BibTeX field, as written in the source
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String literal (braced or quoted body)
    Literal(Cow<'a, str>),
    /// Bare number, kept as written (sign and leading zeros included)
    Number(Cow<'a, str>),
    /// Values joined with `#`
    Concat(Box<Vec<Value<'a>>>),
    /// Reference to a `@string` macro
    Variable(Cow<'a, str>),
}

impl Default for Value<'_> {
    fn default() -> Self {
        Self::Literal(Cow::Borrowed(""))
    }
}

impl Value<'_> {
    /// Get the value as a string (if it's a literal)
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to owned version
    #[must_use]
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Self::Literal(s) => Value::Literal(Cow::Owned(s.into_owned())),
            Self::Number(n) => Value::Number(Cow::Owned(n.into_owned())),
            Self::Variable(s) => Value::Variable(Cow::Owned(s.into_owned())),
            Self::Concat(parts) => {
                Value::Concat(Box::new(parts.into_iter().map(Value::into_owned).collect()))
            }
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Concat(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " # ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}
