//! Keyword-based selection of records

use crate::Entry;

/// Selects records whose `keywords` field contains a requested tag
///
/// Tags are the comma-separated parts of the field, compared exactly: no
/// trimming and no case folding, so `"nlp, vision"` has the tags `"nlp"` and
/// `" vision"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    requested: Option<Vec<String>>,
}

impl KeywordFilter {
    /// A filter that accepts every record
    #[must_use]
    pub const fn all() -> Self {
        Self { requested: None }
    }

    /// A filter that accepts records carrying any of `keywords`
    pub fn any_of<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requested: Some(keywords.into_iter().map(Into::into).collect()),
        }
    }

    /// Build from an optional keyword list, `None` meaning no filtering
    #[must_use]
    pub fn from_option(keywords: Option<Vec<String>>) -> Self {
        Self {
            requested: keywords,
        }
    }

    /// The requested keywords, if filtering is active
    #[must_use]
    pub fn requested(&self) -> Option<&[String]> {
        self.requested.as_deref()
    }

    /// Whether `entry` passes the filter
    #[must_use]
    pub fn matches(&self, entry: &Entry<'_>) -> bool {
        match &self.requested {
            None => true,
            Some(requested) => {
                let tags: Vec<&str> = tags(entry).collect();
                requested.iter().any(|keyword| tags.contains(&keyword.as_str()))
            }
        }
    }
}

/// The comma-separated tags of an entry's `keywords` field
///
/// A missing field yields one empty tag.
pub fn tags<'e>(entry: &'e Entry<'_>) -> impl Iterator<Item = &'e str> {
    entry.get_or_empty("keywords").split(',')
}
