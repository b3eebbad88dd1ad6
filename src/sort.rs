//! Publication ordering: newest first, then by first author's surname

use crate::names::AUTHOR_SEPARATOR;
use crate::{Entry, Error, Result};

/// Ordering key of one record
///
/// Derived `Ord` compares the negated year first, so higher years sort
/// earlier, then the lowercased surname of the first author.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    /// The publication year, negated
    pub neg_year: i64,
    /// First author's surname, lowercased
    pub surname: String,
}

impl SortKey {
    /// Compute the key of `entry`
    ///
    /// A missing year counts as year 0 and sorts after every dated entry. A
    /// year that is present but not an integer, or whose negation does not
    /// fit an `i64`, is an error.
    pub fn of(entry: &Entry<'_>) -> Result<Self> {
        let year_text = entry.get("year").unwrap_or("0");
        let neg_year = year_text
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(i64::checked_neg)
            .ok_or_else(|| Error::InvalidYear {
                key: entry.key().to_string(),
                value: year_text.to_string(),
            })?;

        Ok(Self {
            neg_year,
            surname: first_surname(entry.get_or_empty("author")).to_lowercase(),
        })
    }
}

/// Surname of the first author, taken verbatim (untrimmed)
///
/// `"Doe, Jane and ..."` gives `"Doe"`, `"Jane Doe and ..."` gives `"Doe"`.
#[must_use]
pub fn first_surname(authors: &str) -> &str {
    let first = authors.split(AUTHOR_SEPARATOR).next().unwrap_or_default();
    match first.split_once(',') {
        Some((surname, _)) => surname,
        None => first.rsplit(' ').next().unwrap_or_default(),
    }
}

/// Sort entries by [`SortKey`], keeping source order between equal keys
///
/// Fails on the first entry with an invalid year, before anything is
/// reordered.
pub fn sort_entries<'e, 'a>(entries: &'e [Entry<'a>]) -> Result<Vec<&'e Entry<'a>>> {
    let mut keyed = entries
        .iter()
        .map(|entry| SortKey::of(entry).map(|key| (key, entry)))
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(keyed.into_iter().map(|(_, entry)| entry).collect())
}
