//! Author name formatting
//!
//! Author fields are split on the literal `" and "` separator. Each author is
//! rendered surname first followed by initials, accepting both BibTeX name
//! orders:
//!
//! - `"Last, First Middle"` (comma present)
//! - `"First Middle Last"` (no comma, the last word is the surname)
//!
//! ```
//! use bibtex_publist::names::format_authors;
//!
//! assert_eq!(format_authors("Smith, John Q. and Ada Lovelace"), "Smith, J. Q., Lovelace, A.");
//! ```

/// Separator between authors in a BibTeX author field
pub const AUTHOR_SEPARATOR: &str = " and ";

/// Split an author field into its raw author names
///
/// Blank input yields no authors.
pub fn split_authors(authors: &str) -> impl Iterator<Item = &str> {
    let authors = if authors.trim().is_empty() { "" } else { authors };
    authors
        .split(AUTHOR_SEPARATOR)
        .filter(|name| !name.trim().is_empty())
}

/// Format a whole author field, joining authors with `", "`
#[must_use]
pub fn format_authors(authors: &str) -> String {
    split_authors(authors)
        .map(format_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format one author as `"Surname, F. M."`
///
/// A name without given names keeps the trailing separator: `"Plato, "`.
#[must_use]
pub fn format_name(name: &str) -> String {
    let (surname, given) = match name.split_once(',') {
        Some((surname, given)) => (surname.trim(), initials(given.split_whitespace())),
        None => {
            let mut words: Vec<&str> = name.split_whitespace().collect();
            let surname = words.pop().unwrap_or_default();
            (surname, initials(words.into_iter()))
        }
    };

    format!("{surname}, {given}")
}

/// First character of every given name followed by a period
fn initials<'a>(given: impl Iterator<Item = &'a str>) -> String {
    given
        .filter_map(|name| name.chars().next())
        .map(|c| format!("{c}."))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_surname_first() {
        assert_eq!(format_name("Smith, John Quincy"), "Smith, J. Q.");
        assert_eq!(format_name("  van Dyke ,  Dick  "), "van Dyke, D.");
    }

    #[test]
    fn test_given_names_first() {
        assert_eq!(format_name("John Quincy Smith"), "Smith, J. Q.");
    }

    #[test]
    fn test_both_orders_agree() {
        assert_eq!(format_name("Smith, John Q."), format_name("John Q. Smith"));
        assert_eq!(format_name("John Q. Smith"), "Smith, J. Q.");
    }

    #[test]
    fn test_single_word_keeps_separator() {
        assert_eq!(format_name("Plato"), "Plato, ");
        assert_eq!(format_name("Plato,"), "Plato, ");
        assert_eq!(format_name("Plato,   "), "Plato, ");
    }

    #[test]
    fn test_only_first_comma_splits() {
        assert_eq!(format_name("King, Jr., Martin Luther"), "King, J. M. L.");
    }

    #[test]
    fn test_unicode_initials() {
        assert_eq!(format_name("Émile Zola"), "Zola, É.");
        assert_eq!(format_name("Gödel, Kurt"), "Gödel, K.");
    }

    #[test]
    fn test_format_authors() {
        assert_eq!(
            format_authors("Smith, John and Jane Doe and Plato"),
            "Smith, J., Doe, J., Plato, "
        );
    }

    #[test]
    fn test_empty_author_field() {
        assert_eq!(format_authors(""), "");
        assert_eq!(format_authors("   "), "");
        assert_eq!(split_authors("").count(), 0);
    }

    #[test]
    fn test_separator_is_case_and_space_sensitive() {
        assert_eq!(split_authors("Tom and Jerry").count(), 2);
        assert_eq!(split_authors("Tom AND Jerry").count(), 1);
        assert_eq!(split_authors("Alexandra Smith").count(), 1);
    }

    proptest! {
        #[test]
        fn prop_name_orders_normalize_identically(
            surname in "[A-Z][a-z]{1,10}",
            given in proptest::collection::vec("[A-Z][a-z]{0,8}", 1..4),
        ) {
            let comma_form = format!("{surname}, {}", given.join(" "));
            let natural_form = format!("{} {surname}", given.join(" "));
            let expected_initials = given
                .iter()
                .map(|g| format!("{}.", &g[..1]))
                .collect::<Vec<_>>()
                .join(" ");

            prop_assert_eq!(format_name(&comma_form), format!("{surname}, {expected_initials}"));
            prop_assert_eq!(format_name(&natural_form), format_name(&comma_form));
        }

        #[test]
        fn prop_one_formatted_name_per_author(
            authors in proptest::collection::vec("[A-Z][a-z]{1,6} [A-Z][a-z]{1,6}", 1..6),
        ) {
            let field = authors.join(AUTHOR_SEPARATOR);
            let formatted = format_authors(&field);
            prop_assert_eq!(formatted.matches(", ").count(), authors.len() * 2 - 1);
        }
    }
}
