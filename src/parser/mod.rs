//! BibTeX parser implementation using winnow

pub mod entry;
pub mod lexer;
pub mod utils;
pub mod value;

use crate::error::Location;
use crate::model::{EntryType, Value};
use crate::{Entry, Error, Result};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;

/// Internal parser result type
pub type PResult<O> = winnow::PResult<O, ContextError>;

/// A parsed item from the BibTeX file
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedItem<'a> {
    /// A bibliography entry
    Entry(Entry<'a>),
    /// A `@string` macro definition
    String(&'a str, Value<'a>),
    /// A `@preamble`
    Preamble(Value<'a>),
    /// A `@comment`, a `%` line, or free text between items
    Comment(&'a str),
}

/// Parse a complete BibTeX source into its items, in source order
pub fn parse_bibtex(input: &str) -> Result<Vec<ParsedItem<'_>>> {
    let mut items = Vec::new();
    let mut remaining = input;

    loop {
        lexer::skip_whitespace(&mut remaining);
        if remaining.is_empty() {
            break;
        }

        match parse_item(&mut remaining) {
            Ok(item) => items.push(item),
            Err(e) => {
                let consumed = input.len() - remaining.len();
                return Err(Error::ParseError {
                    location: Location::of_offset(input, consumed),
                    message: describe(&e),
                    snippet: snippet(remaining, 40),
                });
            }
        }
    }

    Ok(items)
}

/// Parse a single item starting at non-whitespace input
fn parse_item<'a>(input: &mut &'a str) -> PResult<ParsedItem<'a>> {
    if let Some(rest) = input.strip_prefix('%') {
        let end = memchr::memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
        *input = &rest[end..];
        return Ok(ParsedItem::Comment(&rest[..end]));
    }

    let Some(rest) = input.strip_prefix('@').filter(|rest| opens_item(rest)) else {
        // Free text up to the next item is ignored as a comment
        let end = memchr::memchr_iter(b'@', input.as_bytes())
            .find(|&at| opens_item(&input[at + 1..]))
            .unwrap_or(input.len());
        let text = &input[..end];
        *input = &input[end..];
        return Ok(ParsedItem::Comment(text.trim_end()));
    };
    *input = rest;

    let kind = utils::ws(lexer::identifier)
        .context(StrContext::Label("entry type"))
        .parse_next(input)?;

    match kind.to_ascii_lowercase().as_str() {
        "comment" => parse_comment(input).map(ParsedItem::Comment),
        "string" => parse_string(input).map(|(name, value)| ParsedItem::String(name, value)),
        "preamble" => parse_preamble(input).map(ParsedItem::Preamble),
        _ => entry::parse_entry_body(input, EntryType::parse(kind)).map(ParsedItem::Entry),
    }
}

/// Whether the text after an `@` starts an item: a name followed by `{` or
/// `(`, or `comment` in any form
///
/// Anything else, such as the `@` of an email address, is free text.
fn opens_item(rest: &str) -> bool {
    let name_len = rest
        .find(|c: char| !lexer::is_identifier_char(c))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return false;
    }
    rest[..name_len].eq_ignore_ascii_case("comment")
        || rest[name_len..].trim_start().starts_with(['{', '('])
}

/// Parse the body of a `@comment`
fn parse_comment<'a>(input: &mut &'a str) -> PResult<&'a str> {
    match input.chars().next() {
        Some('{') => {
            *input = &input[1..];
            let body = lexer::balanced_braces(input)?;
            *input = &input[1..];
            Ok(body)
        }
        Some('(') => {
            let end = memchr::memchr(b')', input.as_bytes())
                .ok_or_else(|| ErrMode::Cut(ContextError::default()))?;
            let body = &input[1..end];
            *input = &input[end + 1..];
            Ok(body)
        }
        _ => {
            let end = memchr::memchr(b'\n', input.as_bytes()).unwrap_or(input.len());
            let body = &input[..end];
            *input = &input[end..];
            Ok(body)
        }
    }
}

/// Parse the body of a `@string{name = value}` definition
fn parse_string<'a>(input: &mut &'a str) -> PResult<(&'a str, Value<'a>)> {
    let close = utils::open_delimiter
        .context(StrContext::Label("string opening delimiter"))
        .parse_next(input)?;
    let name = utils::ws(lexer::identifier)
        .context(StrContext::Label("string name"))
        .parse_next(input)?;
    utils::ws('=')
        .context(StrContext::Label("'=' in string definition"))
        .parse_next(input)?;
    let value = utils::ws(value::parse_value)
        .context(StrContext::Label("string value"))
        .parse_next(input)?;
    close
        .context(StrContext::Label("end of string definition"))
        .parse_next(input)?;

    Ok((name, value))
}

/// Parse the body of a `@preamble{...}`
fn parse_preamble<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    let close = utils::open_delimiter
        .context(StrContext::Label("preamble opening delimiter"))
        .parse_next(input)?;
    let value = utils::ws(value::parse_value)
        .context(StrContext::Label("preamble value"))
        .parse_next(input)?;
    close
        .context(StrContext::Label("end of preamble"))
        .parse_next(input)?;

    Ok(value)
}

/// Render a winnow error as a short message
fn describe(err: &ErrMode<ContextError>) -> String {
    match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => {
            let labels: Vec<String> = ctx
                .context()
                .filter_map(|c| match c {
                    StrContext::Label(label) => Some((*label).to_string()),
                    _ => None,
                })
                .collect();
            if labels.is_empty() {
                "Failed to parse entry".to_string()
            } else {
                format!("invalid {}", labels.join(" in "))
            }
        }
        ErrMode::Incomplete(_) => "Unexpected end of input".to_string(),
    }
}

/// Get a snippet of input for error messages
fn snippet(input: &str, max_chars: usize) -> String {
    let snippet: String = input.chars().take(max_chars).collect();
    if snippet.len() < input.len() {
        format!("{snippet}...")
    } else {
        snippet
    }
}
