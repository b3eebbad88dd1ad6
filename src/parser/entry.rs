//! Entry parsing for BibTeX

use super::{lexer, utils, value, PResult};
use crate::model::{Entry, EntryType, Field};
use winnow::error::StrContext;
use winnow::prelude::*;

/// Parse the body of an entry after `@type`: `{key, name = value, ...}`
///
/// Both `{...}` and `(...)` delimiters are accepted, as is a trailing comma
/// after the last field.
pub fn parse_entry_body<'a>(input: &mut &'a str, ty: EntryType<'a>) -> PResult<Entry<'a>> {
    lexer::skip_whitespace(input);
    let close = utils::open_delimiter
        .context(StrContext::Label("entry opening delimiter"))
        .parse_next(input)?;

    let key = utils::ws(lexer::citation_key)
        .context(StrContext::Label("citation key"))
        .parse_next(input)?;

    let mut entry = Entry::new(ty, key);

    if input.starts_with(',') {
        *input = &input[1..];
        entry.fields = parse_fields(input, close)?;
    }

    lexer::skip_whitespace(input);
    close
        .context(StrContext::Label("end of entry"))
        .parse_next(input)?;

    Ok(entry)
}

/// Parse comma-separated fields up to (not including) `close`
fn parse_fields<'a>(input: &mut &'a str, close: char) -> PResult<Vec<Field<'a>>> {
    let mut fields = Vec::new();

    loop {
        lexer::skip_whitespace(input);
        if input.starts_with(close) || input.is_empty() {
            break;
        }

        fields.push(parse_field(input)?);

        lexer::skip_whitespace(input);
        match input.strip_prefix(',') {
            Some(rest) => *input = rest,
            None => break,
        }
    }

    Ok(fields)
}

/// Parse a single field (name = value)
fn parse_field<'a>(input: &mut &'a str) -> PResult<Field<'a>> {
    let name = utils::ws(lexer::identifier)
        .context(StrContext::Label("field name"))
        .parse_next(input)?;
    utils::ws('=')
        .context(StrContext::Label("'=' after field name"))
        .parse_next(input)?;
    let value = value::parse_value
        .context(StrContext::Label("field value"))
        .parse_next(input)?;

    Ok(Field::new(name, value))
}
