//! Value parsing for BibTeX fields

use super::{lexer, utils::backtrack, PResult};
use crate::model::Value;
use std::borrow::Cow;
use winnow::combinator::{alt, delimited};
use winnow::prelude::*;

/// Parse a BibTeX value: one or more components joined with `#`
pub fn parse_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    let mut parts = vec![parse_single_value(input)?];

    loop {
        let checkpoint = *input;
        lexer::skip_whitespace(input);
        match input.strip_prefix('#') {
            Some(rest) => {
                *input = rest;
                lexer::skip_whitespace(input);
                parts.push(parse_single_value(input)?);
            }
            None => {
                *input = checkpoint;
                break;
            }
        }
    }

    if parts.len() == 1 {
        if let Some(single) = parts.pop() {
            return Ok(single);
        }
    }
    Ok(Value::Concat(Box::new(parts)))
}

/// Parse a single value component
fn parse_single_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    alt((
        parse_quoted_value,
        parse_braced_value,
        parse_number_value,
        parse_variable_value,
    ))
    .parse_next(input)
}

fn parse_quoted_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    let s = lexer::quoted_string(input)?;
    Ok(Value::Literal(Cow::Borrowed(s)))
}

fn parse_braced_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    let content = delimited('{', lexer::balanced_braces, '}').parse_next(input)?;
    Ok(Value::Literal(Cow::Borrowed(content)))
}

fn parse_number_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    let digits = lexer::number(input)?;
    Ok(Value::Number(Cow::Borrowed(digits)))
}

/// Parse a macro reference such as `jan` or `ieee`
fn parse_variable_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    if input.chars().next().map_or(true, char::is_numeric) {
        return backtrack();
    }

    let ident = lexer::identifier(input)?;
    Ok(Value::Variable(Cow::Borrowed(ident)))
}

/// Collapse runs of whitespace (including line breaks) into single spaces
#[must_use]
pub fn normalize_whitespace(s: &str) -> Cow<'_, str> {
    let needs_work = s.contains(['\n', '\r', '\t'])
        || s.contains("  ")
        || s.starts_with(' ')
        || s.ends_with(' ');

    if needs_work {
        Cow::Owned(s.split_whitespace().collect::<Vec<_>>().join(" "))
    } else {
        Cow::Borrowed(s)
    }
}
