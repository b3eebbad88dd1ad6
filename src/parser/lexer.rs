//! Lexical analysis for BibTeX

use super::{utils::backtrack, PResult};
use winnow::prelude::*;
use winnow::{
    ascii::digit1,
    combinator::{alt, opt},
    token::take_while,
};

/// Characters allowed in entry types, field names and macro names
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.' | '+' | '/' | '\'')
}

/// Parse an identifier: entry types, field names and macro names
pub fn identifier<'a>(input: &mut &'a str) -> PResult<&'a str> {
    take_while(1.., is_identifier_char).parse_next(input)
}

/// Parse a citation key
///
/// Keys are more permissive than identifiers: anything up to whitespace or
/// a structural character.
pub fn citation_key<'a>(input: &mut &'a str) -> PResult<&'a str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, ',' | '{' | '}' | '(' | ')' | '"' | '=' | '#')
    })
    .parse_next(input)
}

/// Parse the body of a braced value, stopping before the matching `}`
///
/// Nested braces are kept verbatim in the output.
pub fn balanced_braces<'a>(input: &mut &'a str) -> PResult<&'a str> {
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;

    while let Some(offset) = memchr::memchr2(b'{', b'}', &bytes[pos..]) {
        pos += offset;
        if bytes[pos] == b'{' {
            depth += 1;
        } else if depth == 0 {
            let body = &input[..pos];
            *input = &input[pos..];
            return Ok(body);
        } else {
            depth -= 1;
        }
        pos += 1;
    }

    backtrack()
}

/// Parse a quoted string "..." and return its body
///
/// A `"` inside braces does not terminate the string, and `\"` is skipped.
pub fn quoted_string<'a>(input: &mut &'a str) -> PResult<&'a str> {
    let start = *input;
    let bytes = start.as_bytes();

    if bytes.first() != Some(&b'"') {
        return backtrack();
    }

    let mut pos = 1;
    let mut brace_depth = 0usize;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' if pos + 1 < bytes.len() => pos += 2,
            b'"' if brace_depth == 0 => {
                *input = &start[pos + 1..];
                return Ok(&start[1..pos]);
            }
            b'{' => {
                brace_depth += 1;
                pos += 1;
            }
            b'}' if brace_depth > 0 => {
                brace_depth -= 1;
                pos += 1;
            }
            _ => pos += 1,
        }
    }

    backtrack()
}

/// Parse a bare integer with an optional sign
///
/// The text is returned as written, so `007` keeps its leading zeros.
pub fn number<'a>(input: &mut &'a str) -> PResult<&'a str> {
    let start = *input;
    opt(alt(('+', '-'))).parse_next(input)?;
    digit1.parse_next(input)?;

    Ok(&start[..start.len() - input.len()])
}

/// Skip spaces, tabs and line breaks
pub fn skip_whitespace(input: &mut &str) {
    *input = input.trim_start_matches([' ', '\t', '\n', '\r']);
}
