//! Parser utilities

use super::PResult;
use winnow::ascii::multispace0;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;

/// Make a parser whitespace-insensitive
pub fn ws<'a, F, O>(mut parser: F) -> impl Parser<&'a str, O, ContextError>
where
    F: Parser<&'a str, O, ContextError>,
{
    move |input: &mut &'a str| {
        let _ = multispace0.parse_next(input)?;
        let output = parser.parse_next(input)?;
        let _ = multispace0.parse_next(input)?;
        Ok(output)
    }
}

/// Recoverable failure with an empty context
pub fn backtrack<O>() -> PResult<O> {
    Err(ErrMode::Backtrack(ContextError::default()))
}

/// Consume an opening `{` or `(` and return the matching closing delimiter
pub fn open_delimiter(input: &mut &str) -> PResult<char> {
    let close = match input.chars().next() {
        Some('{') => '}',
        Some('(') => ')',
        _ => return backtrack(),
    };
    *input = &input[1..];
    Ok(close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws() {
        let mut input = " \n  =  {Title}";
        assert_eq!(ws('=').parse_next(&mut input).unwrap(), '=');
        assert_eq!(input, "{Title}");
    }

    #[test]
    fn test_open_delimiter() {
        let mut input = "(key, a = 1)";
        assert_eq!(open_delimiter(&mut input).unwrap(), ')');
        assert_eq!(input, "key, a = 1)");

        let mut input = "key";
        assert!(open_delimiter(&mut input).is_err());
    }
}
