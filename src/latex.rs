//! Conversion of LaTeX accent and symbol commands to Unicode
//!
//! Accents are decoded to a base letter followed by a combining mark and the
//! whole value is then NFC-normalized, so `{\"o}`, `\"{o}` and `\"o` all end
//! up as the precomposed `ö`. Commands that are not recognized are kept as
//! written, and braces are never removed beyond the ones that wrap a decoded
//! command.

use ahash::AHashMap;
use lazy_static::lazy_static;
use std::borrow::Cow;
use unicode_normalization::{is_nfc, UnicodeNormalization};

lazy_static! {
    /// Accent command -> combining mark
    static ref ACCENTS: AHashMap<&'static str, char> = [
        ("\"", '\u{0308}'),
        ("'", '\u{0301}'),
        ("`", '\u{0300}'),
        ("^", '\u{0302}'),
        ("~", '\u{0303}'),
        ("=", '\u{0304}'),
        (".", '\u{0307}'),
        ("u", '\u{0306}'),
        ("v", '\u{030C}'),
        ("H", '\u{030B}'),
        ("c", '\u{0327}'),
        ("k", '\u{0328}'),
        ("r", '\u{030A}'),
        ("d", '\u{0323}'),
        ("b", '\u{0331}'),
    ]
    .into_iter()
    .collect();

    /// Letter-like control words
    static ref LETTERS: AHashMap<&'static str, &'static str> = [
        ("ss", "ß"),
        ("o", "ø"),
        ("O", "Ø"),
        ("ae", "æ"),
        ("AE", "Æ"),
        ("oe", "œ"),
        ("OE", "Œ"),
        ("aa", "å"),
        ("AA", "Å"),
        ("l", "ł"),
        ("L", "Ł"),
        ("i", "ı"),
        ("j", "ȷ"),
    ]
    .into_iter()
    .collect();
}

/// Characters that only need their backslash removed
const ESCAPED: &[char] = &['&', '%', '$', '#', '_'];

/// Decode LaTeX commands in `input` and NFC-normalize the result
#[must_use]
pub fn to_unicode(input: &str) -> Cow<'_, str> {
    if !input.contains('\\') {
        return if is_nfc(input) {
            Cow::Borrowed(input)
        } else {
            Cow::Owned(input.nfc().collect())
        };
    }

    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '{' if chars.get(i + 1) == Some(&'\\') => {
                match command(&chars, i + 1) {
                    Some((text, next)) if chars.get(next) == Some(&'}') => {
                        out.push_str(&text);
                        i = next + 1;
                    }
                    _ => {
                        out.push('{');
                        i += 1;
                    }
                }
            }
            '\\' => match command(&chars, i) {
                Some((text, next)) => {
                    out.push_str(&text);
                    i = next;
                }
                None => {
                    out.push('\\');
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    Cow::Owned(out.nfc().collect())
}

/// Decode the command starting at the backslash `chars[at]`
///
/// Returns the replacement text and the index just past the command.
fn command(chars: &[char], at: usize) -> Option<(String, usize)> {
    let first = *chars.get(at + 1)?;

    if ESCAPED.contains(&first) {
        return Some((first.to_string(), at + 2));
    }

    if !first.is_ascii_alphabetic() {
        let mark = ACCENTS.get(first.to_string().as_str())?;
        let (base, next) = argument(chars, at + 2)?;
        return Some((format!("{base}{mark}"), next));
    }

    let end = chars[at + 1..]
        .iter()
        .position(|c| !c.is_ascii_alphabetic())
        .map_or(chars.len(), |p| at + 1 + p);
    let name: String = chars[at + 1..end].iter().collect();

    if let Some(mark) = ACCENTS.get(name.as_str()) {
        let (base, next) = argument(chars, end)?;
        return Some((format!("{base}{mark}"), next));
    }

    let letter = LETTERS.get(name.as_str())?;
    let next = match (chars.get(end), chars.get(end + 1)) {
        (Some('{'), Some('}')) => end + 2,
        (Some(' '), _) => end + 1,
        _ => end,
    };
    Some(((*letter).to_string(), next))
}

/// Read the base letter of an accent: `o`, `{o}`, `\i` or `{\i}`
fn argument(chars: &[char], mut at: usize) -> Option<(char, usize)> {
    while chars.get(at) == Some(&' ') {
        at += 1;
    }

    match *chars.get(at)? {
        '{' => {
            let (base, next) = bare_argument(chars, at + 1)?;
            (chars.get(next) == Some(&'}')).then_some((base, next + 1))
        }
        _ => bare_argument(chars, at),
    }
}

fn bare_argument(chars: &[char], at: usize) -> Option<(char, usize)> {
    match *chars.get(at)? {
        '\\' => {
            let dotless = match chars.get(at + 1)? {
                'i' => 'i',
                'j' => 'j',
                _ => return None,
            };
            let next = at + 2;
            match chars.get(next) {
                Some(c) if c.is_ascii_alphabetic() => None,
                _ => Some((dotless, next)),
            }
        }
        c if c.is_alphabetic() => Some((c, at + 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(to_unicode("Deep Learning"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_accent_forms() {
        assert_eq!(to_unicode(r#"K{\"o}rper"#), "Körper");
        assert_eq!(to_unicode(r#"K\"{o}rper"#), "Körper");
        assert_eq!(to_unicode(r#"K\"orper"#), "Körper");
        assert_eq!(to_unicode(r"Andr\'e"), "André");
        assert_eq!(to_unicode(r"Fran\c{c}ois"), "François");
        assert_eq!(to_unicode(r"Dvo\v{r}\'ak"), "Dvořák");
        assert_eq!(to_unicode(r"Erd\H{o}s"), "Erdős");
        assert_eq!(to_unicode(r"Mu\~noz"), "Muñoz");
    }

    #[test]
    fn test_dotless_i() {
        assert_eq!(to_unicode(r"D\'{\i}az"), "Díaz");
        assert_eq!(to_unicode(r"D{\'\i}az"), "Díaz");
    }

    #[test]
    fn test_letter_commands() {
        assert_eq!(to_unicode(r"Stra{\ss}e"), "Straße");
        assert_eq!(to_unicode(r"{\O}stergaard"), "Østergaard");
        assert_eq!(to_unicode(r#"\AA{}ngstr\"om"#), "Ångström");
        assert_eq!(to_unicode(r"\l ód\'z"), "łódź");
    }

    #[test]
    fn test_escaped_specials() {
        assert_eq!(to_unicode(r"Smith \& Sons"), "Smith & Sons");
        assert_eq!(to_unicode(r"50\% off"), "50% off");
    }

    #[test]
    fn test_unknown_commands_are_kept() {
        assert_eq!(to_unicode(r"\emph{Title}"), r"\emph{Title}");
        assert_eq!(to_unicode(r"{\bf x}"), r"{\bf x}");
    }

    #[test]
    fn test_braces_are_kept() {
        assert_eq!(to_unicode(r"{Deep--Learning} \'a"), "{Deep--Learning} á");
    }

    #[test]
    fn test_decomposed_input_is_composed() {
        assert_eq!(to_unicode("Ko\u{0308}rper"), "Körper");
    }
}
