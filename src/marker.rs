use crate::config::MarkerSyntax;
use crate::error::ScanErrorKind;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

/// What one line of source text means to the scanner.
///
/// Start and end markers live on lines of their own (inside a comment of
/// the host language, which the scanner does not interpret); only callout
/// markers may trail executable code on the same line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken {
    /// A start marker with its parsed attribute block.
    Start(Attributes),
    /// An end marker. Takes no attributes.
    End,
    /// A callout marker. `before` is the text preceding the marker with
    /// any trailing comment leader stripped; empty when the callout stood
    /// on a line of its own.
    Callout { before: String, attributes: Attributes },
    /// Ordinary source text.
    Plain,
}

/// Parsed `key = value` pairs from a marker's brace-delimited block.
///
/// Unknown keys are kept but ignored by the typed accessors, so older
/// engines tolerate attributes introduced later.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn language(&self) -> Option<&str> {
        self.get("language")
    }

    pub fn value(&self) -> Option<&str> {
        self.get("value")
    }

    /// The `part` attribute. Must be a positive integer when present.
    pub fn part(&self) -> Result<Option<u32>, ScanErrorKind> {
        match self.get("part") {
            None => Ok(None),
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) | Err(_) => Err(ScanErrorKind::InvalidNumericAttribute {
                    attribute: "part".to_string(),
                    value: raw.to_string(),
                }),
                Ok(n) => Ok(Some(n)),
            },
        }
    }

    /// The `indentation` attribute. Must be a non-negative integer when
    /// present.
    pub fn indentation(&self) -> Result<Option<usize>, ScanErrorKind> {
        match self.get("indentation") {
            None => Ok(None),
            Some(raw) => raw.parse::<usize>().map(Some).map_err(|_| {
                ScanErrorKind::InvalidNumericAttribute {
                    attribute: "indentation".to_string(),
                    value: raw.to_string(),
                }
            }),
        }
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Classifies one line of source text against the configured marker
/// tokens.
///
/// The marker tokens are matched literally anywhere in the line, so the
/// scanner works inside any host language's comments without knowing its
/// comment syntax. A line with no marker token classifies as
/// [`LineToken::Plain`].
///
/// Returns the error kind without a location; the caller owns file and
/// line context.
pub fn classify_line(line: &str, syntax: &MarkerSyntax) -> Result<LineToken, ScanErrorKind> {
    if let Some(idx) = line.find(&syntax.start_token) {
        let rest = &line[idx + syntax.start_token.len()..];
        let attributes = parse_attribute_block(rest)?;
        return Ok(LineToken::Start(attributes));
    }

    if line.contains(&syntax.end_token) {
        return Ok(LineToken::End);
    }

    if let Some(idx) = line.find(&syntax.callout_token) {
        let rest = &line[idx + syntax.callout_token.len()..];
        let attributes = parse_attribute_block(rest)?;
        let before = strip_comment_leader(&line[..idx]);
        return Ok(LineToken::Callout {
            before: before.to_string(),
            attributes,
        });
    }

    Ok(LineToken::Plain)
}

/// Parses the brace-delimited attribute block that follows a start or
/// callout token.
///
/// Grammar: `{ key (= | :) value (, | whitespace)* }` where `value` is a
/// bare token (letters, digits, `-`, `_`, `/`, `.`) or a double-quoted
/// string with `\"` and `\\` escapes. Whitespace around `=` is
/// insignificant. Keys are case-sensitive.
fn parse_attribute_block(input: &str) -> Result<Attributes, ScanErrorKind> {
    let mut chars = input.chars().peekable();

    skip_whitespace(&mut chars);
    if chars.next() != Some('{') {
        return Err(malformed("expected `{` after marker token"));
    }

    let mut values = HashMap::new();

    loop {
        skip_separators(&mut chars);

        match chars.peek() {
            None => return Err(malformed("unclosed attribute block, expected `}`")),
            Some('}') => {
                chars.next();
                break;
            }
            Some(_) => {}
        }

        let key = read_key(&mut chars)?;

        skip_whitespace(&mut chars);
        match chars.next() {
            Some('=') | Some(':') => {}
            _ => return Err(malformed(&format!("expected `=` after key `{}`", key))),
        }
        skip_whitespace(&mut chars);

        let value = read_value(&mut chars)?;

        // Last occurrence wins for a repeated key; callers never rely on
        // this, it just keeps the parser total.
        values.insert(key, value);
    }

    Ok(Attributes { values })
}

fn read_key(chars: &mut Peekable<Chars>) -> Result<String, ScanErrorKind> {
    let mut key = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            key.push(ch);
            chars.next();
        } else {
            break;
        }
    }

    if key.is_empty() {
        return Err(malformed("expected attribute key"));
    }

    Ok(key)
}

fn read_value(chars: &mut Peekable<Chars>) -> Result<String, ScanErrorKind> {
    if chars.peek() == Some(&'"') {
        chars.next();
        return read_quoted(chars);
    }

    let mut value = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '/' | '.') {
            value.push(ch);
            chars.next();
        } else {
            break;
        }
    }

    if value.is_empty() {
        return Err(malformed("expected attribute value"));
    }

    Ok(value)
}

fn read_quoted(chars: &mut Peekable<Chars>) -> Result<String, ScanErrorKind> {
    let mut value = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => return Ok(value),
            '\\' => match chars.next() {
                Some(escaped @ ('"' | '\\')) => value.push(escaped),
                Some(other) => {
                    value.push('\\');
                    value.push(other);
                }
                None => break,
            },
            _ => value.push(ch),
        }
    }

    Err(malformed("unterminated quoted value"))
}

fn skip_whitespace(chars: &mut Peekable<Chars>) {
    while chars.peek().is_some_and(|ch| ch.is_whitespace()) {
        chars.next();
    }
}

fn skip_separators(chars: &mut Peekable<Chars>) {
    while chars.peek().is_some_and(|ch| ch.is_whitespace() || *ch == ',') {
        chars.next();
    }
}

fn malformed(message: &str) -> ScanErrorKind {
    ScanErrorKind::MalformedAttributeBlock(message.to_string())
}

/// Removes a trailing comment leader from the text preceding a callout
/// marker, so the accumulated content line keeps only executable text.
fn strip_comment_leader(before: &str) -> &str {
    let trimmed = before.trim_end();

    for leader in ["<!--", "//", "/*", "--", "#", ";"] {
        if let Some(stripped) = trimmed.strip_suffix(leader) {
            return stripped.trim_end();
        }
    }

    trimmed
}
