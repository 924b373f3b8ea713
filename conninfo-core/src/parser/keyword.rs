//! Keyword/value connection strings.
//!
//! ```text
//! host=localhost port=5432 dbname='my db' password=it\'s
//! ```

use super::store;
use crate::error::{ConnInfoError, ConnInfoResult};
use crate::record::OptionRecord;

/// Whitespace as understood by C `isspace` in the "C" locale.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

pub(super) fn parse(text: &str) -> ConnInfoResult<OptionRecord> {
    let mut record = OptionRecord::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start_matches(is_space);
        if rest.is_empty() {
            break;
        }

        let key_len = rest
            .find(|c: char| c == '=' || is_space(c))
            .unwrap_or(rest.len());
        let key = &rest[..key_len];

        let Some(after_eq) = rest[key_len..].trim_start_matches(is_space).strip_prefix('=') else {
            let token_len = rest.find(is_space).unwrap_or(rest.len());
            return Err(ConnInfoError::keyword_value(format!(
                "missing \"=\" after \"{}\" in connection info string",
                &rest[..token_len]
            )));
        };

        // Whitespace after '=' is skipped, so "host= x" assigns "x".
        let after_eq = after_eq.trim_start_matches(is_space);

        let (value, remainder) = match after_eq.strip_prefix('\'') {
            Some(quoted) => read_quoted(quoted)?,
            None => read_unquoted(after_eq),
        };

        store(&mut record, key, value)?;
        rest = remainder;
    }

    Ok(record)
}

/// Read an unquoted value up to the next whitespace.
///
/// A backslash makes the next character literal, whitespace included; a
/// backslash at the very end of the input contributes nothing.
fn read_unquoted(input: &str) -> (String, &str) {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        if is_space(c) {
            return (value, &input[i..]);
        }

        if c == '\\' {
            if let Some((_, escaped)) = chars.next() {
                value.push(escaped);
            }
        } else {
            value.push(c);
        }
    }

    (value, "")
}

/// Read a single-quoted value; `input` starts just after the opening quote.
fn read_quoted(input: &str) -> ConnInfoResult<(String, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\'' => return Ok((value, &input[i + 1..])),
            '\\' => match chars.next() {
                Some((_, escaped)) => value.push(escaped),
                None => break,
            },
            _ => value.push(c),
        }
    }

    Err(ConnInfoError::keyword_value(
        "unterminated quoted string in connection info string",
    ))
}
