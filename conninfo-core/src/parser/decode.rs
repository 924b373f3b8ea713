//! Strict percent-decoding for URI components.

use crate::error::{ConnInfoError, ConnInfoResult};

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

/// Decode `%XX` triplets in a URI component.
///
/// Unlike lenient URL decoders, a `%` that does not start a valid triplet is
/// an error, the decoded bytes must form valid UTF-8, and `%00` is rejected
/// instead of being allowed to truncate the value.
pub(crate) fn percent_decode(encoded: &str) -> ConnInfoResult<String> {
    if !encoded.contains('%') {
        return Ok(encoded.to_string());
    }

    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            decoded.push(bytes[i]);
            i += 1;
            continue;
        }

        let hi = bytes.get(i + 1).copied().and_then(hex_value);
        let lo = bytes.get(i + 2).copied().and_then(hex_value);

        let (Some(hi), Some(lo)) = (hi, lo) else {
            return Err(ConnInfoError::uri(format!(
                "invalid percent-encoded token: \"{}\"",
                encoded
            )));
        };

        let byte = (hi << 4) | lo;
        if byte == 0 {
            return Err(ConnInfoError::uri(format!(
                "forbidden value %00 in percent-encoded value: \"{}\"",
                encoded
            )));
        }

        decoded.push(byte);
        i += 3;
    }

    String::from_utf8(decoded).map_err(|_| {
        ConnInfoError::uri(format!(
            "invalid percent-encoded token: \"{}\"",
            encoded
        ))
    })
}
