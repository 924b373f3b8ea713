//! URI-form connection strings.
//!
//! ```text
//! postgresql://[user[:password]@][netloc][,...][/dbname][?param1=value1&...]
//! ```
//!
//! Every delimiter is ASCII, so byte offsets found by scanning are always
//! valid `str` boundaries.

use super::decode::percent_decode;
use super::store;
use crate::error::{ConnInfoError, ConnInfoResult};
use crate::record::OptionRecord;
use tracing::trace;

/// Index of the first byte at or after `start` that is one of `set`.
fn find_any(bytes: &[u8], set: &[u8], start: usize) -> Option<usize> {
    bytes
        .get(start..)?
        .iter()
        .position(|b| set.contains(b))
        .map(|i| i + start)
}

pub(super) fn parse(text: &str, prefix_len: usize) -> ConnInfoResult<OptionRecord> {
    let mut record = OptionRecord::new();
    let bytes = text.as_bytes();
    let len = bytes.len();

    // Credentials end at the first '@', unless a '/' comes first.
    let mut netloc_start = prefix_len;
    if let Some(end) = find_any(bytes, b"@/", prefix_len) {
        if bytes[end] == b'@' {
            parse_credentials(&text[prefix_len..end], &mut record)?;
            netloc_start = end + 1;
        }
    }

    let mut hosts = String::new();
    let mut ports = String::new();
    let mut has_port = false;

    let netloc_end = loop {
        let (host, mut host_end) = if bytes.get(netloc_start) == Some(&b'[') {
            let close = text[netloc_start + 1..]
                .find(']')
                .map(|i| i + netloc_start + 1)
                .ok_or_else(|| {
                    ConnInfoError::uri(format!(
                        "IPv6 host address missing closing square bracket in URI: \"{}\"",
                        text
                    ))
                })?;

            if close == netloc_start + 1 {
                return Err(ConnInfoError::uri(format!(
                    "IPv6 host address can't be empty in URI: \"{}\"",
                    text
                )));
            }

            (&text[netloc_start + 1..close], close + 1)
        } else {
            let end = find_any(bytes, b":/?,", netloc_start).unwrap_or(len);
            (&text[netloc_start..end], end)
        };

        let mut separator = bytes.get(host_end).copied();
        if !matches!(separator, None | Some(b':' | b'/' | b'?' | b',')) {
            let unexpected = text[host_end..].chars().next().unwrap_or_default();
            return Err(ConnInfoError::uri(format!(
                "unexpected character \"{}\" after host in URI: \"{}\"",
                unexpected, text
            )));
        }

        hosts.push_str(host);

        if separator == Some(b':') {
            has_port = true;
            let port_end = find_any(bytes, b"/?,", host_end + 1).unwrap_or(len);
            ports.push_str(&text[host_end + 1..port_end]);
            host_end = port_end;
            separator = bytes.get(host_end).copied();
        }

        if separator != Some(b',') {
            break host_end;
        }

        hosts.push(',');
        ports.push(',');
        netloc_start = host_end + 1;
    };

    if !hosts.is_empty() {
        store(&mut record, "host", percent_decode(&hosts)?)?;
    }

    // Without any ':' the port list is only separators and stays unset.
    if has_port && !ports.is_empty() {
        store(&mut record, "port", percent_decode(&ports)?)?;
    }

    let mut params_start = netloc_end;
    if bytes.get(netloc_end) == Some(&b'/') {
        let dbname_end = text[netloc_end + 1..]
            .find('?')
            .map(|i| i + netloc_end + 1)
            .unwrap_or(len);

        if dbname_end != netloc_end + 1 {
            store(
                &mut record,
                "dbname",
                percent_decode(&text[netloc_end + 1..dbname_end])?,
            )?;
        }

        params_start = dbname_end;
    }

    if params_start + 1 < len {
        parse_params(&text[params_start + 1..], &mut record)?;
    }

    Ok(record)
}

fn parse_credentials(credentials: &str, record: &mut OptionRecord) -> ConnInfoResult<()> {
    let (user, password) = match credentials.split_once(':') {
        Some((user, password)) => (user, password),
        None => (credentials, ""),
    };

    if !user.is_empty() {
        store(record, "user", percent_decode(user)?)?;
    }

    if !password.is_empty() {
        store(record, "password", percent_decode(password)?)?;
    }

    Ok(())
}

/// Parse a non-empty `&`-separated query string.
fn parse_params(params: &str, record: &mut OptionRecord) -> ConnInfoResult<()> {
    for pair in params.split('&') {
        let mut parts = pair.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ConnInfoError::uri(format!(
                "invalid URI query parameter: \"{}\"",
                pair
            )));
        };

        let key = percent_decode(key)?;
        let value = percent_decode(value)?;
        trace!(key = %key, "URI query parameter");

        // JDBC spelling of sslmode=require
        if key == "ssl" && value == "true" {
            store(record, "sslmode", "require".to_string())?;
        } else {
            store(record, &key, value)?;
        }
    }

    Ok(())
}
