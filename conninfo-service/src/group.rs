//! Streaming reader for the `name=value` lines of one service group.

use conninfo_core::{ConnInfoError, ConnInfoResult, OptionOrigin, OptionRecord};
use tracing::trace;

/// Whether a [`GroupReader`] wants more input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    /// The group continues past the end of this chunk.
    NeedMore,
    /// The next group header or the end of the stream was reached.
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Discarding up to the next newline (comment, or rest of the header line).
    Skipping,
    LineStart,
    Name,
    Value,
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t' | b'\x0b' | b'\x0c')
}

/// Reads the lines of a group, starting just after its `[name]` header.
///
/// Names and values are kept as raw bytes until a line is complete, so a
/// multi-byte character split across chunks survives intact. Values are
/// stored unconditionally; a later line for the same option wins.
#[derive(Debug)]
pub struct GroupReader {
    state: State,
    name: Vec<u8>,
    value: Vec<u8>,
}

impl Default for GroupReader {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupReader {
    /// Create a reader positioned on the header line.
    pub fn new() -> Self {
        Self {
            state: State::Skipping,
            name: Vec::new(),
            value: Vec::new(),
        }
    }

    /// Feed the next chunk. An empty chunk marks the end of the stream.
    pub fn feed(
        &mut self,
        chunk: &[u8],
        record: &mut OptionRecord,
    ) -> ConnInfoResult<GroupStatus> {
        if chunk.is_empty() {
            return match self.state {
                State::Name => Err(missing_separator()),
                State::Value => {
                    self.store(record)?;
                    self.state = State::LineStart;
                    Ok(GroupStatus::Ended)
                }
                State::Skipping | State::LineStart => Ok(GroupStatus::Ended),
            };
        }

        let mut i = 0;
        while i < chunk.len() {
            let rest = &chunk[i..];

            match self.state {
                State::Skipping => match memchr::memchr(b'\n', rest) {
                    Some(end) => {
                        self.state = State::LineStart;
                        i += end + 1;
                    }
                    None => return Ok(GroupStatus::NeedMore),
                },

                State::LineStart => {
                    let Some(start) = rest.iter().position(|&b| !is_space(b)) else {
                        return Ok(GroupStatus::NeedMore);
                    };
                    i += start;

                    match chunk[i] {
                        b'#' => {
                            self.state = State::Skipping;
                            i += 1;
                        }
                        b'[' => return Ok(GroupStatus::Ended),
                        _ => self.state = State::Name,
                    }
                }

                State::Name => match memchr::memchr2(b'=', b'\n', rest) {
                    Some(end) if rest[end] == b'=' => {
                        self.name.extend_from_slice(&rest[..end]);
                        self.state = State::Value;
                        i += end + 1;
                    }
                    Some(_) => return Err(missing_separator()),
                    None => {
                        self.name.extend_from_slice(rest);
                        return Ok(GroupStatus::NeedMore);
                    }
                },

                State::Value => match memchr::memchr(b'\n', rest) {
                    Some(end) => {
                        self.value.extend_from_slice(&rest[..end]);
                        self.store(record)?;
                        self.state = State::LineStart;
                        i += end + 1;
                    }
                    None => {
                        self.value.extend_from_slice(rest);
                        return Ok(GroupStatus::NeedMore);
                    }
                },
            }
        }

        Ok(GroupStatus::NeedMore)
    }

    fn store(&mut self, record: &mut OptionRecord) -> ConnInfoResult<()> {
        if self.value.last() == Some(&b'\r') {
            self.value.pop();
        }

        let name = String::from_utf8_lossy(&self.name).into_owned();
        let value = String::from_utf8_lossy(&self.value).into_owned();
        self.name.clear();
        self.value.clear();

        trace!(key = %name, len = value.len(), "service file option");
        record.set(&name, value, OptionOrigin::ServiceFile)
    }
}

fn missing_separator() -> ConnInfoError {
    ConnInfoError::service_file("service file line is missing \"=\" separator")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Run `chunks` (header line excluded) through a fresh reader, then end
    /// the stream if the group is still open.
    fn read(chunks: &[&[u8]]) -> ConnInfoResult<(OptionRecord, bool)> {
        let mut reader = GroupReader::new();
        let mut record = OptionRecord::new();
        for chunk in chunks {
            if reader.feed(chunk, &mut record)? == GroupStatus::Ended {
                return Ok((record, true));
            }
        }
        let status = reader.feed(b"", &mut record)?;
        assert_eq!(status, GroupStatus::Ended);
        Ok((record, false))
    }

    fn set(record: &OptionRecord) -> Vec<(&'static str, &str)> {
        record.iter_set().collect()
    }

    #[test]
    fn test_simple_group() {
        let (record, by_header) = read(&[b"\nhost=a\nport=5433\n"]).unwrap();
        assert_eq!(set(&record), vec![("host", "a"), ("port", "5433")]);
        assert!(!by_header);
    }

    #[test]
    fn test_rest_of_header_line_is_ignored() {
        let (record, _) = read(&[b" trailing junk=1\nhost=a\n"]).unwrap();
        assert_eq!(set(&record), vec![("host", "a")]);
    }

    #[test]
    fn test_next_header_ends_group() {
        let (record, by_header) = read(&[b"\nhost=a\n\n  [other]\nport=1\n"]).unwrap();
        assert_eq!(set(&record), vec![("host", "a")]);
        assert!(by_header);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let data = b"\n# a comment with = sign\n\n\t  \nhost=a\n   # indented\ndbname=db";
        let (record, _) = read(&[data]).unwrap();
        assert_eq!(set(&record), vec![("dbname", "db"), ("host", "a")]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (record, _) = read(&[b"\r\nhost=a\r\nport=1\r\n"]).unwrap();
        assert_eq!(set(&record), vec![("host", "a"), ("port", "1")]);
    }

    #[test]
    fn test_only_one_carriage_return_stripped() {
        let (record, _) = read(&[b"\nhost=a\r\r\n"]).unwrap();
        assert_eq!(record.get("host"), Some("a\r"));
    }

    #[test]
    fn test_value_kept_verbatim() {
        let (record, _) = read(&[b"\noptions=-c a=b  \npassword='q'\n"]).unwrap();
        assert_eq!(record.get("options"), Some("-c a=b  "));
        assert_eq!(record.get("password"), Some("'q'"));
    }

    #[test]
    fn test_later_line_wins() {
        let (record, _) = read(&[b"\nhost=a\nhost=b\n"]).unwrap();
        assert_eq!(record.get("host"), Some("b"));
    }

    #[test]
    fn test_unknown_option() {
        let err = read(&[b"\nhost=a\ncolour=blue\n"]).unwrap_err();
        assert_eq!(err.unknown_key(), Some("colour"));
        assert_eq!(err.to_string(), "invalid service file option \"colour\"");

        // no trimming around the name
        let err = read(&[b"\nhost =a\n"]).unwrap_err();
        assert_eq!(err.unknown_key(), Some("host "));
    }

    #[test]
    fn test_missing_separator() {
        let err = read(&[b"\nhost\nport=1\n"]).unwrap_err();
        assert!(matches!(err, ConnInfoError::MalformedServiceFile(_)));

        let err = read(&[b"\nhost"]).unwrap_err();
        assert!(matches!(err, ConnInfoError::MalformedServiceFile(_)));

        let err = read(&[b"\nho", b"st\n", b"port=1\n"]).unwrap_err();
        assert!(matches!(err, ConnInfoError::MalformedServiceFile(_)));
    }

    #[test]
    fn test_pieces_split_across_chunks() {
        let (record, _) = read(&[b"\nho", b"st", b"=lo", b"cal", b"host\npo", b"rt=1"]).unwrap();
        assert_eq!(set(&record), vec![("host", "localhost"), ("port", "1")]);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let bytes = "\napplication_name=caf\u{e9}\n".as_bytes();
        let split = bytes.len() - 2;
        let (record, _) = read(&[&bytes[..split], &bytes[split..]]).unwrap();
        assert_eq!(record.get("application_name"), Some("caf\u{e9}"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let (record, _) = read(&[b"\nuser=a\xffb\n"]).unwrap();
        assert_eq!(record.get("user"), Some("a\u{fffd}b"));
    }

    #[test]
    fn test_every_split_pair() {
        let data = b" x\n# c\nhost=h\r\n\n  dbname=d b\nport=5\n[next]\nuser=u\n";
        let (whole, _) = read(&[data]).unwrap();
        assert_eq!(set(&whole), vec![("dbname", "d b"), ("host", "h"), ("port", "5")]);

        for a in 0..=data.len() {
            for b in a..=data.len() {
                let chunks: Vec<&[u8]> = [&data[..a], &data[a..b], &data[b..]]
                    .into_iter()
                    .filter(|c| !c.is_empty())
                    .collect();
                let (record, by_header) = read(&chunks).unwrap();
                assert_eq!(record, whole, "split at {a}, {b}");
                assert!(by_header);
            }
        }
    }
}
