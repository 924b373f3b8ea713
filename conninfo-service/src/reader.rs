//! Chunk-at-a-time reader for one service in one service file.

use crate::group::{GroupReader, GroupStatus};
use crate::matcher::{DelimiterMatcher, Match};
use conninfo_core::{ConnInfoError, ConnInfoResult, OptionRecord};
use tracing::trace;

/// Where a [`ServiceFileReader`] stands after a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// More input is needed.
    Pending,
    /// The group was found and fully read.
    Complete,
    /// The stream ended without the group's header.
    NotFound,
}

#[derive(Debug)]
enum Phase {
    Searching(DelimiterMatcher),
    Reading(GroupReader),
    Done(ReadStatus),
}

/// Finds a `[service]` group in a byte stream and collects its options.
///
/// The reader performs no I/O. Feed it the file in chunks of any size and
/// finish with an empty chunk; it never holds more than a partial line.
///
/// ```rust
/// use conninfo_service::{ReadStatus, ServiceFileReader};
///
/// let mut reader = ServiceFileReader::new("prod").unwrap();
/// assert_eq!(reader.feed(b"[dev]\nhost=dev\n[pr").unwrap(), ReadStatus::Pending);
/// assert_eq!(reader.feed(b"od]\nhost=db.prod\n").unwrap(), ReadStatus::Pending);
/// assert_eq!(reader.feed(b"").unwrap(), ReadStatus::Complete);
/// assert_eq!(reader.values().get("host"), Some("db.prod"));
/// ```
#[derive(Debug)]
pub struct ServiceFileReader {
    service: String,
    phase: Phase,
    values: OptionRecord,
}

impl ServiceFileReader {
    /// Create a reader for the group named `service`.
    pub fn new(service: &str) -> ConnInfoResult<Self> {
        Ok(Self {
            service: service.to_string(),
            phase: Phase::Searching(DelimiterMatcher::new(service)?),
            values: OptionRecord::new(),
        })
    }

    /// Name of the service being read.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Feed the next chunk. An empty chunk marks the end of the file.
    ///
    /// After `Complete` or `NotFound`, further chunks are ignored and the
    /// same status is returned.
    pub fn feed(&mut self, chunk: &[u8]) -> ConnInfoResult<ReadStatus> {
        if let Phase::Done(status) = self.phase {
            return Ok(status);
        }

        if memchr::memchr(0, chunk).is_some() {
            return Err(ConnInfoError::service_file(
                "service file can't contain NUL characters",
            ));
        }

        let status = match &mut self.phase {
            Phase::Searching(matcher) => {
                if chunk.is_empty() {
                    ReadStatus::NotFound
                } else {
                    match matcher.feed(chunk) {
                        Match::NotFound => ReadStatus::Pending,
                        Match::Found(rest) => {
                            trace!(service = %self.service, "service group found");
                            let mut group = GroupReader::new();
                            let status = if rest.is_empty() {
                                GroupStatus::NeedMore
                            } else {
                                group.feed(rest, &mut self.values)?
                            };
                            self.phase = Phase::Reading(group);
                            complete_if_ended(status)
                        }
                    }
                }
            }
            Phase::Reading(group) => complete_if_ended(group.feed(chunk, &mut self.values)?),
            Phase::Done(status) => *status,
        };

        if status != ReadStatus::Pending {
            self.phase = Phase::Done(status);
        }
        Ok(status)
    }

    /// Values collected from the group so far.
    pub fn values(&self) -> &OptionRecord {
        &self.values
    }

    /// Take the values collected from the group.
    pub fn into_values(self) -> OptionRecord {
        self.values
    }
}

fn complete_if_ended(status: GroupStatus) -> ReadStatus {
    match status {
        GroupStatus::NeedMore => ReadStatus::Pending,
        GroupStatus::Ended => ReadStatus::Complete,
    }
}
