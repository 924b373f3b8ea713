//! Streaming search for a service group header.

use conninfo_core::{ConnInfoError, ConnInfoResult};
use memchr::memmem;

/// Outcome of feeding one chunk to a [`DelimiterMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match<'a> {
    /// The header was completed in this chunk; carries every byte after it.
    Found(&'a [u8]),
    /// No complete header yet.
    NotFound,
}

/// Locates the line-anchored header `\n[name]` across a stream of chunks.
///
/// Only the length of a partial match at the tail of the data seen so far is
/// carried between chunks, never the bytes themselves. The start of the
/// stream counts as a newline, so a header on the first line is found.
///
/// Because a service name can't contain `\n` or `[`, the only place a match
/// can begin is a newline, and a partial match carried from the previous
/// chunk can't overlap another candidate. A failed continuation therefore
/// needs a single rescan of the current chunk.
#[derive(Debug)]
pub struct DelimiterMatcher {
    pattern: Vec<u8>,
    finder: memmem::Finder<'static>,
    matched: usize,
    done: bool,
}

impl DelimiterMatcher {
    /// Create a matcher for the group `[service]`.
    pub fn new(service: &str) -> ConnInfoResult<Self> {
        if service.contains(['[', '\n', '\0']) {
            return Err(ConnInfoError::InvalidServiceName(service.to_string()));
        }

        let mut pattern = Vec::with_capacity(service.len() + 3);
        pattern.extend_from_slice(b"\n[");
        pattern.extend_from_slice(service.as_bytes());
        pattern.push(b']');

        let finder = memmem::Finder::new(&pattern).into_owned();

        Ok(Self {
            pattern,
            finder,
            // the start of the stream stands in for the leading newline
            matched: 1,
            done: false,
        })
    }

    /// Feed the next chunk of the stream.
    ///
    /// Once the header has been found, every later call returns
    /// [`Match::NotFound`].
    pub fn feed<'a>(&mut self, chunk: &'a [u8]) -> Match<'a> {
        if self.done {
            return Match::NotFound;
        }

        if self.matched != 0 {
            let want = &self.pattern[self.matched..];
            let advance = want.len().min(chunk.len());

            if chunk[..advance] == want[..advance] {
                if advance == want.len() {
                    self.done = true;
                    return Match::Found(&chunk[advance..]);
                }

                self.matched += advance;
                return Match::NotFound;
            }

            self.matched = 0;
        }

        if let Some(i) = self.finder.find(chunk) {
            self.done = true;
            return Match::Found(&chunk[i + self.pattern.len()..]);
        }

        // Carry a partial match ending exactly at the end of this chunk. It
        // must start at the last newline of the chunk's tail, if anywhere.
        let cutoff = chunk.len().saturating_sub(self.pattern.len() - 1);
        if let Some(j) = memchr::memrchr(b'\n', &chunk[cutoff..]) {
            let tail = &chunk[cutoff + j..];
            if self.pattern.starts_with(tail) {
                self.matched = tail.len();
            }
        }

        Match::NotFound
    }

    /// Check if the header has been found.
    pub fn is_found(&self) -> bool {
        self.done
    }
}
