//! Fuzz target for the streaming service file reader.
//!
//! Splits the input at a fuzzer-chosen point and checks that the result
//! doesn't depend on where the chunk boundary falls.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_service_reader
//! ```

#![no_main]

use conninfo_service::{ReadStatus, ServiceFileReader};
use libfuzzer_sys::fuzz_target;

/// An empty chunk ends the stream, so callers pass only non-empty ones.
fn read(chunks: &[&[u8]]) -> Option<(ReadStatus, String)> {
    let mut reader = ServiceFileReader::new("svc").ok()?;
    for chunk in chunks.iter().copied().chain(std::iter::once(&[][..])) {
        match reader.feed(chunk) {
            Ok(ReadStatus::Pending) => {}
            Ok(status) => return Some((status, reader.values().to_keyword_value())),
            Err(e) => return Some((ReadStatus::NotFound, format!("error: {e}"))),
        }
    }
    None
}

fuzz_target!(|data: &[u8]| {
    let Some((&split, file)) = data.split_first() else {
        return;
    };
    // a NUL after the group ends is only seen when it shares a chunk
    if file.contains(&0) {
        return;
    }
    let split = split as usize % (file.len() + 1);

    let whole = read(&[file]);
    let parts: Vec<&[u8]> = [&file[..split], &file[split..]]
        .into_iter()
        .filter(|c| !c.is_empty())
        .collect();
    let chunked = read(&parts);
    assert_eq!(whole, chunked);
});
