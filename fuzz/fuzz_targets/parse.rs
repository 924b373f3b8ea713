//! Fuzz target for the connection string parser.
//!
//! Feeds arbitrary bytes to both grammars. The parser should never panic,
//! and anything it accepts must survive a keyword/value round trip.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_parse
//! ```

#![no_main]

use conninfo_core::parse_bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(record) = parse_bytes(data) {
        let reparsed = conninfo_core::parse(&record.to_keyword_value())
            .expect("serialized record must reparse");
        assert_eq!(reparsed, record);
    }
});
