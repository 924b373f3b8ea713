//! Structured fuzzing for URI connection strings.
//!
//! Builds URIs from generated pieces so the fuzzer spends its time past the
//! scheme check, in the host list, credentials and query parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_parse_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use conninfo_core::{parse, schema::OPTIONS};
use libfuzzer_sys::fuzz_target;

/// A generated host entry.
#[derive(Debug, Arbitrary)]
struct FuzzHost {
    name: String,
    bracketed: bool,
    port: Option<String>,
}

/// A generated URI.
#[derive(Debug, Arbitrary)]
struct FuzzUri {
    short_scheme: bool,
    user: Option<String>,
    password: Option<String>,
    hosts: Vec<FuzzHost>,
    dbname: Option<String>,
    params: Vec<(u8, String)>,
}

impl FuzzUri {
    fn to_uri(&self) -> String {
        let mut uri = String::from(if self.short_scheme {
            "postgres://"
        } else {
            "postgresql://"
        });

        if let Some(user) = &self.user {
            uri.push_str(user);
            if let Some(password) = &self.password {
                uri.push(':');
                uri.push_str(password);
            }
            uri.push('@');
        }

        let hosts: Vec<String> = self
            .hosts
            .iter()
            .take(8)
            .map(|h| {
                let mut s = if h.bracketed {
                    format!("[{}]", h.name)
                } else {
                    h.name.clone()
                };
                if let Some(port) = &h.port {
                    s.push(':');
                    s.push_str(port);
                }
                s
            })
            .collect();
        uri.push_str(&hosts.join(","));

        if let Some(dbname) = &self.dbname {
            uri.push('/');
            uri.push_str(dbname);
        }

        if !self.params.is_empty() {
            let params: Vec<String> = self
                .params
                .iter()
                .take(16)
                .map(|(i, v)| format!("{}={}", OPTIONS[*i as usize % OPTIONS.len()].name, v))
                .collect();
            uri.push('?');
            uri.push_str(&params.join("&"));
        }

        uri
    }
}

fuzz_target!(|input: FuzzUri| {
    let uri = input.to_uri();
    if let Ok(record) = parse(&uri) {
        let reparsed = parse(&record.to_keyword_value()).expect("serialized record must reparse");
        assert_eq!(reparsed, record);
    }
});
