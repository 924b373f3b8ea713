//! # conninfo-service
//!
//! Service file support for libpq-style connection options.
//!
//! A service file groups connection options under `[name]` headers:
//!
//! ```text
//! # ~/.pg_service.conf
//! [prod]
//! host=db.example.com
//! port=5433
//! dbname=app
//! ```
//!
//! The pieces, lowest first:
//! - [`DelimiterMatcher`] finds a group header in a chunked byte stream
//! - [`GroupReader`] reads the `name=value` lines of a group
//! - [`ServiceFileReader`] combines the two over one file
//! - [`lookup_service`] and [`add_service_defaults`] search the candidate
//!   files on disk
//! - [`Resolver`] runs parsing, service defaults and environment defaults
//!   in one call
//!
//! None of the readers perform I/O or keep more than a partial line, so a
//! file of any size can be fed through them in chunks of any size.

pub mod file;
pub mod group;
pub mod matcher;
pub mod paths;
pub mod reader;
pub mod resolve;

pub use file::{
    READ_BUFFER_SIZE, add_service_defaults, add_service_defaults_from, lookup_service,
    read_service,
};
pub use group::{GroupReader, GroupStatus};
pub use matcher::{DelimiterMatcher, Match};
pub use paths::{default_candidates, service_file_candidates, service_name};
pub use reader::{ReadStatus, ServiceFileReader};
pub use resolve::Resolver;
