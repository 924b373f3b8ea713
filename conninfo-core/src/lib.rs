//! # conninfo-core
//!
//! libpq-compatible connection string parsing for PostgreSQL clients.
//!
//! This crate provides:
//! - The fixed option vocabulary with environment variables and fallbacks
//! - [`OptionRecord`], a flat set of named options
//! - A parser for both the URI and the keyword/value grammar
//! - Environment defaults through a pluggable [`EnvSource`]
//!
//! Service file lookup lives in `conninfo-service`.
//!
//! ## Parsing
//!
//! ```rust
//! use conninfo_core::parse;
//!
//! let record = parse("postgresql://[::1]:5433/db").unwrap();
//! assert_eq!(record.get("host"), Some("::1"));
//! assert_eq!(record.get("port"), Some("5433"));
//! assert_eq!(record.get("dbname"), Some("db"));
//!
//! let record = parse("host=localhost password='it\\'s secret'").unwrap();
//! assert_eq!(record.get("password"), Some("it's secret"));
//! ```
//!
//! ## Errors
//!
//! ```rust
//! use conninfo_core::parse;
//!
//! let err = parse("host=localhost colour=blue").unwrap_err();
//! assert_eq!(err.unknown_key(), Some("colour"));
//! assert_eq!(err.to_string(), "invalid connection option \"colour\"");
//! ```
//!
//! ## Environment Defaults
//!
//! ```rust
//! use conninfo_core::{MapEnvSource, add_env_defaults, parse};
//!
//! let env = MapEnvSource::new().set("PGPORT", "6432").set("PGHOST", "ignored");
//! let mut record = parse("host=explicit").unwrap();
//! add_env_defaults(&mut record, &env);
//!
//! assert_eq!(record.get("host"), Some("explicit"));
//! assert_eq!(record.get("port"), Some("6432"));
//! ```

pub mod env;
pub mod error;
pub mod identity;
pub mod logging;
pub mod parser;
pub mod record;
pub mod schema;

pub use env::{EnvSource, MapEnvSource, StdEnvSource, add_env_defaults};
pub use error::{ConnInfoError, ConnInfoResult, OptionOrigin};
pub use parser::{ConnectionString, Grammar, parse, parse_bytes, parse_utf16};
pub use record::OptionRecord;
pub use schema::{OPTIONS, OptionSpec};
