//! # conninfo
//!
//! libpq-compatible resolution of PostgreSQL connection parameters.
//!
//! conninfo provides:
//! - A parser for `postgresql://` URIs and `keyword=value` strings
//! - A streaming reader for `pg_service.conf` service files
//! - Environment defaults (`PGHOST`, `PGPORT`, ...) and built-in fallbacks
//! - The same precedence libpq applies: explicit, service, environment,
//!   fallback
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use conninfo::prelude::*;
//!
//! fn main() -> Result<(), ConnInfoError> {
//!     let record = Resolver::new().resolve("postgresql://app@db.internal/orders")?;
//!
//!     for (name, value) in record.iter_set() {
//!         if name != "password" {
//!             println!("{name} = {value}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing Only
//!
//! ```rust
//! let record = conninfo::parse("host=localhost port=5432 dbname='my db'").unwrap();
//! assert_eq!(record.get("dbname"), Some("my db"));
//! assert_eq!(record.get("user"), None);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Option vocabulary, environment variables and fallbacks.
pub mod schema {
    pub use conninfo_core::schema::*;
}

/// Service file readers and lookup.
pub mod service {
    pub use conninfo_service::*;
}

/// Logging setup.
pub mod logging {
    pub use conninfo_core::logging::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ConnInfoError, ConnInfoResult, ConnectionString, EnvSource, MapEnvSource, OptionRecord,
        Resolver, StdEnvSource, parse,
    };
}

// Re-export key types at the crate root
pub use conninfo_core::{
    ConnInfoError, ConnInfoResult, ConnectionString, EnvSource, Grammar, MapEnvSource,
    OptionOrigin, OptionRecord, StdEnvSource, add_env_defaults, parse, parse_bytes, parse_utf16,
};
pub use conninfo_service::{Resolver, add_service_defaults};
