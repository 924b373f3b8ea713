//! One-call resolution of a connection string into a complete record.

use crate::file::add_service_defaults_from;
use crate::paths;
use conninfo_core::{
    ConnInfoResult, EnvSource, OptionRecord, StdEnvSource, add_env_defaults, parse,
};
use std::path::PathBuf;
use tracing::debug;

/// Resolves connection strings the way libpq does: explicit options first,
/// then the named service, then the environment and built-in defaults.
///
/// # Examples
///
/// ```rust
/// use conninfo_core::MapEnvSource;
/// use conninfo_service::Resolver;
///
/// let env = MapEnvSource::new().set("PGPORT", "6432").with_user("alice");
/// let resolver = Resolver::with_source(env).with_service_files(Vec::new());
///
/// let record = resolver.resolve("host=db.internal").unwrap();
/// assert_eq!(record.get("host"), Some("db.internal"));
/// assert_eq!(record.get("port"), Some("6432"));
/// assert_eq!(record.get("user"), Some("alice"));
/// assert_eq!(record.get("sslmode"), Some("prefer"));
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<S: EnvSource = StdEnvSource> {
    source: S,
    service_files: Option<Vec<PathBuf>>,
}

impl Resolver<StdEnvSource> {
    /// Create a resolver using the process environment.
    pub fn new() -> Self {
        Self::with_source(StdEnvSource)
    }
}

impl Default for Resolver<StdEnvSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EnvSource> Resolver<S> {
    /// Create a resolver with a custom environment source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            service_files: None,
        }
    }

    /// Search exactly these service files instead of the standard locations.
    pub fn with_service_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.service_files = Some(files.into_iter().collect());
        self
    }

    /// Get the environment source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Parse `text` and fill every option it leaves unset.
    pub fn resolve(&self, text: &str) -> ConnInfoResult<OptionRecord> {
        let record = parse(text)?;
        self.complete(record)
    }

    /// Fill every unset option of an already parsed record.
    pub fn complete(&self, mut record: OptionRecord) -> ConnInfoResult<OptionRecord> {
        let candidates = match &self.service_files {
            Some(files) => files.clone(),
            None => paths::default_candidates(&self.source),
        };

        add_service_defaults_from(&mut record, &self.source, candidates)?;
        add_env_defaults(&mut record, &self.source);

        debug!(options = record.len_set(), "connection options resolved");
        Ok(record)
    }
}
