//! Environment lookup and environment-based defaults.

use crate::identity;
use crate::record::OptionRecord;
use crate::schema::{OPTIONS, REQUIRE_SSL_ENV};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Source for environment variables and the current user's identity.
pub trait EnvSource {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;

    /// Check if a variable exists.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Name of the operating system user, used as the last resort for `user`.
    fn current_user(&self) -> Option<String> {
        identity::current_username()
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn current_user(&self) -> Option<String> {
        (**self).current_user()
    }
}

/// Default environment source using std::env.
///
/// Variables whose value is not valid Unicode are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a HashMap.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
    user: Option<String>,
}

impl MapEnvSource {
    /// Create a new map-based environment source with no variables and no
    /// known user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Add multiple variables.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars.extend(vars);
        self
    }

    /// Set the operating system user name reported by this source.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn current_user(&self) -> Option<String> {
        self.user.clone()
    }
}

/// Fill every unset option from the environment.
///
/// For each unset option, in schema order, the first of these that applies
/// wins:
///
/// 1. the option's environment variable, if present (even when empty);
/// 2. for `sslmode`, `require` when `PGREQUIRESSL` starts with `1`;
/// 3. the option's built-in fallback;
/// 4. for `user`, the operating system user name.
///
/// Options that already have a value are never touched.
///
/// # Examples
///
/// ```rust
/// use conninfo_core::{MapEnvSource, OptionRecord, add_env_defaults};
///
/// let env = MapEnvSource::new().set("PGHOST", "db.internal").with_user("alice");
/// let mut record = OptionRecord::new();
/// add_env_defaults(&mut record, &env);
///
/// assert_eq!(record.get("host"), Some("db.internal"));
/// assert_eq!(record.get("port"), Some("5432"));
/// assert_eq!(record.get("user"), Some("alice"));
/// ```
pub fn add_env_defaults<S: EnvSource + ?Sized>(record: &mut OptionRecord, env: &S) {
    let mut filled = 0;

    for (i, spec) in OPTIONS.iter().enumerate() {
        if record.slot(i).is_some() {
            continue;
        }

        let value = spec
            .env_var
            .and_then(|var| env.get(var))
            .or_else(|| {
                (spec.name == "sslmode"
                    && env
                        .get(REQUIRE_SSL_ENV)
                        .is_some_and(|v| v.starts_with('1')))
                .then(|| "require".to_string())
            })
            .or_else(|| spec.fallback.map(str::to_string))
            .or_else(|| {
                if spec.name == "user" {
                    env.current_user()
                } else {
                    None
                }
            });

        if let Some(value) = value {
            trace!(option = spec.name, "filled from environment");
            record.set_slot(i, value);
            filled += 1;
        }
    }

    debug!(filled, "environment defaults applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptionOrigin;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_source() {
        let env = MapEnvSource::new().set("PGHOST", "localhost").set("EMPTY", "");
        assert_eq!(env.get("PGHOST").as_deref(), Some("localhost"));
        assert!(env.contains("EMPTY"));
        assert!(!env.contains("MISSING"));
        assert_eq!(env.current_user(), None);
    }

    #[test]
    fn test_fallbacks_without_environment() {
        let mut record = OptionRecord::new();
        add_env_defaults(&mut record, &MapEnvSource::new());

        let expected = vec![
            ("channel_binding", "prefer"),
            ("port", "5432"),
            ("options", ""),
            ("sslmode", "prefer"),
            ("sslcompression", "0"),
            ("sslsni", "1"),
            ("ssl_min_protocol_version", "TLSv1.2"),
            ("gssencmode", "prefer"),
            ("krbsrvname", "postgres"),
            ("target_session_attrs", "any"),
        ];
        assert_eq!(record.iter_set().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_environment_beats_fallback() {
        let env = MapEnvSource::new()
            .set("PGPORT", "6432")
            .set("PGDATABASE", "")
            .set("PGAPPNAME", "worker");
        let mut record = OptionRecord::new();
        add_env_defaults(&mut record, &env);

        assert_eq!(record.get("port"), Some("6432"));
        assert_eq!(record.get("dbname"), Some(""));
        assert_eq!(record.get("application_name"), Some("worker"));
    }

    #[test]
    fn test_set_fields_are_not_touched() {
        let env = MapEnvSource::new().set("PGHOST", "env-host").set("PGPORT", "1");
        let mut record = OptionRecord::new();
        record
            .set("host", "explicit", OptionOrigin::ConnectionString)
            .unwrap();
        add_env_defaults(&mut record, &env);

        assert_eq!(record.get("host"), Some("explicit"));
        assert_eq!(record.get("port"), Some("1"));
    }

    #[test]
    fn test_requiressl_environment() {
        for (value, expected) in [("1", "require"), ("1yes", "require"), ("0", "prefer"), ("", "prefer")] {
            let env = MapEnvSource::new().set("PGREQUIRESSL", value);
            let mut record = OptionRecord::new();
            add_env_defaults(&mut record, &env);
            assert_eq!(record.get("sslmode"), Some(expected), "PGREQUIRESSL={value}");
        }
    }

    #[test]
    fn test_sslmode_environment_beats_requiressl() {
        let env = MapEnvSource::new()
            .set("PGSSLMODE", "disable")
            .set("PGREQUIRESSL", "1");
        let mut record = OptionRecord::new();
        add_env_defaults(&mut record, &env);
        assert_eq!(record.get("sslmode"), Some("disable"));
    }

    #[test]
    fn test_user_falls_back_to_os_user() {
        let mut record = OptionRecord::new();
        add_env_defaults(&mut record, &MapEnvSource::new().with_user("alice"));
        assert_eq!(record.get("user"), Some("alice"));

        let env = MapEnvSource::new().set("PGUSER", "bob").with_user("alice");
        let mut record = OptionRecord::new();
        add_env_defaults(&mut record, &env);
        assert_eq!(record.get("user"), Some("bob"));
    }

    #[test]
    fn test_failed_user_lookup_leaves_user_unset() {
        let mut record = OptionRecord::new();
        add_env_defaults(&mut record, &MapEnvSource::new());
        assert!(!record.is_set("user"));
    }
}
