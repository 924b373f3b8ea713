//! Service name and candidate service file selection.

use conninfo_core::{EnvSource, OptionRecord};
use std::path::{Path, PathBuf};

/// Environment variable naming the service when the record doesn't.
pub const SERVICE_ENV: &str = "PGSERVICE";

/// Environment variable overriding the per-user service file.
pub const SERVICE_FILE_ENV: &str = "PGSERVICEFILE";

/// Environment variable overriding the system configuration directory.
pub const SYSCONFDIR_ENV: &str = "PGSYSCONFDIR";

/// System configuration directory used when `PGSYSCONFDIR` is unset.
pub const DEFAULT_SYSCONFDIR: &str = "/etc/postgresql";

/// Per-user service file, relative to the home directory.
pub const USER_SERVICE_FILE: &str = ".pg_service.conf";

/// System-wide service file, relative to the configuration directory.
pub const SYSTEM_SERVICE_FILE: &str = "pg_service.conf";

/// The service to look up: the record's `service` option, else `PGSERVICE`.
pub fn service_name<S: EnvSource + ?Sized>(record: &OptionRecord, env: &S) -> Option<String> {
    record
        .get("service")
        .map(str::to_string)
        .or_else(|| env.get(SERVICE_ENV))
}

/// Service files to search, in order.
///
/// The first candidate is `PGSERVICEFILE` if set, otherwise
/// `~/.pg_service.conf` when a home directory is known. The last is always
/// `pg_service.conf` in `PGSYSCONFDIR` (default `/etc/postgresql`).
pub fn service_file_candidates<S: EnvSource + ?Sized>(
    env: &S,
    home: Option<&Path>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);

    if let Some(file) = env.get(SERVICE_FILE_ENV) {
        candidates.push(PathBuf::from(file));
    } else if let Some(home) = home {
        candidates.push(home.join(USER_SERVICE_FILE));
    }

    let sysconfdir = env
        .get(SYSCONFDIR_ENV)
        .unwrap_or_else(|| DEFAULT_SYSCONFDIR.to_string());
    candidates.push(Path::new(&sysconfdir).join(SYSTEM_SERVICE_FILE));

    candidates
}

/// [`service_file_candidates`] using the current user's home directory.
pub fn default_candidates<S: EnvSource + ?Sized>(env: &S) -> Vec<PathBuf> {
    service_file_candidates(env, dirs::home_dir().as_deref())
}
