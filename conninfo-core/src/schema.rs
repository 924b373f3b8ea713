//! The catalogue of recognized connection options.
//!
//! The order of [`OPTIONS`] is significant: records iterate in this order,
//! and the environment filler visits options in this order.

const DEFAULT_PORT: &str = "5432";
const DEFAULT_OPTION: &str = "";
const DEFAULT_CHANNEL_BINDING: &str = "prefer";
const DEFAULT_SSL_MODE: &str = "prefer";
const DEFAULT_GSS_MODE: &str = "prefer";
const DEFAULT_SSL_MIN_PROTOCOL_VERSION: &str = "TLSv1.2";
const DEFAULT_KRB_SRVNAME: &str = "postgres";
const DEFAULT_TARGET_SESSION_ATTRS: &str = "any";

/// A single recognized option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Canonical keyword.
    pub name: &'static str,
    /// Environment variable consulted by the environment filler.
    pub env_var: Option<&'static str>,
    /// Built-in value used when nothing else supplies one.
    pub fallback: Option<&'static str>,
}

const fn option(
    name: &'static str,
    env_var: Option<&'static str>,
    fallback: Option<&'static str>,
) -> OptionSpec {
    OptionSpec {
        name,
        env_var,
        fallback,
    }
}

/// Number of recognized options.
pub const OPTION_COUNT: usize = 36;

/// Every recognized option, in canonical order.
pub static OPTIONS: [OptionSpec; OPTION_COUNT] = [
    option("service", Some("PGSERVICE"), None),
    option("user", Some("PGUSER"), None),
    option("password", Some("PGPASSWORD"), None),
    option("passfile", Some("PGPASSFILE"), None),
    option(
        "channel_binding",
        Some("PGCHANNELBINDING"),
        Some(DEFAULT_CHANNEL_BINDING),
    ),
    option("connect_timeout", Some("PGCONNECT_TIMEOUT"), None),
    option("dbname", Some("PGDATABASE"), None),
    option("host", Some("PGHOST"), None),
    option("hostaddr", Some("PGHOSTADDR"), None),
    option("port", Some("PGPORT"), Some(DEFAULT_PORT)),
    option("client_encoding", Some("PGCLIENTENCODING"), None),
    option("options", Some("PGOPTIONS"), Some(DEFAULT_OPTION)),
    option("application_name", Some("PGAPPNAME"), None),
    option("fallback_application_name", None, None),
    option("keepalives", None, None),
    option("keepalives_idle", None, None),
    option("keepalives_interval", None, None),
    option("keepalives_count", None, None),
    option("tcp_user_timeout", None, None),
    option("sslmode", Some("PGSSLMODE"), Some(DEFAULT_SSL_MODE)),
    option("sslcompression", Some("PGSSLCOMPRESSION"), Some("0")),
    option("sslcert", Some("PGSSLCERT"), None),
    option("sslkey", Some("PGSSLKEY"), None),
    option("sslpassword", None, None),
    option("sslrootcert", Some("PGSSLROOTCERT"), None),
    option("sslcrl", Some("PGSSLCRL"), None),
    option("sslcrldir", Some("PGSSLCRLDIR"), None),
    option("sslsni", Some("PGSSLSNI"), Some("1")),
    option("requirepeer", Some("PGREQUIREPEER"), None),
    option(
        "ssl_min_protocol_version",
        Some("PGSSLMINPROTOCOLVERSION"),
        Some(DEFAULT_SSL_MIN_PROTOCOL_VERSION),
    ),
    option(
        "ssl_max_protocol_version",
        Some("PGSSLMAXPROTOCOLVERSION"),
        None,
    ),
    option("gssencmode", Some("PGGSSENCMODE"), Some(DEFAULT_GSS_MODE)),
    option("krbsrvname", Some("PGKRBSRVNAME"), Some(DEFAULT_KRB_SRVNAME)),
    option("gsslib", Some("PGGSSLIB"), None),
    option("replication", None, None),
    option(
        "target_session_attrs",
        Some("PGTARGETSESSIONATTRS"),
        Some(DEFAULT_TARGET_SESSION_ATTRS),
    ),
];

/// Legacy boolean consulted for `sslmode` when `PGSSLMODE` is absent.
pub const REQUIRE_SSL_ENV: &str = "PGREQUIRESSL";

/// Position of an option in [`OPTIONS`].
pub fn index_of(name: &str) -> Option<usize> {
    OPTIONS.iter().position(|spec| spec.name == name)
}

/// Look up an option by keyword.
pub fn lookup(name: &str) -> Option<&'static OptionSpec> {
    index_of(name).map(|i| &OPTIONS[i])
}

/// Check if a keyword is recognized.
pub fn is_known(name: &str) -> bool {
    index_of(name).is_some()
}

/// Iterate over every option name in canonical order.
pub fn names() -> impl Iterator<Item = &'static str> {
    OPTIONS.iter().map(|spec| spec.name)
}
