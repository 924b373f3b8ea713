//! Error types for connection info resolution.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for connection info operations.
pub type ConnInfoResult<T> = Result<T, ConnInfoError>;

/// Where an option assignment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionOrigin {
    /// A connection string (either grammar).
    ConnectionString,
    /// A group inside a service file.
    ServiceFile,
}

impl fmt::Display for OptionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionString => f.write_str("connection"),
            Self::ServiceFile => f.write_str("service file"),
        }
    }
}

/// Errors that can occur while parsing a connection string or reading a
/// service file.
#[derive(Error, Debug, Diagnostic)]
pub enum ConnInfoError {
    /// The connection string contains NUL, an unpaired surrogate, or bytes
    /// that are not UTF-8.
    #[error("{0}")]
    #[diagnostic(code(conninfo::invalid_input_encoding))]
    InvalidInputEncoding(String),

    /// URI-form connection string that does not follow the grammar.
    #[error("{0}")]
    #[diagnostic(code(conninfo::malformed_uri))]
    MalformedUri(String),

    /// Keyword/value connection string that does not follow the grammar.
    #[error("{0}")]
    #[diagnostic(code(conninfo::malformed_keyword_value))]
    MalformedKeywordValue(String),

    /// A well-formed assignment to an option name outside the schema.
    #[error("invalid {origin} option \"{key}\"")]
    #[diagnostic(code(conninfo::unknown_option))]
    UnknownOption { key: String, origin: OptionOrigin },

    /// A service name that can never match a group header.
    #[error("invalid service name \"{0}\"")]
    #[diagnostic(
        code(conninfo::invalid_service_name),
        help("service names can't contain '[', newlines or NUL characters")
    )]
    InvalidServiceName(String),

    /// A service file that breaks the line format.
    #[error("{0}")]
    #[diagnostic(code(conninfo::malformed_service_file))]
    MalformedServiceFile(String),

    /// The requested service is not defined in any candidate file.
    #[error("definition of service \"{0}\" not found")]
    #[diagnostic(code(conninfo::service_not_found))]
    ServiceNotFound(String),

    /// Reading a service file failed for a reason other than its absence.
    #[error("could not read service file \"{}\"", path.display())]
    #[diagnostic(code(conninfo::io_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConnInfoError {
    /// Create an invalid-encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::InvalidInputEncoding(message.into())
    }

    /// Create a malformed URI error.
    pub fn uri(message: impl Into<String>) -> Self {
        Self::MalformedUri(message.into())
    }

    /// Create a malformed keyword/value error.
    pub fn keyword_value(message: impl Into<String>) -> Self {
        Self::MalformedKeywordValue(message.into())
    }

    /// Create a malformed service file error.
    pub fn service_file(message: impl Into<String>) -> Self {
        Self::MalformedServiceFile(message.into())
    }

    /// Create an unknown option error.
    pub fn unknown_option(key: impl Into<String>, origin: OptionOrigin) -> Self {
        Self::UnknownOption {
            key: key.into(),
            origin,
        }
    }

    /// Create an I/O error for a service file path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The offending option name, for [`ConnInfoError::UnknownOption`].
    pub fn unknown_key(&self) -> Option<&str> {
        match self {
            Self::UnknownOption { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Check if this error came from the connection string grammar.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputEncoding(_) | Self::MalformedUri(_) | Self::MalformedKeywordValue(_)
        )
    }
}
