use thiserror::Error;

/// Startup configuration errors. Listing itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port {0:?}: expected an integer between 1 and 65535")]
    InvalidPort(String),

    #[error("invalid listing order {0:?}: expected \"enumeration\" or \"lexical\"")]
    InvalidOrder(String),

    #[error("invalid route {0:?}: must be a literal path starting with '/'")]
    InvalidRoute(String),

    #[error("directory must not be empty")]
    EmptyDirectory,
}
