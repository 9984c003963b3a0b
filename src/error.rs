use std::{fmt, time::Duration};

/// Boxed cause carried by the variants that wrap driver or parser failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Metadata query that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Version,
    Size,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version => write!(f, "version"),
            Self::Size => write!(f, "size"),
        }
    }
}

fn last_error_suffix(last_error: Option<&str>) -> String {
    last_error
        .map(|e| format!(", last error: {e}"))
        .unwrap_or_default()
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Required configuration is missing or invalid
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The connection string could not be turned into connect options
    #[error("error opening the {target} database")]
    ConnectionOpen {
        target: String,
        #[source]
        source: BoxError,
    },

    /// No liveness check succeeded before the deadline
    #[error(
        "{target} database not ready after {timeout:?} ({attempts} attempts){}",
        last_error_suffix(.last_error.as_deref())
    )]
    DeadlineExceeded {
        target: String,
        timeout: Duration,
        attempts: u32,
        last_error: Option<String>,
    },

    /// One-shot liveness check failed
    #[error("{target} database is unreachable")]
    Unreachable {
        target: String,
        #[source]
        source: BoxError,
    },

    /// A metadata query failed against a ready target
    #[error("error querying {target} database {query}")]
    Query {
        target: String,
        query: Query,
        #[source]
        source: BoxError,
    },
}
