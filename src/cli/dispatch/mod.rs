use crate::{
    Error,
    cli::actions::Action,
    probe::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT, ProbeSettings},
    report::{DEFAULT_PING_CONNECTION, OutputFormat},
};
use clap::ArgMatches;
use std::time::Duration;
use tracing::Level;

/// Required, non-empty connection string
fn connection(matches: &ArgMatches, id: &str) -> Result<String, Error> {
    matches
        .get_one::<String>(id)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::Configuration(
                "Both source and destination database connection strings must be provided \
                (--source, --dest)"
                    .to_string(),
            )
        })
}

fn format(matches: &ArgMatches) -> Result<OutputFormat, Error> {
    matches
        .get_one::<String>("format")
        .map_or(Ok(OutputFormat::default()), |f| f.parse::<OutputFormat>())
        .map_err(Error::Configuration)
}

/// Map `-v` occurrences to a log level
#[must_use]
pub fn verbosity(matches: &ArgMatches) -> Level {
    let count = matches
        .try_get_one::<u8>("verbose")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(0);

    match count {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Convert `dbready` `ArgMatches` into a typed Action with validation
///
/// # Errors
///
/// Returns [`Error::Configuration`] if a connection string is missing or empty,
/// if the interval or timeout is zero, or if the timeout exceeds a year
pub fn dispatch(matches: &ArgMatches) -> Result<Action, Error> {
    let source = connection(matches, "source")?;
    let destination = connection(matches, "dest")?;

    let interval = matches
        .get_one::<u64>("interval")
        .copied()
        .map_or(DEFAULT_INTERVAL, Duration::from_millis);

    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

    let settings = ProbeSettings::new(interval, timeout)?;

    Ok(Action::Compare {
        source,
        destination,
        settings,
        format: format(matches)?,
    })
}

/// Convert `dbping` `ArgMatches` into a typed Action
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the format is invalid
pub fn dispatch_ping(matches: &ArgMatches) -> Result<Action, Error> {
    Ok(Action::Ping {
        connection: DEFAULT_PING_CONNECTION.to_string(),
        format: format(matches)?,
    })
}
