use super::{commands, dispatch, telemetry};
use anyhow::Result;

/// Main orchestrator - Pure orchestration with no business logic
///
/// Five-step data flow:
/// 1. Parse: Extract CLI arguments
/// 2. Extract Verbosity: Convert flag count to logging level
/// 3. Initialize Telemetry: Set up structured logging on stderr
/// 4. Dispatch: Convert `ArgMatches` into typed Action enum
/// 5. Execute: Run the action's business logic
///
/// # Errors
///
/// Returns an error if any step in the flow fails
pub async fn start() -> Result<()> {
    let matches = commands::new().get_matches();

    let verbosity = dispatch::verbosity(&matches);

    telemetry::init(verbosity)?;

    let action = dispatch::dispatch(&matches)?;

    action.execute().await?;

    Ok(())
}

/// Same flow as [`start`] for the single-database `dbping` binary
///
/// # Errors
///
/// Returns an error if any step in the flow fails
pub async fn start_ping() -> Result<()> {
    let matches = commands::ping().get_matches();

    let verbosity = dispatch::verbosity(&matches);

    telemetry::init(verbosity)?;

    let action = dispatch::dispatch_ping(&matches)?;

    action.execute().await?;

    Ok(())
}
