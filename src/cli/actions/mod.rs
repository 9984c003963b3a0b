mod run;

use crate::{probe::ProbeSettings, report::OutputFormat};

/// Action enum representing each possible command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Probe both databases, then report source version and size and
    /// destination version
    Compare {
        source: String,
        destination: String,
        settings: ProbeSettings,
        format: OutputFormat,
    },
    /// One-shot check of a single database, then report its version
    Ping {
        connection: String,
        format: OutputFormat,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
