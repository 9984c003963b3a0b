use super::Action;
use crate::report;

/// Execute the action's business logic by delegating to the report module
///
/// The report is printed only after every step succeeded.
pub async fn execute(action: Action) -> anyhow::Result<()> {
    let output = match action {
        Action::Compare {
            source,
            destination,
            settings,
            format,
        } => report::compare(&source, &destination, settings)
            .await?
            .render(format)?,
        Action::Ping { connection, format } => {
            report::ping(&connection).await?.render(format)?
        }
    };

    println!("{output}");

    Ok(())
}
