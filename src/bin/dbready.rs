use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dbready::cli::start::start().await
}
