use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    mate::cli::run().await
}
