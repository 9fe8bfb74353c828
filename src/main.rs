use dallyeok::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting dallyeok");

    // Load configuration
    let config = startup::load_config().await?;

    // Open the store and run until shutdown
    startup::run(config).await
}
