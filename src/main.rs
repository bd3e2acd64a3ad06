use linkguard::{config::Settings, init, logging, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = Settings::from_env()?;
    logging::setup_logger(settings.log_level)?;

    let bot = init(settings).await?;
    run(bot).await?;

    Ok(())
}
