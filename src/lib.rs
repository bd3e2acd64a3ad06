pub mod config;
pub mod discord;
pub mod error;
pub mod log_sink;
pub mod logging;
pub mod moderation;
pub mod platform;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use log::{error, info};
use crate::config::{Settings, SharedConfig};
use crate::discord::DiscordClient;
use crate::error::BotError;

pub struct Bot {
    pub config: SharedConfig,
    pub discord: DiscordClient,
}

pub async fn init(settings: Settings) -> Result<Bot, BotError> {
    info!(
        "Link blocking = {} | DM on block = {} | auto timeout = {}m",
        settings.moderation.link_blocking_enabled,
        settings.moderation.auto_dm_on_block,
        settings.moderation.auto_timeout_minutes
    );
    match settings.guild_id {
        Some(guild_id) => info!("Slash commands will be registered to guild {}", guild_id),
        None => info!("GUILD_ID not set, slash commands will be registered to every guild"),
    }

    let config = settings.moderation.clone().into_shared();
    let discord = DiscordClient::new(&settings, Arc::clone(&config)).await?;

    Ok(Bot { config, discord })
}

pub async fn run(bot: Bot) -> Result<(), BotError> {
    let discord = Arc::new(bot.discord);

    let gateway = tokio::spawn({
        let discord = Arc::clone(&discord);
        async move { discord.start().await }
    });

    info!("Bot is now running. Press Ctrl+C to exit.");

    tokio::select! {
        result = gateway => {
            match result {
                Ok(Ok(())) => info!("Discord gateway closed."),
                Ok(Err(e)) => {
                    error!("Discord client error: {}", e);
                    return Err(e.into());
                }
                Err(e) => error!("Discord client task failed: {}", e),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down.");
            discord.shutdown().await;
        }
    }

    info!("Bot has shut down.");
    Ok(())
}
