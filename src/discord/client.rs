// src/discord/client.rs

use serenity::gateway::ShardManager;
use serenity::prelude::*;
use crate::config::{Settings, SharedConfig};
use std::sync::Arc;
use std::time::Duration;
use log::{info, warn};
use tokio::sync::Mutex;

use super::events::EventHandler;

pub struct DiscordClient {
    client: Mutex<Option<Client>>,
    shard_manager: Arc<ShardManager>,
}

impl DiscordClient {
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::MESSAGE_CONTENT
    }

    pub async fn new(settings: &Settings, config: SharedConfig) -> Result<Self, serenity::Error> {
        let client = Client::builder(&settings.discord_token, Self::intents())
            .event_handler(EventHandler::new(config, settings.guild_id))
            .await?;
        let shard_manager = client.shard_manager.clone();

        Ok(Self {
            client: Mutex::new(Some(client)),
            shard_manager,
        })
    }

    /// Runs the gateway until every shard stops.
    pub async fn start(&self) -> Result<(), serenity::Error> {
        let client = self.client.lock().await.take();
        match client {
            Some(mut client) => client.start().await,
            None => Err(serenity::Error::Other("Discord client has already been started")),
        }
    }

    pub async fn shutdown(&self) {
        info!("Shutting down DiscordClient...");
        match tokio::time::timeout(Duration::from_secs(10), self.shard_manager.shutdown_all()).await {
            Ok(_) => info!("Discord shards shut down successfully"),
            Err(_) => warn!("Timed out while shutting down Discord shards"),
        }
        info!("DiscordClient shutdown complete.");
    }
}
