// src/discord/platform.rs
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use serenity::builder::EditMember;
use serenity::http::Http;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use serenity::model::Timestamp;

use crate::discord::commands;
use crate::error::ActionError;
use crate::platform::Platform;

/// [`Platform`] backed by serenity's HTTP client.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Platform for SerenityPlatform {
    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<(), ActionError> {
        channel.delete_message(&self.http, message).await?;
        Ok(())
    }

    async fn send_transient(&self, channel: ChannelId, content: &str, lifetime: Duration) -> Result<(), ActionError> {
        let sent = channel.say(&self.http, content).await?;

        let http = Arc::clone(&self.http);
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            if let Err(e) = channel.delete_message(&http, sent.id).await {
                debug!("Transient message {} in {} was not removed: {}", sent.id, channel, e);
            }
        });
        Ok(())
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), ActionError> {
        channel.say(&self.http, content).await?;
        Ok(())
    }

    async fn send_direct(&self, user: UserId, content: &str) -> Result<(), ActionError> {
        let dm_channel = user.create_dm_channel(&self.http).await?;
        dm_channel.id.say(&self.http, content).await?;
        Ok(())
    }

    async fn timeout_member(
        &self,
        guild: GuildId,
        user: UserId,
        minutes: u32,
        reason: Option<&str>,
    ) -> Result<(), ActionError> {
        let until = Utc::now() + chrono::Duration::minutes(i64::from(minutes));
        let until = Timestamp::from_unix_timestamp(until.timestamp())
            .map_err(|e| ActionError::Failed(e.to_string()))?;

        let mut edit = EditMember::new().disable_communication_until_datetime(until);
        if let Some(reason) = reason {
            edit = edit.audit_log_reason(reason);
        }
        guild.edit_member(&self.http, user, edit).await?;
        Ok(())
    }

    async fn sync_commands(&self, guild: GuildId) -> Result<usize, ActionError> {
        let registered = guild.set_commands(&self.http, commands::register_all()).await?;
        Ok(registered.len())
    }

    async fn channel_name(&self, channel: ChannelId) -> Option<String> {
        channel.name(&self.http).await.ok()
    }
}
