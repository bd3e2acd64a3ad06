use std::time::Duration;

use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

use crate::error::ActionError;

/// The Discord primitives moderation and the admin commands rely on.
///
/// `discord::SerenityPlatform` is the live implementation; every call is a
/// single attempt and reports permission failures as
/// [`ActionError::PermissionDenied`].
#[async_trait]
pub trait Platform: Send + Sync {
    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<(), ActionError>;

    /// Posts `content` and removes it again once `lifetime` has passed.
    async fn send_transient(&self, channel: ChannelId, content: &str, lifetime: Duration) -> Result<(), ActionError>;

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), ActionError>;

    async fn send_direct(&self, user: UserId, content: &str) -> Result<(), ActionError>;

    async fn timeout_member(
        &self,
        guild: GuildId,
        user: UserId,
        minutes: u32,
        reason: Option<&str>,
    ) -> Result<(), ActionError>;

    /// Re-registers the bot's slash commands in `guild`, returning how many were set.
    async fn sync_commands(&self, guild: GuildId) -> Result<usize, ActionError>;

    async fn channel_name(&self, channel: ChannelId) -> Option<String>;
}
