use log::debug;
use serenity::model::id::ChannelId;

use crate::platform::Platform;

/// Best-effort mirror of moderation actions into the configured log channel.
pub struct LogSink<'a> {
    channel: Option<ChannelId>,
    platform: &'a dyn Platform,
}

impl<'a> LogSink<'a> {
    pub fn new(channel: Option<ChannelId>, platform: &'a dyn Platform) -> Self {
        Self { channel, platform }
    }

    pub async fn send(&self, text: &str) {
        let Some(channel) = self.channel else {
            return;
        };
        if let Err(e) = self.platform.send_message(channel, text).await {
            debug!("Dropped log entry for channel {}: {}", channel, e);
        }
    }
}
