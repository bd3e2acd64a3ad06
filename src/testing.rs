use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

use crate::error::ActionError;
use crate::platform::Platform;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Delete { channel: ChannelId, message: MessageId },
    Transient { channel: ChannelId, content: String, lifetime: Duration },
    Send { channel: ChannelId, content: String },
    Direct { user: UserId, content: String },
    Timeout { guild: GuildId, user: UserId, minutes: u32, reason: Option<String> },
    Sync { guild: GuildId },
}

/// Records every platform call; individual steps can be scripted to fail.
#[derive(Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<Call>>,
    delete_error: Option<ActionError>,
    transient_error: Option<ActionError>,
    send_error: Option<ActionError>,
    direct_error: Option<ActionError>,
    timeout_error: Option<ActionError>,
    sync_error: Option<ActionError>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_delete(mut self, err: ActionError) -> Self {
        self.delete_error = Some(err);
        self
    }

    pub fn fail_transient(mut self, err: ActionError) -> Self {
        self.transient_error = Some(err);
        self
    }

    pub fn fail_send(mut self, err: ActionError) -> Self {
        self.send_error = Some(err);
        self
    }

    pub fn fail_direct(mut self, err: ActionError) -> Self {
        self.direct_error = Some(err);
        self
    }

    pub fn fail_timeout(mut self, err: ActionError) -> Self {
        self.timeout_error = Some(err);
        self
    }

    pub fn fail_sync(mut self, err: ActionError) -> Self {
        self.sync_error = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Contents of everything sent to `channel` through `send_message`.
    pub fn sent_to(&self, channel: ChannelId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send { channel: c, content } if c == channel => Some(content),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call, error: &Option<ActionError>) -> Result<(), ActionError> {
        self.calls.lock().unwrap().push(call);
        match error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<(), ActionError> {
        self.record(Call::Delete { channel, message }, &self.delete_error)
    }

    async fn send_transient(&self, channel: ChannelId, content: &str, lifetime: Duration) -> Result<(), ActionError> {
        self.record(
            Call::Transient { channel, content: content.to_string(), lifetime },
            &self.transient_error,
        )
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), ActionError> {
        self.record(Call::Send { channel, content: content.to_string() }, &self.send_error)
    }

    async fn send_direct(&self, user: UserId, content: &str) -> Result<(), ActionError> {
        self.record(Call::Direct { user, content: content.to_string() }, &self.direct_error)
    }

    async fn timeout_member(
        &self,
        guild: GuildId,
        user: UserId,
        minutes: u32,
        reason: Option<&str>,
    ) -> Result<(), ActionError> {
        self.record(
            Call::Timeout { guild, user, minutes, reason: reason.map(str::to_string) },
            &self.timeout_error,
        )
    }

    async fn sync_commands(&self, guild: GuildId) -> Result<usize, ActionError> {
        self.record(Call::Sync { guild }, &self.sync_error).map(|_| 2)
    }

    async fn channel_name(&self, channel: ChannelId) -> Option<String> {
        Some(format!("channel-{}", channel))
    }
}
