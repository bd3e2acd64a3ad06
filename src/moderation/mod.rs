// src/moderation/mod.rs
pub mod allowlist;
pub mod detector;
pub mod notice;
mod pipeline;

pub use pipeline::{handle_message, MessageOutcome, ModerationReport, StepOutcome, WARNING_LIFETIME};

use serenity::model::id::{ChannelId, GuildId, MessageId, RoleId, UserId};

/// Role membership of a message author, resolved once from the gateway
/// payload. Webhooks and DMs carry no member data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorRoles {
    Member(Vec<RoleId>),
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct Author {
    pub id: UserId,
    pub is_bot: bool,
    pub roles: AuthorRoles,
}

/// A guild or DM message as the moderation pipeline sees it.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub author: Author,
    pub content: String,
}
