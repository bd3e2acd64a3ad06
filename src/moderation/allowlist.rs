use serenity::model::id::ChannelId;

use crate::config::ModerationConfig;
use crate::moderation::AuthorRoles;

/// Whether a message is exempt from link blocking, by channel or by any of
/// the author's roles. Authors without a known role set only get the
/// channel check.
pub fn is_exempt(config: &ModerationConfig, channel: ChannelId, roles: &AuthorRoles) -> bool {
    if config.allowed_channel_ids.contains(&channel) {
        return true;
    }
    match roles {
        AuthorRoles::Member(roles) => roles.iter().any(|role| config.allowed_role_ids.contains(role)),
        AuthorRoles::Unavailable => false,
    }
}
