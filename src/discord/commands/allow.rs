// src/discord/commands/allow.rs
use log::info;
use serenity::builder::CreateCommandOption;
use serenity::model::application::CommandOptionType;
use serenity::model::id::{ChannelId, RoleId};
use serenity::model::mention::Mentionable;
use serenity::model::permissions::Permissions;

use super::{CommandContext, Reply};
use crate::config::parse_id;

pub const USAGE: &str = "استخدم `channel` أو `role`.";

pub fn register() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, "allow", "إدارة الاستثناءات (قنوات/رولات)")
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::String, "type", "channel أو role").required(true),
        )
        .add_sub_option(CreateCommandOption::new(CommandOptionType::String, "add", "ID لإضافته"))
        .add_sub_option(CreateCommandOption::new(CommandOptionType::String, "remove", "ID لإزالته"))
}

pub async fn run(ctx: &CommandContext<'_>, kind: &str, add: Option<&str>, remove: Option<&str>) -> Reply {
    if let Err(denied) = ctx.invoker.require(Permissions::MANAGE_GUILD, "Manage Server") {
        return denied;
    }

    let add = add.and_then(|raw| parse_id(raw.trim()));
    let remove = remove.and_then(|raw| parse_id(raw.trim()));

    let result = {
        let mut config = ctx.config.write().await;
        match kind.trim().to_lowercase().as_str() {
            "channel" => {
                if let Some(id) = add {
                    config.allowed_channel_ids.insert(ChannelId::new(id));
                }
                if let Some(id) = remove {
                    config.allowed_channel_ids.remove(&ChannelId::new(id));
                }
                format!("Channels: {}", config.allowed_channels_display())
            }
            "role" => {
                if let Some(id) = add {
                    config.allowed_role_ids.insert(RoleId::new(id));
                }
                if let Some(id) = remove {
                    config.allowed_role_ids.remove(&RoleId::new(id));
                }
                format!("Roles: {}", config.allowed_roles_display())
            }
            _ => return Reply::Text(USAGE.to_string()),
        }
    };
    info!("Allow-list updated by {}: {}", ctx.invoker.user_id, result);

    ctx.log_sink()
        .await
        .send(&format!("✅ Allow-list updated by {} → {}", ctx.invoker.user_id.mention(), result))
        .await;
    Reply::Text(result)
}
