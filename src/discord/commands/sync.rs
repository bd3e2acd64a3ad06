// src/discord/commands/sync.rs
use log::{info, warn};
use serenity::builder::CreateCommandOption;
use serenity::model::application::CommandOptionType;
use serenity::model::permissions::Permissions;

use super::{CommandContext, Reply, GUILD_ONLY};

pub fn register() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, "sync", "Sync slash commands (admin only)")
}

pub async fn run(ctx: &CommandContext<'_>) -> Reply {
    if let Err(denied) = ctx.invoker.require(Permissions::ADMINISTRATOR, "Administrator") {
        return denied;
    }
    let Some(guild) = ctx.invoker.guild_id else {
        return Reply::Text(GUILD_ONLY.to_string());
    };

    match ctx.platform.sync_commands(guild).await {
        Ok(count) => {
            info!("Slash commands synced to guild {} ({} commands)", guild, count);
            Reply::Text("✅ تم مزامنة أوامر السلاش مع هذا السيرفر.".to_string())
        }
        Err(e) => {
            warn!("Slash command sync for guild {} failed: {}", guild, e);
            Reply::Text(format!("Error: {}", e))
        }
    }
}
