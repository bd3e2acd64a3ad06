// src/discord/commands/toggle_blocking.rs
use log::info;
use serenity::builder::CreateCommandOption;
use serenity::model::application::CommandOptionType;
use serenity::model::mention::Mentionable;
use serenity::model::permissions::Permissions;

use super::{CommandContext, Reply};

pub fn register() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, "toggle_blocking", "تشغيل/إيقاف حظر الروابط")
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::Boolean, "on", "true or false").required(true),
        )
}

pub async fn run(ctx: &CommandContext<'_>, on: bool) -> Reply {
    if let Err(denied) = ctx.invoker.require(Permissions::MANAGE_GUILD, "Manage Server") {
        return denied;
    }

    ctx.config.write().await.link_blocking_enabled = on;
    info!("Link blocking set to {} by {}", on, ctx.invoker.user_id);

    ctx.log_sink()
        .await
        .send(&format!("🔧 Link blocking changed to **{}** by {}", on, ctx.invoker.user_id.mention()))
        .await;
    Reply::Text(format!("Link blocking set to **{}**", on))
}
