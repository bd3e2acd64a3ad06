// src/discord/commands/status.rs
use serenity::builder::CreateCommandOption;
use serenity::model::application::CommandOptionType;

use super::{CommandContext, Reply};

pub fn register() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, "status", "عرض الإعدادات الحالية")
}

pub async fn run(ctx: &CommandContext<'_>) -> Reply {
    Reply::Text(ctx.config.read().await.status_report())
}
