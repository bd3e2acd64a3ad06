// src/discord/commands/mute.rs
use log::{info, warn};
use serenity::builder::CreateCommandOption;
use serenity::model::application::CommandOptionType;
use serenity::model::id::UserId;
use serenity::model::mention::Mentionable;
use serenity::model::permissions::Permissions;

use super::{CommandContext, Reply, GUILD_ONLY};
use crate::error::{ActionError, CommandError};

/// Discord refuses timeouts longer than 28 days.
pub const MAX_TIMEOUT_MINUTES: u32 = 28 * 24 * 60;

pub const CANNOT_TIMEOUT: &str = "ما عندي صلاحية لتوقيف هذا المستخدم.";

pub fn register() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, "mute", "Timeout لمستخدم دقائق محددة")
        .add_sub_option(CreateCommandOption::new(CommandOptionType::User, "user", "المستخدم").required(true))
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::Integer, "minutes", "المدة بالدقائق").required(true),
        )
        .add_sub_option(CreateCommandOption::new(CommandOptionType::String, "reason", "سبب (اختياري)"))
}

pub async fn run(ctx: &CommandContext<'_>, target: UserId, minutes: i64, reason: Option<&str>) -> Reply {
    if let Err(denied) = ctx.invoker.require(Permissions::MODERATE_MEMBERS, "Moderate Members") {
        return denied;
    }
    let Some(guild) = ctx.invoker.guild_id else {
        return Reply::Text(GUILD_ONLY.to_string());
    };
    let minutes = match u32::try_from(minutes) {
        Ok(minutes) if (1..=MAX_TIMEOUT_MINUTES).contains(&minutes) => minutes,
        _ => {
            let err = CommandError::InvalidArgument(format!(
                "Minutes must be between 1 and {}.",
                MAX_TIMEOUT_MINUTES
            ));
            return Reply::Text(err.to_string());
        }
    };
    let reason_text = reason.unwrap_or("—");

    match ctx.platform.timeout_member(guild, target, minutes, reason).await {
        Ok(()) => {
            info!("{} timed out {} for {}m", ctx.invoker.user_id, target, minutes);
            ctx.log_sink()
                .await
                .send(&format!(
                    "🔇 Timeout: {} for {}m by {}. Reason: {}",
                    target.mention(),
                    minutes,
                    ctx.invoker.user_id.mention(),
                    reason_text
                ))
                .await;
            Reply::Text(format!("🔇 {} timed out for {}m. Reason: {}", target.mention(), minutes, reason_text))
        }
        Err(ActionError::PermissionDenied) => {
            warn!("Missing permissions to timeout {}", target);
            Reply::Text(CANNOT_TIMEOUT.to_string())
        }
        Err(ActionError::Failed(detail)) => Reply::Text(format!("Error: {}", detail)),
    }
}
