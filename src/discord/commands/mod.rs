// src/discord/commands/mod.rs
mod allow;
mod help;
mod mute;
mod ping;
mod status;
mod sync;
mod toggle_blocking;

use log::info;
use serenity::builder::{CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::{CommandData, CommandInteraction, ResolvedOption, ResolvedValue};
use serenity::model::id::{GuildId, UserId};
use serenity::model::permissions::Permissions;
use serenity::prelude::*;

use crate::config::SharedConfig;
use crate::discord::SerenityPlatform;
use crate::error::CommandError;
use crate::log_sink::LogSink;
use crate::platform::Platform;

pub const GUILD_ONLY: &str = "هذا الأمر يعمل داخل السيرفر فقط.";

/// Every command the bot registers: the `/mod` group and `/help`.
pub fn register_all() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("mod")
            .description("RNL Guardian moderation commands")
            .add_option(ping::register())
            .add_option(status::register())
            .add_option(toggle_blocking::register())
            .add_option(allow::register())
            .add_option(mute::register())
            .add_option(sync::register()),
        help::register(),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModCommand {
    Ping,
    Status,
    ToggleBlocking { on: bool },
    Allow { kind: String, add: Option<String>, remove: Option<String> },
    Mute { target: UserId, minutes: i64, reason: Option<String> },
    Help,
    Sync,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Help,
}

impl Reply {
    fn into_message(self) -> CreateInteractionResponseMessage {
        let message = match self {
            Reply::Text(content) => CreateInteractionResponseMessage::new().content(content),
            Reply::Help => CreateInteractionResponseMessage::new().embed(help::embed()),
        };
        message.ephemeral(true)
    }
}

/// Who ran a command, and with which guild permissions.
#[derive(Debug, Clone)]
pub struct Invoker {
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
    pub permissions: Permissions,
}

impl Invoker {
    fn from_interaction(command: &CommandInteraction) -> Self {
        Self {
            user_id: command.user.id,
            guild_id: command.guild_id,
            permissions: command
                .member
                .as_ref()
                .and_then(|member| member.permissions)
                .unwrap_or_else(Permissions::empty),
        }
    }

    /// Administrators hold every permission.
    pub fn has(&self, required: Permissions) -> bool {
        self.permissions.contains(Permissions::ADMINISTRATOR) || self.permissions.contains(required)
    }

    fn require(&self, required: Permissions, label: &str) -> Result<(), Reply> {
        if self.has(required) {
            Ok(())
        } else {
            Err(Reply::Text(format!("❌ تحتاج صلاحية {}.", label)))
        }
    }
}

pub struct CommandContext<'a> {
    pub invoker: Invoker,
    pub config: &'a SharedConfig,
    pub platform: &'a dyn Platform,
}

impl CommandContext<'_> {
    async fn log_sink(&self) -> LogSink<'_> {
        let channel = self.config.read().await.log_channel_id;
        LogSink::new(channel, self.platform)
    }
}

pub async fn execute(command: ModCommand, ctx: &CommandContext<'_>) -> Reply {
    match command {
        ModCommand::Ping => ping::run(),
        ModCommand::Status => status::run(ctx).await,
        ModCommand::ToggleBlocking { on } => toggle_blocking::run(ctx, on).await,
        ModCommand::Allow { kind, add, remove } => allow::run(ctx, &kind, add.as_deref(), remove.as_deref()).await,
        ModCommand::Mute { target, minutes, reason } => mute::run(ctx, target, minutes, reason.as_deref()).await,
        ModCommand::Help => help::run(),
        ModCommand::Sync => sync::run(ctx).await,
    }
}

pub fn parse(data: &CommandData) -> Result<ModCommand, CommandError> {
    match data.name.as_str() {
        "help" => Ok(ModCommand::Help),
        "mod" => {
            let options = data.options();
            let Some(ResolvedOption { name, value: ResolvedValue::SubCommand(args), .. }) = options.into_iter().next() else {
                return Err(CommandError::MissingOption("subcommand"));
            };
            parse_subcommand(name, &args)
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_subcommand(name: &str, args: &[ResolvedOption<'_>]) -> Result<ModCommand, CommandError> {
    match name {
        "ping" => Ok(ModCommand::Ping),
        "status" => Ok(ModCommand::Status),
        "toggle_blocking" => Ok(ModCommand::ToggleBlocking {
            on: bool_arg(args, "on").ok_or(CommandError::MissingOption("on"))?,
        }),
        "allow" => Ok(ModCommand::Allow {
            kind: str_arg(args, "type").ok_or(CommandError::MissingOption("type"))?,
            add: str_arg(args, "add"),
            remove: str_arg(args, "remove"),
        }),
        "mute" => Ok(ModCommand::Mute {
            target: user_arg(args, "user").ok_or(CommandError::MissingOption("user"))?,
            minutes: int_arg(args, "minutes").ok_or(CommandError::MissingOption("minutes"))?,
            reason: str_arg(args, "reason"),
        }),
        "sync" => Ok(ModCommand::Sync),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn find<'a, 'b>(args: &'b [ResolvedOption<'a>], name: &str) -> Option<&'b ResolvedValue<'a>> {
    args.iter().find(|option| option.name == name).map(|option| &option.value)
}

fn bool_arg(args: &[ResolvedOption<'_>], name: &str) -> Option<bool> {
    match find(args, name)? {
        ResolvedValue::Boolean(value) => Some(*value),
        _ => None,
    }
}

fn int_arg(args: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    match find(args, name)? {
        ResolvedValue::Integer(value) => Some(*value),
        _ => None,
    }
}

fn str_arg(args: &[ResolvedOption<'_>], name: &str) -> Option<String> {
    match find(args, name)? {
        ResolvedValue::String(value) => Some(value.to_string()),
        _ => None,
    }
}

fn user_arg(args: &[ResolvedOption<'_>], name: &str) -> Option<UserId> {
    match find(args, name)? {
        ResolvedValue::User(user, _) => Some(user.id),
        _ => None,
    }
}

pub async fn dispatch(ctx: &Context, command: &CommandInteraction, config: &SharedConfig) -> Result<(), serenity::Error> {
    info!("Received /{} from {}", command.data.name, command.user.id);

    let platform = SerenityPlatform::new(ctx.http.clone());
    let reply = match parse(&command.data) {
        Ok(parsed) => {
            let command_ctx = CommandContext {
                invoker: Invoker::from_interaction(command),
                config,
                platform: &platform,
            };
            execute(parsed, &command_ctx).await
        }
        Err(e) => Reply::Text(e.to_string()),
    };

    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(reply.into_message()))
        .await
}
