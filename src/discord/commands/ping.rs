// src/discord/commands/ping.rs
use serenity::builder::CreateCommandOption;
use serenity::model::application::CommandOptionType;

use super::Reply;

pub fn register() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, "ping", "فحص سريع")
}

pub fn run() -> Reply {
    Reply::Text("Pong! ✅".to_string())
}
