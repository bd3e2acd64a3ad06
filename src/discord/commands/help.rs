// src/discord/commands/help.rs
use serenity::builder::{CreateCommand, CreateEmbed, CreateEmbedFooter};
use serenity::all::Colour;

use super::Reply;

pub const ENTRIES: &[(&str, &str)] = &[
    ("/help", "عرض هذه القائمة."),
    ("/mod ping", "فحص سريع."),
    ("/mod status", "عرض الإعدادات الحالية."),
    ("/mod toggle_blocking on:true|false", "تشغيل/إيقاف حظر الروابط."),
    ("/mod allow type:channel|role add:ID remove:ID", "إضافة/إزالة استثناءات."),
    ("/mod mute user minutes reason", "Timeout لمستخدم."),
    ("/mod sync", "مزامنة أوامر السلاش (للمشرفين)."),
];

pub fn register() -> CreateCommand {
    CreateCommand::new("help").description("عرض أوامر RNL Guardian")
}

pub fn run() -> Reply {
    Reply::Help
}

pub fn embed() -> CreateEmbed {
    ENTRIES.iter().fold(
        CreateEmbed::new()
            .title("🛡️ RNL Guardian — Help")
            .description("أوامر التحكم بالبُوت:")
            .colour(Colour::BLURPLE)
            .footer(CreateEmbedFooter::new("RNL Guardian • Stay clean, stay safe.")),
        |embed, (name, value)| embed.field(*name, *value, false),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_listed() {
        for command in ["ping", "status", "toggle_blocking", "allow", "mute", "sync", "help"] {
            assert!(
                ENTRIES.iter().any(|(name, _)| name.contains(command)),
                "{} missing from help",
                command
            );
        }
    }
}
