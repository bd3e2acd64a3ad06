//! User-facing texts of the automatic pipeline. Members get Arabic first,
//! followed by English where a notice is bilingual.

use serenity::model::id::UserId;
use serenity::model::mention::Mentionable;

pub const TIMEOUT_REASON: &str = "Posted a link while links are blocked";

/// Characters of the offending message kept in the log entry.
pub const EXCERPT_CHARS: usize = 350;

pub fn channel_warning(author: UserId) -> String {
    format!("🚫 الروابط ممنوعة هنا، {}. سيتم اتخاذ إجراء تلقائي.", author.mention())
}

pub fn direct_notice(channel_name: &str) -> String {
    let ar = format!(
        "⚠️ **تنبيه بخصوص الروابط**\n\
         تم حذف رسالتك في قناة **#{}** لأنها تحتوي على رابط، وهذا ممنوع حسب قوانين السيرفر.\n\
         الرجاء الالتزام بالقوانين. شكرًا لتفهمك 🙏",
        channel_name
    );
    let en = format!(
        "⚠️ **Link Notice**\n\
         Your message in **#{}** was removed because it contained a link, \
         which is not allowed according to the server rules.\n\
         Please follow the rules. Thanks for understanding 🙏",
        channel_name
    );
    format!("{}\n\n{}", ar, en)
}

pub fn excerpt(content: &str) -> String {
    content.chars().take(EXCERPT_CHARS).collect()
}

pub fn delete_forbidden() -> String {
    "⚠️ Missing permissions to delete messages.".to_string()
}

pub fn delete_failed(detail: &str) -> String {
    format!("⚠️ Error deleting message: {}", detail)
}

pub fn timeout_forbidden(author: UserId) -> String {
    format!("⚠️ Missing permissions to timeout {}.", author.mention())
}

pub fn timeout_failed(author: UserId, detail: &str) -> String {
    format!("⚠️ Failed to timeout {}: {}", author.mention(), detail)
}

pub fn link_removed(author: UserId, channel_name: &str, timeout_minutes: Option<u32>, excerpt: &str) -> String {
    let timeout = match timeout_minutes {
        Some(minutes) => format!("timeout {}m", minutes),
        None => "no timeout".to_string(),
    };
    format!(
        "🧹 Deleted a link by {} in **#{}** ({}). Content:\n{}",
        author.mention(),
        channel_name,
        timeout,
        excerpt
    )
}

pub fn started(link_blocking_enabled: bool) -> String {
    format!("✅ **RNL Guardian** started. Link blocking: **{}**", link_blocking_enabled)
}
