use std::time::Duration;

use log::{debug, info, warn};
use serenity::model::id::{ChannelId, UserId};

use crate::config::SharedConfig;
use crate::error::ActionError;
use crate::log_sink::LogSink;
use crate::moderation::{allowlist, detector, notice, InboundMessage};
use crate::platform::Platform;

pub const WARNING_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Skipped,
    PermissionDenied,
    Failed(String),
}

impl From<Result<(), ActionError>> for StepOutcome {
    fn from(result: Result<(), ActionError>) -> Self {
        match result {
            Ok(()) => StepOutcome::Done,
            Err(ActionError::PermissionDenied) => StepOutcome::PermissionDenied,
            Err(ActionError::Failed(detail)) => StepOutcome::Failed(detail),
        }
    }
}

/// What happened to a message whose link was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationReport {
    pub author: UserId,
    pub channel: ChannelId,
    pub excerpt: String,
    pub warning: StepOutcome,
    pub direct_notice: StepOutcome,
    pub timeout: StepOutcome,
    /// Minutes actually applied; `None` if no timeout took effect.
    pub timeout_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    IgnoredBot,
    /// Not a violation; continues to regular command handling.
    PassThrough,
    /// The message could not be removed, nothing else was attempted.
    DeleteFailed(ActionError),
    Moderated(ModerationReport),
}

// Config values the pipeline needs, copied out so the lock is not held
// across Discord calls.
struct ActionPlan {
    auto_dm_on_block: bool,
    auto_timeout_minutes: u32,
    log_channel: Option<ChannelId>,
}

pub async fn handle_message(message: &InboundMessage, config: &SharedConfig, platform: &dyn Platform) -> MessageOutcome {
    if message.author.is_bot {
        return MessageOutcome::IgnoredBot;
    }

    let plan = {
        let config = config.read().await;
        if !config.link_blocking_enabled
            || !detector::contains_link(&message.content)
            || allowlist::is_exempt(&config, message.channel_id, &message.author.roles)
        {
            return MessageOutcome::PassThrough;
        }
        ActionPlan {
            auto_dm_on_block: config.auto_dm_on_block,
            auto_timeout_minutes: config.auto_timeout_minutes,
            log_channel: config.log_channel_id,
        }
    };

    let log_sink = LogSink::new(plan.log_channel, platform);
    let author = message.author.id;

    if let Err(e) = platform.delete_message(message.channel_id, message.id).await {
        warn!("Could not delete link message {} in {}: {}", message.id, message.channel_id, e);
        let entry = match &e {
            ActionError::PermissionDenied => notice::delete_forbidden(),
            ActionError::Failed(detail) => notice::delete_failed(detail),
        };
        log_sink.send(&entry).await;
        return MessageOutcome::DeleteFailed(e);
    }

    let warning: StepOutcome = platform
        .send_transient(message.channel_id, &notice::channel_warning(author), WARNING_LIFETIME)
        .await
        .into();
    if warning != StepOutcome::Done {
        warn!("Link warning for {} in {} was not posted: {:?}", author, message.channel_id, warning);
    }

    let channel_name = platform
        .channel_name(message.channel_id)
        .await
        .unwrap_or_else(|| message.channel_id.to_string());

    let direct_notice = if plan.auto_dm_on_block {
        let outcome: StepOutcome = platform
            .send_direct(author, &notice::direct_notice(&channel_name))
            .await
            .into();
        if outcome != StepOutcome::Done {
            debug!("Link notice DM to {} not delivered: {:?}", author, outcome);
        }
        outcome
    } else {
        StepOutcome::Skipped
    };

    let timeout = match message.guild_id {
        Some(guild) if plan.auto_timeout_minutes > 0 => {
            let result = platform
                .timeout_member(guild, author, plan.auto_timeout_minutes, Some(notice::TIMEOUT_REASON))
                .await;
            match &result {
                Ok(()) => {}
                Err(ActionError::PermissionDenied) => log_sink.send(&notice::timeout_forbidden(author)).await,
                Err(ActionError::Failed(detail)) => log_sink.send(&notice::timeout_failed(author, detail)).await,
            }
            StepOutcome::from(result)
        }
        _ => StepOutcome::Skipped,
    };
    let timeout_minutes = (timeout == StepOutcome::Done).then_some(plan.auto_timeout_minutes);

    let excerpt = notice::excerpt(&message.content);
    log_sink
        .send(&notice::link_removed(author, &channel_name, timeout_minutes, &excerpt))
        .await;
    info!(
        "Removed link from {} in {} (dm: {:?}, timeout: {:?})",
        author, message.channel_id, direct_notice, timeout
    );

    MessageOutcome::Moderated(ModerationReport {
        author,
        channel: message.channel_id,
        excerpt,
        warning,
        direct_notice,
        timeout,
        timeout_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModerationConfig;
    use crate::moderation::{Author, AuthorRoles};
    use crate::testing::{Call, RecordingPlatform};
    use serenity::model::id::{GuildId, MessageId, RoleId};

    const LOG: u64 = 900;
    const CHANNEL: u64 = 10;
    const GUILD: u64 = 1;
    const AUTHOR: u64 = 42;

    fn config() -> ModerationConfig {
        ModerationConfig {
            log_channel_id: Some(ChannelId::new(LOG)),
            ..ModerationConfig::default()
        }
    }

    fn message(content: &str) -> InboundMessage {
        InboundMessage {
            id: MessageId::new(5),
            channel_id: ChannelId::new(CHANNEL),
            guild_id: Some(GuildId::new(GUILD)),
            author: Author {
                id: UserId::new(AUTHOR),
                is_bot: false,
                roles: AuthorRoles::Member(vec![RoleId::new(3)]),
            },
            content: content.to_string(),
        }
    }

    fn is_delete(call: &Call) -> bool {
        matches!(call, Call::Delete { .. })
    }

    #[tokio::test]
    async fn link_is_deleted_warned_notified_timed_out_and_logged() {
        let platform = RecordingPlatform::new();
        let shared = config().into_shared();

        let outcome = handle_message(&message("look https://spam.example"), &shared, &platform).await;

        let MessageOutcome::Moderated(report) = outcome else {
            panic!("expected moderation, got {:?}", outcome);
        };
        assert_eq!(report.warning, StepOutcome::Done);
        assert_eq!(report.direct_notice, StepOutcome::Done);
        assert_eq!(report.timeout, StepOutcome::Done);
        assert_eq!(report.timeout_minutes, Some(30));

        let calls = platform.calls();
        assert_eq!(calls[0], Call::Delete { channel: ChannelId::new(CHANNEL), message: MessageId::new(5) });
        assert!(matches!(&calls[1], Call::Transient { lifetime, content, .. }
            if *lifetime == WARNING_LIFETIME && content.contains("<@42>")));
        assert!(matches!(&calls[2], Call::Direct { user, .. } if *user == UserId::new(AUTHOR)));
        assert_eq!(
            calls[3],
            Call::Timeout {
                guild: GuildId::new(GUILD),
                user: UserId::new(AUTHOR),
                minutes: 30,
                reason: Some(notice::TIMEOUT_REASON.to_string()),
            }
        );

        let logs = platform.sent_to(ChannelId::new(LOG));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("(timeout 30m)"));
        assert!(logs[0].ends_with("look https://spam.example"));
    }

    #[tokio::test]
    async fn bots_are_ignored() {
        let platform = RecordingPlatform::new();
        let mut msg = message("https://spam.example");
        msg.author.is_bot = true;
        assert_eq!(handle_message(&msg, &config().into_shared(), &platform).await, MessageOutcome::IgnoredBot);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn disabled_blocking_passes_links_through() {
        let platform = RecordingPlatform::new();
        let shared = ModerationConfig { link_blocking_enabled: false, ..config() }.into_shared();
        let outcome = handle_message(&message("www.example.com"), &shared, &platform).await;
        assert_eq!(outcome, MessageOutcome::PassThrough);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn plain_text_passes_through() {
        let platform = RecordingPlatform::new();
        let outcome = handle_message(&message("no links here"), &config().into_shared(), &platform).await;
        assert_eq!(outcome, MessageOutcome::PassThrough);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn allowed_channel_is_never_blocked() {
        let platform = RecordingPlatform::new();
        let mut config = config();
        config.allowed_channel_ids.insert(ChannelId::new(CHANNEL));
        let outcome = handle_message(&message("https://ok.example"), &config.into_shared(), &platform).await;
        assert_eq!(outcome, MessageOutcome::PassThrough);
        assert!(!platform.calls().iter().any(is_delete));
    }

    #[tokio::test]
    async fn allowed_role_is_never_blocked() {
        let platform = RecordingPlatform::new();
        let mut config = config();
        config.allowed_role_ids.insert(RoleId::new(3));
        let mut msg = message("https://ok.example");
        msg.channel_id = ChannelId::new(77);
        let outcome = handle_message(&msg, &config.into_shared(), &platform).await;
        assert_eq!(outcome, MessageOutcome::PassThrough);
        assert!(!platform.calls().iter().any(is_delete));
    }

    #[tokio::test]
    async fn forbidden_delete_stops_the_pipeline_with_one_log_entry() {
        let platform = RecordingPlatform::new().fail_delete(ActionError::PermissionDenied);
        let outcome = handle_message(&message("https://spam.example"), &config().into_shared(), &platform).await;

        assert_eq!(outcome, MessageOutcome::DeleteFailed(ActionError::PermissionDenied));
        let calls = platform.calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::Transient { .. } | Call::Direct { .. } | Call::Timeout { .. })));
        assert_eq!(platform.sent_to(ChannelId::new(LOG)), vec![notice::delete_forbidden()]);
    }

    #[tokio::test]
    async fn other_delete_errors_are_logged_with_detail() {
        let platform = RecordingPlatform::new().fail_delete(ActionError::Failed("Unknown Message".into()));
        handle_message(&message("https://spam.example"), &config().into_shared(), &platform).await;
        assert_eq!(
            platform.sent_to(ChannelId::new(LOG)),
            vec!["⚠️ Error deleting message: Unknown Message".to_string()]
        );
    }

    #[tokio::test]
    async fn undeliverable_dm_does_not_stop_timeout_or_log() {
        let platform = RecordingPlatform::new().fail_direct(ActionError::Failed("Cannot send messages to this user".into()));
        let outcome = handle_message(&message("https://spam.example"), &config().into_shared(), &platform).await;

        let MessageOutcome::Moderated(report) = outcome else {
            panic!("expected moderation");
        };
        assert!(matches!(report.direct_notice, StepOutcome::Failed(_)));
        assert_eq!(report.timeout, StepOutcome::Done);
        assert!(platform.calls().iter().any(|c| matches!(c, Call::Timeout { .. })));
        assert_eq!(platform.sent_to(ChannelId::new(LOG)).len(), 1);
    }

    #[tokio::test]
    async fn forbidden_timeout_is_logged_separately() {
        let platform = RecordingPlatform::new().fail_timeout(ActionError::PermissionDenied);
        handle_message(&message("https://spam.example"), &config().into_shared(), &platform).await;

        let logs = platform.sent_to(ChannelId::new(LOG));
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0], "⚠️ Missing permissions to timeout <@42>.");
        assert!(logs[1].contains("(no timeout)"));
    }

    #[tokio::test]
    async fn failed_timeout_logs_its_detail() {
        let platform = RecordingPlatform::new().fail_timeout(ActionError::Failed("rate limited".into()));
        handle_message(&message("https://spam.example"), &config().into_shared(), &platform).await;
        assert_eq!(platform.sent_to(ChannelId::new(LOG))[0], "⚠️ Failed to timeout <@42>: rate limited");
    }

    #[tokio::test]
    async fn dm_and_timeout_can_be_switched_off() {
        let platform = RecordingPlatform::new();
        let shared = ModerationConfig { auto_dm_on_block: false, auto_timeout_minutes: 0, ..config() }.into_shared();
        let outcome = handle_message(&message("https://spam.example"), &shared, &platform).await;

        let MessageOutcome::Moderated(report) = outcome else {
            panic!("expected moderation");
        };
        assert_eq!(report.direct_notice, StepOutcome::Skipped);
        assert_eq!(report.timeout, StepOutcome::Skipped);
        assert!(!platform.calls().iter().any(|c| matches!(c, Call::Direct { .. } | Call::Timeout { .. })));
    }

    #[tokio::test]
    async fn failed_warning_does_not_stop_the_rest() {
        let platform = RecordingPlatform::new().fail_transient(ActionError::PermissionDenied);
        let outcome = handle_message(&message("https://spam.example"), &config().into_shared(), &platform).await;
        let MessageOutcome::Moderated(report) = outcome else {
            panic!("expected moderation");
        };
        assert_eq!(report.warning, StepOutcome::PermissionDenied);
        assert_eq!(report.timeout, StepOutcome::Done);
    }

    #[tokio::test]
    async fn log_excerpt_is_capped() {
        let platform = RecordingPlatform::new();
        let content = format!("https://x.example {}", "a".repeat(1000));
        let outcome = handle_message(&message(&content), &config().into_shared(), &platform).await;
        let MessageOutcome::Moderated(report) = outcome else {
            panic!("expected moderation");
        };
        assert_eq!(report.excerpt.chars().count(), notice::EXCERPT_CHARS);
    }
}
