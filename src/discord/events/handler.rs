use serenity::async_trait;
use serenity::model::prelude::*;
use serenity::prelude::*;
use crate::config::SharedConfig;
use crate::discord::commands;
use crate::discord::SerenityPlatform;
use crate::log_sink::LogSink;
use crate::moderation::{self, notice, Author, AuthorRoles, InboundMessage, MessageOutcome};
use crate::platform::Platform;
use log::{debug, error, info, warn};

pub struct EventHandler {
    config: SharedConfig,
    guild_id: Option<GuildId>,
}

impl EventHandler {
    pub fn new(config: SharedConfig, guild_id: Option<GuildId>) -> Self {
        Self { config, guild_id }
    }

    async fn sync_commands(&self, platform: &SerenityPlatform, ready: &Ready) {
        // Without a configured home guild, every guild the bot sits in gets them.
        let guilds: Vec<GuildId> = match self.guild_id {
            Some(guild_id) => vec![guild_id],
            None => ready.guilds.iter().map(|guild| guild.id).collect(),
        };

        for guild_id in guilds {
            match platform.sync_commands(guild_id).await {
                Ok(count) => info!("Slash commands synced to guild {} ({} commands)", guild_id, count),
                Err(e) => warn!("Failed to sync slash commands to guild {}: {}", guild_id, e),
            }
        }
    }
}

fn inbound_message(msg: &Message) -> InboundMessage {
    let roles = match &msg.member {
        Some(member) => AuthorRoles::Member(member.roles.clone()),
        None => AuthorRoles::Unavailable,
    };

    InboundMessage {
        id: msg.id,
        channel_id: msg.channel_id,
        guild_id: msg.guild_id,
        author: Author {
            id: msg.author.id,
            is_bot: msg.author.bot,
            roles,
        },
        content: msg.content.clone(),
    }
}

#[async_trait]
impl serenity::client::EventHandler for EventHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let platform = SerenityPlatform::new(ctx.http.clone());
        let (enabled, log_channel) = {
            let config = self.config.read().await;
            (config.link_blocking_enabled, config.log_channel_id)
        };
        info!("Logged in as {} | Link blocking = {}", ready.user.name, enabled);

        self.sync_commands(&platform, &ready).await;

        LogSink::new(log_channel, &platform)
            .send(&notice::started(enabled))
            .await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let platform = SerenityPlatform::new(ctx.http.clone());
        let inbound = inbound_message(&msg);

        match moderation::handle_message(&inbound, &self.config, &platform).await {
            MessageOutcome::Moderated(report) => debug!("Moderation report: {:?}", report),
            MessageOutcome::DeleteFailed(e) => debug!("Link message {} left in place: {}", msg.id, e),
            // No prefix commands are registered; slash commands arrive as interactions.
            MessageOutcome::PassThrough | MessageOutcome::IgnoredBot => {}
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            if let Err(why) = commands::dispatch(&ctx, &command, &self.config).await {
                error!("Cannot respond to slash command: {}", why);
            }
        }
    }
}
