use std::collections::HashSet;
use std::sync::Arc;

use ::config::{Config as SettingsSource, Environment};
use log::LevelFilter;
use serde::Deserialize;
use serenity::model::id::{ChannelId, GuildId, RoleId};
use tokio::sync::RwLock;

use crate::error::BotError;

pub const DEFAULT_TIMEOUT_MINUTES: u32 = 30;

/// Runtime moderation settings. Blocking flag and allow-lists change through
/// `/mod` commands; everything is lost on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationConfig {
    pub link_blocking_enabled: bool,
    pub allowed_channel_ids: HashSet<ChannelId>,
    pub allowed_role_ids: HashSet<RoleId>,
    pub log_channel_id: Option<ChannelId>,
    pub auto_dm_on_block: bool,
    /// 0 disables the automatic timeout.
    pub auto_timeout_minutes: u32,
}

pub type SharedConfig = Arc<RwLock<ModerationConfig>>;

impl Default for ModerationConfig {
    fn default() -> Self {
        ModerationConfig {
            link_blocking_enabled: true,
            allowed_channel_ids: HashSet::new(),
            allowed_role_ids: HashSet::new(),
            log_channel_id: None,
            auto_dm_on_block: true,
            auto_timeout_minutes: DEFAULT_TIMEOUT_MINUTES,
        }
    }
}

impl ModerationConfig {
    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }

    pub fn allowed_channels_display(&self) -> String {
        format_ids(self.allowed_channel_ids.iter().map(|id| id.get()))
    }

    pub fn allowed_roles_display(&self) -> String {
        format_ids(self.allowed_role_ids.iter().map(|id| id.get()))
    }

    pub fn status_report(&self) -> String {
        format!(
            "**Link blocking:** {}\n\
             **Allowed channels:** {}\n\
             **Allowed roles:** {}\n\
             **Log channel:** {}\n\
             **AUTO_DM_ON_BLOCK:** {}\n\
             **AUTO_TIMEOUT_MINUTES:** {}\n",
            self.link_blocking_enabled,
            self.allowed_channels_display(),
            self.allowed_roles_display(),
            self.log_channel_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "None".to_string()),
            self.auto_dm_on_block,
            self.auto_timeout_minutes,
        )
    }
}

/// Comma separated, ascending, or `None` when empty.
pub fn format_ids(ids: impl Iterator<Item = u64>) -> String {
    let mut ids: Vec<u64> = ids.collect();
    if ids.is_empty() {
        return "None".to_string();
    }
    ids.sort_unstable();
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a snowflake the way the admin commands accept them: digits only,
/// never zero.
pub fn parse_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>().ok().filter(|id| *id != 0)
}

// Raw view of the environment, keys lowercased by `Environment`.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    discord_token: Option<String>,
    link_blocking_enabled: Option<String>,
    allowed_channel_ids: Option<String>,
    allowed_role_ids: Option<String>,
    log_channel_id: Option<String>,
    auto_dm_on_block: Option<String>,
    auto_timeout_minutes: Option<String>,
    guild_id: Option<String>,
    log_level: Option<String>,
}

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub guild_id: Option<GuildId>,
    pub log_level: LevelFilter,
    pub moderation: ModerationConfig,
}

impl Settings {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, BotError> {
        dotenvy::dotenv().ok();
        Self::from_source(Environment::default())
    }

    pub fn from_source(source: Environment) -> Result<Self, BotError> {
        let raw: RawSettings = SettingsSource::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, BotError> {
        let discord_token = raw
            .discord_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(BotError::MissingToken)?;

        let auto_timeout_minutes = match raw.auto_timeout_minutes.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_TIMEOUT_MINUTES,
            Some(value) => value.parse::<u32>().map_err(|_| {
                BotError::Config(format!("AUTO_TIMEOUT_MINUTES must be a whole number, got `{}`", value))
            })?,
        };

        let log_level = match raw.log_level.as_deref().map(str::trim) {
            None | Some("") => LevelFilter::Info,
            Some(value) => value
                .parse::<LevelFilter>()
                .map_err(|_| BotError::Config(format!("Unknown LOG_LEVEL `{}`", value)))?,
        };

        let moderation = ModerationConfig {
            link_blocking_enabled: parse_flag(raw.link_blocking_enabled.as_deref(), true),
            allowed_channel_ids: parse_id_list(raw.allowed_channel_ids.as_deref())
                .map(ChannelId::new)
                .collect(),
            allowed_role_ids: parse_id_list(raw.allowed_role_ids.as_deref())
                .map(RoleId::new)
                .collect(),
            log_channel_id: raw.log_channel_id.as_deref().and_then(parse_id).map(ChannelId::new),
            auto_dm_on_block: parse_flag(raw.auto_dm_on_block.as_deref(), true),
            auto_timeout_minutes,
        };

        Ok(Settings {
            discord_token,
            guild_id: raw.guild_id.as_deref().and_then(parse_id).map(GuildId::new),
            log_level,
            moderation,
        })
    }
}

// Only a literal "true" (any case) switches a flag on once it is set.
fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some(value) => value.to_lowercase() == "true",
        None => default,
    }
}

fn parse_id_list(raw: Option<&str>) -> impl Iterator<Item = u64> {
    raw.unwrap_or_default()
        .replace(' ', "")
        .split(',')
        .filter_map(parse_id)
        .collect::<Vec<_>>()
        .into_iter()
}
