use serenity::model::ModelError;
use thiserror::Error;

/// Failure of a single platform call (delete, send, DM, timeout, sync).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("missing permissions")]
    PermissionDenied,

    #[error("{0}")]
    Failed(String),
}

impl ActionError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ActionError::PermissionDenied)
    }
}

impl From<serenity::Error> for ActionError {
    fn from(err: serenity::Error) -> Self {
        if is_permission_error(&err) {
            ActionError::PermissionDenied
        } else {
            ActionError::Failed(err.to_string())
        }
    }
}

// Discord answers 403 for anything the bot's role is not allowed to do.
fn is_permission_error(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Model(ModelError::InvalidPermissions { .. }) => true,
        serenity::Error::Http(http_err) => http_err
            .status_code()
            .is_some_and(|code| code.as_u16() == 403),
        _ => false,
    }
}

/// Rejected slash command arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Missing option `{0}`.")]
    MissingOption(&'static str),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Command not implemented")]
    Unknown(String),
}

#[derive(Error, Debug)]
pub enum BotError {
    #[error("DISCORD_TOKEN is missing. Put it in the .env file")]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
