use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollabError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Not logged in. Run 'collabtree init' to set up a session")]
    NotAuthenticated,

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Team name must not be empty")]
    EmptyTeamName,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Team creation failed")]
    CreateTeamFailed(#[source] Box<CollabError>),

    #[error("Invitation failed")]
    InviteFailed,
}

impl CollabError {
    /// Human-readable message suitable for a notification, if the error carries one.
    pub fn user_message(&self) -> Option<String> {
        match self {
            CollabError::ApiError { message, .. } => {
                let message = message.trim();
                (!message.is_empty()).then(|| message.to_string())
            }
            CollabError::Http(e) => Some(e.to_string()),
            CollabError::TeamNotFound(_) | CollabError::InvalidEmail(_) => Some(self.to_string()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CollabError>;
