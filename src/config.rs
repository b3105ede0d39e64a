use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CollabError, Result};
use crate::types::User;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub session: Option<Session>,
}

/// A signed-in session as left behind by `collabtree init`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn user(&self) -> User {
        User {
            id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }
}

impl Config {
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| CollabError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| CollabError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CollabError::ConfigWrite {
                path: config_path.to_path_buf(),
                source: e,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(config_path, contents).map_err(|e| CollabError::ConfigWrite {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "collabtree")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(CollabError::NoConfigDir)
    }

    /// API base URL, with the env var taking precedence over the config file
    pub fn api_url(&self) -> Result<Url> {
        let raw = std::env::var("COLLABTREE_API_URL")
            .ok()
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        parse_base_url(&raw)
    }

    /// Bearer token, with the env var taking precedence over the session
    pub fn token(&self) -> Option<String> {
        std::env::var("COLLABTREE_TOKEN")
            .ok()
            .or_else(|| self.session.as_ref().and_then(|s| s.token.clone()))
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins keep the path prefix.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&normalized).map_err(|_| CollabError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(CollabError::InvalidUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn session_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            api_url: Some("https://api.collabtree.dev".to_string()),
            session: Some(Session {
                user_id: "17".to_string(),
                email: "ada@example.com".to_string(),
                token: None,
            }),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.session.unwrap().user(),
            User {
                id: "17".to_string(),
                email: "ada@example.com".to_string()
            }
        );
    }

    #[test]
    fn parse_error_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CollabError::ConfigParse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("https://example.com/api").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/");
        assert_eq!(url.join("teams").unwrap().as_str(), "https://example.com/api/teams");
    }

    #[test]
    fn base_url_rejects_other_schemes() {
        assert!(matches!(
            parse_base_url("ftp://example.com"),
            Err(CollabError::InvalidUrl(_))
        ));
        assert!(parse_base_url("not a url").is_err());
    }
}
