use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::{CollabError, Result};
use crate::types::User;

/// The signed-in session and the action that ends it.
pub struct AuthContext {
    config: Config,
    config_path: PathBuf,
}

impl AuthContext {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
        }
    }

    pub fn user(&self) -> Option<User> {
        self.config.session.as_ref().map(|s| s.user())
    }

    /// Route guard: views that need a user call this before rendering.
    pub fn require_user(&self) -> Result<User> {
        self.user().ok_or(CollabError::NotAuthenticated)
    }

    /// End the session and persist that. Returns whether a session was open.
    pub fn logout(&mut self) -> Result<bool> {
        let Some(session) = self.config.session.take() else {
            return Ok(false);
        };
        info!(user_id = %session.user_id, "logging out");
        self.config.save_to(&self.config_path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Session;

    fn signed_in(path: PathBuf) -> AuthContext {
        let config = Config {
            api_url: None,
            session: Some(Session {
                user_id: "5".to_string(),
                email: "grace@example.com".to_string(),
                token: Some("secret".to_string()),
            }),
        };
        config.save_to(&path).unwrap();
        AuthContext::new(config, path)
    }

    #[test]
    fn guard_rejects_missing_session() {
        let dir = tempfile::tempdir().unwrap();
        let auth = AuthContext::new(Config::default(), dir.path().join("config.toml"));

        assert!(auth.user().is_none());
        assert!(matches!(auth.require_user(), Err(CollabError::NotAuthenticated)));
    }

    #[test]
    fn logout_without_session_reports_nothing_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut auth = AuthContext::new(Config::default(), path.clone());

        assert!(!auth.logout().unwrap());
        // Nothing to persist, so no file is written
        assert!(!path.exists());
    }

    #[test]
    fn logout_clears_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut auth = signed_in(path.clone());
        assert_eq!(auth.require_user().unwrap().email, "grace@example.com");

        assert!(auth.logout().unwrap());

        assert!(auth.user().is_none());
        assert_eq!(Config::load_from(&path).unwrap().session, None);
    }
}
