use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use crate::client::TeamService;
use crate::notify::{Notifier, Toast};
use crate::types::Team;

const INVITE_FAILED: &str = "Failed to send invitation. Please try again.";

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

/// Invite dialog for one team. Owns its email field and submission.
#[derive(Debug)]
pub struct InviteDialog {
    team_id: String,
    team_name: String,
    open: bool,
    email: String,
    pending: bool,
}

impl InviteDialog {
    pub fn new(team: &Team) -> Self {
        Self {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            open: true,
            email: String::new(),
            pending: false,
        }
    }

    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn can_submit(&self) -> bool {
        self.open && !self.pending && is_valid_email(&self.email)
    }

    /// Send the invitation. Returns whether it went through.
    pub async fn submit<S, N>(&mut self, service: &S, notifier: &N) -> bool
    where
        S: TeamService,
        N: Notifier,
    {
        if !self.can_submit() {
            return false;
        }

        let email = self.email.trim().to_string();
        self.pending = true;
        let result = service.invite_member(&self.team_id, &email).await;
        self.pending = false;

        match result {
            Ok(()) => {
                info!(team_id = %self.team_id, "invitation sent");
                notifier.toast(Toast::success(format!("Invitation sent to {email}!")));
                self.email.clear();
                self.open = false;
                true
            }
            Err(e) => {
                let message = e.user_message().unwrap_or_else(|| INVITE_FAILED.to_string());
                notifier.toast(Toast::destructive(message));
                false
            }
        }
    }
}
