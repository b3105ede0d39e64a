//! The teams dashboard: view state, the team query, and the create-team mutation.
//!
//! Everything here is headless. Commands drive it with events
//! (`set_search`, `open_create_dialog`, `submit_create_team`, `invite`, ...)
//! and render whatever [`Dashboard::view`] returns.

mod create;
mod filter;
mod invite;
mod query;

pub use create::{CreateTeamDialog, DialogState};
pub use filter::filter_teams;
pub use invite::{is_valid_email, InviteDialog};
pub use query::TeamsQuery;

use tracing::info;

use crate::auth::AuthContext;
use crate::cache::TeamsCache;
use crate::client::TeamService;
use crate::error::{CollabError, Result};
use crate::notify::{Notifier, Toast};
use crate::types::{NewTeam, Team, User};

pub const DEFAULT_TAB: &str = "queue";
pub const TEAM_CREATED: &str = "Team created successfully!";
pub const CREATE_FAILED: &str = "Failed to create team. Please try again.";

/// What the page shows below the search bar.
#[derive(Debug, PartialEq)]
pub enum DashboardView<'a> {
    Loading,
    /// No teams to show; offers "Create Your First Team".
    Empty,
    Grid(Vec<&'a Team>),
}

#[derive(Debug)]
pub enum CreateOutcome {
    /// Validation blocked the submission; nothing was sent.
    Skipped,
    Created(Team),
    Failed(CollabError),
}

pub struct Dashboard<S, N> {
    service: S,
    notifier: N,
    auth: AuthContext,
    cache: TeamsCache,
    user: Option<User>,
    query: TeamsQuery,
    active_tab: String,
    create_dialog: CreateTeamDialog,
    invite_dialog: Option<InviteDialog>,
    selected_team: Option<Team>,
    search: String,
}

impl<S: TeamService, N: Notifier> Dashboard<S, N> {
    pub fn new(service: S, notifier: N, auth: AuthContext) -> Self {
        Self::with_cache(service, notifier, auth, TeamsCache::default())
    }

    pub fn with_cache(service: S, notifier: N, auth: AuthContext, cache: TeamsCache) -> Self {
        let user = auth.user();
        let query = TeamsQuery::new(user.as_ref().map(|u| u.id.clone()));
        Self {
            service,
            notifier,
            auth,
            cache,
            user,
            query,
            active_tab: DEFAULT_TAB.to_string(),
            create_dialog: CreateTeamDialog::default(),
            invite_dialog: None,
            selected_team: None,
            search: String::new(),
        }
    }

    #[cfg(test)]
    pub fn service(&self) -> &S {
        &self.service
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: impl Into<String>) {
        self.active_tab = tab.into();
    }

    pub fn is_loading(&self) -> bool {
        self.query.is_loading()
    }

    pub async fn refresh(&mut self) {
        self.query.refresh(&mut self.cache, &self.service).await;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// The fetched teams filtered by the current search text.
    pub fn teams(&self) -> Vec<&Team> {
        filter_teams(self.query.data(), &self.search)
    }

    pub fn view(&self) -> DashboardView<'_> {
        if self.query.is_loading() {
            return DashboardView::Loading;
        }
        let teams = self.teams();
        if teams.is_empty() {
            DashboardView::Empty
        } else {
            DashboardView::Grid(teams)
        }
    }

    pub fn create_dialog(&self) -> &CreateTeamDialog {
        &self.create_dialog
    }

    pub fn open_create_dialog(&mut self) {
        self.create_dialog.open();
    }

    pub fn set_create_dialog_open(&mut self, open: bool) {
        self.create_dialog.set_open(open);
    }

    pub fn set_new_team_name(&mut self, name: impl Into<String>) {
        self.create_dialog.set_name(name);
    }

    /// Submit the create-team form.
    ///
    /// Blank names, a missing user or an in-flight submission make this a no-op.
    pub async fn submit_create_team(&mut self) -> CreateOutcome {
        let Some(user_id) = self.user.as_ref().map(|u| u.id.clone()) else {
            return CreateOutcome::Skipped;
        };
        let Some(name) = self.create_dialog.begin_submit() else {
            return CreateOutcome::Skipped;
        };

        let request = NewTeam {
            name,
            created_by: user_id,
        };
        match self.service.create_team(request).await {
            Ok(team) => {
                info!(team_id = %team.id, name = %team.name, "team created");
                self.notifier.toast(Toast::success(TEAM_CREATED));
                self.create_dialog.succeed();
                self.cache.invalidate_all();
                self.refresh().await;
                CreateOutcome::Created(team)
            }
            Err(e) => {
                let message = e.user_message().unwrap_or_else(|| CREATE_FAILED.to_string());
                self.notifier.toast(Toast::destructive(message));
                self.create_dialog.fail();
                CreateOutcome::Failed(e)
            }
        }
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.selected_team.as_ref()
    }

    /// Select `team` and open the invite dialog for it.
    pub fn invite(&mut self, team: &Team) {
        self.selected_team = Some(team.clone());
        self.invite_dialog = Some(InviteDialog::new(team));
    }

    pub fn invite_dialog(&self) -> Option<&InviteDialog> {
        self.invite_dialog.as_ref()
    }

    pub fn invite_dialog_mut(&mut self) -> Option<&mut InviteDialog> {
        self.invite_dialog.as_mut()
    }

    /// Submit the open invite dialog. Returns whether an invitation was sent.
    pub async fn submit_invite(&mut self) -> bool {
        match self.invite_dialog.as_mut() {
            Some(dialog) => dialog.submit(&self.service, &self.notifier).await,
            None => false,
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.auth.logout()?;
        self.user = None;
        self.query = TeamsQuery::new(None);
        self.invite_dialog = None;
        self.selected_team = None;
        Ok(())
    }
}
