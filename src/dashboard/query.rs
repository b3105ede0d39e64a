use tracing::warn;

use crate::cache::{Lookup, TeamsCache};
use crate::client::TeamService;
use crate::types::Team;

/// The team list for one user, read through the cache.
pub struct TeamsQuery {
    user_id: Option<String>,
    data: Option<Vec<Team>>,
    fetching: bool,
}

impl TeamsQuery {
    /// A query without a user id is disabled and never fetches.
    pub fn new(user_id: Option<String>) -> Self {
        let fetching = user_id.is_some();
        Self {
            user_id,
            data: None,
            fetching,
        }
    }

    /// True while the first fetch is outstanding and nothing is cached.
    pub fn is_loading(&self) -> bool {
        self.fetching && self.data.is_none()
    }

    pub fn data(&self) -> &[Team] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Serve fresh cached data, otherwise fetch and store the result.
    ///
    /// Fetch failures are logged and leave whatever data was already held.
    pub async fn refresh<S: TeamService>(&mut self, cache: &mut TeamsCache, service: &S) {
        let Some(user_id) = self.user_id.clone() else {
            return;
        };

        match cache.lookup(&user_id) {
            Lookup::Fresh(teams) => {
                self.data = Some(teams.to_vec());
                self.fetching = false;
                return;
            }
            Lookup::Stale(teams) => self.data = Some(teams.to_vec()),
            Lookup::Missing => {}
        }

        self.fetching = true;
        match service.get_teams(&user_id).await {
            Ok(teams) => {
                cache.store(&user_id, teams.clone());
                self.data = Some(teams);
            }
            Err(e) => warn!(user_id = %user_id, error = %e, "failed to fetch teams"),
        }
        self.fetching = false;
    }
}
