use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{CollabError, Result};
use crate::types::{NewTeam, Team};

/// The team-management service the dashboard reads from and writes to.
#[allow(async_fn_in_trait)]
pub trait TeamService {
    async fn get_teams(&self, user_id: &str) -> Result<Vec<Team>>;

    async fn create_team(&self, team: NewTeam) -> Result<Team>;

    async fn invite_member(&self, team_id: &str, email: &str) -> Result<()>;
}

pub struct TeamClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

#[derive(Serialize)]
struct InviteRequest<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

impl TeamClient {
    pub fn new(base_url: Url, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            token,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|_| CollabError::InvalidUrl(format!("{}{path}", self.base_url)))
    }

    fn invite_endpoint(&self, team_id: &str) -> Result<Url> {
        let mut url = self.endpoint("teams/")?;
        url.path_segments_mut()
            .map_err(|_| CollabError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(team_id)
            .push("invite");
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.check(self.authorized(request).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read response body>".to_string());

        Err(CollabError::ApiError {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

impl TeamService for TeamClient {
    async fn get_teams(&self, user_id: &str) -> Result<Vec<Team>> {
        let mut url = self.endpoint("teams")?;
        url.query_pairs_mut().append_pair("user_id", user_id);

        debug!(%url, "fetching teams");
        self.send(self.http.get(url)).await
    }

    async fn create_team(&self, team: NewTeam) -> Result<Team> {
        let url = self.endpoint("teams")?;

        debug!(%url, name = %team.name, "creating team");
        self.send(self.http.post(url).json(&team)).await
    }

    async fn invite_member(&self, team_id: &str, email: &str) -> Result<()> {
        let url = self.invite_endpoint(team_id)?;

        debug!(%url, "sending invitation");
        let request = self.http.post(url).json(&InviteRequest { email });
        self.check(self.authorized(request).send().await?).await?;
        Ok(())
    }
}

/// Pull a readable message out of an error response body.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match parsed.detail {
            Some(serde_json::Value::String(detail)) => return detail,
            // Validation errors come back as a list of {msg, ...} objects
            Some(serde_json::Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if !messages.is_empty() {
                    return messages.join(", ");
                }
            }
            _ => {}
        }
        if let Some(message) = parsed.message {
            return message;
        }
    }
    body.trim().to_string()
}


#[cfg(test)]
pub mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// In-memory team service that records calls.
    #[derive(Default)]
    pub struct FakeTeamService {
        teams: RefCell<Vec<Team>>,
        create_error: RefCell<Option<String>>,
        fail_fetch: Cell<bool>,
        pub fetches: Cell<usize>,
        pub creates: RefCell<Vec<NewTeam>>,
        pub invites: RefCell<Vec<(String, String)>>,
    }

    impl FakeTeamService {
        pub fn with_teams(teams: Vec<Team>) -> Self {
            Self {
                teams: RefCell::new(teams),
                ..Self::default()
            }
        }

        /// Make the next creates fail with this API message (may be blank).
        pub fn fail_creates_with(&self, message: &str) {
            *self.create_error.borrow_mut() = Some(message.to_string());
        }

        pub fn fail_fetches(&self, fail: bool) {
            self.fail_fetch.set(fail);
        }
    }

    impl TeamService for FakeTeamService {
        async fn get_teams(&self, user_id: &str) -> Result<Vec<Team>> {
            self.fetches.set(self.fetches.get() + 1);
            if self.fail_fetch.get() {
                return Err(CollabError::ApiError {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(self
                .teams
                .borrow()
                .iter()
                .filter(|t| t.created_by.as_deref().map_or(true, |by| by == user_id))
                .cloned()
                .collect())
        }

        async fn create_team(&self, team: NewTeam) -> Result<Team> {
            self.creates.borrow_mut().push(team.clone());
            if let Some(message) = self.create_error.borrow().clone() {
                return Err(CollabError::ApiError {
                    status: 400,
                    message,
                });
            }

            let mut created = Team::named(&(self.teams.borrow().len() + 1).to_string(), &team.name);
            created.created_by = Some(team.created_by);
            self.teams.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn invite_member(&self, team_id: &str, email: &str) -> Result<()> {
            self.invites
                .borrow_mut()
                .push((team_id.to_string(), email.to_string()));
            Ok(())
        }
    }
}
