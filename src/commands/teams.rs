use colored::Colorize;
use tabled::Tabled;

use super::CliDashboard;
use crate::cli::{TeamCreateArgs, TeamInviteArgs, TeamListArgs};
use crate::client::TeamService;
use crate::dashboard::{is_valid_email, CreateOutcome, Dashboard, DashboardView};
use crate::error::{CollabError, Result};
use crate::notify::Notifier;
use crate::output::{self, format_relative, truncate};
use crate::types::Team;

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Created by")]
    created_by: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl TeamRow {
    fn new(index: usize, team: &Team) -> Self {
        Self {
            index,
            name: truncate(&team.name, 40),
            id: team.id.clone(),
            created_by: team.created_by.clone().unwrap_or_default(),
            created: team
                .created_at
                .as_deref()
                .map(format_relative)
                .unwrap_or_default(),
        }
    }
}

/// Print the current dashboard view: spinner text, empty state, or the team grid.
/// Where the dashboard is being rendered; decides how actions are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Command,
    Session,
}

impl Surface {
    pub fn create_hint(self) -> &'static str {
        match self {
            Surface::Command => "collabtree team create <NAME>",
            Surface::Session => "new",
        }
    }
}

pub fn render<S: TeamService, N: Notifier>(dashboard: &Dashboard<S, N>, surface: Surface) {
    match dashboard.view() {
        DashboardView::Loading => output::print_message("Loading teams..."),
        DashboardView::Empty if output::is_json_output() => println!("[]"),
        DashboardView::Empty if !dashboard.search().is_empty() => {
            output::print_message(&format!("No teams match \"{}\"", dashboard.search()));
        }
        DashboardView::Empty => {
            println!("{}", "No teams yet".bold());
            println!("Get started by creating your first team");
            println!(
                "  {} {}",
                "+ Create Your First Team:".blue(),
                surface.create_hint().bright_black()
            );
        }
        DashboardView::Grid(teams) => {
            if output::is_json_output() {
                output::print_table(&teams, |team| TeamRow::new(0, team));
            } else {
                let rows: Vec<TeamRow> = teams
                    .iter()
                    .enumerate()
                    .map(|(i, team)| TeamRow::new(i + 1, team))
                    .collect();
                let table = tabled::Table::new(rows)
                    .with(tabled::settings::Style::rounded())
                    .to_string();
                println!("{table}");
            }
        }
    }
}

/// Print the page header with the signed-in user.
pub fn render_header<S: TeamService, N: Notifier>(dashboard: &Dashboard<S, N>) {
    if output::is_json_output() || output::is_quiet() {
        return;
    }
    let email = dashboard.user().map(|u| u.email.as_str()).unwrap_or_default();
    println!("{}  {}", "CollabTree".blue().bold(), email.bright_black());
    println!("{}", "Your Teams".bold());
}

pub async fn list(dashboard: &mut CliDashboard, args: TeamListArgs) -> Result<()> {
    if let Some(search) = args.search {
        dashboard.set_search(search);
    }
    dashboard.refresh().await;

    render_header(dashboard);
    render(dashboard, Surface::Command);

    Ok(())
}

pub async fn create<S: TeamService, N: Notifier>(
    dashboard: &mut Dashboard<S, N>,
    args: TeamCreateArgs,
) -> Result<()> {
    dashboard.open_create_dialog();
    dashboard.set_new_team_name(args.name);

    match dashboard.submit_create_team().await {
        CreateOutcome::Created(team) => {
            if output::is_json_output() {
                println!("{}", serde_json::to_string_pretty(&team).unwrap_or_default());
            }
            Ok(())
        }
        CreateOutcome::Skipped => Err(CollabError::EmptyTeamName),
        // The notifier has already reported the cause
        CreateOutcome::Failed(e) => Err(CollabError::CreateTeamFailed(Box::new(e))),
    }
}

pub async fn invite(dashboard: &mut CliDashboard, args: TeamInviteArgs) -> Result<()> {
    if !is_valid_email(&args.email) {
        return Err(CollabError::InvalidEmail(args.email));
    }

    dashboard.refresh().await;
    let team = find_team(&dashboard.teams(), &args.team)
        .cloned()
        .ok_or_else(|| CollabError::TeamNotFound(args.team.clone()))?;

    dashboard.invite(&team);
    if let Some(dialog) = dashboard.invite_dialog_mut() {
        dialog.set_email(args.email);
    }

    if dashboard.submit_invite().await {
        Ok(())
    } else {
        Err(CollabError::InviteFailed)
    }
}

/// Find a team by exact id, falling back to a case-insensitive name match.
pub fn find_team<'a>(teams: &[&'a Team], needle: &str) -> Option<&'a Team> {
    let lowered = needle.to_lowercase();
    teams
        .iter()
        .find(|t| t.id == needle)
        .or_else(|| teams.iter().find(|t| t.name.to_lowercase() == lowered))
        .copied()
}
