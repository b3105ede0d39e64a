use std::io::{self, Write};

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::teams::{render, render_header, Surface};
use super::CliDashboard;
use crate::client::TeamService;
use crate::dashboard::{is_valid_email, Dashboard, DialogState};
use crate::error::Result;
use crate::notify::Notifier;
use crate::output;

const HELP: &str = "Commands:
  / TEXT, search TEXT   filter teams by name (empty clears)
  new                   create a team
  invite N              invite someone to team #N
  tab NAME              switch tab
  refresh               reload teams
  logout                end the session
  help                  show this help
  quit                  leave the dashboard";

/// One line typed at the dashboard prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Search(String),
    New,
    Invite(usize),
    Tab(String),
    Refresh,
    Logout,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('/') {
        return Input::Search(rest.trim().to_string());
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "search" | "s" => Input::Search(rest.to_string()),
        "new" | "n" | "create" => Input::New,
        "invite" | "i" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => Input::Invite(n),
            _ => Input::Unknown(line.to_string()),
        },
        "tab" if !rest.is_empty() => Input::Tab(rest.to_string()),
        "refresh" | "r" => Input::Refresh,
        "logout" => Input::Logout,
        "help" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

fn prompt(label: &str) -> Result<()> {
    print!("{} ", label.cyan());
    io::stdout().flush()?;
    Ok(())
}

/// Prompt text for whichever dialog currently has focus.
fn prompt_label<S: TeamService, N: Notifier>(dashboard: &Dashboard<S, N>) -> String {
    match dashboard.create_dialog().state() {
        DialogState::Editing | DialogState::Pending => {
            return "Team name (blank to cancel) >".to_string();
        }
        DialogState::Closed => {}
    }
    match dashboard.invite_dialog().filter(|d| d.is_open()) {
        Some(dialog) => format!("Email to invite to {} (blank to cancel) >", dialog.team_name()),
        None => ">".to_string(),
    }
}

/// Active tab and selected team, shown after either changes.
fn status_line<S: TeamService, N: Notifier>(dashboard: &Dashboard<S, N>) -> String {
    match dashboard.selected_team() {
        Some(team) => format!("[{}] selected: {}", dashboard.active_tab(), team.name),
        None => format!("[{}]", dashboard.active_tab()),
    }
}

async fn show(dashboard: &mut CliDashboard) {
    if dashboard.is_loading() {
        render(dashboard, Surface::Session);
    }
    dashboard.refresh().await;
    render(dashboard, Surface::Session);
}

pub async fn run(dashboard: &mut CliDashboard) -> Result<()> {
    render_header(dashboard);
    show(dashboard).await;
    if !output::is_quiet() {
        println!("{}", "Type 'help' for commands".bright_black());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt(&prompt_label(dashboard))?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if dashboard.create_dialog().is_open() {
            if line.trim().is_empty() {
                dashboard.set_create_dialog_open(false);
                continue;
            }
            dashboard.set_new_team_name(line);
            println!("{}", dashboard.create_dialog().submit_label().bright_black());
            dashboard.submit_create_team().await;
            if !dashboard.create_dialog().is_open() {
                render(dashboard, Surface::Session);
            }
            continue;
        }

        if let Some(dialog) = dashboard.invite_dialog_mut().filter(|d| d.is_open()) {
            if line.trim().is_empty() {
                dialog.set_open(false);
                continue;
            }
            if !is_valid_email(&line) {
                eprintln!("{}", "Enter a valid email address".red());
                continue;
            }
            dialog.set_email(line);
            dashboard.submit_invite().await;
            continue;
        }

        match parse_input(&line) {
            Input::Search(text) => {
                dashboard.set_search(text);
                render(dashboard, Surface::Session);
            }
            Input::New => dashboard.open_create_dialog(),
            Input::Invite(n) => {
                let team = dashboard.teams().get(n - 1).map(|t| (*t).clone());
                match team {
                    Some(team) => {
                        dashboard.invite(&team);
                        if let Some(dialog) = dashboard.invite_dialog() {
                            println!(
                                "Invite to {} {}",
                                dialog.team_name().bold(),
                                format!("({})", dialog.team_id()).bright_black()
                            );
                        }
                        println!("{}", status_line(dashboard).bright_black());
                    }
                    None => eprintln!("{}", format!("No team #{n}").red()),
                }
            }
            Input::Tab(tab) => {
                dashboard.set_active_tab(tab);
                println!("{}", status_line(dashboard).bright_black());
            }
            Input::Refresh => show(dashboard).await,
            Input::Logout => {
                dashboard.logout()?;
                output::print_message("Logged out.");
                break;
            }
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
            Input::Unknown(text) if text.is_empty() => {}
            Input::Unknown(text) => {
                eprintln!("Unknown command: {text}. Type 'help' for commands.");
            }
        }
    }

    Ok(())
}
