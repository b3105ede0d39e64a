mod auth;
mod cache;
mod cli;
mod client;
mod commands;
mod config;
mod dashboard;
mod error;
mod notify;
mod output;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use auth::AuthContext;
use cli::{Cli, Commands, TeamCommands};
use client::TeamClient;
use commands::CliDashboard;
use config::Config;
use error::Result;
use notify::TerminalNotifier;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = std::error::Error::source(cause);
            }
        }

        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("COLLABTREE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require a session
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "collabtree", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        Commands::Logout => {
            let config_path = Config::config_path()?;
            let mut auth = AuthContext::new(Config::load_from(&config_path)?, config_path);
            if auth.logout()? {
                output::print_message("Logged out.");
            } else {
                output::print_message("Not logged in.");
            }
        }
        // Commands that render the dashboard
        command => {
            let mut dashboard = open_dashboard()?;

            match command {
                Commands::Teams(args) | Commands::Team {
                    action: TeamCommands::List(args),
                } => {
                    commands::teams::list(&mut dashboard, args).await?;
                }
                Commands::Team {
                    action: TeamCommands::Create(args),
                } => {
                    commands::teams::create(&mut dashboard, args).await?;
                }
                Commands::Team {
                    action: TeamCommands::Invite(args),
                } => {
                    commands::teams::invite(&mut dashboard, args).await?;
                }
                Commands::Dashboard => {
                    commands::dashboard::run(&mut dashboard).await?;
                }
                Commands::Completions { .. } | Commands::Init | Commands::Logout => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}

/// Load the session and wire the dashboard; fails when nobody is signed in.
fn open_dashboard() -> Result<CliDashboard> {
    let config_path = Config::config_path()?;
    let config = Config::load_from(&config_path)?;
    let client = TeamClient::new(config.api_url()?, config.token());

    let auth = AuthContext::new(config, config_path);
    auth.require_user()?;

    Ok(CliDashboard::new(client, TerminalNotifier, auth))
}
