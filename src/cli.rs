use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "collabtree")]
#[command(about = "A CLI for CollabTree teams", version)]
#[command(after_help = "EXAMPLES:
    collabtree teams                       List your teams
    collabtree teams --search design       Filter teams by name
    collabtree team create \"Rocket\"        Create a new team
    collabtree team invite Rocket ada@example.com  Invite a collaborator
    collabtree dashboard                   Open the interactive dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List your teams
    #[command(
        alias = "t",
        after_help = "EXAMPLES:
    collabtree teams
    collabtree teams --search rocket
    collabtree teams --format json"
    )]
    Teams(TeamListArgs),
    /// Manage teams
    #[command(after_help = "EXAMPLES:
    collabtree team list
    collabtree team create \"Rocket\"
    collabtree team invite Rocket ada@example.com")]
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// Open the interactive dashboard
    #[command(
        alias = "d",
        after_help = "EXAMPLES:
    collabtree dashboard"
    )]
    Dashboard,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    collabtree completions bash > ~/.bash_completion.d/collabtree
    collabtree completions zsh > ~/.zfunc/_collabtree
    collabtree completions fish > ~/.config/fish/completions/collabtree.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration and session interactively
    #[command(after_help = "EXAMPLES:
    collabtree init")]
    Init,
    /// End the current session
    #[command(after_help = "EXAMPLES:
    collabtree logout")]
    Logout,
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// List teams (same as 'teams')
    #[command(alias = "ls")]
    List(TeamListArgs),
    /// Create a new team
    #[command(
        alias = "c",
        after_help = "EXAMPLES:
    collabtree team create \"Rocket\""
    )]
    Create(TeamCreateArgs),
    /// Invite a collaborator to a team
    #[command(after_help = "EXAMPLES:
    collabtree team invite Rocket ada@example.com
    collabtree team invite 42 ada@example.com")]
    Invite(TeamInviteArgs),
}

#[derive(Args, Clone, Default)]
pub struct TeamListArgs {
    /// Only show teams whose name contains this text (case-insensitive)
    #[arg(long, short)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct TeamCreateArgs {
    /// Team name
    pub name: String,
}

#[derive(Args)]
pub struct TeamInviteArgs {
    /// Team ID or exact team name
    pub team: String,

    /// Email address to invite
    pub email: String,
}
