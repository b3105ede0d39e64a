pub mod dashboard;
pub mod init;
pub mod teams;

use crate::client::TeamClient;
use crate::notify::TerminalNotifier;

/// The dashboard as wired for the terminal.
pub type CliDashboard = crate::dashboard::Dashboard<TeamClient, TerminalNotifier>;
