use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "deskmem-tui")]
#[command(about = "Terminal dashboard for desktop memory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the dashboard (default)
    Run,
    /// Prompt for the password and store the session token
    Login,
    /// Sign out and remove the stored token
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
    /// Search recorded activities
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Ask the server to analyze pending screenshots now
    Trigger,
    /// Reset screenshots whose analysis failed so they are retried
    RetryFailed,
    /// List screenshots whose analysis failed
    Failed,
}
