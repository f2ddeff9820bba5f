mod app;
mod bootstrap;
mod cli;
mod commands;
mod config;
mod logging;
mod login;
mod runtime;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::TuiConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TuiConfig::load()?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::ConfigPath => {
            let path = TuiConfig::config_path()?;
            if !path.exists() {
                config.save_to(&path)?;
            }
            println!("{}", path.display());
            Ok(())
        }
        Commands::Login => {
            let (controller, _) = bootstrap::build_controller(&config)?;
            login::run_login(&controller).await
        }
        Commands::Logout => {
            let (controller, _) = bootstrap::build_controller(&config)?;
            login::run_logout(&controller).await;
            Ok(())
        }
        Commands::Search { query, limit } => {
            let (controller, _) = bootstrap::build_controller(&config)?;
            commands::search(&controller, &query, limit.unwrap_or(config.search_limit)).await
        }
        Commands::Trigger => {
            let (controller, _) = bootstrap::build_controller(&config)?;
            commands::trigger(&controller).await
        }
        Commands::RetryFailed => {
            let (controller, _) = bootstrap::build_controller(&config)?;
            commands::retry_failed(&controller).await
        }
        Commands::Failed => {
            let (controller, _) = bootstrap::build_controller(&config)?;
            commands::failed(&controller).await
        }
        Commands::Run => run_dashboard(&config).await,
    }
}

async fn run_dashboard(config: &TuiConfig) -> Result<()> {
    let _log_guard = logging::init(&TuiConfig::log_dir()?)?;

    let (controller, redirect) = bootstrap::build_controller(config)?;
    tracing::info!(api_url = controller.client().base_url(), "Starting dashboard");
    let mut app = App::new(controller.session().clone(), config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(
        &mut terminal,
        &mut app,
        &controller,
        &redirect,
        config.refresh_interval(),
    )
    .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "Dashboard exited with an error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
