use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event};
use deskmem_api::{LoginRedirect, Route, SessionController};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::info;

use super::action_queue::{channel, Action, ActionTx};
use super::actions::{reload_current, run_action};
use super::refresh::PeriodicRefresh;
use super::views::handle_view_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    controller: &SessionController,
    redirect: &LoginRedirect,
    refresh_interval: Duration,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let mut refresh = PeriodicRefresh::new(refresh_interval);

    let _ = action_tx.send(Action::CheckSession);

    loop {
        apply_redirect(app, redirect);

        if let Some(entered) = app.sync_route() {
            info!(route = entered.path(), "Entered view");
            reload_current(app, controller, &action_tx);
        }

        sync_refresh(app, &mut refresh, &action_tx);

        if app.is_loading() {
            app.throbber_state.calc_next();
        }
        terminal.draw(|f| ui::render(f, app))?;

        // Keep the runtime free for spawned loads while waiting for input.
        if tokio::task::block_in_place(|| event::poll(Duration::from_millis(100)))? {
            if let Event::Key(key) = event::read()? {
                handle_view_key(key, app, &action_tx);
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, controller, &action_tx);
        }

        if !app.running {
            break;
        }
    }

    refresh.stop();
    Ok(())
}

/// Pick up a forced logout from the client. Without auth the login route
/// bounces straight back, so there is nothing to tell the user.
fn apply_redirect(app: &mut App, redirect: &LoginRedirect) {
    if !redirect.take() {
        return;
    }
    if app.session.auth_enabled() {
        info!("Session expired, showing login");
        app.set_status("Session expired, please log in again");
    }
    app.navigate_to(Route::Login);
}

/// The refresh timer lives exactly as long as the dashboard is shown.
fn sync_refresh(app: &App, refresh: &mut PeriodicRefresh, action_tx: &ActionTx) {
    if app.current == Some(Route::Dashboard) {
        refresh.start(action_tx.clone());
    } else if refresh.is_running() {
        refresh.stop();
    }
}
