use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deskmem_api::Route;

use super::action_queue::{Action, ActionTx};

mod dashboard;
mod login;
mod reports;
mod search;
mod timeline;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    let Some(route) = app.current else {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.quit();
        }
        return;
    };

    if route == Route::Login {
        login::handle_login_key(key, app, action_tx);
        return;
    }

    if !app.is_typing() && handle_global_key(key, app, action_tx) {
        return;
    }

    match route {
        Route::Dashboard => dashboard::handle_dashboard_key(key, app, action_tx),
        Route::Timeline => timeline::handle_timeline_key(key, app, action_tx),
        Route::Reports => reports::handle_reports_key(key, app, action_tx),
        Route::Search => search::handle_search_key(key, app, action_tx),
        Route::Login => {}
    }
}

/// Keys shared by every main view. Returns true if the key was consumed.
fn handle_global_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char(c @ '1'..='4') => {
            app.select_tab(c as usize - '0' as usize);
        }
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.previous_tab(),
        KeyCode::Char('L') => {
            if app.can_logout() {
                app.set_status("Logging out...");
                enqueue_action(action_tx, Action::Logout);
            }
        }
        KeyCode::Char('r') => {
            app.clear_status();
            enqueue_action(action_tx, Action::Reload);
        }
        _ => return false,
    }
    true
}
