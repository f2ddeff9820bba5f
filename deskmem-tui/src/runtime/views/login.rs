use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_login_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.login.submitting {
        return;
    }
    match key.code {
        KeyCode::Enter => {
            if app.login.can_submit() {
                enqueue_action(action_tx, Action::SubmitLogin);
            }
        }
        KeyCode::Esc => app.quit(),
        KeyCode::Backspace => app.login.password.backspace(),
        KeyCode::Left => app.login.password.move_left(),
        KeyCode::Right => app.login.password.move_right(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.password.clear();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.password.insert(c);
            app.login.error = None;
        }
        _ => {}
    }
}
