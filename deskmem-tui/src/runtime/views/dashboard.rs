use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_dashboard_key(key: KeyEvent, _app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('t') => enqueue_action(action_tx, Action::TriggerAnalysis),
        KeyCode::Char('R') => enqueue_action(action_tx, Action::RetryFailed),
        _ => {}
    }
}
