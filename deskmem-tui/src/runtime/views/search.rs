use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_search_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let search = &mut app.search;
    if !search.input_focused {
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('i') => search.input_focused = true,
            KeyCode::Char('j') | KeyCode::Down => search.select_next(),
            KeyCode::Char('k') | KeyCode::Up => search.select_previous(),
            KeyCode::Enter | KeyCode::Char('o') => {
                enqueue_action(action_tx, Action::OpenSelectedHit);
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Enter => {
            if !search.input.is_blank() {
                search.input_focused = false;
                enqueue_action(action_tx, Action::RunSearch);
            }
        }
        KeyCode::Esc => search.input_focused = false,
        KeyCode::Backspace => search.input.backspace(),
        KeyCode::Left => search.input.move_left(),
        KeyCode::Right => search.input.move_right(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            search.input.clear();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            search.input.insert(c);
        }
        _ => {}
    }
}
