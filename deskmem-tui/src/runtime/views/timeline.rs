use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};
use deskmem_api::timezone;

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_timeline_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let timeline = &mut app.timeline;
    let reload = match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            timeline.select_next();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            timeline.select_previous();
            false
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
            timeline.next_page(app.page_size)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => timeline.prev_page(),
        KeyCode::Char(']') => {
            timeline.shift_day(1);
            true
        }
        KeyCode::Char('[') => {
            timeline.shift_day(-1);
            true
        }
        KeyCode::Char('T') => {
            timeline.set_date(timezone::today_date());
            true
        }
        KeyCode::Enter | KeyCode::Char('o') => {
            enqueue_action(action_tx, Action::OpenSelectedScreenshot);
            false
        }
        _ => false,
    };
    if reload {
        enqueue_action(action_tx, Action::Reload);
    }
}
