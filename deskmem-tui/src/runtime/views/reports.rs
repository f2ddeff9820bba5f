use crate::app::{App, ReportTab};
use crossterm::event::{KeyCode, KeyEvent};
use time::Duration;

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_reports_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let reports = &mut app.reports;
    let reload = match key.code {
        KeyCode::Char('d') | KeyCode::Char('h') | KeyCode::Char(' ') => {
            reports.toggle_tab();
            true
        }
        KeyCode::Char('[') if reports.tab == ReportTab::Hourly => {
            reports.date = reports.date.saturating_sub(Duration::days(1));
            true
        }
        KeyCode::Char(']') if reports.tab == ReportTab::Hourly => {
            reports.date = reports.date.saturating_add(Duration::days(1));
            true
        }
        _ => false,
    };
    if reload {
        enqueue_action(action_tx, Action::Reload);
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{app_on, key};
    use super::*;
    use crate::runtime::action_queue::channel;
    use deskmem_api::Route;

    #[test]
    fn toggle_switches_tab_and_reloads() {
        let mut app = app_on(Route::Reports, false);
        let (tx, mut rx) = channel();

        handle_reports_key(key(KeyCode::Char('d')), &mut app, &tx);

        assert_eq!(app.reports.tab, ReportTab::Daily);
        assert!(matches!(rx.try_recv(), Ok(Action::Reload)));
    }

    #[test]
    fn day_keys_ignored_on_daily_tab() {
        let mut app = app_on(Route::Reports, false);
        app.reports.tab = ReportTab::Daily;
        let before = app.reports.date;
        let (tx, mut rx) = channel();

        handle_reports_key(key(KeyCode::Char('[')), &mut app, &tx);

        assert_eq!(app.reports.date, before);
        assert!(rx.try_recv().is_err());
    }
}
