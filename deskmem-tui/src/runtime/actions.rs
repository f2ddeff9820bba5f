use crate::app::{App, ReportTab};
use crate::login::open_browser;
use deskmem_api::models::{ActivityQuery, ScreenshotQuery};
use deskmem_api::{ApiError, Route, SessionController};
use tracing::{debug, warn};

use super::action_queue::{Action, ActionTx, ReportData};

/// Number of recent activities on the dashboard.
const RECENT_ACTIVITY_LIMIT: u32 = 10;
/// Days shown on the daily reports tab.
const DAILY_REPORT_LIMIT: u32 = 7;

/// Apply an action to the app. Network calls are spawned and report back
/// through `action_tx`, so this never blocks the UI loop.
pub(super) fn run_action(
    action: Action,
    app: &mut App,
    controller: &SessionController,
    action_tx: &ActionTx,
) {
    match action {
        Action::CheckSession => {
            let controller = controller.clone();
            let tx = action_tx.clone();
            tokio::spawn(async move {
                controller.start().await;
                let _ = tx.send(Action::SessionChecked);
            });
        }
        Action::SessionChecked => {
            // The session handle already holds the result; the loop re-resolves
            // the route on its next pass.
            debug!(status = ?app.auth_status(), "Startup check finished");
        }
        Action::SubmitLogin => submit_login(app, controller, action_tx),
        Action::LoginFinished(result) => {
            app.login.submitting = false;
            match result {
                Ok(()) => {
                    app.login.password.clear();
                    app.login.error = None;
                    app.clear_status();
                    app.navigate_to(Route::Dashboard);
                }
                Err(message) => app.login.error = Some(message),
            }
        }
        Action::Logout => {
            if !app.can_logout() {
                return;
            }
            let controller = controller.clone();
            let tx = action_tx.clone();
            tokio::spawn(async move {
                controller.logout().await;
                let _ = tx.send(Action::LoggedOut);
            });
        }
        Action::LoggedOut => {
            app.set_status("Logged out");
            app.navigate_to(Route::Login);
        }
        Action::Reload => reload_current(app, controller, action_tx),
        Action::RefreshDashboard => {
            if app.current == Some(Route::Dashboard) {
                load_dashboard(app, controller, action_tx);
            }
        }
        Action::DashboardLoaded { ticket, result } => {
            if !app.dashboard.guard.finish(ticket) {
                return;
            }
            match result {
                Ok((stats, recent)) => {
                    app.dashboard.stats = Some(stats);
                    app.dashboard.recent = recent.items;
                    app.dashboard.error = None;
                }
                Err(e) => app.dashboard.error = load_failed("dashboard", e),
            }
        }
        Action::TimelineLoaded { ticket, result } => {
            if !app.timeline.guard.finish(ticket) {
                return;
            }
            match result {
                Ok(page) => {
                    app.timeline.total = page.total_or_len();
                    app.timeline.screenshots = page.items;
                    app.timeline.selected = 0;
                    app.timeline.error = None;
                }
                Err(e) => app.timeline.error = load_failed("timeline", e),
            }
        }
        Action::ReportsLoaded { ticket, result } => {
            if !app.reports.guard.finish(ticket) {
                return;
            }
            match result {
                Ok(ReportData::Hourly(items)) => {
                    app.reports.hourly = items;
                    app.reports.error = None;
                }
                Ok(ReportData::Daily(items)) => {
                    app.reports.daily = items;
                    app.reports.error = None;
                }
                Err(e) => app.reports.error = load_failed("reports", e),
            }
        }
        Action::RunSearch => run_search(app, controller, action_tx),
        Action::SearchLoaded {
            ticket,
            query,
            result,
        } => {
            if !app.search.guard.finish(ticket) {
                return;
            }
            match result {
                Ok(page) => {
                    app.search.total = page.total_or_len();
                    app.search.hits = page.items;
                    app.search.selected = 0;
                    app.search.last_query = Some(query);
                    app.search.error = None;
                }
                Err(e) => app.search.error = load_failed("search", e),
            }
        }
        Action::TriggerAnalysis => {
            app.set_status("Triggering analysis...");
            let client = controller.client().clone();
            let tx = action_tx.clone();
            tokio::spawn(async move {
                let result = client.trigger_analysis().await;
                let _ = tx.send(Action::MaintenanceFinished(result));
            });
        }
        Action::RetryFailed => {
            app.set_status("Resetting failed analyses...");
            let client = controller.client().clone();
            let tx = action_tx.clone();
            tokio::spawn(async move {
                let result = client.retry_failed().await;
                let _ = tx.send(Action::MaintenanceFinished(result));
            });
        }
        Action::MaintenanceFinished(result) => match result {
            Ok(ack) => {
                let message = ack.message.unwrap_or_else(|| "Done".to_string());
                if ack.success {
                    app.set_status(message);
                    if app.current == Some(Route::Dashboard) {
                        load_dashboard(app, controller, action_tx);
                    }
                } else {
                    app.set_status(format!("Server declined: {message}"));
                }
            }
            Err(e) if e.is_session_expired() => {}
            Err(e) => {
                warn!(error = %e, "Maintenance request failed");
                app.set_status(e.user_message());
            }
        },
        Action::OpenSelectedScreenshot => {
            if let Some(shot) = app.timeline.selected_screenshot() {
                let url = controller.client().file_url(&shot.file_path());
                open_browser(&url);
                app.set_status(format!("Opened {url}"));
            }
        }
        Action::OpenSelectedHit => {
            if app.search.selected_hit().is_none() {
                return;
            }
            match selected_hit_url(app, controller) {
                Some(url) => {
                    open_browser(&url);
                    app.set_status(format!("Opened {url}"));
                }
                None => app.set_status("This result has no screenshot"),
            }
        }
    }
}

/// Absolute URL of the screenshot behind the selected search hit.
fn selected_hit_url(app: &App, controller: &SessionController) -> Option<String> {
    let path = app.search.selected_hit()?.screenshot_path()?;
    Some(controller.client().file_url(&path))
}

/// Log a failed load and produce the view's status line. Session expiry is
/// handled by the redirect, so it produces nothing.
fn load_failed(view: &str, e: ApiError) -> Option<String> {
    if e.is_session_expired() {
        return None;
    }
    warn!(view, error = %e, "Load failed");
    Some(e.user_message())
}

fn submit_login(app: &mut App, controller: &SessionController, action_tx: &ActionTx) {
    if !app.login.can_submit() {
        return;
    }
    app.login.submitting = true;
    app.login.error = None;

    let password = app.login.password.value.clone();
    let controller = controller.clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = controller
            .login(&password)
            .await
            .map_err(|e| e.login_message());
        let _ = tx.send(Action::LoginFinished(result));
    });
}

pub(super) fn reload_current(
    app: &mut App,
    controller: &SessionController,
    action_tx: &ActionTx,
) {
    match app.current {
        Some(Route::Dashboard) => load_dashboard(app, controller, action_tx),
        Some(Route::Timeline) => load_timeline(app, controller, action_tx),
        Some(Route::Reports) => load_reports(app, controller, action_tx),
        Some(Route::Search) => {
            if app.search.last_query.is_some() {
                run_search(app, controller, action_tx);
            }
        }
        Some(Route::Login) | None => {}
    }
}

fn load_dashboard(app: &mut App, controller: &SessionController, action_tx: &ActionTx) {
    let ticket = app.dashboard.guard.begin();
    let client = controller.client().clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let recent = ActivityQuery::latest(RECENT_ACTIVITY_LIMIT);
        let result = tokio::try_join!(client.today_stats(), client.activities(&recent));
        let _ = tx.send(Action::DashboardLoaded { ticket, result });
    });
}

fn load_timeline(app: &mut App, controller: &SessionController, action_tx: &ActionTx) {
    let ticket = app.timeline.guard.begin();
    let query = ScreenshotQuery::for_day(app.timeline.date, app.timeline.page, app.page_size);
    let client = controller.client().clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = client.screenshots(&query).await;
        let _ = tx.send(Action::TimelineLoaded { ticket, result });
    });
}

fn load_reports(app: &mut App, controller: &SessionController, action_tx: &ActionTx) {
    let ticket = app.reports.guard.begin();
    let tab = app.reports.tab;
    let date = app.reports.date;
    let client = controller.client().clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = match tab {
            ReportTab::Hourly => client
                .hourly_reports(date)
                .await
                .map(|page| ReportData::Hourly(page.items)),
            ReportTab::Daily => client
                .daily_reports(DAILY_REPORT_LIMIT)
                .await
                .map(|page| ReportData::Daily(page.items)),
        };
        let _ = tx.send(Action::ReportsLoaded { ticket, result });
    });
}

fn run_search(app: &mut App, controller: &SessionController, action_tx: &ActionTx) {
    let query = match &app.search.last_query {
        Some(last) if app.search.input.is_blank() => last.clone(),
        _ => app.search.input.value.trim().to_string(),
    };
    if query.is_empty() {
        return;
    }

    let ticket = app.search.guard.begin();
    let limit = app.search_limit;
    let client = controller.client().clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = client.search(&query, limit).await;
        let _ = tx.send(Action::SearchLoaded {
            ticket,
            query,
            result,
        });
    });
}
