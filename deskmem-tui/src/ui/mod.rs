use crate::app::App;
use deskmem_api::Route;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
    Frame,
};

mod dashboard_view;
mod login_view;
mod reports_view;
mod search_view;
mod timeline_view;
pub(super) mod utils;
pub(super) mod widgets;

pub fn render(frame: &mut Frame, app: &mut App) {
    let Some(route) = app.current else {
        render_loading(frame, app);
        return;
    };

    if route == Route::Login {
        login_view::render_login_view(frame, app);
        return;
    }

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    widgets::render_header(frame, root[0], app, route);

    let body = root[1];
    match route {
        Route::Dashboard => dashboard_view::render_dashboard_view(frame, app, body),
        Route::Timeline => timeline_view::render_timeline_view(frame, app, body),
        Route::Reports => reports_view::render_reports_view(frame, app, body),
        Route::Search => search_view::render_search_view(frame, app, body),
        Route::Login => {}
    }

    widgets::render_status_bar(frame, root[2], app, route);
}

fn render_loading(frame: &mut Frame, app: &mut App) {
    let area = utils::centered_rect(24, 1, frame.area());
    let throbber = throbber_widgets_tui::Throbber::default()
        .label("Checking session...")
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(throbber_widgets_tui::WhichUse::Spin);
    frame.render_stateful_widget(throbber, area, &mut app.throbber_state);
}
