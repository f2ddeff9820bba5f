use deskmem_api::{timezone, AuthStatus, Route, Session};

use crate::config::TuiConfig;

mod navigation;
mod state;
pub use state::{
    DashboardState, LoadGuard, LoginState, ReportTab, ReportsState, SearchState, TextInput,
    TimelineState,
};

pub struct App {
    pub running: bool,
    pub session: Session,
    /// Route the user asked for; what is shown depends on the session.
    pub requested: Route,
    /// Route on screen, `None` while the session is unresolved.
    pub current: Option<Route>,
    pub status_message: Option<String>,

    pub login: LoginState,
    pub dashboard: DashboardState,
    pub timeline: TimelineState,
    pub reports: ReportsState,
    pub search: SearchState,

    pub throbber_state: throbber_widgets_tui::ThrobberState,

    // Config values used at runtime
    pub page_size: u32,
    pub search_limit: u32,
}

impl App {
    pub fn new(session: Session, cfg: &TuiConfig) -> Self {
        let today = timezone::today_date();
        Self {
            running: true,
            session,
            requested: Route::Dashboard,
            current: None,
            status_message: None,
            login: LoginState::default(),
            dashboard: DashboardState::default(),
            timeline: TimelineState::new(today),
            reports: ReportsState::new(today),
            search: SearchState::default(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            page_size: cfg.page_size.max(1),
            search_limit: cfg.search_limit.max(1),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn auth_status(&self) -> AuthStatus {
        self.session.status()
    }

    /// Whether logging out makes sense: auth is on and we are signed in.
    pub fn can_logout(&self) -> bool {
        matches!(
            self.auth_status(),
            AuthStatus::Checked {
                auth_enabled: true,
                authenticated: true
            }
        )
    }

    /// Whether any load for the route on screen is in flight.
    pub fn is_loading(&self) -> bool {
        match self.current {
            None => true,
            Some(Route::Login) => self.login.submitting,
            Some(Route::Dashboard) => self.dashboard.guard.is_loading(),
            Some(Route::Timeline) => self.timeline.guard.is_loading(),
            Some(Route::Reports) => self.reports.guard.is_loading(),
            Some(Route::Search) => self.search.guard.is_loading(),
        }
    }

    /// True while a text field owns the keyboard.
    pub fn is_typing(&self) -> bool {
        match self.current {
            Some(Route::Login) => true,
            Some(Route::Search) => self.search.input_focused,
            _ => false,
        }
    }
}
