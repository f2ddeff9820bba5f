use deskmem_api::{timezone, Route};

use super::*;

impl App {
    /// Ask for a route. It is resolved against the session on the next
    /// [`App::sync_route`].
    pub fn navigate_to(&mut self, route: Route) {
        self.requested = route;
    }

    /// Select a main tab by its 1-based number.
    pub fn select_tab(&mut self, number: usize) {
        if let Some(route) = number
            .checked_sub(1)
            .and_then(|i| Route::MAIN.get(i).copied())
        {
            self.navigate_to(route);
        }
    }

    pub fn next_tab(&mut self) {
        self.step_tab(1);
    }

    pub fn previous_tab(&mut self) {
        self.step_tab(Route::MAIN.len() - 1);
    }

    fn step_tab(&mut self, step: usize) {
        let Some(current) = self.current else {
            return;
        };
        if let Some(i) = Route::MAIN.iter().position(|r| *r == current) {
            self.navigate_to(Route::MAIN[(i + step) % Route::MAIN.len()]);
        }
    }

    /// Re-resolve the requested route against the session.
    ///
    /// Redirects replace the requested route. Returns the route that just
    /// came on screen, or `None` if nothing changed.
    pub fn sync_route(&mut self) -> Option<Route> {
        let target = self.session.resolve(self.requested).target();
        if let Some(route) = target {
            self.requested = route;
        }
        if target == self.current {
            return None;
        }

        if let Some(left) = self.current {
            self.leave(left);
        }
        self.current = target;
        if target == Some(Route::Login) {
            self.reset_views();
        }
        target
    }

    fn leave(&mut self, route: Route) {
        match route {
            Route::Login => self.login = LoginState::default(),
            Route::Dashboard => self.dashboard.guard.invalidate(),
            Route::Timeline => self.timeline.guard.invalidate(),
            Route::Reports => self.reports.guard.invalidate(),
            Route::Search => self.search.guard.invalidate(),
        }
    }

    /// Drop everything fetched under the previous session. Guards carry over
    /// so tickets handed out earlier can never match a new load.
    fn reset_views(&mut self) {
        let today = timezone::today_date();
        self.dashboard = DashboardState {
            guard: carry(&self.dashboard.guard),
            ..DashboardState::default()
        };
        self.timeline = TimelineState {
            guard: carry(&self.timeline.guard),
            ..TimelineState::new(today)
        };
        self.reports = ReportsState {
            guard: carry(&self.reports.guard),
            ..ReportsState::new(today)
        };
        self.search = SearchState {
            guard: carry(&self.search.guard),
            ..SearchState::default()
        };
    }
}

fn carry(guard: &LoadGuard) -> LoadGuard {
    let mut guard = guard.clone();
    guard.invalidate();
    guard
}
