//! Which top-level view is reachable for a given auth state.

use crate::session::AuthStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Timeline,
    Reports,
    Search,
}

impl Route {
    /// Main-application routes in tab order.
    pub const MAIN: [Route; 4] = [
        Route::Dashboard,
        Route::Timeline,
        Route::Reports,
        Route::Search,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Timeline => "/timeline",
            Route::Reports => "/reports",
            Route::Search => "/search",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Timeline => "Timeline",
            Route::Reports => "Reports",
            Route::Search => "Search",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Auth status not known yet; nothing is resolved.
    Loading,
    Show(Route),
    Redirect(Route),
}

impl Resolution {
    /// The route that ends up on screen, if any.
    pub fn target(self) -> Option<Route> {
        match self {
            Resolution::Loading => None,
            Resolution::Show(route) | Resolution::Redirect(route) => Some(route),
        }
    }
}

pub fn resolve(status: AuthStatus, requested: Route) -> Resolution {
    let AuthStatus::Checked {
        auth_enabled,
        authenticated,
    } = status
    else {
        return Resolution::Loading;
    };

    let main_reachable = !auth_enabled || authenticated;
    match (requested, main_reachable) {
        (Route::Login, true) => Resolution::Redirect(Route::Dashboard),
        (Route::Login, false) => Resolution::Show(Route::Login),
        (route, true) => Resolution::Show(route),
        (_, false) => Resolution::Redirect(Route::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Route; 5] = [
        Route::Login,
        Route::Dashboard,
        Route::Timeline,
        Route::Reports,
        Route::Search,
    ];

    fn checked(auth_enabled: bool, authenticated: bool) -> AuthStatus {
        AuthStatus::Checked {
            auth_enabled,
            authenticated,
        }
    }

    #[test]
    fn unknown_status_resolves_nothing() {
        for route in ALL {
            assert_eq!(resolve(AuthStatus::Unknown, route), Resolution::Loading);
        }
    }

    #[test]
    fn auth_disabled_opens_everything_and_bounces_login() {
        let status = checked(false, true);
        assert_eq!(
            resolve(status, Route::Login),
            Resolution::Redirect(Route::Dashboard)
        );
        for route in Route::MAIN {
            assert_eq!(resolve(status, route), Resolution::Show(route));
        }
    }

    #[test]
    fn unauthenticated_is_sent_to_login() {
        let status = checked(true, false);
        assert_eq!(resolve(status, Route::Login), Resolution::Show(Route::Login));
        for route in Route::MAIN {
            assert_eq!(resolve(status, route), Resolution::Redirect(Route::Login));
        }
    }

    #[test]
    fn authenticated_reaches_main_application() {
        let status = checked(true, true);
        assert_eq!(
            resolve(status, Route::Login),
            Resolution::Redirect(Route::Dashboard)
        );
        for route in Route::MAIN {
            assert_eq!(resolve(status, route), Resolution::Show(route));
        }
    }
}
