use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Hook fired when the client forces the user back to the login view.
pub trait Redirect: Send + Sync {
    fn to_login(&self);
}

/// A [`Redirect`] that records requests for the UI loop to pick up.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct LoginRedirect {
    pending: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
}

impl LoginRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a redirect was requested since the last call.
    pub fn take(&self) -> bool {
        self.pending.swap(0, Ordering::SeqCst) > 0
    }

    /// Number of redirects fired over the lifetime of this hook.
    pub fn count(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl Redirect for LoginRedirect {
    fn to_login(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.total.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_pending_but_keeps_total() {
        let redirect = LoginRedirect::new();
        assert!(!redirect.take());

        redirect.to_login();
        redirect.to_login();
        assert!(redirect.take());
        assert!(!redirect.take());
        assert_eq!(redirect.count(), 2);
    }

    #[test]
    fn clones_observe_each_other() {
        let redirect = LoginRedirect::new();
        let hook: Arc<dyn Redirect> = Arc::new(redirect.clone());

        hook.to_login();
        assert_eq!(redirect.count(), 1);
        assert!(redirect.take());
    }
}
