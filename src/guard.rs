//! Route guard - decides whether a navigation may render.
//!
//! Reads the session synchronously and never touches the network. Restoring
//! the session happens when the store is built at startup, so there is no
//! "checking" state: a navigation is either rendered or redirected.

use crate::session::SessionStore;

/// Which side of the login wall a view is on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// The login form; only for signed-out users
    LoginOnly,
    /// Every admin screen
    Protected,
}

/// Where a redirect sends the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    Home,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Replace the current history entry; the attempted destination is dropped
    Redirect(RedirectTarget),
}

/// Evaluate one navigation against the current session
pub fn evaluate(access: RouteAccess, session: &SessionStore) -> GuardDecision {
    decide(access, session.is_authenticated())
}

/// Pure decision table
pub fn decide(access: RouteAccess, authenticated: bool) -> GuardDecision {
    match (access, authenticated) {
        (RouteAccess::Protected, true) => GuardDecision::Render,
        (RouteAccess::Protected, false) => GuardDecision::Redirect(RedirectTarget::Login),
        (RouteAccess::LoginOnly, true) => GuardDecision::Redirect(RedirectTarget::Home),
        (RouteAccess::LoginOnly, false) => GuardDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Identity, MemoryStorage};
    use std::sync::Arc;

    #[test]
    fn test_decision_table() {
        assert_eq!(decide(RouteAccess::Protected, true), GuardDecision::Render);
        assert_eq!(
            decide(RouteAccess::Protected, false),
            GuardDecision::Redirect(RedirectTarget::Login)
        );
        assert_eq!(
            decide(RouteAccess::LoginOnly, true),
            GuardDecision::Redirect(RedirectTarget::Home)
        );
        assert_eq!(decide(RouteAccess::LoginOnly, false), GuardDecision::Render);
    }

    #[test]
    fn test_follows_session_changes() {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(
            evaluate(RouteAccess::Protected, &session),
            GuardDecision::Redirect(RedirectTarget::Login)
        );

        session.login(Identity::default(), "tok");
        assert_eq!(evaluate(RouteAccess::Protected, &session), GuardDecision::Render);
        assert_eq!(
            evaluate(RouteAccess::LoginOnly, &session),
            GuardDecision::Redirect(RedirectTarget::Home)
        );

        session.logout();
        assert_eq!(evaluate(RouteAccess::LoginOnly, &session), GuardDecision::Render);
    }
}
