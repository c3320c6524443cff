use std::sync::Arc;

use log::{debug, error};

use crate::nav::Route;
use crate::session::SessionStore;

/// Outcome of a guard check. `Redirect` terminates the view lifecycle
/// before any fetch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Allow,
    Redirect(Route),
}

/// Decides, at the entry of a protected view, whether it may proceed.
pub struct SessionGuard {
    session: Arc<SessionStore>,
}

impl SessionGuard {
    pub fn new(session: Arc<SessionStore>) -> SessionGuard {
        SessionGuard { session }
    }

    /// Synchronous and deterministic. Reads the token at call time, never
    /// a captured copy.
    pub fn check(&self) -> Decision {
        match self.session.token() {
            Some(_) => Decision::Allow,
            None => {
                debug!("no session token, redirecting to login");

                Decision::Redirect(Route::Login)
            }
        }
    }

    /// Clears the session and yields the redirect to the login route.
    pub fn logout(&self) -> Decision {
        if let Err(err) = self.session.clear() {
            error!("clear session error\n{:?}", err);
        }

        Decision::Redirect(Route::Login)
    }
}
