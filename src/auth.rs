use std::sync::Arc;
use std::time::Duration;

use log::{error, info};

use crate::api;
use crate::error::{AuthError, RegisterError};
use crate::models::{Credentials, RegistrationDraft};
use crate::nav::Route;
use crate::session::SessionStore;

/// How long the registration notice stays up before the coordinator moves
/// on to the login view.
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Outcome of a successful registration: a transient notice, then a
/// scheduled transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Registered {
    pub notice: String,
    pub redirect: Route,
    pub after: Duration,
}

/// Login and registration against the platform, feeding the session
/// store.
pub struct Authenticator {
    base_url: String,
    session: Arc<SessionStore>,
}

impl Authenticator {
    pub fn new(session: Arc<SessionStore>, base_url: String) -> Authenticator {
        Authenticator { base_url, session }
    }

    /// Exchanges credentials for a token, stores it, and signals the
    /// transition to the catalog.
    pub async fn login(&self, credentials: &Credentials) -> Result<Route, AuthError> {
        let token = api::auth::login(self.base_url.as_str(), credentials).await?;

        if let Err(err) = self.session.store(token) {
            error!("store session error\n{:?}", err);
        }

        info!("login finish\nusername = {}", credentials.username);

        Ok(Route::BookList)
    }

    /// Runs the draft checks in order, then creates the account. The
    /// transition to login is delayed so the notice can be read first.
    pub async fn register(&self, draft: &RegistrationDraft) -> Result<Registered, RegisterError> {
        draft.validate()?;

        api::auth::register(self.base_url.as_str(), draft).await?;

        info!("register finish\nusername = {}", draft.username);

        Ok(Registered {
            notice: String::from("registration successful, please log in"),
            redirect: Route::Login,
            after: REGISTER_REDIRECT_DELAY,
        })
    }
}
