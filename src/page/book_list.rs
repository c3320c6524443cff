use std::sync::Arc;

use log::{debug, error, info};

use crate::api::{BookList, Endpoint};
use crate::guard::{Decision, SessionGuard};
use crate::models::Book;
use crate::nav::Route;
use crate::page::{PageState, ViewToken};
use crate::session::SessionStore;

const LOAD_ERROR: &str = "failed to load book list";

/// The `/books` view. One primary fetch, nothing else.
pub struct BookListPage {
    guard: SessionGuard,
    base_url: String,
    view: ViewToken,
    pub state: PageState<Vec<Book>>,
}

impl BookListPage {
    pub fn new(session: Arc<SessionStore>, base_url: String) -> BookListPage {
        BookListPage {
            guard: SessionGuard::new(session),
            base_url,
            view: ViewToken::new(),
            state: PageState::Idle,
        }
    }

    /// Handle for revoking this view from outside, e.g. when the user
    /// navigates away while the fetch is still in flight.
    pub fn view(&self) -> ViewToken {
        self.view.clone()
    }

    /// Runs the view lifecycle once: the guard decides first, then the
    /// catalog is fetched exactly once. Returns the redirect the
    /// coordinator must perform, if any.
    pub async fn enter(&mut self) -> Option<Route> {
        if let Decision::Redirect(route) = self.guard.check() {
            return Some(route);
        }

        self.state = PageState::Loading;

        let book_list = BookList::new(self.base_url.clone());

        let result = match book_list.request().await {
            Ok(rd) => book_list.parse(rd).await,
            Err(err) => Err(err),
        };

        if !self.view.is_active() {
            debug!("book list resolved after leaving the view, dropping");

            return None;
        }

        match result {
            Ok(books) => {
                info!("book list finish\ncount = {}", books.len());

                self.state = PageState::Ready(books);
            }
            Err(err) => {
                error!("book list error\n{:?}", err);

                self.state = PageState::Failed(String::from(LOAD_ERROR));
            }
        }

        None
    }

    pub fn leave(&self) {
        self.view.revoke();
    }

    pub fn logout(&self) -> Decision {
        self.guard.logout()
    }
}
