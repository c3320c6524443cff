use std::sync::Arc;

use log::{debug, error, info};

use crate::api::{BookDetail, Endpoint, ReviewList};
use crate::error::SubmitError;
use crate::guard::{Decision, SessionGuard};
use crate::models::{Book, Review};
use crate::nav::Route;
use crate::page::{PageState, ViewToken};
use crate::review::{ReviewSubmissionController, SubmissionState};
use crate::session::SessionStore;

const LOAD_ERROR: &str = "failed to load book details";

/// The `/books/{id}` view. The book itself is the primary resource, the
/// review list the secondary one: the page renders without reviews, never
/// without the book.
pub struct BookDetailPage {
    guard: SessionGuard,
    base_url: String,
    book_id: i32,
    view: ViewToken,
    submission: ReviewSubmissionController,
    pub state: PageState<Book>,
    pub reviews: Vec<Review>,
    pub draft: String,
}

impl BookDetailPage {
    pub fn new(session: Arc<SessionStore>, base_url: String, book_id: i32) -> BookDetailPage {
        BookDetailPage {
            guard: SessionGuard::new(session),
            submission: ReviewSubmissionController::new(base_url.clone(), book_id),
            base_url,
            book_id,
            view: ViewToken::new(),
            state: PageState::Idle,
            reviews: vec![],
            draft: String::new(),
        }
    }

    /// Handle for revoking this view from outside.
    pub fn view(&self) -> ViewToken {
        self.view.clone()
    }

    /// Runs the view lifecycle once. Both reads are dispatched before
    /// either resolves and settle independently; completion order is not
    /// assumed.
    pub async fn enter(&mut self) -> Option<Route> {
        if let Decision::Redirect(route) = self.guard.check() {
            return Some(route);
        }

        self.state = PageState::Loading;

        let detail = BookDetail::new(self.base_url.clone(), self.book_id);
        let review_list = ReviewList::new(self.base_url.clone(), self.book_id);

        let (book_result, reviews_result) = tokio::join!(
            async {
                let rd = detail.request().await?;
                detail.parse(rd).await
            },
            async {
                let rd = review_list.request().await?;
                review_list.parse(rd).await
            },
        );

        if !self.view.is_active() {
            debug!("book detail resolved after leaving the view, dropping");

            return None;
        }

        let book = match book_result {
            Ok(book) => book,
            Err(err) => {
                error!("book detail error\n{:?}", err);

                if let Err(reviews_err) = reviews_result {
                    debug!("reviews error\n{:?}", reviews_err);
                }

                self.state = PageState::Failed(String::from(LOAD_ERROR));

                return None;
            }
        };

        info!("book detail finish\nid = {}", book.id);

        match reviews_result {
            Ok(reviews) => {
                self.reviews = reviews;
            }
            Err(err) => {
                // Reviews are supplementary; the page renders without them.
                debug!("reviews error\n{:?}", err);

                self.reviews = vec![];
            }
        }

        self.state = PageState::Ready(book);

        None
    }

    /// Validates and posts the current draft. The review collection grows
    /// only once the server has acknowledged the creation.
    pub async fn submit_review(&mut self) -> Result<(), SubmitError> {
        self.submission
            .submit(&self.view, &mut self.draft, &mut self.reviews)
            .await
    }

    pub fn submission_state(&self) -> &SubmissionState {
        &self.submission.state
    }

    pub fn leave(&self) {
        self.view.revoke();
    }

    pub fn logout(&self) -> Decision {
        self.guard.logout()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::models::{Book, Category, Review, Reviewer};
    use crate::nav::Route;
    use crate::page::PageState;
    use crate::review::SubmissionState;
    use crate::session::SessionStore;
    use crate::testutil::{StubRoute, StubServer};

    use super::BookDetailPage;

    fn sample_book() -> Book {
        Book {
            id: 7,
            title: String::from("Moby-Dick"),
            author: String::from("Herman Melville"),
            description: String::from("A whale holds a grudge. So does a captain."),
            category: Category {
                id: 2,
                name: String::from("Literature"),
            },
            publisher: Some(String::from("Harper & Brothers")),
            isbn: None,
        }
    }

    fn sample_reviews() -> Vec<Review> {
        vec![Review {
            id: 1,
            content: String::from("Call me impressed."),
            user: Reviewer {
                id: 3,
                username: String::from("ishmael"),
            },
        }]
    }

    fn session_with_token() -> anyhow::Result<Arc<SessionStore>> {
        let session = Arc::new(SessionStore::in_memory());
        session.store(String::from("t1"))?;

        Ok(session)
    }

    #[tokio::test]
    async fn no_token_redirects_before_any_request() -> anyhow::Result<()> {
        let stub = StubServer::start(vec![]).await?;

        let session = Arc::new(SessionStore::in_memory());
        let mut page = BookDetailPage::new(session, stub.base_url.clone(), 7);

        let redirect = page.enter().await;

        assert_eq!(Some(Route::Login), redirect);
        assert_eq!(PageState::Idle, page.state);
        assert_eq!(0, stub.hits().len());

        Ok(())
    }

    #[tokio::test]
    async fn both_reads_run_exactly_once() -> anyhow::Result<()> {
        let stub = StubServer::start(vec![
            StubRoute::get(
                "/api/books/7",
                200,
                serde_json::to_string(&sample_book())?.as_str(),
            ),
            StubRoute::get(
                "/books/7/reviews",
                200,
                serde_json::to_string(&sample_reviews())?.as_str(),
            ),
        ])
        .await?;

        let mut page = BookDetailPage::new(session_with_token()?, stub.base_url.clone(), 7);

        let redirect = page.enter().await;

        assert_eq!(None, redirect);
        assert_eq!(PageState::Ready(sample_book()), page.state);
        assert_eq!(sample_reviews(), page.reviews);
        assert_eq!(1, stub.hit_count("GET", "/api/books/7"));
        assert_eq!(1, stub.hit_count("GET", "/books/7/reviews"));

        Ok(())
    }

    #[tokio::test]
    async fn primary_failure_blocks_the_page() -> anyhow::Result<()> {
        let stub = StubServer::start(vec![
            StubRoute::get("/api/books/7", 500, ""),
            StubRoute::get(
                "/books/7/reviews",
                200,
                serde_json::to_string(&sample_reviews())?.as_str(),
            ),
        ])
        .await?;

        let mut page = BookDetailPage::new(session_with_token()?, stub.base_url.clone(), 7);

        page.enter().await;

        assert_eq!(
            PageState::Failed(String::from("failed to load book details")),
            page.state
        );
        assert_eq!(0, page.reviews.len());
        assert_eq!(1, stub.hit_count("GET", "/api/books/7"));
        assert_eq!(1, stub.hit_count("GET", "/books/7/reviews"));

        Ok(())
    }

    #[tokio::test]
    async fn secondary_failure_degrades_to_empty_reviews() -> anyhow::Result<()> {
        let stub = StubServer::start(vec![
            StubRoute::get(
                "/api/books/7",
                200,
                serde_json::to_string(&sample_book())?.as_str(),
            ),
            StubRoute::get("/books/7/reviews", 500, ""),
        ])
        .await?;

        let mut page = BookDetailPage::new(session_with_token()?, stub.base_url.clone(), 7);

        let redirect = page.enter().await;

        assert_eq!(None, redirect);
        assert_eq!(PageState::Ready(sample_book()), page.state);
        assert_eq!(0, page.reviews.len());

        Ok(())
    }

    #[tokio::test]
    async fn revoked_view_is_not_mutated() -> anyhow::Result<()> {
        let stub = StubServer::start(vec![
            StubRoute::get(
                "/api/books/7",
                200,
                serde_json::to_string(&sample_book())?.as_str(),
            ),
            StubRoute::get("/books/7/reviews", 200, "[]"),
        ])
        .await?;

        let mut page = BookDetailPage::new(session_with_token()?, stub.base_url.clone(), 7);
        page.view().revoke();

        page.enter().await;

        assert_eq!(PageState::Loading, page.state);
        assert_eq!(0, page.reviews.len());

        Ok(())
    }

    #[tokio::test]
    async fn accepted_review_appends_and_clears_the_draft() -> anyhow::Result<()> {
        let created = Review {
            id: 2,
            content: String::from("Great read"),
            user: Reviewer {
                id: 3,
                username: String::from("ishmael"),
            },
        };

        let stub = StubServer::start(vec![
            StubRoute::get(
                "/api/books/7",
                200,
                serde_json::to_string(&sample_book())?.as_str(),
            ),
            StubRoute::get(
                "/books/7/reviews",
                200,
                serde_json::to_string(&sample_reviews())?.as_str(),
            ),
            StubRoute::post(
                "/books/7/reviews",
                201,
                serde_json::to_string(&created)?.as_str(),
            ),
        ])
        .await?;

        let mut page = BookDetailPage::new(session_with_token()?, stub.base_url.clone(), 7);
        page.enter().await;

        page.draft = String::from("Great read");
        page.submit_review().await?;

        assert_eq!(2, page.reviews.len());
        assert_eq!(Some(&created), page.reviews.last());
        assert_eq!(String::new(), page.draft);
        assert_eq!(&SubmissionState::Appended, page.submission_state());

        Ok(())
    }

    #[tokio::test]
    async fn blank_review_is_rejected_locally() -> anyhow::Result<()> {
        let stub = StubServer::start(vec![
            StubRoute::get(
                "/api/books/7",
                200,
                serde_json::to_string(&sample_book())?.as_str(),
            ),
            StubRoute::get("/books/7/reviews", 200, "[]"),
        ])
        .await?;

        let mut page = BookDetailPage::new(session_with_token()?, stub.base_url.clone(), 7);
        page.enter().await;

        page.draft = String::from("");
        assert_eq!(true, page.submit_review().await.is_err());

        page.draft = String::from("   \n");
        assert_eq!(true, page.submit_review().await.is_err());

        assert_eq!(0, stub.hit_count("POST", "/books/7/reviews"));
        assert_eq!(&SubmissionState::Idle, page.submission_state());

        Ok(())
    }
}
