use log::{debug, error, info};

use crate::api;
use crate::error::{SubmitError, ValidationError};
use crate::models::Review;
use crate::page::ViewToken;

/// Lifecycle of a single review submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Appended,
    Rejected,
}

/// Posts a new review for one book and merges the confirmed result into
/// the page's review collection.
pub struct ReviewSubmissionController {
    base_url: String,
    book_id: i32,
    pub state: SubmissionState,
}

impl ReviewSubmissionController {
    pub fn new(base_url: String, book_id: i32) -> ReviewSubmissionController {
        ReviewSubmissionController {
            base_url,
            book_id,
            state: SubmissionState::Idle,
        }
    }

    /// Submits `draft`. Nothing leaves the client while the draft is
    /// blank; the collection only grows once the server has acknowledged
    /// the creation, and the draft survives any failure so the user can
    /// resubmit.
    pub async fn submit(
        &mut self,
        view: &ViewToken,
        draft: &mut String,
        reviews: &mut Vec<Review>,
    ) -> Result<(), SubmitError> {
        if draft.trim().is_empty() {
            return Err(SubmitError::Validation(ValidationError::EmptyReview));
        }

        self.state = SubmissionState::Submitting;

        let result = api::post_review(self.base_url.as_str(), self.book_id, draft.as_str()).await;

        if !view.is_active() {
            debug!("review submission resolved after leaving the view, dropping");

            return Ok(());
        }

        match result {
            Ok(review) => {
                info!(
                    "submit finish\nbook_id = {}\nreview_id = {}",
                    self.book_id, review.id
                );

                reviews.push(review);
                draft.clear();
                self.state = SubmissionState::Appended;

                Ok(())
            }
            Err(err) => {
                error!("submit error\n{:?}", err);

                self.state = SubmissionState::Rejected;

                Err(err)
            }
        }
    }
}
