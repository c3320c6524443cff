use async_trait::async_trait;
use log::trace;
use reqwest;
use serde::Serialize;
use serde_json;

use crate::api::{error_detail, status_error, Endpoint};
use crate::error::{FetchError, SubmitError};
use crate::models::Review;

const SUBMIT_FALLBACK: &str = "failed to submit review, please try again later";

/// GET `/books/{id}/reviews`, everything written about one book.
pub struct ReviewList {
    base_url: String,
    book_id: i32,
}

impl ReviewList {
    pub fn new(base_url: String, book_id: i32) -> ReviewList {
        ReviewList { base_url, book_id }
    }
}

#[async_trait]
impl Endpoint for ReviewList {
    type ResponseData = String;
    type ParseData = Vec<Review>;

    fn url(&self) -> String {
        format!("{}/books/{}/reviews", self.base_url, self.book_id)
    }

    async fn request(&self) -> Result<Self::ResponseData, FetchError> {
        trace!("ReviewList::request()");
        let client = reqwest::Client::builder().build()?;

        let response = client.get(self.url().as_str()).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(response.text().await?)
    }

    async fn parse(&self, response_data: Self::ResponseData) -> Result<Self::ParseData, FetchError> {
        trace!("ReviewList::parse()");
        let reviews = serde_json::from_str::<Vec<Review>>(response_data.as_str())?;

        Ok(reviews)
    }
}

#[derive(Serialize)]
struct ReviewPayload<'a> {
    content: &'a str,
}

/// POST `/books/{id}/reviews`. The created `Review` comes back from the
/// server; callers append it to local state only after this returns `Ok`.
pub async fn post_review(
    base_url: &str,
    book_id: i32,
    content: &str,
) -> Result<Review, SubmitError> {
    trace!("post_review()");
    let client = reqwest::Client::builder().build()?;

    let response = client
        .post(format!("{}/books/{}/reviews", base_url, book_id).as_str())
        .json(&ReviewPayload { content })
        .send()
        .await?;

    if !response.status().is_success() {
        let message = match error_detail(response).await {
            Some(detail) => detail,
            None => String::from(SUBMIT_FALLBACK),
        };

        return Err(SubmitError::Rejected(message));
    }

    let body = response.text().await?;

    match serde_json::from_str::<Review>(body.as_str()) {
        Ok(review) => Ok(review),
        Err(err) => Err(SubmitError::Rejected(format!("malformed response: {}", err))),
    }
}
