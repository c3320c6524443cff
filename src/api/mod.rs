use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FetchError;

pub mod auth;
mod books;
mod reviews;

pub use books::{BookDetail, BookList};
pub use reviews::{post_review, ReviewList};

/// A readable platform resource: where it lives, how the raw body is
/// fetched, and how it turns into typed data.
#[async_trait]
pub trait Endpoint {
    type ResponseData;
    type ParseData;

    fn url(&self) -> String;

    async fn request(&self) -> Result<Self::ResponseData, FetchError>;

    async fn parse(&self, response_data: Self::ResponseData) -> Result<Self::ParseData, FetchError>;
}

/// Error payload the platform attaches to rejected requests.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Pulls the `{detail}` message out of a rejected response, if the body
/// carries one.
pub(crate) async fn error_detail(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;

    serde_json::from_str::<ErrorBody>(body.as_str())
        .ok()
        .map(|error_body| error_body.detail)
}

/// Builds the fetch error for a non-success response, preferring the
/// server-supplied detail over the status line.
pub(crate) async fn status_error(response: reqwest::Response) -> FetchError {
    let status = response.status();

    let message = match error_detail(response).await {
        Some(detail) => detail,
        None => format!("server returned {}", status),
    };

    FetchError::Status(message)
}
