use thiserror::Error;

/// Local form/precondition failures. No network call is made when one of
/// these fires; the message is shown inline and blocks the submission.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("username must be at least 3 characters")]
    UsernameTooShort,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    #[error("review content must not be empty")]
    EmptyReview,
}

/// Failure while reading a resource. Whether it is fatal for the page
/// depends on the resource's role there (primary or secondary), which the
/// page decides, not the variant.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Status(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Login or registration rejected. `message` carries the server-supplied
/// `detail` text when there is one, otherwise the generic fallback.
#[derive(Debug, Error, PartialEq)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: String) -> AuthError {
        AuthError { message }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RegisterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Review submission failure. The draft is left intact on every variant
/// so the user can resubmit.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Rejected(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
