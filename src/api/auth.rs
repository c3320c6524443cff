use log::{error, trace};
use reqwest;
use serde::{Deserialize, Serialize};
use serde_json;

use crate::api::error_detail;
use crate::error::AuthError;
use crate::models::{Credentials, RegistrationDraft};

const LOGIN_FALLBACK: &str = "invalid username or password";
const REGISTER_FALLBACK: &str = "registration failed, please try again later";

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Serialize)]
struct RegisterPayload<'a> {
    username: &'a str,
    password: &'a str,
}

/// POST `/api/login/`. The platform takes the login form urlencoded, not
/// as JSON, and answers 200 with `{token}`.
pub async fn login(base_url: &str, credentials: &Credentials) -> Result<String, AuthError> {
    trace!("auth::login()");

    let response = match send_login(base_url, credentials).await {
        Ok(response) => response,
        Err(err) => {
            error!("login error\n{:?}", err);

            return Err(AuthError::new(String::from(LOGIN_FALLBACK)));
        }
    };

    if !response.status().is_success() {
        let message = match error_detail(response).await {
            Some(detail) => detail,
            None => String::from(LOGIN_FALLBACK),
        };

        return Err(AuthError::new(message));
    }

    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<TokenBody>(body.as_str()) {
        Ok(token_body) => Ok(token_body.token),
        Err(err) => {
            error!("login response error\n{:?}", err);

            Err(AuthError::new(String::from(LOGIN_FALLBACK)))
        }
    }
}

async fn send_login(
    base_url: &str,
    credentials: &Credentials,
) -> Result<reqwest::Response, reqwest::Error> {
    let client = reqwest::Client::builder().build()?;

    client
        .post(format!("{}/api/login/", base_url).as_str())
        .form(credentials)
        .send()
        .await
}

/// POST `/api/users/` with JSON `{username, password}`. The account exists
/// only when the platform answers 201.
pub async fn register(base_url: &str, draft: &RegistrationDraft) -> Result<(), AuthError> {
    trace!("auth::register()");

    let payload = RegisterPayload {
        username: draft.username.as_str(),
        password: draft.password.as_str(),
    };

    let response = match send_register(base_url, &payload).await {
        Ok(response) => response,
        Err(err) => {
            error!("register error\n{:?}", err);

            return Err(AuthError::new(String::from(REGISTER_FALLBACK)));
        }
    };

    if response.status() != reqwest::StatusCode::CREATED {
        let message = match error_detail(response).await {
            Some(detail) => detail,
            None => String::from(REGISTER_FALLBACK),
        };

        return Err(AuthError::new(message));
    }

    Ok(())
}

async fn send_register(
    base_url: &str,
    payload: &RegisterPayload<'_>,
) -> Result<reqwest::Response, reqwest::Error> {
    let client = reqwest::Client::builder().build()?;

    client
        .post(format!("{}/api/users/", base_url).as_str())
        .json(payload)
        .send()
        .await
}
