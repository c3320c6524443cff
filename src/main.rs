use std::env;
use std::sync::Arc;

use anyhow;
use log::info;

use bookworm_client::auth::Authenticator;
use bookworm_client::config::Config;
use bookworm_client::models::Credentials;
use bookworm_client::nav::{Navigator, Route};
use bookworm_client::page::{BookDetailPage, BookListPage, PageState};
use bookworm_client::session::SessionStore;

/// Prints transitions the way a router would perform them.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn go(&self, route: &Route) {
        println!("-> {}", route.path());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let session = Arc::new(SessionStore::open(config.session_file.clone())?);
    let navigator = LogNavigator;

    // Log in with env-provided credentials when there is no live session.
    if session.token().is_none() {
        let username = env::var("BOOKWORM_USERNAME").unwrap_or_default();
        let password = env::var("BOOKWORM_PASSWORD").unwrap_or_default();

        if username.is_empty() {
            println!("no session: set BOOKWORM_USERNAME and BOOKWORM_PASSWORD to log in");
            navigator.go(&Route::Login);

            return Ok(());
        }

        let authenticator = Authenticator::new(session.clone(), config.api_base.clone());
        let credentials = Credentials::new(username, password);

        match authenticator.login(&credentials).await {
            Ok(route) => navigator.go(&route),
            Err(err) => {
                println!("login failed: {}", err);

                return Ok(());
            }
        }
    }

    let mut book_list = BookListPage::new(session.clone(), config.api_base.clone());

    if let Some(route) = book_list.enter().await {
        navigator.go(&route);

        return Ok(());
    }

    match book_list.state {
        PageState::Ready(ref books) => {
            for book in books {
                println!("{} - {} ({})", book.id, book.title, book.author);
            }
        }
        PageState::Failed(ref message) => {
            println!("error: {}", message);

            return Ok(());
        }
        _ => {}
    }

    // Open one detail view when a book id was passed on the command line.
    if let Some(id) = env::args().nth(1).and_then(|arg| arg.parse::<i32>().ok()) {
        navigator.go(&Route::BookDetail(id));

        let mut detail = BookDetailPage::new(session.clone(), config.api_base.clone(), id);

        if let Some(route) = detail.enter().await {
            navigator.go(&route);

            return Ok(());
        }

        match detail.state {
            PageState::Ready(ref book) => {
                println!("\n{}", book.title);
                println!("{}: {}", book.author, book.description);
                println!("[{}]", book.category.name);

                println!("\nreviews ({})", detail.reviews.len());

                for review in &detail.reviews {
                    println!("{}: {}", review.user.username, review.content);
                }
            }
            PageState::Failed(ref message) => {
                println!("error: {}", message);
            }
            _ => {}
        }
    }

    info!("done");

    Ok(())
}
