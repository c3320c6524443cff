use async_trait::async_trait;
use log::trace;
use reqwest;
use serde_json;

use crate::api::{status_error, Endpoint};
use crate::error::FetchError;
use crate::models::Book;

/// GET `/api/books/`, the whole catalog.
pub struct BookList {
    base_url: String,
}

impl BookList {
    pub fn new(base_url: String) -> BookList {
        BookList { base_url }
    }
}

#[async_trait]
impl Endpoint for BookList {
    type ResponseData = String;
    type ParseData = Vec<Book>;

    fn url(&self) -> String {
        format!("{}/api/books/", self.base_url)
    }

    async fn request(&self) -> Result<Self::ResponseData, FetchError> {
        trace!("BookList::request()");
        let client = reqwest::Client::builder().build()?;

        let response = client.get(self.url().as_str()).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(response.text().await?)
    }

    async fn parse(&self, response_data: Self::ResponseData) -> Result<Self::ParseData, FetchError> {
        trace!("BookList::parse()");
        let books = serde_json::from_str::<Vec<Book>>(response_data.as_str())?;

        Ok(books)
    }
}

/// GET `/api/books/{id}`, one catalog entry.
pub struct BookDetail {
    base_url: String,
    id: i32,
}

impl BookDetail {
    pub fn new(base_url: String, id: i32) -> BookDetail {
        BookDetail { base_url, id }
    }
}

#[async_trait]
impl Endpoint for BookDetail {
    type ResponseData = String;
    type ParseData = Book;

    fn url(&self) -> String {
        format!("{}/api/books/{}", self.base_url, self.id)
    }

    async fn request(&self) -> Result<Self::ResponseData, FetchError> {
        trace!("BookDetail::request()");
        let client = reqwest::Client::builder().build()?;

        let response = client.get(self.url().as_str()).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(response.text().await?)
    }

    async fn parse(&self, response_data: Self::ResponseData) -> Result<Self::ParseData, FetchError> {
        trace!("BookDetail::parse()");
        let book = serde_json::from_str::<Book>(response_data.as_str())?;

        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Book, Category};
    use crate::testutil::{StubRoute, StubServer};

    use super::BookDetail;
    use super::BookList;
    use super::Endpoint;

    fn sample_book(id: i32) -> Book {
        Book {
            id,
            title: String::from("The Three-Body Problem"),
            author: String::from("Liu Cixin"),
            description: String::from("First contact, seen from the wrong side."),
            category: Category {
                id: 1,
                name: String::from("Science Fiction"),
            },
            publisher: None,
            isbn: None,
        }
    }

    #[tokio::test]
    async fn fetch_book_list() -> anyhow::Result<()> {
        let books = vec![sample_book(1), sample_book(2)];
        let stub = StubServer::start(vec![StubRoute::get(
            "/api/books/",
            200,
            serde_json::to_string(&books)?.as_str(),
        )])
        .await?;

        let book_list = BookList::new(stub.base_url.clone());

        let rd = book_list.request().await?;
        let pd = book_list.parse(rd).await?;

        assert_eq!(books, pd);
        assert_eq!(1, stub.hit_count("GET", "/api/books/"));

        Ok(())
    }

    #[tokio::test]
    async fn fetch_book_detail() -> anyhow::Result<()> {
        let book = sample_book(7);
        let stub = StubServer::start(vec![StubRoute::get(
            "/api/books/7",
            200,
            serde_json::to_string(&book)?.as_str(),
        )])
        .await?;

        let book_detail = BookDetail::new(stub.base_url.clone(), 7);

        let rd = book_detail.request().await?;
        let pd = book_detail.parse(rd).await?;

        assert_eq!(book, pd);

        Ok(())
    }

    #[tokio::test]
    async fn error_prefers_server_detail() -> anyhow::Result<()> {
        let stub = StubServer::start(vec![StubRoute::get(
            "/api/books/9",
            404,
            "{\"detail\": \"book not found\"}",
        )])
        .await?;

        let book_detail = BookDetail::new(stub.base_url.clone(), 9);

        let err = book_detail.request().await.unwrap_err();

        assert_eq!(String::from("book not found"), err.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn error_falls_back_to_status() -> anyhow::Result<()> {
        let stub = StubServer::start(vec![StubRoute::get("/api/books/", 500, "oops")]).await?;

        let book_list = BookList::new(stub.base_url.clone());

        let err = book_list.request().await.unwrap_err();

        assert_eq!(
            String::from("server returned 500 Internal Server Error"),
            err.to_string()
        );

        Ok(())
    }
}
