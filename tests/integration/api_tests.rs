//! API integration tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{
    api,
    repository::Repository,
    services::{id::SequentialIdGenerator, Services},
    AppState,
};

/// Build a router over a fresh, empty bookshelf with ids `book-1`, `book-2`, ...
fn app() -> Router {
    let services = Services::new(Repository::new(), Arc::new(SequentialIdGenerator::default()));
    api::create_router(AppState {
        services: Arc::new(services),
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

async fn add(app: &Router, body: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"].as_str().expect("No book id").to_string()
}

fn listed_ids(body: &Value) -> Vec<String> {
    body["data"]["books"]
        .as_array()
        .expect("books is not an array")
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_add_and_get_book() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/books", Some(book("Dicoding", 100, 100, false))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book added successfully");
    assert_eq!(body["data"]["bookId"], "book-1");

    let (status, body) = send(&app, Method::GET, "/books/book-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let book = &body["data"]["book"];
    assert_eq!(book["id"], "book-1");
    assert_eq!(book["name"], "Dicoding");
    assert_eq!(book["year"], 2010);
    assert_eq!(book["pageCount"], 100);
    assert_eq!(book["readPage"], 100);
    assert_eq!(book["finished"], true);
    assert_eq!(book["reading"], false);
    assert_eq!(book["insertedAt"], book["updatedAt"]);
}

#[tokio::test]
async fn test_add_book_without_name() {
    let app = app();
    let mut body = book("x", 10, 1, false);
    body.as_object_mut().unwrap().remove("name");

    let (status, body) = send(&app, Method::POST, "/books", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Failed to add book. Please provide the book name");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert!(listed_ids(&body).is_empty());
}

#[tokio::test]
async fn test_add_book_with_page_overflow() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/books", Some(book("Coding", 100, 101, false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Failed to add book. readPage must not be greater than pageCount"
    );

    let (_, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_malformed_body_uses_fail_envelope() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/books", Some(json!({ "name": "No pages" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_books_projection_and_order() {
    let app = app();
    add(&app, book("Dicoding", 100, 100, false)).await;
    add(&app, book("Coding", 100, 50, true)).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(listed_ids(&body), vec!["book-1", "book-2"]);

    let first = body["data"]["books"][0].as_object().unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first["name"], "Dicoding");
    assert_eq!(first["publisher"], "Dicoding Indonesia");
}

#[tokio::test]
async fn test_list_books_filters() {
    let app = app();
    add(&app, book("Dicoding", 100, 100, false)).await;
    add(&app, book("Coding", 100, 50, true)).await;

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(listed_ids(&body), vec!["book-1"]);

    let (_, body) = send(&app, Method::GET, "/books?reading=true", None).await;
    assert_eq!(listed_ids(&body), vec!["book-2"]);

    let (_, body) = send(&app, Method::GET, "/books?name=coding", None).await;
    assert_eq!(listed_ids(&body), vec!["book-1", "book-2"]);

    let (_, body) = send(&app, Method::GET, "/books?name=python", None).await;
    assert!(listed_ids(&body).is_empty());
}

#[tokio::test]
async fn test_list_books_multiple_filters_concatenate() {
    let app = app();
    add(&app, book("Dicoding", 100, 100, false)).await;
    add(&app, book("Coding", 100, 50, true)).await;

    let (_, body) = send(&app, Method::GET, "/books?finished=0&name=dicoding", None).await;
    assert_eq!(listed_ids(&body), vec!["book-2", "book-1"]);

    let (_, body) = send(&app, Method::GET, "/books?reading=0&finished=1", None).await;
    assert_eq!(listed_ids(&body), vec!["book-1", "book-1"]);
}

#[tokio::test]
async fn test_list_books_rejects_invalid_flag() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books?reading=maybe", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_list_books_rejects_repeated_filter() {
    let app = app();
    add(&app, book("Dicoding", 100, 100, false)).await;

    let (status, body) = send(&app, Method::GET, "/books?reading=1&reading=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_get_unknown_book() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let id = add(&app, book("Dicoding", 100, 100, false)).await;
    add(&app, book("Coding", 100, 50, true)).await;
    let (_, before) = send(&app, Method::GET, &format!("/books/{}", id), None).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(book("Dicoding Revised", 200, 20, true)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book updated successfully");

    let (_, after) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let book = &after["data"]["book"];
    assert_eq!(book["name"], "Dicoding Revised");
    assert_eq!(book["pageCount"], 200);
    assert_eq!(book["finished"], false);
    assert_eq!(book["reading"], true);
    assert_eq!(book["insertedAt"], before["data"]["book"]["insertedAt"]);

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(listed_ids(&body), vec!["book-1", "book-2"]);
}

#[tokio::test]
async fn test_update_rejects_page_overflow_and_keeps_book() {
    let app = app();
    let id = add(&app, book("Dicoding", 100, 100, false)).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(book("Dicoding", 100, 101, false)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Failed to update book. readPage must not be greater than pageCount"
    );

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["readPage"], 100);
    assert_eq!(body["data"]["book"]["finished"], true);
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let app = app();
    let mut nameless = book("x", 10, 1, false);
    nameless.as_object_mut().unwrap().remove("name");

    let (status, body) = send(&app, Method::PUT, "/books/nope", Some(nameless)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to update book. Please provide the book name");

    let (status, body) = send(&app, Method::PUT, "/books/nope", Some(book("Coding", 10, 1, false))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Failed to update book. Id not found");
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let id = add(&app, book("Dicoding", 100, 100, false)).await;
    add(&app, book("Coding", 100, 50, true)).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book deleted successfully");

    let (status, _) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(listed_ids(&body), vec!["book-2"]);

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to delete book. Id not found");
}
