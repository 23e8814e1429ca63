//! Book catalog service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult, BookAction},
    models::book::{Book, BookFilter, BookPayload, BookSummary},
    repository::Repository,
};

use super::id::IdGenerator;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    ids: Arc<dyn IdGenerator>,
}

impl BooksService {
    pub fn new(repository: Repository, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Validate and store a new book, returning its id
    pub fn add_book(&self, payload: BookPayload) -> AppResult<String> {
        let fields = payload.validate(BookAction::Add).map_err(|e| {
            tracing::debug!("Rejected new book: {}", e);
            e
        })?;

        let id = self.ids.generate();
        let book = Book::new(id.clone(), fields, Utc::now());
        self.repository.books.insert(book)?;

        tracing::info!(book_id = %id, "Book added");
        Ok(id)
    }

    /// List books, see [`BooksRepository::list`](crate::repository::books::BooksRepository::list)
    pub fn list_books(&self, filter: &BookFilter) -> AppResult<Vec<BookSummary>> {
        let books = self.repository.books.list(filter)?;
        tracing::debug!(?filter, count = books.len(), "Listed books");
        Ok(books)
    }

    /// Get a book by id with full details
    pub fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .get(id)?
            .ok_or(AppError::NotFound(BookAction::Fetch))
    }

    /// Replace a book. The payload is validated before the id is looked up.
    pub fn update_book(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        let fields = payload.validate(BookAction::Update).map_err(|e| {
            tracing::debug!(book_id = %id, "Rejected book update: {}", e);
            e
        })?;

        if !self.repository.books.replace(id, fields, Utc::now())? {
            tracing::warn!(book_id = %id, "Update of unknown book");
            return Err(AppError::NotFound(BookAction::Update));
        }

        tracing::info!(book_id = %id, "Book updated");
        Ok(())
    }

    /// Delete a book
    pub fn delete_book(&self, id: &str) -> AppResult<()> {
        if !self.repository.books.remove(id)? {
            tracing::warn!(book_id = %id, "Delete of unknown book");
            return Err(AppError::NotFound(BookAction::Delete));
        }

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    /// Number of stored books
    pub fn count(&self) -> AppResult<usize> {
        self.repository.books.len()
    }
}
