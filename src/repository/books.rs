//! In-memory book collection

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFields, BookFilter, BookSummary},
};

/// Insertion-ordered book collection.
///
/// Every operation takes the single lock for its whole duration, so operations
/// are atomic with respect to each other. Clones share the same collection.
#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<Mutex<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Vec<Book>>> {
        self.books
            .lock()
            .map_err(|_| AppError::Internal("Book collection lock poisoned".to_string()))
    }

    /// Append a book at the end of the collection
    pub fn insert(&self, book: Book) -> AppResult<()> {
        self.lock()?.push(book);
        Ok(())
    }

    /// List books projected to their summary.
    ///
    /// Without filters the whole collection is returned. Otherwise each active
    /// filter is matched against the full collection and the matches are
    /// concatenated (reading, then finished, then name), so a book matching
    /// several filters is listed several times.
    pub fn list(&self, filter: &BookFilter) -> AppResult<Vec<BookSummary>> {
        let books = self.lock()?;

        if filter.is_empty() {
            return Ok(books.iter().map(Book::to_summary).collect());
        }

        let mut listed = Vec::new();

        if let Some(reading) = filter.reading {
            listed.extend(
                books
                    .iter()
                    .filter(|b| b.reading == reading)
                    .map(Book::to_summary),
            );
        }

        if let Some(finished) = filter.finished {
            listed.extend(
                books
                    .iter()
                    .filter(|b| b.finished == finished)
                    .map(Book::to_summary),
            );
        }

        if let Some(ref name) = filter.name {
            let needle = name.to_lowercase();
            listed.extend(
                books
                    .iter()
                    .filter(|b| b.name.to_lowercase().contains(&needle))
                    .map(Book::to_summary),
            );
        }

        Ok(listed)
    }

    pub fn get(&self, id: &str) -> AppResult<Option<Book>> {
        Ok(self.lock()?.iter().find(|b| b.id == id).cloned())
    }

    /// Replace the mutable fields of a book in place.
    /// Returns false if no book has this id.
    pub fn replace(&self, id: &str, fields: BookFields, now: DateTime<Utc>) -> AppResult<bool> {
        let mut books = self.lock()?;
        match books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.apply(fields, now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a book, keeping the order of the others.
    /// Returns false if no book has this id.
    pub fn remove(&self, id: &str) -> AppResult<bool> {
        let mut books = self.lock()?;
        match books.iter().position(|b| b.id == id) {
            Some(index) => {
                books.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn len(&self) -> AppResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.lock()?.is_empty())
    }
}
