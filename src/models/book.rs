//! Book model and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult, BookAction};

/// Full book record as stored and returned by `GET /books/{bookId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    /// True iff `readPage == pageCount` at the last write
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from validated fields
    pub fn new(id: String, fields: BookFields, now: DateTime<Utc>) -> Self {
        let finished = fields.is_finished();
        Self {
            id,
            name: fields.name,
            year: fields.year,
            author: fields.author,
            summary: fields.summary,
            publisher: fields.publisher,
            page_count: fields.page_count,
            read_page: fields.read_page,
            finished,
            reading: fields.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field, keeping `id` and `inserted_at`
    pub fn apply(&mut self, fields: BookFields, now: DateTime<Utc>) {
        self.finished = fields.is_finished();
        self.name = fields.name;
        self.year = fields.year;
        self.author = fields.author;
        self.summary = fields.summary;
        self.publisher = fields.publisher;
        self.page_count = fields.page_count;
        self.read_page = fields.read_page;
        self.reading = fields.reading;
        self.updated_at = now;
    }

    pub fn to_summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Short book representation for lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

/// Create / update request body.
///
/// `finished` is derived, so it is not accepted here; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

/// Mutable book fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookFields {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

impl BookPayload {
    /// Check the name and page rules. `action` words the error message.
    pub fn validate(self, action: BookAction) -> AppResult<BookFields> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(AppError::MissingName(action)),
        };

        if self.read_page > self.page_count {
            return Err(AppError::PageOverflow(action));
        }

        Ok(BookFields {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}

/// Raw query string of `GET /books`
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// `1`/`true` or `0`/`false`
    pub reading: Option<String>,
    /// `1`/`true` or `0`/`false`
    pub finished: Option<String>,
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
}

/// Parsed list filters. Each active filter is matched on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub reading: Option<bool>,
    pub finished: Option<bool>,
    pub name: Option<String>,
}

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self.reading.is_none() && self.finished.is_none() && self.name.is_none()
    }
}

impl TryFrom<BookQuery> for BookFilter {
    type Error = AppError;

    fn try_from(query: BookQuery) -> AppResult<Self> {
        Ok(Self {
            reading: query
                .reading
                .as_deref()
                .map(|v| parse_flag("reading", v))
                .transpose()?,
            finished: query
                .finished
                .as_deref()
                .map(|v| parse_flag("finished", v))
                .transpose()?,
            name: query.name,
        })
    }
}

/// Parse a boolean query flag: `true`/`1` or `false`/`0`, case-insensitive
pub fn parse_flag(field: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(AppError::BadRequest(format!(
            "Invalid value '{}' for '{}', expected 0, 1, true or false",
            value, field
        ))),
    }
}
