//! Repository layer holding the in-memory book collection

pub mod books;

/// Main repository struct holding every in-memory collection
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }
}
