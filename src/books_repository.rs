pub use in_memory_books_repository::InMemoryBookRepository;
pub use postgres_books_repository::{PostgresBooksRepository, PostgresBooksRepositoryConfig};

use crate::api::{BookId, BookRecord};

mod in_memory_books_repository;
mod postgres_books_repository;
pub mod queries;

#[derive(thiserror::Error, Debug)]
pub enum BookRepositoryError {
    #[error("Book {0} not found")]
    NotFound(BookId),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait BookRepository {
    /// Counts books whose title starts with the given letter or digit
    async fn count_books(&self, prefix: &str) -> Result<i64, BookRepositoryError>;
    /// Lists books whose title starts with the given letter or digit,
    /// ordered alphabetically by title, bounded by limit/offset
    async fn list_books(
        &self,
        prefix: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookRecord>, BookRepositoryError>;
    /// Retrieves a single book by its exact identifier
    async fn get_book(&self, book_id: &str) -> Result<BookRecord, BookRepositoryError>;
}
