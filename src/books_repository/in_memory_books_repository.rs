use std::collections::HashMap;

use crate::api::{BookId, BookRecord};
use crate::books_repository::{BookRepository, BookRepositoryError};

/// In-memory stand-in for the catalog store, used in tests and local runs.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: parking_lot::RwLock<HashMap<BookId, BookRecord>>,
}

impl InMemoryBookRepository {
    pub fn with_books(records: Vec<BookRecord>) -> Self {
        Self {
            books: parking_lot::RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.book_id.clone(), record))
                    .collect(),
            ),
        }
    }

    fn matches_prefix(title: &str, prefix: &str) -> bool {
        title.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}

#[async_trait::async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn count_books(&self, prefix: &str) -> Result<i64, BookRepositoryError> {
        Ok(self
            .books
            .read()
            .values()
            .filter(|record| Self::matches_prefix(&record.title, prefix))
            .count() as i64)
    }

    async fn list_books(
        &self,
        prefix: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookRecord>, BookRepositoryError> {
        let mut matching: Vec<BookRecord> = self
            .books
            .read()
            .values()
            .filter(|record| Self::matches_prefix(&record.title, prefix))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn get_book(&self, book_id: &str) -> Result<BookRecord, BookRepositoryError> {
        self.books
            .read()
            .get(book_id)
            .cloned()
            .ok_or_else(|| BookRepositoryError::NotFound(book_id.to_string()))
    }
}
