use std::sync::Arc;

use paperclip::actix::Apiv2Schema;
use serde::Deserialize;

use crate::api::BookListPage;
use crate::books_repository::{BookRepository, BookRepositoryError};

/// Navigation requested by the caller relative to its current offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Apiv2Schema)]
#[serde(rename_all = "lowercase")]
pub enum PageAction {
    Prev,
    Next,
}

/// Applies a navigation action to the caller's current offset.
/// `prev` clamps at zero; `next` is unbounded (an offset past the end of the
/// result set is tolerated and produces an empty page downstream).
pub fn resolve_offset(offset: i64, action: Option<PageAction>, page_size: i64) -> i64 {
    let offset = offset.max(0);
    match action {
        Some(PageAction::Prev) => (offset - page_size).max(0),
        Some(PageAction::Next) => offset + page_size,
        None => offset,
    }
}

/// Navigation flags for the page starting at `new_offset`.
pub fn navigation_flags(new_offset: i64, page_size: i64, total_count: i64) -> (bool, bool) {
    let has_previous = new_offset - page_size >= 0;
    let has_next = new_offset + page_size < total_count;
    (has_previous, has_next)
}

pub struct CatalogService {
    repository: Arc<dyn BookRepository + Send + Sync>,
    page_size: i64,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn BookRepository + Send + Sync>, page_size: i64) -> Self {
        Self {
            repository,
            page_size,
        }
    }

    /// Produces one page of the catalog for a title prefix: resolves the new
    /// offset from the requested action, then runs the count and list queries.
    pub async fn list_by_prefix(
        &self,
        prefix: &str,
        offset: i64,
        action: Option<PageAction>,
    ) -> Result<BookListPage, BookRepositoryError> {
        let new_offset = resolve_offset(offset, action, self.page_size);

        let total_count = self.repository.count_books(prefix).await?;
        let books = self
            .repository
            .list_books(prefix, self.page_size, new_offset)
            .await?;

        let (has_previous, has_next) = navigation_flags(new_offset, self.page_size, total_count);
        tracing::debug!(
            "Listed {} of {} books for prefix {:?} at offset {}",
            books.len(),
            total_count,
            prefix,
            new_offset
        );

        Ok(BookListPage {
            prefix: prefix.to_string(),
            books,
            total_count,
            offset: new_offset,
            has_previous,
            has_next,
        })
    }

    pub async fn get_by_id(
        &self,
        book_id: &str,
    ) -> Result<crate::api::BookRecord, BookRepositoryError> {
        self.repository.get_book(book_id).await
    }
}

#[cfg(test)]
mod pagination_tests {
    use super::*;

    const PAGE: i64 = 10;

    #[test]
    fn no_action_keeps_offset() {
        assert_eq!(resolve_offset(30, None, PAGE), 30);
        assert_eq!(resolve_offset(0, None, PAGE), 0);
    }

    #[test]
    fn prev_clamps_at_zero() {
        assert_eq!(resolve_offset(30, Some(PageAction::Prev), PAGE), 20);
        assert_eq!(resolve_offset(10, Some(PageAction::Prev), PAGE), 0);
        assert_eq!(resolve_offset(4, Some(PageAction::Prev), PAGE), 0);
        assert_eq!(resolve_offset(0, Some(PageAction::Prev), PAGE), 0);
    }

    #[test]
    fn next_advances_unbounded() {
        assert_eq!(resolve_offset(0, Some(PageAction::Next), PAGE), 10);
        assert_eq!(resolve_offset(990, Some(PageAction::Next), PAGE), 1000);
    }

    #[test]
    fn prev_then_next_returns_to_start_when_a_full_page_behind() {
        for offset in [10, 20, 35, 1000] {
            let back = resolve_offset(offset, Some(PageAction::Prev), PAGE);
            let forth = resolve_offset(back, Some(PageAction::Next), PAGE);
            assert_eq!(forth, offset);
        }
    }

    #[test]
    fn prev_then_next_overshoots_when_clamped() {
        // offset < page size: prev clamps to 0, so next lands on page size
        for offset in [1, 4, 9] {
            let back = resolve_offset(offset, Some(PageAction::Prev), PAGE);
            assert_eq!(back, 0);
            assert_eq!(resolve_offset(back, Some(PageAction::Next), PAGE), PAGE);
        }
    }

    #[test]
    fn has_previous_requires_a_full_page_behind() {
        assert!(!navigation_flags(0, PAGE, 100).0);
        assert!(!navigation_flags(5, PAGE, 100).0);
        assert!(navigation_flags(10, PAGE, 100).0);
        assert!(navigation_flags(90, PAGE, 100).0);
    }

    #[test]
    fn has_next_requires_rows_beyond_this_page() {
        assert!(navigation_flags(0, PAGE, 11).1);
        // the final page ends exactly at the total
        assert!(!navigation_flags(0, PAGE, 10).1);
        assert!(!navigation_flags(90, PAGE, 100).1);
        assert!(navigation_flags(80, PAGE, 100).1);
    }

    #[test]
    fn empty_catalog_never_has_next() {
        for offset in [0, 10, 500] {
            assert!(!navigation_flags(offset, PAGE, 0).1);
        }
    }
}

#[cfg(test)]
mod catalog_service_tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::BookRecord;
    use crate::books_repository::InMemoryBookRepository;

    fn book(id: &str, title: &str) -> BookRecord {
        BookRecord {
            book_id: id.to_string(),
            title: title.to_string(),
            authors: "A. Writer".to_string(),
            genres: "Fiction".to_string(),
            pages: 200,
            rating: 3.9,
            rating_count: 42,
            image_url: "".to_string(),
            description: "".to_string(),
        }
    }

    fn service_with_n_books(n: usize, page_size: i64) -> CatalogService {
        let records = (0..n)
            .map(|i| book(&format!("id-{:03}", i), &format!("Book {:03}", i)))
            .collect();
        CatalogService::new(
            Arc::new(InMemoryBookRepository::with_books(records)),
            page_size,
        )
    }

    #[tokio::test]
    async fn lists_first_page_with_next_but_no_previous() {
        let service = service_with_n_books(25, 10);

        let page = service.list_by_prefix("B", 0, None).await.unwrap();
        assert_eq!(page.total_count, 25);
        assert_eq!(page.offset, 0);
        assert_eq!(page.books.len(), 10);
        assert_eq!(page.books[0].title, "Book 000");
        assert!(!page.has_previous);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn next_action_applies_before_flags_are_computed() {
        let service = service_with_n_books(25, 10);

        let page = service
            .list_by_prefix("B", 10, Some(PageAction::Next))
            .await
            .unwrap();
        assert_eq!(page.offset, 20);
        assert_eq!(page.books.len(), 5);
        assert_eq!(page.books[0].title, "Book 020");
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn prev_action_from_last_page() {
        let service = service_with_n_books(25, 10);

        let page = service
            .list_by_prefix("B", 20, Some(PageAction::Prev))
            .await
            .unwrap();
        assert_eq!(page.offset, 10);
        assert!(page.has_previous);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn empty_prefix_match_yields_empty_page_with_flags_down() {
        let service = service_with_n_books(25, 10);

        let page = service.list_by_prefix("Z", 0, None).await.unwrap();
        assert_eq!(page.total_count, 0);
        assert!(page.books.is_empty());
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn offset_beyond_total_is_an_empty_page_not_an_error() {
        let service = service_with_n_books(25, 10);

        let page = service.list_by_prefix("B", 500, None).await.unwrap();
        assert_eq!(page.total_count, 25);
        assert!(page.books.is_empty());
        assert!(page.has_previous);
        assert!(!page.has_next);
    }
}
