//! Query construction for the catalog store. All user-supplied values travel
//! through `$n` placeholders, never through the query text itself.

pub const SQL_BOOK_LIST: &str =
    "SELECT book_id, title, authors, genres, pages, rating, rating_count, image_url, description \
     FROM book2018 WHERE title ILIKE $1 ORDER BY title ASC LIMIT $2 OFFSET $3";

pub const SQL_BOOK_COUNT: &str = "SELECT COUNT(*) FROM book2018 WHERE title ILIKE $1";

pub const SQL_BOOK_DETAIL: &str =
    "SELECT book_id, title, authors, genres, pages, rating, rating_count, image_url, description \
     FROM book2018 WHERE book_id = $1";

/// Builds a case-insensitive "starts with" pattern for a title prefix.
pub fn title_prefix_pattern(prefix: &str) -> String {
    format!("{}%", prefix)
}
