use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

use crate::api::{BookDetailsResponse, BookId, BookRecord};

/// Human-oriented representation of one book: list fields pre-joined for
/// direct display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct BookDetailsView {
    pub book_id: BookId,
    pub title: String,
    pub authors: String,
    pub genres: String,
    pub pages: i32,
    pub rating: f64,
    pub rating_count: i32,
    pub image_src: String,
    pub description: String,
}

/// Splits a `|`-delimited store field into trimmed parts, preserving order.
/// An empty source yields an empty list rather than a single empty element.
pub fn split_delimited(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split('|').map(|part| part.trim().to_string()).collect()
}

pub fn human_view(record: &BookRecord) -> BookDetailsView {
    BookDetailsView {
        book_id: record.book_id.clone(),
        title: record.title.clone(),
        authors: split_delimited(&record.authors).join(", "),
        genres: split_delimited(&record.genres).join(", "),
        pages: record.pages,
        rating: record.rating,
        rating_count: record.rating_count,
        image_src: record.image_url.clone(),
        description: record.description.clone(),
    }
}

pub fn machine_view(record: &BookRecord) -> BookDetailsResponse {
    BookDetailsResponse {
        book_id: record.book_id.clone(),
        title: record.title.clone(),
        authors: split_delimited(&record.authors),
        summary: record.description.clone(),
        pages: record.pages,
        rating: record.rating,
        rating_count: record.rating_count,
        genre: split_delimited(&record.genres),
    }
}
