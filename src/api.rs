use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

pub type BookId = String;

/// A raw catalog row. `authors` and `genres` are stored as `|`-joined strings
/// and are split by the detail formatter on the way out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct BookRecord {
    pub book_id: BookId,
    pub title: String,
    pub authors: String,
    pub genres: String,
    pub pages: i32,
    pub rating: f64,
    pub rating_count: i32,
    pub image_url: String,
    pub description: String,
}

/// One page of the catalog listing plus its navigation affordances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct BookListPage {
    pub prefix: String,
    pub books: Vec<BookRecord>,
    pub total_count: i64,
    pub offset: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Machine representation of a single book, matching the shape the detail
/// endpoint serves for `application/json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailsResponse {
    pub book_id: BookId,
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub pages: i32,
    pub rating: f64,
    pub rating_count: i32,
    pub genre: Vec<String>,
}

/// Static navigation payload for the home route: groups of starting
/// letters/digits to browse by.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct HomePage {
    pub prefix_groups: Vec<Vec<String>>,
}

impl HomePage {
    pub fn new() -> Self {
        let groups = [
            &["A", "B", "C", "D", "E"][..],
            &["F", "G", "H", "I", "J"],
            &["K", "L", "M", "N", "O"],
            &["P", "Q", "R", "S", "T"],
            &["U", "V", "W", "X", "Y"],
            &["Z"],
            &["0", "1", "2", "3", "4"],
            &["5", "6", "7", "8", "9"],
        ];
        Self {
            prefix_groups: groups
                .iter()
                .map(|group| group.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

/// Reviews fetched from the upstream service for one title. The shape of each
/// entry is owned by the upstream API, so entries stay as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookReviews {
    pub title: String,
    pub has_reviews: bool,
    pub reviews: Vec<serde_json::Value>,
}
