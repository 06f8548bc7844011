use std::time::Duration;

use anyhow::Context;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::BookReviews;

pub const NYT_REVIEWS_URL: &str = "https://api.nytimes.com/svc/books/v3/reviews.json";

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(thiserror::Error, Debug)]
pub enum ReviewsClientError {
    #[error("Review service request failed: {0}")]
    Request(#[from] reqwest_middleware::Error),

    #[error("Review service returned unusable data: {0}")]
    InvalidBody(#[from] reqwest::Error),
}

/// Client for the external review service. One instance is shared across
/// requests; each call is a single GET with the server-held API key.
pub struct ReviewsClient {
    base_url: String,
    api_key: String,
    client: ClientWithMiddleware,
}

impl ReviewsClient {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            // The upstream has no fallback, so a hung call must not hold the
            // request task indefinitely
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    pub async fn reviews_for_title(&self, title: &str) -> Result<BookReviews, ReviewsClientError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("api-key", self.api_key.as_str()), ("title", title)])
            .send()
            .await?;

        let body: serde_json::Value = response.json().await?;
        Ok(reshape_response(title, &body))
    }
}

/// Reshapes the upstream payload into the catalog's review response. Each
/// review entry's shape is owned by the upstream API and passed through as is.
pub fn reshape_response(title: &str, body: &serde_json::Value) -> BookReviews {
    let has_reviews = body["num_results"].as_i64().unwrap_or(0) > 0;
    let reviews = body["results"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    BookReviews {
        title: title.to_string(),
        has_reviews,
        reviews,
    }
}

#[cfg(test)]
mod reviews_tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reshapes_upstream_payload() {
        let body = json!({
            "status": "OK",
            "num_results": 2,
            "results": [
                {"book_title": "Dune", "summary": "A classic."},
                {"book_title": "Dune", "summary": "Still a classic."}
            ]
        });

        let reviews = reshape_response("Dune", &body);
        assert_eq!(reviews.title, "Dune");
        assert!(reviews.has_reviews);
        assert_eq!(reviews.reviews.len(), 2);
        assert_eq!(reviews.reviews[0]["summary"], "A classic.");
    }

    #[test]
    fn zero_results_means_no_reviews() {
        let body = json!({"status": "OK", "num_results": 0, "results": []});

        let reviews = reshape_response("Obscure Title", &body);
        assert!(!reviews.has_reviews);
        assert!(reviews.reviews.is_empty());
    }

    #[test]
    fn missing_fields_degrade_to_empty() {
        // An unexpected upstream shape must not panic the request pipeline
        let reviews = reshape_response("Dune", &json!({"fault": "rate limited"}));
        assert!(!reviews.has_reviews);
        assert!(reviews.reviews.is_empty());
    }
}
