use anyhow::Context;
use tokio_postgres::{Client, NoTls, Row, Statement};

use crate::api::BookRecord;
use crate::books_repository::queries::{
    title_prefix_pattern, SQL_BOOK_COUNT, SQL_BOOK_DETAIL, SQL_BOOK_LIST,
};
use crate::books_repository::{BookRepository, BookRepositoryError};

pub struct PostgresBooksRepository {
    client: Client,
}

pub struct PostgresBooksRepositoryConfig {
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl PostgresBooksRepository {
    /// Connects to the store and verifies liveness with a probe query.
    /// The server must not start accepting requests if this fails.
    pub async fn init(config: PostgresBooksRepositoryConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}:{}/{}",
            config.username, config.password, config.hostname, config.port, config.database
        );
        tracing::info!("Connecting to postgres at {}:{}", config.hostname, config.port);
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("connection error: {}", e);
            }
        });

        client
            .batch_execute("SELECT 1")
            .await
            .context("Failed to ping database")?;
        tracing::info!("Database ping successful");
        Ok(Self { client })
    }
}

fn record_from_row(row: &Row) -> Result<BookRecord, BookRepositoryError> {
    Ok(BookRecord {
        book_id: row.try_get(0)?,
        title: row.try_get(1)?,
        authors: row.try_get(2)?,
        genres: row.try_get(3)?,
        pages: row.try_get(4)?,
        rating: row.try_get(5)?,
        rating_count: row.try_get(6)?,
        image_url: row.try_get(7)?,
        description: row.try_get(8)?,
    })
}

#[async_trait::async_trait]
impl BookRepository for PostgresBooksRepository {
    async fn count_books(&self, prefix: &str) -> Result<i64, BookRepositoryError> {
        let stmt: Statement = self.client.prepare(SQL_BOOK_COUNT).await?;

        let rows = self
            .client
            .query(&stmt, &[&title_prefix_pattern(prefix)])
            .await?;

        let count: i64 = rows
            .first()
            .ok_or_else(|| BookRepositoryError::Other("Count not returned".to_string()))?
            .try_get(0)?;

        Ok(count)
    }

    async fn list_books(
        &self,
        prefix: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookRecord>, BookRepositoryError> {
        let stmt: Statement = self.client.prepare(SQL_BOOK_LIST).await?;

        let rows = self
            .client
            .query(&stmt, &[&title_prefix_pattern(prefix), &limit, &offset])
            .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn get_book(&self, book_id: &str) -> Result<BookRecord, BookRepositoryError> {
        let stmt: Statement = self.client.prepare(SQL_BOOK_DETAIL).await?;

        let rows = self.client.query(&stmt, &[&book_id]).await?;

        let row = rows
            .first()
            .ok_or_else(|| BookRepositoryError::NotFound(book_id.to_string()))?;

        record_from_row(row)
    }
}
