use std::env;

use anyhow::{bail, Context};

/// Immutable process configuration, read from the environment exactly once at
/// startup and passed by reference afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_key: String,
    pub page_size: i64,
    pub use_in_memory_db: bool,
    pub db: DbConfig,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub connection_limit: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("APIKEY").unwrap_or_default();
        if api_key.is_empty() {
            bail!("API key was not set. Please set APIKEY before starting the server");
        }

        let page_size: i64 = parsed_or("DB_QUERY_LIMIT", 10)?;
        if page_size <= 0 {
            bail!("DB_QUERY_LIMIT must be positive, got {}", page_size);
        }

        Ok(Self {
            port: parsed_or("PORT", 3000)?,
            api_key,
            page_size,
            use_in_memory_db: env::var("USE_IN_MEMORY_DB")
                .map(|value| value.to_lowercase() == "true")
                .unwrap_or_default(),
            db: DbConfig {
                host: env::var("DB_HOST").unwrap_or("localhost".to_string()),
                port: parsed_or("DB_PORT", 5432)?,
                username: env::var("DB_USER").unwrap_or("postgres".to_string()),
                password: env::var("DB_PW").unwrap_or("postgres".to_string()),
                database: env::var("DB_NAME").unwrap_or("goodreads".to_string()),
                connection_limit: parsed_or("DB_CONNECTION_LIMIT", 4)?,
            },
        })
    }
}

fn parsed_or<T: std::str::FromStr>(var: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(var) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Failed to parse {} value {:?}", var, value)),
        Err(_) => Ok(default),
    }
}
