use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Table backing the Pokémon collection (default: "pokemon")
    pub pokemon_table: String,
    /// Table backing the Post collection (default: "posts")
    pub posts_table: String,
    /// `userId` stamped on every created post (default: "1")
    pub post_author_id: String,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `POKEMON_TABLE` - Pokémon table name (default: "pokemon")
    /// - `POSTS_TABLE` - Post table name (default: "posts")
    /// - `POST_AUTHOR_ID` - author id for new posts (default: "1")
    /// - `REQUEST_TIMEOUT_SECONDS` - request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            pokemon_table: env::var("POKEMON_TABLE").unwrap_or_else(|_| "pokemon".to_string()),
            posts_table: env::var("POSTS_TABLE").unwrap_or_else(|_| "posts".to_string()),
            post_author_id: env::var("POST_AUTHOR_ID").unwrap_or_else(|_| "1".to_string()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
