use std::fmt;

use async_trait::async_trait;

use crate::core::category::Category;
use crate::core::listing::Listing;

pub mod trademe;

pub use trademe::TradeMeRepository;

/// Errors that can occur while talking to the data source.
/// Every variant ends up as the same network-error message on screen; they differ only in
/// what gets logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Repository misconfigured (bad base URL, unusable credentials).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the response body.
    Parse(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Config(msg) => write!(f, "config error: {msg}"),
            RepositoryError::Network(msg) => write!(f, "network error: {msg}"),
            RepositoryError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            RepositoryError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Source of the category tree and of listings.
///
/// Both calls are single-shot: they resolve once with a value or an error. An empty
/// listings vector is a successful answer, not an error.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Returns the name of the data source (for logging).
    fn name(&self) -> &str;

    /// Fetches the whole category tree, rooted at the category with id `""`.
    async fn category_tree(&self) -> Result<Category, RepositoryError>;

    /// Fetches listings in the category with the given id.
    async fn listings(&self, category_id: &str) -> Result<Vec<Listing>, RepositoryError>;
}
