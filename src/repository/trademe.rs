//! Trade Me v1 API repository.
//!
//! - `GET /Categories.json` returns the whole category tree in one document. Category
//!   `Number`s are already hierarchical dash-delimited ids (`"0001-0268-"`).
//! - `GET /Search/General.json?category=<id>` returns a page of listings.
//!
//! Category browsing works anonymously; search needs an application key, sent as an OAuth
//! 1.0 `PLAINTEXT` signature.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::category::Category;
use crate::core::config::ResolvedConfig;
use crate::core::listing::Listing;
use crate::repository::{Repository, RepositoryError};

pub const PRODUCTION_BASE_URL: &str = "https://api.trademe.co.nz/v1";
pub const SANDBOX_BASE_URL: &str = "https://api.tmsandbox.co.nz/v1";
pub const DEFAULT_ROWS: u32 = 50;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct WireCategory {
    #[serde(default)]
    name: String,
    #[serde(default)]
    number: String,
    #[serde(default)]
    subcategories: Option<Vec<WireCategory>>,
    #[serde(default)]
    is_leaf: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SearchResults {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    list: Vec<WireListing>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct WireListing {
    listing_id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    category: String,
    price_display: Option<String>,
    region: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

impl From<WireCategory> for Category {
    fn from(wire: WireCategory) -> Self {
        // Leaves sometimes come back with an empty Subcategories array; IsLeaf wins.
        let sub_categories = if wire.is_leaf {
            None
        } else {
            wire.subcategories
                .map(|children| children.into_iter().map(Category::from).collect())
        };
        Category {
            id: wire.number,
            name: wire.name,
            sub_categories,
        }
    }
}

impl From<WireListing> for Listing {
    fn from(wire: WireListing) -> Self {
        Listing {
            id: wire.listing_id.to_string(),
            title: wire.title,
            category_id: wire.category,
            price_display: wire.price_display,
            region: wire.region,
        }
    }
}

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone)]
struct Credentials {
    consumer_key: String,
    consumer_secret: String,
}

pub struct TradeMeRepository {
    base_url: String,
    credentials: Option<Credentials>,
    rows: u32,
    client: reqwest::Client,
}

impl TradeMeRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
            rows: DEFAULT_ROWS,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_credentials(
        mut self,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        });
        self
    }

    /// Page size for listing searches.
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Builds the repository from resolved settings.
    ///
    /// Fails with [`RepositoryError::Config`] for a base URL that doesn't parse or for a
    /// consumer key without its secret (or the other way round).
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, RepositoryError> {
        if let Err(e) = reqwest::Url::parse(&config.base_url) {
            return Err(RepositoryError::Config(format!(
                "invalid base URL {:?}: {e}",
                config.base_url
            )));
        }
        let repository = Self::new(config.base_url.clone()).with_rows(config.rows);
        match (&config.consumer_key, &config.consumer_secret) {
            (Some(key), Some(secret)) => Ok(repository.with_credentials(key, secret)),
            (Some(_), None) => Err(RepositoryError::Config(
                "consumer key is set but consumer secret is missing".to_string(),
            )),
            (None, Some(_)) => Err(RepositoryError::Config(
                "consumer secret is set but consumer key is missing".to_string(),
            )),
            (None, None) => Ok(repository),
        }
    }

    /// OAuth 1.0 PLAINTEXT: the signature is `encode(consumer_secret) & encode(token_secret)`
    /// with an empty token secret, and every parameter value is percent-encoded.
    fn authorization(&self) -> Option<String> {
        self.credentials.as_ref().map(|c| {
            format!(
                "OAuth oauth_consumer_key=\"{}\", oauth_signature_method=\"PLAINTEXT\", oauth_signature=\"{}%26\"",
                urlencoding::encode(&c.consumer_key),
                urlencoding::encode(&c.consumer_secret)
            )
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RepositoryError> {
        let request = match self.authorization() {
            Some(header) => request.header(reqwest::header::AUTHORIZATION, header),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;

        debug!("Trade Me response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Trade Me API error: {} - {}", status, err_body);
            return Err(RepositoryError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| RepositoryError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Repository for TradeMeRepository {
    fn name(&self) -> &str {
        "trademe"
    }

    async fn category_tree(&self) -> Result<Category, RepositoryError> {
        let url = format!("{}/Categories.json", self.base_url);
        info!("Fetching category tree from {}", url);

        let root: WireCategory = self.get_json(self.client.get(&url)).await?;
        Ok(Category::from(root))
    }

    async fn listings(&self, category_id: &str) -> Result<Vec<Listing>, RepositoryError> {
        let url = format!("{}/Search/General.json", self.base_url);
        info!("Fetching listings for category {:?} (rows={})", category_id, self.rows);

        let request = self.client.get(&url).query(&[
            ("category", category_id.to_string()),
            ("rows", self.rows.to_string()),
        ]);
        let results: SearchResults = self.get_json(request).await?;
        debug!(
            "Search returned {} of {} listing(s)",
            results.list.len(),
            results.total_count
        );
        Ok(results.list.into_iter().map(Listing::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_category_translation() {
        let json = r#"{
            "Name": "Root",
            "Number": "",
            "Subcategories": [
                {
                    "Name": "Motors",
                    "Number": "0001-",
                    "Subcategories": [
                        { "Name": "Cars", "Number": "0001-0268-", "IsLeaf": true, "Subcategories": [] }
                    ],
                    "IsLeaf": false
                },
                { "Name": "Books", "Number": "0002-", "IsLeaf": true }
            ]
        }"#;
        let wire: WireCategory = serde_json::from_str(json).unwrap();
        let root = Category::from(wire);

        assert!(root.is_root());
        assert_eq!(root.children().len(), 2);
        let motors = &root.children()[0];
        assert_eq!(motors.id, "0001-");
        assert!(motors.has_children());
        // IsLeaf beats an empty array
        assert_eq!(motors.children()[0].sub_categories, None);
        assert_eq!(root.children()[1].sub_categories, None);
    }

    #[test]
    fn test_wire_listing_translation() {
        let json = r#"{
            "ListingId": 4242,
            "Title": "Vintage toaster",
            "Category": "0002-",
            "PriceDisplay": "$20.00",
            "Region": "Wellington",
            "Unused": true
        }"#;
        let wire: WireListing = serde_json::from_str(json).unwrap();
        let listing = Listing::from(wire);
        assert_eq!(listing.id, "4242");
        assert_eq!(listing.title, "Vintage toaster");
        assert_eq!(listing.category_id, "0002-");
        assert_eq!(listing.price_display.as_deref(), Some("$20.00"));
        assert_eq!(listing.region.as_deref(), Some("Wellington"));
    }

    #[test]
    fn test_search_results_without_list_are_empty() {
        let results: SearchResults = serde_json::from_str(r#"{"TotalCount": 0}"#).unwrap();
        assert!(results.list.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let repository = TradeMeRepository::new("http://localhost:9999/v1/");
        assert_eq!(repository.base_url, "http://localhost:9999/v1");
        assert_eq!(repository.rows, DEFAULT_ROWS);
    }

    #[test]
    fn test_authorization_header() {
        let anonymous = TradeMeRepository::new(SANDBOX_BASE_URL);
        assert!(anonymous.authorization().is_none());

        let signed = anonymous.with_credentials("KEY", "SECRET");
        assert_eq!(
            signed.authorization().unwrap(),
            "OAuth oauth_consumer_key=\"KEY\", oauth_signature_method=\"PLAINTEXT\", oauth_signature=\"SECRET%26\""
        );
    }

    #[test]
    fn test_authorization_percent_encodes_credentials() {
        let signed = TradeMeRepository::new(SANDBOX_BASE_URL).with_credentials("k y", "a&b\"c");
        assert_eq!(
            signed.authorization().unwrap(),
            "OAuth oauth_consumer_key=\"k%20y\", oauth_signature_method=\"PLAINTEXT\", oauth_signature=\"a%26b%22c%26\""
        );
    }

    fn resolved(key: Option<&str>, secret: Option<&str>) -> ResolvedConfig {
        ResolvedConfig {
            base_url: "http://localhost:9999/v1".to_string(),
            consumer_key: key.map(str::to_string),
            consumer_secret: secret.map(str::to_string),
            rows: 10,
        }
    }

    #[test]
    fn test_from_config() {
        let anonymous = TradeMeRepository::from_config(&resolved(None, None)).unwrap();
        assert!(anonymous.authorization().is_none());
        assert_eq!(anonymous.rows, 10);

        let signed = TradeMeRepository::from_config(&resolved(Some("k"), Some("s"))).unwrap();
        assert!(signed.authorization().is_some());
    }

    #[test]
    fn test_from_config_rejects_half_set_credentials() {
        for config in [resolved(Some("k"), None), resolved(None, Some("s"))] {
            let err = TradeMeRepository::from_config(&config).err().unwrap();
            assert!(matches!(err, RepositoryError::Config(_)), "got {err:?}");
        }
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let config = ResolvedConfig {
            base_url: "not a url".to_string(),
            ..resolved(None, None)
        };
        let err = TradeMeRepository::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("invalid base URL"), "got {err}");
    }
}
