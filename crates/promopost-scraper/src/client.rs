//! HTTP client for marketplace product pages.

use std::time::Duration;

use promopost_core::{AppConfig, ProductRecord};
use reqwest::Client;

use crate::error::ScrapeError;
use crate::extract::extract_product;

/// HTTP client for product detail pages.
///
/// Sends a browser-like header set (user agent, Accept, Accept-Language)
/// because marketplace frontends answer stripped-down pages or 503s to
/// obvious bots. Non-success statuses come back as typed errors from
/// [`ProductPageClient::fetch_page`]; [`ProductPageClient::fetch_product`]
/// folds every failure into a structured [`ProductRecord`] instead.
pub struct ProductPageClient {
    client: Client,
    accept_language: String,
}

impl ProductPageClient {
    /// Creates a client with the given timeout, `User-Agent`, and
    /// `Accept-Language`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        accept_language: &str,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            accept_language: accept_language.to_owned(),
        })
    }

    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScrapeError> {
        Self::new(
            config.fetch_timeout_secs,
            &config.user_agent,
            &config.accept_language,
        )
    }

    /// Fetches `url` and returns the raw HTML body.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScrapeError::Http`] — network, TLS, or timeout failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches `url` and extracts the product fields.
    ///
    /// Never fails: fetch and extraction problems come back as a
    /// [`ProductRecord`] with `success = false` and a reason in `error`.
    pub async fn fetch_product(&self, url: &str) -> ProductRecord {
        match self.fetch_page(url).await {
            Ok(html) => {
                let record = extract_product(&html);
                if record.success {
                    tracing::info!(
                        url,
                        title = record.title.as_deref().unwrap_or_default(),
                        discount = record.has_discount(),
                        "product page extracted"
                    );
                } else {
                    tracing::warn!(url, "product page fetched but no title was found");
                }
                record
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "product page fetch failed");
                ProductRecord::failed(e.failure_reason())
            }
        }
    }
}
