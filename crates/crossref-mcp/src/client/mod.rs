//! Crossref REST API client.
//!
//! One plain `GET` per call: no caching, no retries, no rate limiting.
//! Timeouts are the HTTP client's own, taken from [`Config`].

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::{Config, fields};
use crate::error::{ClientError, ClientResult};
use crate::models::{CrossrefResponse, RawWork, WorkList};

/// Which bibliographic field a `/works` search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    /// Crossref query parameter name.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Title => "query.title",
            Self::Author => "query.author",
        }
    }
}

/// Upstream operations the dispatcher needs.
///
/// [`CrossrefClient`] is the real implementation; tests substitute stubs.
#[async_trait]
pub trait WorksApi: Send + Sync {
    /// Search `/works`, returning at most `rows` records in upstream order.
    async fn search_works(
        &self,
        field: SearchField,
        query: &str,
        rows: u32,
    ) -> ClientResult<Vec<RawWork>>;

    /// Look up one work by (already cleaned) DOI. `Ok(None)` when the
    /// upstream answered successfully without a record.
    async fn get_work(&self, doi: &str) -> ClientResult<Option<RawWork>>;
}

/// Crossref API client.
#[derive(Clone)]
pub struct CrossrefClient {
    /// HTTP client.
    client: Client,

    /// REST API base URL.
    api_url: Url,

    /// Polite-pool contact (optional).
    mailto: Option<String>,
}

impl CrossrefClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let api_url = Url::parse(&config.api_url)?;
        if api_url.cannot_be_a_base() {
            anyhow::bail!("API URL cannot be used as a base: {api_url}");
        }

        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            api_url,
            mailto: config.mailto,
        })
    }

    /// Check if a polite-pool contact is configured.
    #[must_use]
    pub fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }

    /// URL for `/works` followed by the given path segments.
    ///
    /// Segments are percent-encoded individually, so a DOI split on `/`
    /// keeps its slashes as literal path separators. `.` and `..` segments
    /// are dropped by the URL parser.
    #[must_use]
    pub fn works_url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("works").extend(segments);
        }
        url
    }

    /// Make a GET request and decode the JSON body.
    async fn get<T>(&self, url: Url, params: &[(&str, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(url = %url, "Crossref request");

        let response = self.client.get(url).query(params).send().await?;
        let response = Self::handle_response(response)?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Map non-2xx statuses to [`ClientError::Status`].
    fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::debug!(status = status.as_u16(), url = %response.url(), "Crossref request failed");
        Err(ClientError::status(status.as_u16()))
    }
}

#[async_trait]
impl WorksApi for CrossrefClient {
    async fn search_works(
        &self,
        field: SearchField,
        query: &str,
        rows: u32,
    ) -> ClientResult<Vec<RawWork>> {
        let url = self.works_url(std::iter::empty());
        let params = [
            (field.param(), query.to_string()),
            ("rows", rows.to_string()),
            ("select", fields::select()),
        ];

        let response: CrossrefResponse<WorkList> = self.get(url, &params).await?;
        let list = response.message.unwrap_or_default();

        tracing::debug!(
            field = field.param(),
            returned = list.items.len(),
            total = ?list.total_results,
            "Crossref search complete"
        );
        Ok(list.items)
    }

    async fn get_work(&self, doi: &str) -> ClientResult<Option<RawWork>> {
        // Dot segments would be resolved away by URL normalization.
        if doi.split('/').any(|segment| matches!(segment, "." | "..")) {
            return Err(ClientError::invalid_doi(doi));
        }

        let url = self.works_url(doi.split('/'));
        let params = [("select", fields::select())];

        // Crossref answers `{"message": null}` (or an empty object) when it
        // has nothing to say about an identifier it still accepted.
        let response: CrossrefResponse<serde_json::Value> = self.get(url, &params).await?;
        match response.message {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
            Some(message) => Ok(Some(serde_json::from_value(message)?)),
        }
    }
}

impl std::fmt::Debug for CrossrefClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossrefClient")
            .field("api_url", &self.api_url.as_str())
            .field("has_mailto", &self.has_mailto())
            .finish()
    }
}
