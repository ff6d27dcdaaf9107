//! Configuration for the Crossref MCP server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Crossref REST API.
    pub const BASE_URL: &str = "https://api.crossref.org";

    /// Identifying User-Agent sent with every request.
    pub const USER_AGENT: &str = "Crossref MCP Server";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default page size for title and author searches.
    pub const DEFAULT_ROWS: u32 = 5;
}

/// Work field selection for API requests.
pub mod fields {
    /// Fields requested from Crossref for every work (`select=` parameter).
    pub const WORK: &[&str] = &[
        "DOI",
        "URL",
        "abstract",
        "author",
        "container-title",
        "issue",
        "published",
        "publisher",
        "title",
        "type",
        "volume",
    ];

    /// Comma-joined form of [`WORK`].
    #[must_use]
    pub fn select() -> String {
        WORK.join(",")
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact address for Crossref's polite pool (optional).
    pub mailto: Option<String>,

    /// Base URL for the REST API (for testing with mock servers).
    pub api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a new configuration with an optional polite-pool contact.
    #[must_use]
    pub fn new(mailto: Option<String>) -> Self {
        Self {
            mailto: mailto.filter(|m| !m.trim().is_empty()),
            api_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            mailto: None,
            api_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `CROSSREF_MAILTO` and `CROSSREF_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns error if `CROSSREF_API_URL` is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let mailto = std::env::var("CROSSREF_MAILTO").ok();
        let mut config = Self::new(mailto);

        if let Ok(api_url) = std::env::var("CROSSREF_API_URL") {
            url::Url::parse(&api_url)?;
            config = config.with_api_url(api_url);
        }

        Ok(config)
    }

    /// Check if a polite-pool contact is configured.
    #[must_use]
    pub const fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }

    /// User-Agent header value, with the contact address when configured.
    #[must_use]
    pub fn user_agent(&self) -> String {
        match &self.mailto {
            Some(mailto) => format!("{} (mailto:{})", api::USER_AGENT, mailto),
            None => api::USER_AGENT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.mailto.is_none());
        assert!(!config.has_mailto());
        assert_eq!(config.api_url, api::BASE_URL);
    }

    #[test]
    fn test_user_agent_with_mailto() {
        let config = Config::new(Some("ops@example.org".to_string()));
        assert_eq!(config.user_agent(), "Crossref MCP Server (mailto:ops@example.org)");
    }

    #[test]
    fn test_blank_mailto_ignored() {
        let config = Config::new(Some("  ".to_string()));
        assert!(!config.has_mailto());
        assert_eq!(config.user_agent(), api::USER_AGENT);
    }

    #[test]
    fn test_select_fields() {
        assert_eq!(
            fields::select(),
            "DOI,URL,abstract,author,container-title,issue,published,publisher,title,type,volume"
        );
    }

    #[test]
    fn test_for_testing_strips_trailing_slash() {
        let config = Config::for_testing("http://127.0.0.1:1234/");
        assert_eq!(config.api_url, "http://127.0.0.1:1234");
    }
}
