//! Directory client configuration.

/// Default page-size hint sent with item listings. Large on purpose: the
/// engine wants the whole collection in one response when the service
/// allows it.
pub const DEFAULT_PAGE_SIZE_HINT: usize = 500;

/// Connection settings for the directory services and report renderer.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// API root, without a trailing slash.
    pub base_url: String,
    pub bearer_token: Option<String>,
    pub page_size_hint: usize,
}

impl DirectoryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
            page_size_hint: DEFAULT_PAGE_SIZE_HINT,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_page_size_hint(mut self, hint: usize) -> Self {
        self.page_size_hint = hint.max(1);
        self
    }

    /// Read configuration from the environment:
    /// `PARISHKEEP_API_URL`, `PARISHKEEP_API_TOKEN`, `PARISHKEEP_PAGE_SIZE`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("PARISHKEEP_API_URL").unwrap_or_else(|_| {
            tracing::warn!("PARISHKEEP_API_URL not set; using local dev default");
            "http://localhost:8000/api".to_string()
        });

        let mut config = Self::new(base_url);

        if let Ok(token) = std::env::var("PARISHKEEP_API_TOKEN") {
            config.bearer_token = Some(token);
        }

        if let Ok(raw) = std::env::var("PARISHKEEP_PAGE_SIZE") {
            match raw.parse::<usize>() {
                Ok(hint) if hint > 0 => config.page_size_hint = hint,
                _ => tracing::warn!("ignoring unparseable PARISHKEEP_PAGE_SIZE: {raw}"),
            }
        }

        config
    }
}
