use std::time::Duration;

use crate::url::DEFAULT_API_BASE_URL;

/// Transport configuration for generation requests.
#[derive(Debug, Clone)]
pub struct GenApiConfig {
    /// Base URL for the generation service.
    pub base_url: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Optional request timeout covering connect and streaming reads.
    pub timeout: Option<Duration>,
}

impl Default for GenApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: None,
            timeout: None,
        }
    }
}

impl GenApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
