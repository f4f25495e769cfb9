//! Chat API endpoint and credential configuration

/// Production base URL of the chat REST API
pub const DEFAULT_BASE_URL: &str = "https://www.zopim.com/api/v2";

/// Detail endpoint path, relative to the base URL
pub const DEFAULT_CHAT_PATH: &str = "/chats";

/// Search endpoint path, relative to the base URL
pub const DEFAULT_SEARCH_PATH: &str = "/chats/search";

/// Static configuration for the chat API session.
///
/// All fields are fixed before the run starts; requests authenticate with
/// HTTP basic auth over HTTPS.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Basic-auth username (agent email)
    pub username: String,
    /// Basic-auth password
    pub password: String,
    /// Base URL, no trailing slash (e.g. `https://www.zopim.com/api/v2`)
    pub base_url: String,
    /// Detail endpoint path (e.g. `/chats`)
    pub chat_path: String,
    /// Search endpoint path (e.g. `/chats/search`)
    pub search_path: String,
}

impl ApiConfig {
    /// Configuration for the production API with default endpoint paths
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
        }
    }

    /// Override the base URL (used by tests to point at a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the detail endpoint path
    pub fn with_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = path.into();
        self
    }

    /// Override the search endpoint path
    pub fn with_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = path.into();
        self
    }

    /// Full URL of the search endpoint
    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, self.search_path)
    }

    /// Full URL of the detail endpoint for one chat
    pub fn chat_url(&self, id: &crate::ChatId) -> String {
        format!("{}{}/{}", self.base_url, self.chat_path, id)
    }
}
