/// Base URL used when `API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// `localStorage` key holding the bearer token of the logged-in user.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Resolves the bearer token right before a request is sent.
pub type TokenResolver = fn() -> Option<String>;

/// Settings shared by every API request.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub with_credentials: bool,
    pub token: TokenResolver,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            with_credentials: false,
            token: no_token,
        }
    }

    /// Build-time base URL and cookie policy plus the browser-stored access token.
    pub fn from_env() -> Self {
        Self::new(option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
            .with_credentials(parse_flag(option_env!("API_WITH_CREDENTIALS")))
            .with_token(stored_access_token)
    }

    pub fn with_token(mut self, token: TokenResolver) -> Self {
        self.token = token;
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Current token, if any. Empty values count as absent.
    pub fn bearer_token(&self) -> Option<String> {
        (self.token)().filter(|token| !token.is_empty())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn no_token() -> Option<String> {
    None
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1" | "true" | "yes"))
}

#[cfg(target_arch = "wasm32")]
fn stored_access_token() -> Option<String> {
    use gloo::storage::{LocalStorage, Storage};

    LocalStorage::raw().get_item(ACCESS_TOKEN_KEY).ok().flatten()
}

#[cfg(not(target_arch = "wasm32"))]
fn stored_access_token() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ClientConfig::new("https://api.example.com/");
        assert_eq!(config.url("/api/v1/x"), "https://api.example.com/api/v1/x");
    }

    #[test]
    fn test_default_has_no_token() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.bearer_token(), None);
        assert!(!config.with_credentials);
    }

    #[test]
    fn test_with_credentials_flag() {
        assert!(ClientConfig::default().with_credentials(true).with_credentials);
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some(" 1 ")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let config = ClientConfig::default().with_token(|| Some(String::new()));
        assert_eq!(config.bearer_token(), None);

        let config = ClientConfig::default().with_token(|| Some("abc".to_string()));
        assert_eq!(config.bearer_token().as_deref(), Some("abc"));
    }
}
