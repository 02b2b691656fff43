use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://people.zoho.com";
pub const API_PATH: &str = "people/api";
pub const DEFAULT_USER_AGENT: &str = "jira-people-bridge";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct PeopleConfig {
    pub base_url: String,
    pub token: String,
    pub user_agent: String,
    /// Whole-request timeout. `None` leaves timing policy to the caller.
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
}

impl PeopleConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            token: token.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn with_connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = duration;
        self
    }

    pub fn api_root(&self) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), API_PATH)
    }
}

impl fmt::Debug for PeopleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeopleConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::PeopleConfig;
    use std::time::Duration;

    #[test]
    fn api_root_joins_base_and_api_path() {
        let config = PeopleConfig::new("token");
        assert_eq!(config.api_root(), "https://people.zoho.com/people/api/");

        let config = config.with_base_url("http://127.0.0.1:1234/");
        assert_eq!(config.api_root(), "http://127.0.0.1:1234/people/api/");
    }

    #[test]
    fn no_request_timeout_unless_configured() {
        let config = PeopleConfig::new("token");
        assert_eq!(config.timeout, None);
        assert_eq!(
            config.with_timeout(Duration::from_secs(5)).timeout,
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", PeopleConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
