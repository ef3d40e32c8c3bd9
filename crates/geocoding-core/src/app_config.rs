#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub env: Environment,
    pub base_url: String,
    pub language: String,
    /// Language used to resolve country display names (e.g. `"en"`).
    pub country_name_language: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("country_name_language", &self.country_name_language)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
