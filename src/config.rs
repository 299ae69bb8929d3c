use crate::error::ConfigError;

/// Header carrying the subscription key on every upstream call.
pub const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

const BASE_URL_ENV: &str = "VISION_BASE_URL";
const API_KEY_ENV: &str = "VISION_API_KEY";

/// Upstream endpoint and credentials. Built once, then shared read-only
/// by every tool in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl VisionConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// An empty key is treated as no key: the header is simply omitted.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key: String = key.into();
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    /// Load from `VISION_BASE_URL` and the optional `VISION_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let config = Self::new(base_url.trim());
        Ok(match lookup(API_KEY_ENV) {
            Some(key) => config.with_api_key(key),
            None => config,
        })
    }
}
