//! # Client Configuration
//!
//! Service URLs and deadlines shared by the [`Session`](crate::session::Session) and the
//! [`Client`](crate::client::Client).
//!
//! URLs can come from the environment (`FEAST_CORE_URL`, `FEAST_SERVING_URL`); values set
//! explicitly with the `with_*` methods win over it.
use crate::transport::Service;
use std::time::Duration;

pub const FEAST_CORE_URL_ENV_KEY: &str = "FEAST_CORE_URL";
pub const FEAST_SERVING_URL_ENV_KEY: &str = "FEAST_SERVING_URL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_APPLY_TIMEOUT: Duration = Duration::from_secs(300);
/// One week.
pub const DEFAULT_BATCH_MAX_AGE: Duration = Duration::from_secs(604_800);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    core_url: Option<String>,
    serving_url: Option<String>,
    /// Bound on establishing a connection.
    pub connect_timeout: Duration,
    /// Bound on every call except feature set registration.
    pub call_timeout: Duration,
    /// Bound on registering a feature set, which may trigger work on Core.
    pub apply_timeout: Duration,
    /// How far back batch retrieval looks for feature values.
    pub batch_max_age: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            core_url: None,
            serving_url: None,
            connect_timeout: DEFAULT_TIMEOUT,
            call_timeout: DEFAULT_TIMEOUT,
            apply_timeout: DEFAULT_APPLY_TIMEOUT,
            batch_max_age: DEFAULT_BATCH_MAX_AGE,
        }
    }
}

impl ClientConfig {
    /// Default settings with the URLs read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Default settings with the URLs read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            core_url: lookup(FEAST_CORE_URL_ENV_KEY).and_then(normalize_url),
            serving_url: lookup(FEAST_SERVING_URL_ENV_KEY).and_then(normalize_url),
            ..Self::default()
        }
    }

    pub fn with_core_url(mut self, url: impl Into<String>) -> Self {
        self.core_url = normalize_url(url.into());
        self
    }

    pub fn with_serving_url(mut self, url: impl Into<String>) -> Self {
        self.serving_url = normalize_url(url.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_apply_timeout(mut self, timeout: Duration) -> Self {
        self.apply_timeout = timeout;
        self
    }

    pub fn with_batch_max_age(mut self, max_age: Duration) -> Self {
        self.batch_max_age = max_age;
        self
    }

    /// The URL of `service`, if one is configured.
    pub fn url(&self, service: Service) -> Option<&str> {
        match service {
            Service::Core => self.core_url.as_deref(),
            Service::Serving => self.serving_url.as_deref(),
        }
    }
}

/// Blank URLs count as unset; `host:port` gets an `http://` scheme.
fn normalize_url(url: String) -> Option<String> {
    let url = url.trim();

    if url.is_empty() {
        None
    } else if url.contains("://") {
        Some(url.to_string())
    } else {
        Some(format!("http://{url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();

        assert_eq!(config.url(Service::Core), None);
        assert_eq!(config.url(Service::Serving), None);
        assert_eq!(config.call_timeout, Duration::from_secs(5));
        assert_eq!(config.apply_timeout, Duration::from_secs(300));
        assert_eq!(config.batch_max_age, Duration::from_secs(604800));
    }

    #[test]
    fn test_urls_from_environment() {
        let env = HashMap::from([
            (FEAST_CORE_URL_ENV_KEY, "localhost:6565"),
            (FEAST_SERVING_URL_ENV_KEY, "https://serving.feast.dev"),
        ]);

        let config = ClientConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.url(Service::Core), Some("http://localhost:6565"));
        assert_eq!(
            config.url(Service::Serving),
            Some("https://serving.feast.dev")
        );
    }

    #[test]
    fn test_explicit_url_overrides_environment() {
        let env = HashMap::from([(FEAST_CORE_URL_ENV_KEY, "localhost:6565")]);

        let config = ClientConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()))
            .with_core_url("core:6565")
            .with_serving_url("   ");

        assert_eq!(config.url(Service::Core), Some("http://core:6565"));
        assert_eq!(config.url(Service::Serving), None);
    }
}
