use serde::Deserialize;

use crate::error::{DashboardError, DashboardResult};

/// Root configuration. Only the two `ECLIPSE_*` settings are read from the
/// environment; everything else keeps its default.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub eclipse: EclipseConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// Connection settings for the external analytics endpoint.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct EclipseConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// Simulated fetch latency applied before a snapshot is published.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_latency_ms() -> u64 {
    600
}
fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Resolved, non-blank endpoint credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EclipseCredentials {
    pub base_url: String,
    pub api_key: String,
}

impl EclipseConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: Some(api_url.into()),
            api_key: Some(api_key.into()),
        }
    }

    /// Load `ECLIPSE_API_URL` and `ECLIPSE_API_KEY` from the environment.
    pub fn load() -> DashboardResult<Self> {
        Self::from_env_source(eclipse_environment())
    }

    fn from_env_source(source: config::Environment) -> DashboardResult<Self> {
        let config = config::Config::builder().add_source(source).build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    /// Both settings, trimmed. A missing or blank value is reported as
    /// `NotConfigured` naming the absent setting.
    pub fn credentials(&self) -> DashboardResult<EclipseCredentials> {
        let base_url = non_blank(self.api_url.as_deref())
            .ok_or_else(|| DashboardError::NotConfigured("ECLIPSE_API_URL is not set".into()))?;
        let api_key = non_blank(self.api_key.as_deref())
            .ok_or_else(|| DashboardError::NotConfigured("ECLIPSE_API_KEY is not set".into()))?;
        Ok(EclipseCredentials {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

fn eclipse_environment() -> config::Environment {
    config::Environment::with_prefix("ECLIPSE").try_parsing(false)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Load configuration from the environment. Loader settings are not
    /// environment driven and keep their defaults.
    pub fn load() -> DashboardResult<Self> {
        let eclipse = EclipseConfig::load()?;
        tracing::debug!(
            eclipse_configured = eclipse.is_configured(),
            "Configuration loaded"
        );
        Ok(Self {
            eclipse,
            loader: LoaderConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_configured() {
        let config = AppConfig::default();
        assert!(!config.eclipse.is_configured());
        assert_eq!(config.loader.latency_ms, 600);
    }

    #[test]
    fn test_blank_values_are_not_configured() {
        let config = EclipseConfig::new("  ", "token");
        let err = config.credentials().unwrap_err();
        assert!(err.is_not_configured());
        assert!(err.to_string().contains("ECLIPSE_API_URL"));

        let config = EclipseConfig::new("https://eclipse.example", "");
        let err = config.credentials().unwrap_err();
        assert!(err.to_string().contains("ECLIPSE_API_KEY"));
    }

    #[test]
    fn test_credentials_trim_trailing_slash() {
        let config = EclipseConfig::new("https://eclipse.example/", " key ");
        let creds = config.credentials().unwrap();
        assert_eq!(creds.base_url, "https://eclipse.example");
        assert_eq!(creds.api_key, "key");
    }

    #[test]
    fn test_environment_variables_map_onto_settings() {
        let vars: config::Map<String, String> = [
            ("ECLIPSE_API_URL", "https://eclipse.example/"),
            ("ECLIPSE_API_KEY", "env-token"),
            ("OTHER_API_KEY", "ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = EclipseConfig::from_env_source(eclipse_environment().source(Some(vars))).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://eclipse.example/"));
        assert_eq!(config.api_key.as_deref(), Some("env-token"));
        assert_eq!(config.credentials().unwrap().base_url, "https://eclipse.example");

        let empty = EclipseConfig::from_env_source(eclipse_environment().source(Some(config::Map::new()))).unwrap();
        assert!(!empty.is_configured());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"eclipse":{"api_url":"http://x"}}"#).unwrap();
        assert_eq!(config.eclipse.api_url.as_deref(), Some("http://x"));
        assert!(config.eclipse.api_key.is_none());
        assert_eq!(config.loader.request_timeout_ms, 10_000);
    }
}
