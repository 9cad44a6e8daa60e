use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Requests still pending after this many seconds fail with a network error
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub page_size: usize,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "https://ramtechbackend-production.up.railway.app"
timeout_secs = 15

[list]
page_size = 10
"#;

/// Build-time override for the backend location
const BASE_URL_OVERRIDE: Option<&str> = option_env!("RAMTECH_API_BASE_URL");

/// Load the embedded configuration and apply build-time overrides.
pub fn load_config() -> Result<ClientConfig, toml::de::Error> {
    let config: ClientConfig = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config.with_base_url_override(BASE_URL_OVERRIDE))
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    pub fn page_size(&self) -> usize {
        self.list.page_size.max(1)
    }

    fn with_base_url_override(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            log::info!("Using API base URL override: {}", url);
            self.api.base_url = url.to_string();
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://ramtechbackend-production.up.railway.app".to_string(),
                timeout_secs: 15,
            },
            list: ListConfig { page_size: 10 },
        }
    }
}
