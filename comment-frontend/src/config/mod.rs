use secrecy::Secret;
use service_core::config::{self as core_config, get_env};
use service_core::error::AppError;

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub common: core_config::Config,
    pub relay: RelaySettings,
}

#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Base URL of the functions host, e.g. `https://xyz.example.co`.
    pub base_url: String,
    /// Bearer credential sent on every relay call.
    pub anon_key: Secret<String>,
}

impl FrontendConfig {
    /// Both relay settings are required; the page is useless without them.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let base_url = get_env("RELAY_BASE_URL", None)?;
        let anon_key = get_env("RELAY_ANON_KEY", None)?;

        Ok(Self {
            common,
            relay: RelaySettings::new(&base_url, &anon_key)?,
        })
    }
}

impl RelaySettings {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, AppError> {
        if base_url.trim().is_empty() || anon_key.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "RELAY_BASE_URL and RELAY_ANON_KEY must not be empty"
            )));
        }

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            anon_key: Secret::new(anon_key.to_string()),
        })
    }
}
