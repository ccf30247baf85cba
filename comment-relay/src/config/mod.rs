use secrecy::Secret;
use service_core::config::{self as core_config, get_env, get_optional_env};
use service_core::error::AppError;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Missing keys are not a startup error; each generate request is
    /// rejected as misconfigured instead.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    /// Unset means no client-side timeout on the upstream call.
    pub request_timeout_secs: Option<u64>,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let request_timeout_secs =
            parse_request_timeout(get_optional_env("GEMINI_REQUEST_TIMEOUT_SECS").as_deref())?;

        Ok(RelayConfig {
            common,
            gemini: GeminiSettings {
                api_key: get_optional_env("GEMINI_API_KEY").map(Secret::new),
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL))?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE))?,
                request_timeout_secs,
            },
        })
    }
}

fn parse_request_timeout(raw: Option<&str>) -> Result<Option<u64>, AppError> {
    raw.map(|raw| {
        raw.trim().parse::<u64>().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_REQUEST_TIMEOUT_SECS must be a whole number of seconds: {}",
                e
            ))
        })
    })
    .transpose()
}

impl GeminiSettings {
    pub fn new(api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            request_timeout_secs: None,
        }
    }
}
