use anyhow::{Context, Result};
use authenticator_mobile_core::{ApiHost, DEFAULT_API_HOST};
use std::{env, sync::OnceLock};

/// Default log filter of debug builds
pub const DEBUG_LOG_FILTER: &str = "authenticator_mobile=debug,authenticator_mobile_core=debug,info";
/// Default log filter of release builds
pub const RELEASE_LOG_FILTER: &str = "info";

/// Log filter used when `RUST_LOG` is not set
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        DEBUG_LOG_FILTER
    } else {
        RELEASE_LOG_FILTER
    }
}

/// Shell configuration loaded and validated at startup
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// API address the configuration form starts with
    pub api_host: String,
}

impl ShellConfig {
    /// Get or load the shell configuration
    ///
    /// Returns a reference to the cached configuration. On first call, it loads
    /// and validates the configuration from environment variables.
    pub fn get() -> Result<&'static Self> {
        static SHELL_CONFIG: OnceLock<ShellConfig> = OnceLock::new();

        if let Some(config) = SHELL_CONFIG.get() {
            return Ok(config);
        }

        let config = Self::from_env_value(env::var("API_HOST").ok())?;
        Ok(SHELL_CONFIG.get_or_init(|| config))
    }

    fn from_env_value(api_host: Option<String>) -> Result<Self> {
        let api_host = api_host.unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        let api_host = ApiHost::parse(&api_host)
            .with_context(|| format!("failed to parse API_HOST: invalid address '{api_host}'"))?;

        Ok(Self {
            api_host: api_host.to_string(),
        })
    }
}
