//! Configuration module with feature-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `backend` - Hosted auth backend endpoint and HTTP client settings
//! - `environment` - Environment detection and logging configuration
//! - `verification` - Email verification screen behaviour

pub mod backend;
pub mod environment;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

use crate::types::Language;

// Re-export commonly used types
pub use backend::{BackendConfig, BackendProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use verification::VerificationConfig;

/// Prefix for environment variable overrides, e.g. `EM__BACKEND__BASE_URL`
pub const ENV_PREFIX: &str = "EM";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Auth backend configuration
    pub backend: BackendConfig,

    /// Verification flow configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            backend: BackendConfig::mock(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            backend: BackendConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Preset for the given environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load configuration in layers from the process environment
    ///
    /// 1. Preset for the detected environment, with the language taken from
    ///    the `LANG` locale
    /// 2. Optional `config.<env>.toml` in the working directory
    /// 3. `EM__`-prefixed environment variables (`EM__VERIFICATION__LANGUAGE=zh`)
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(env::vars().collect())
    }

    /// [`load`](Self::load) with `vars` standing in for the process environment
    pub fn load_from(vars: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        let env = Environment::detect(|name| vars.get(name).cloned());
        let mut preset = Self::for_environment(env);
        if let Some(locale) = vars.get("LANG") {
            preset.verification.language = Language::from_locale(locale);
        }

        config::Config::builder()
            .add_source(config::Config::try_from(&preset)?)
            .add_source(
                config::File::new(&env.config_file(), config::FileFormat::Toml).required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(Some(vars)),
            )
            .build()?
            .try_deserialize()
    }
}
