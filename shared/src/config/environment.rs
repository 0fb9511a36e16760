//! Deployment environment and log output settings
//!
//! The client is a terminal screen: stdout belongs to the user, so logs go to
//! stderr and stay quiet unless something needs attention.

use serde::{Deserialize, Serialize};
use std::env;

/// Variables consulted, in order, to pick the environment
const ENVIRONMENT_VARS: [&str; 2] = ["EM_ENV", "ENVIRONMENT"];

/// Which backend deployment the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local work against the in-process backend
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Environment named by `EM_ENV` or `ENVIRONMENT`; development when
    /// neither is set or the value is not recognised
    pub fn from_env() -> Self {
        Self::detect(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables read through `lookup`
    pub fn detect(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ENVIRONMENT_VARS
            .iter()
            .find_map(|name| lookup(name))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Optional TOML overlay read from the working directory
    pub fn config_file(&self) -> String {
        format!("config.{}.toml", self.name())
    }

    /// Dotenv file loaded before `.env`
    pub fn env_file(&self) -> String {
        format!(".env.{}", self.name())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// How log lines are rendered on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Machine-readable, one object per line
    Json,
    /// Multi-line, for reading a single session closely
    Pretty,
    /// One short line per event
    #[default]
    Compact,
}

/// Log output for the screen process
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Colour escape codes; only useful when stderr is a terminal
    #[serde(default)]
    pub ansi: bool,

    /// Prefix each line with file and line number
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            ansi: false,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Preset for `env`
    ///
    /// Development traces the verification crates so countdown ticks and
    /// backend calls are visible next to the prompt. Deployed builds log
    /// warnings only, as JSON, so they can be collected from stderr.
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("warn,em_core=debug,em_infra=debug,em_app=info"),
                format: LogFormat::Compact,
                ansi: true,
                source_location: true,
            },
            Environment::Staging => Self {
                level: String::from("info"),
                format: LogFormat::Json,
                ..Self::default()
            },
            Environment::Production => Self {
                format: LogFormat::Json,
                ..Self::default()
            },
        }
    }
}

fn default_level() -> String {
    String::from("warn")
}
