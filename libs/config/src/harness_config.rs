//! Harness Configuration Module
//!
//! Loads the settings of a conformance run in layers:
//! built-in defaults → optional TOML file → `CONFORMANCE_*` environment
//! variables. Command-line flags are applied on top by the runner.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Prefix of environment overrides, e.g. `CONFORMANCE_SUBTEST=signTestnet`
/// or `CONFORMANCE_CORE__URL=ws://127.0.0.1:21325`
pub const ENV_PREFIX: &str = "CONFORMANCE";

/// Keys read from the environment as comma-separated lists,
/// e.g. `CONFORMANCE_SUITES=SignMessage,NEMGetAddress`
const LIST_KEYS: &[&str] = &["suites"];

/// Which device-communication core implementation to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CoreBackend {
    /// In-process core replaying recorded responses
    #[default]
    Replay,
    /// Remote core reached through a WebSocket bridge
    WebSocket,
}

impl FromStr for CoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replay" => Ok(Self::Replay),
            "websocket" | "ws" => Ok(Self::WebSocket),
            other => Err(format!(
                "unknown core backend '{}' (expected 'replay' or 'websocket')",
                other
            )),
        }
    }
}

impl fmt::Display for CoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replay => f.write_str("replay"),
            Self::WebSocket => f.write_str("websocket"),
        }
    }
}

/// Settings handed to the core and its transport on initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreSettings {
    pub backend: CoreBackend,

    /// Bridge endpoint for the WebSocket backend
    pub url: String,

    pub connect_timeout_secs: u64,

    /// Ask the core for verbose diagnostics; sent with transport init
    pub debug: bool,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            backend: CoreBackend::Replay,
            url: "ws://127.0.0.1:21325/core".to_string(),
            connect_timeout_secs: 10,
            debug: false,
        }
    }
}

impl CoreSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Per-case limit on waiting for the response event
    pub case_timeout_secs: u64,

    /// Fixture partition to run; every subtest when unset
    pub subtest: Option<String>,

    /// Suites to run; every suite when empty
    pub suites: Vec<String>,

    /// JSON report destination
    pub output: Option<PathBuf>,

    pub log_level: String,

    pub core: CoreSettings,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            core: CoreSettings::default(),
            case_timeout_secs: 30,
            subtest: None,
            suites: Vec::new(),
            output: None,
            log_level: "info".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Load with the standard `CONFORMANCE` environment prefix
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Load defaults, then `path` (required when given), then environment
    /// variables under `prefix`
    pub fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = path {
            info!("Loading harness config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        let mut environment = Environment::with_prefix(prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",");
        for key in LIST_KEYS {
            environment = environment.with_list_parse_key(key);
        }
        builder = builder.add_source(environment);

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut loaded: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        loaded.expand_env_vars()?;

        debug!(?loaded, "Harness configuration loaded");
        Ok(loaded)
    }

    /// Expand `$VAR` / `${VAR}` references in the bridge URL and report path
    pub fn expand_env_vars(&mut self) -> Result<()> {
        self.core.url = shellexpand::env(&self.core.url)
            .context("Failed to expand core URL")?
            .into_owned();

        if let Some(output) = &self.output {
            let raw = output.to_string_lossy().into_owned();
            let expanded = shellexpand::env(&raw).context("Failed to expand output path")?;
            self.output = Some(PathBuf::from(expanded.as_ref()));
        }

        Ok(())
    }

    pub fn case_timeout(&self) -> Duration {
        Duration::from_secs(self.case_timeout_secs)
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }
}
